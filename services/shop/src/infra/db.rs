use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionError,
    TransactionTrait, sea_query::Expr,
};

use pizzeria_domain::order::OrderStatus;
use pizzeria_domain::role::Role;
use pizzeria_shop_schema::{
    customer, delivery_person, discount_code, discount_usage, extra_item, ingredient,
    order_extra_item, order_pizza, orders, pizza, pizza_ingredient, user,
};

use crate::domain::repository::{
    DeliveryRepository, DiscountCodeRepository, ExtraItemRepository, IngredientRepository,
    OrderRepository, PizzaRepository, UserRepository,
};
use crate::domain::types::{
    ClosedBy, Cooldown, Customer, DeliveryPerson, DiscountCode, ExtraItem, ExtraLine, Ingredient,
    NewCustomer, NewDeliveryPerson, NewDiscountCode, NewExtraItem, NewIngredient, NewOrder,
    NewUser, Order, OrderDetails, OrderSummary, Pizza, PizzaLine, User, UserSummary,
    check_assignable, check_closable,
};
use crate::error::ShopServiceError;

fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

/// Map a unique-key violation to `conflict`, anything else to an internal error.
fn unique_or_internal(err: DbErr, conflict: ShopServiceError, what: &'static str) -> ShopServiceError {
    conflict_or_internal(err.sql_err(), err, conflict, what)
}

fn conflict_or_internal(
    kind: Option<SqlErr>,
    err: DbErr,
    conflict: ShopServiceError,
    what: &'static str,
) -> ShopServiceError {
    match kind {
        Some(SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => ShopServiceError::Internal(anyhow::Error::new(err).context(what)),
    }
}

fn tx_unique_or_internal(
    err: TransactionError<DbErr>,
    conflict: ShopServiceError,
    what: &'static str,
) -> ShopServiceError {
    match err {
        TransactionError::Transaction(e) => unique_or_internal(e, conflict, what),
        other => ShopServiceError::Internal(anyhow::Error::new(other).context(what)),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

fn new_user_model(user: &NewUser) -> user::ActiveModel {
    user::ActiveModel {
        username: Set(user.username.clone()),
        password_hash: Set(user.password_hash.clone()),
        salt: Set(user.salt.clone()),
        role: Set(user.role.as_str().to_owned()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ShopServiceError> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ShopServiceError> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn create_customer(
        &self,
        user: &NewUser,
        customer: &NewCustomer,
    ) -> Result<i32, ShopServiceError> {
        self.db
            .transaction::<_, i32, DbErr>(|txn| {
                let user = new_user_model(user);
                let customer = customer.clone();
                Box::pin(async move {
                    let user = user.insert(txn).await?;
                    customer::ActiveModel {
                        user_id: Set(user.id),
                        name: Set(customer.name),
                        gender: Set(customer.gender),
                        birth_date: Set(customer.birth_date),
                        address: Set(customer.address),
                        postal_code: Set(customer.postal_code),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Ok(user.id)
                })
            })
            .await
            .map_err(|e| tx_unique_or_internal(e, ShopServiceError::UsernameTaken, "create customer"))
    }

    async fn create_delivery_person(
        &self,
        user: &NewUser,
        person: &NewDeliveryPerson,
    ) -> Result<i32, ShopServiceError> {
        self.db
            .transaction::<_, i32, DbErr>(|txn| {
                let user = new_user_model(user);
                let person = person.clone();
                Box::pin(async move {
                    let user = user.insert(txn).await?;
                    delivery_person::ActiveModel {
                        user_id: Set(user.id),
                        name: Set(person.name),
                        vehicle_type: Set(person.vehicle_type),
                        unavailable_until: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Ok(user.id)
                })
            })
            .await
            .map_err(|e| {
                tx_unique_or_internal(e, ShopServiceError::UsernameTaken, "create delivery person")
            })
    }

    async fn create_admin(&self, user: &NewUser) -> Result<i32, ShopServiceError> {
        let model = new_user_model(user)
            .insert(&self.db)
            .await
            .map_err(|e| unique_or_internal(e, ShopServiceError::UsernameTaken, "create admin"))?;
        Ok(model.id)
    }

    async fn list_non_admin(&self) -> Result<Vec<UserSummary>, ShopServiceError> {
        let users = user::Entity::find()
            .filter(user::Column::Role.ne(Role::Admin.as_str()))
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(&self.db)
            .await
            .context("list non-admin users")?;
        let ids: Vec<i32> = users.iter().map(|u| u.id).collect();

        let mut customers: HashMap<i32, Customer> = customer::Entity::find()
            .filter(customer::Column::UserId.is_in(ids.clone()))
            .all(&self.db)
            .await
            .context("list customer profiles")?
            .into_iter()
            .map(|m| (m.user_id, customer_from_model(m)))
            .collect();
        let mut persons: HashMap<i32, DeliveryPerson> = delivery_person::Entity::find()
            .filter(delivery_person::Column::UserId.is_in(ids))
            .all(&self.db)
            .await
            .context("list delivery profiles")?
            .into_iter()
            .map(|m| (m.user_id, delivery_person_from_model(m)))
            .collect();

        users
            .into_iter()
            .map(|m| {
                let id = m.id;
                let user = user_from_model(m)?;
                Ok(UserSummary {
                    id,
                    username: user.username,
                    role: user.role,
                    created_at: user.created_at,
                    customer: customers.remove(&id),
                    delivery_person: persons.remove(&id),
                })
            })
            .collect()
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let txn = self.db.begin().await.context("begin delete user")?;

        let customer = customer::Entity::find()
            .filter(customer::Column::UserId.eq(id))
            .one(&txn)
            .await
            .context("find customer for delete")?;
        if let Some(customer) = customer {
            orders::Entity::delete_many()
                .filter(orders::Column::CustomerId.eq(customer.id))
                .exec(&txn)
                .await
                .context("delete customer orders")?;
        }

        let person = delivery_person::Entity::find()
            .filter(delivery_person::Column::UserId.eq(id))
            .one(&txn)
            .await
            .context("find delivery person for delete")?;
        if let Some(person) = person {
            orders::Entity::update_many()
                .col_expr(orders::Column::Status, Expr::value(OrderStatus::InProgress.as_str()))
                .filter(orders::Column::DeliveryPersonId.eq(person.id))
                .filter(orders::Column::Status.eq(OrderStatus::OutForDelivery.as_str()))
                .exec(&txn)
                .await
                .context("return deliveries to kitchen")?;
            orders::Entity::update_many()
                .col_expr(orders::Column::DeliveryPersonId, Expr::value(Option::<i32>::None))
                .filter(orders::Column::DeliveryPersonId.eq(person.id))
                .exec(&txn)
                .await
                .context("unassign deliveries")?;
        }

        let result = user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete user")?;
        if result.rows_affected == 0 {
            return Err(ShopServiceError::UserNotFound);
        }
        txn.commit().await.context("commit delete user")?;
        Ok(())
    }

    async fn find_customer_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<Customer>, ShopServiceError> {
        let model = customer::Entity::find()
            .filter(customer::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find customer by user id")?;
        Ok(model.map(customer_from_model))
    }

    async fn find_delivery_person_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<DeliveryPerson>, ShopServiceError> {
        let model = delivery_person::Entity::find()
            .filter(delivery_person::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find delivery person by user id")?;
        Ok(model.map(delivery_person_from_model))
    }

    async fn find_delivery_person(
        &self,
        id: i32,
    ) -> Result<Option<DeliveryPerson>, ShopServiceError> {
        let model = delivery_person::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find delivery person")?;
        Ok(model.map(delivery_person_from_model))
    }

    async fn list_delivery_persons(&self) -> Result<Vec<DeliveryPerson>, ShopServiceError> {
        let models = delivery_person::Entity::find()
            .order_by_asc(delivery_person::Column::Name)
            .all(&self.db)
            .await
            .context("list delivery persons")?;
        Ok(models.into_iter().map(delivery_person_from_model).collect())
    }
}

fn user_from_model(model: user::Model) -> Result<User, ShopServiceError> {
    Ok(User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        salt: model.salt,
        role: model.role.parse().context("parse user role")?,
        created_at: model.created_at,
    })
}

fn customer_from_model(model: customer::Model) -> Customer {
    Customer {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        gender: model.gender,
        birth_date: model.birth_date,
        address: model.address,
        postal_code: model.postal_code,
    }
}

fn delivery_person_from_model(model: delivery_person::Model) -> DeliveryPerson {
    DeliveryPerson {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        vehicle_type: model.vehicle_type,
        unavailable_until: model.unavailable_until,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(&self) -> Result<Vec<Ingredient>, ShopServiceError> {
        let models = ingredient::Entity::find()
            .order_by_asc(ingredient::Column::Name)
            .all(&self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Ingredient>, ShopServiceError> {
        let models = ingredient::Entity::find()
            .filter(ingredient::Column::Name.is_in(names.iter().cloned()))
            .all(&self.db)
            .await
            .context("find ingredients by name")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn create(&self, new: &NewIngredient) -> Result<Ingredient, ShopServiceError> {
        let model = ingredient::ActiveModel {
            name: Set(new.name.clone()),
            cost: Set(new.cost),
            has_meat: Set(new.has_meat),
            has_animal_products: Set(new.has_animal_products),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            unique_or_internal(e, ShopServiceError::IngredientAlreadyExists, "create ingredient")
        })?;
        Ok(ingredient_from_model(model))
    }

    async fn update(&self, item: &Ingredient) -> Result<(), ShopServiceError> {
        let result = ingredient::ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            cost: Set(item.cost),
            has_meat: Set(item.has_meat),
            has_animal_products: Set(item.has_animal_products),
        }
        .update(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ShopServiceError::IngredientNotFound),
            Err(e) => Err(unique_or_internal(
                e,
                ShopServiceError::IngredientAlreadyExists,
                "update ingredient",
            )),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let in_use = pizza_ingredient::Entity::find()
            .filter(pizza_ingredient::Column::IngredientId.eq(id))
            .count(&self.db)
            .await
            .context("count ingredient usage")?;
        if in_use > 0 {
            return Err(ShopServiceError::IngredientInUse);
        }
        let result = ingredient::Entity::delete_by_id(id).exec(&self.db).await;
        match result {
            Ok(r) if r.rows_affected == 0 => Err(ShopServiceError::IngredientNotFound),
            Ok(_) => Ok(()),
            Err(e) if is_foreign_key_violation(&e) => Err(ShopServiceError::IngredientInUse),
            Err(e) => Err(anyhow::Error::new(e).context("delete ingredient").into()),
        }
    }
}

fn ingredient_from_model(model: ingredient::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        cost: model.cost,
        has_meat: model.has_meat,
        has_animal_products: model.has_animal_products,
    }
}

// ── Pizza repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPizzaRepository {
    pub db: DatabaseConnection,
}

/// Attach ingredients, in recipe order, to each pizza row.
async fn load_pizzas<C: ConnectionTrait>(
    db: &C,
    models: Vec<pizza::Model>,
) -> Result<Vec<Pizza>, ShopServiceError> {
    let ids: Vec<i32> = models.iter().map(|p| p.id).collect();
    let rows = pizza_ingredient::Entity::find()
        .filter(pizza_ingredient::Column::PizzaId.is_in(ids))
        .order_by_asc(pizza_ingredient::Column::PizzaId)
        .order_by_asc(pizza_ingredient::Column::Position)
        .find_also_related(ingredient::Entity)
        .all(db)
        .await
        .context("load pizza ingredients")?;

    let mut by_pizza: HashMap<i32, Vec<Ingredient>> = HashMap::new();
    for (link, ingredient) in rows {
        if let Some(ingredient) = ingredient {
            by_pizza
                .entry(link.pizza_id)
                .or_default()
                .push(ingredient_from_model(ingredient));
        }
    }
    Ok(models
        .into_iter()
        .map(|p| Pizza {
            ingredients: by_pizza.remove(&p.id).unwrap_or_default(),
            id: p.id,
            name: p.name,
        })
        .collect())
}

impl PizzaRepository for DbPizzaRepository {
    async fn list(&self) -> Result<Vec<Pizza>, ShopServiceError> {
        let models = pizza::Entity::find()
            .order_by_asc(pizza::Column::Name)
            .all(&self.db)
            .await
            .context("list pizzas")?;
        load_pizzas(&self.db, models).await
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Pizza>, ShopServiceError> {
        let models = pizza::Entity::find()
            .filter(pizza::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find pizzas by id")?;
        load_pizzas(&self.db, models).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Pizza>, ShopServiceError> {
        let model = pizza::Entity::find()
            .filter(pizza::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find pizza by name")?;
        let pizzas = load_pizzas(&self.db, model.into_iter().collect()).await?;
        Ok(pizzas.into_iter().next())
    }

    async fn create(&self, name: &str, ingredient_ids: &[i32]) -> Result<i32, ShopServiceError> {
        self.db
            .transaction::<_, i32, DbErr>(|txn| {
                let name = name.to_owned();
                let ingredient_ids = ingredient_ids.to_vec();
                Box::pin(async move {
                    let pizza = pizza::ActiveModel {
                        name: Set(name),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    for (position, ingredient_id) in ingredient_ids.into_iter().enumerate() {
                        pizza_ingredient::ActiveModel {
                            pizza_id: Set(pizza.id),
                            ingredient_id: Set(ingredient_id),
                            position: Set(position as i32),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(pizza.id)
                })
            })
            .await
            .map_err(|e| tx_unique_or_internal(e, ShopServiceError::PizzaAlreadyExists, "create pizza"))
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let result = pizza::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete pizza")?;
        if result.rows_affected == 0 {
            return Err(ShopServiceError::PizzaNotFound);
        }
        Ok(())
    }
}

// ── Extra item repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbExtraItemRepository {
    pub db: DatabaseConnection,
}

impl ExtraItemRepository for DbExtraItemRepository {
    async fn list(&self) -> Result<Vec<ExtraItem>, ShopServiceError> {
        let models = extra_item::Entity::find()
            .order_by_asc(extra_item::Column::Category)
            .order_by_asc(extra_item::Column::Name)
            .all(&self.db)
            .await
            .context("list extra items")?;
        models.into_iter().map(extra_item_from_model).collect()
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ExtraItem>, ShopServiceError> {
        let models = extra_item::Entity::find()
            .filter(extra_item::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find extra items by id")?;
        models.into_iter().map(extra_item_from_model).collect()
    }

    async fn cheapest_drink(&self) -> Result<Option<ExtraItem>, ShopServiceError> {
        let model = extra_item::Entity::find()
            .filter(extra_item::Column::Category.eq("drink"))
            .order_by_asc(extra_item::Column::Price)
            .order_by_asc(extra_item::Column::Id)
            .one(&self.db)
            .await
            .context("find cheapest drink")?;
        model.map(extra_item_from_model).transpose()
    }

    async fn create(&self, item: &NewExtraItem) -> Result<ExtraItem, ShopServiceError> {
        let model = extra_item::ActiveModel {
            name: Set(item.name.clone()),
            category: Set(item.category.as_str().to_owned()),
            price: Set(item.price),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create extra item")?;
        extra_item_from_model(model)
    }

    async fn update(&self, item: &ExtraItem) -> Result<(), ShopServiceError> {
        let result = extra_item::ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            category: Set(item.category.as_str().to_owned()),
            price: Set(item.price),
        }
        .update(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ShopServiceError::ExtraItemNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update extra item").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let result = extra_item::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete extra item")?;
        if result.rows_affected == 0 {
            return Err(ShopServiceError::ExtraItemNotFound);
        }
        Ok(())
    }
}

fn extra_item_from_model(model: extra_item::Model) -> Result<ExtraItem, ShopServiceError> {
    Ok(ExtraItem {
        id: model.id,
        name: model.name,
        category: model.category.parse().context("parse extra item category")?,
        price: model.price,
    })
}

// ── Discount code repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDiscountCodeRepository {
    pub db: DatabaseConnection,
}

impl DiscountCodeRepository for DbDiscountCodeRepository {
    async fn list(&self) -> Result<Vec<DiscountCode>, ShopServiceError> {
        let models = discount_code::Entity::find()
            .order_by_asc(discount_code::Column::Code)
            .all(&self.db)
            .await
            .context("list discount codes")?;
        Ok(models.into_iter().map(discount_code_from_model).collect())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<DiscountCode>, ShopServiceError> {
        let model = discount_code::Entity::find()
            .filter(discount_code::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find discount code")?;
        Ok(model.map(discount_code_from_model))
    }

    async fn create(&self, code: &NewDiscountCode) -> Result<DiscountCode, ShopServiceError> {
        let model = discount_code::ActiveModel {
            code: Set(code.code.clone()),
            discount_percentage: Set(code.discount_percentage),
            is_active: Set(code.is_active),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            unique_or_internal(e, ShopServiceError::DiscountCodeAlreadyExists, "create discount code")
        })?;
        Ok(discount_code_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        discount_percentage: i32,
        is_active: bool,
    ) -> Result<(), ShopServiceError> {
        let result = discount_code::ActiveModel {
            id: Set(id),
            discount_percentage: Set(discount_percentage),
            is_active: Set(is_active),
            ..Default::default()
        }
        .update(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ShopServiceError::DiscountCodeNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update discount code").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let result = discount_code::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete discount code")?;
        if result.rows_affected == 0 {
            return Err(ShopServiceError::DiscountCodeNotFound);
        }
        Ok(())
    }

    async fn is_used_by(&self, user_id: i32, code_id: i32) -> Result<bool, ShopServiceError> {
        let count = discount_usage::Entity::find()
            .filter(discount_usage::Column::UserId.eq(user_id))
            .filter(discount_usage::Column::DiscountCodeId.eq(code_id))
            .count(&self.db)
            .await
            .context("count discount usage")?;
        Ok(count > 0)
    }
}

fn discount_code_from_model(model: discount_code::Model) -> DiscountCode {
    DiscountCode {
        id: model.id,
        code: model.code,
        discount_percentage: model.discount_percentage,
        is_active: model.is_active,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

fn order_from_model(model: orders::Model) -> Result<Order, ShopServiceError> {
    Ok(Order {
        id: model.id,
        customer_id: model.customer_id,
        delivery_address: model.delivery_address,
        postal_code: model.postal_code,
        status: model.status.parse().context("parse order status")?,
        created_at: model.created_at,
        discount_code_id: model.discount_code_id,
        delivery_person_id: model.delivery_person_id,
    })
}

/// Join order rows with the customer, discount code and delivery person names.
async fn summarize<C: ConnectionTrait>(
    db: &C,
    models: Vec<orders::Model>,
) -> Result<Vec<OrderSummary>, ShopServiceError> {
    let customer_ids: Vec<i32> = models.iter().map(|o| o.customer_id).collect();
    let code_ids: Vec<i32> = models.iter().filter_map(|o| o.discount_code_id).collect();
    let person_ids: Vec<i32> = models.iter().filter_map(|o| o.delivery_person_id).collect();

    let customers: HashMap<i32, String> = customer::Entity::find()
        .filter(customer::Column::Id.is_in(customer_ids))
        .all(db)
        .await
        .context("load order customers")?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let codes: HashMap<i32, discount_code::Model> = discount_code::Entity::find()
        .filter(discount_code::Column::Id.is_in(code_ids))
        .all(db)
        .await
        .context("load order discount codes")?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let persons: HashMap<i32, String> = delivery_person::Entity::find()
        .filter(delivery_person::Column::Id.is_in(person_ids))
        .all(db)
        .await
        .context("load order delivery persons")?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();

    models
        .into_iter()
        .map(|model| {
            let order = order_from_model(model)?;
            let code = order.discount_code_id.and_then(|id| codes.get(&id));
            Ok(OrderSummary {
                customer_name: customers.get(&order.customer_id).cloned().unwrap_or_default(),
                discount_code: code.map(|c| c.code.clone()),
                discount_percentage: code.map(|c| c.discount_percentage),
                delivery_person_name: order
                    .delivery_person_id
                    .and_then(|id| persons.get(&id).cloned()),
                order,
            })
        })
        .collect()
}

impl OrderRepository for DbOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<i32, ShopServiceError> {
        let txn = self.db.begin().await.context("begin create order")?;

        let inserted = orders::ActiveModel {
            customer_id: Set(order.customer_id),
            delivery_address: Set(order.delivery_address.clone()),
            postal_code: Set(order.postal_code.clone()),
            status: Set(OrderStatus::InProgress.as_str().to_owned()),
            created_at: Set(Utc::now()),
            discount_code_id: Set(order.discount_code_id),
            delivery_person_id: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("insert order")?;

        for line in order.pizzas.iter().filter(|l| l.quantity > 0) {
            order_pizza::ActiveModel {
                order_id: Set(inserted.id),
                pizza_id: Set(line.pizza_id),
                quantity: Set(line.quantity),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .context("insert order pizza")?;
        }
        for line in &order.extras {
            order_extra_item::ActiveModel {
                order_id: Set(inserted.id),
                extra_item_id: Set(line.extra_item_id),
                quantity: Set(line.quantity),
                is_free: Set(line.is_free),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .context("insert order extra item")?;
        }

        if let Some(code_id) = order.discount_code_id {
            discount_usage::ActiveModel {
                user_id: Set(order.user_id),
                discount_code_id: Set(code_id),
                used_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                unique_or_internal(e, ShopServiceError::DiscountAlreadyUsed, "record discount usage")
            })?;
        }

        txn.commit().await.context("commit create order")?;
        Ok(inserted.id)
    }

    async fn list_for_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<OrderSummary>, ShopServiceError> {
        let models = orders::Entity::find()
            .filter(orders::Column::CustomerId.eq(customer_id))
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(&self.db)
            .await
            .context("list customer orders")?;
        summarize(&self.db, models).await
    }

    async fn list_all(&self) -> Result<Vec<OrderSummary>, ShopServiceError> {
        let models = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(&self.db)
            .await
            .context("list orders")?;
        summarize(&self.db, models).await
    }

    async fn find_details(&self, id: i32) -> Result<Option<OrderDetails>, ShopServiceError> {
        let Some(model) = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order")?
        else {
            return Ok(None);
        };
        let order = order_from_model(model)?;

        let customer_user_id = customer::Entity::find_by_id(order.customer_id)
            .one(&self.db)
            .await
            .context("find order customer")?
            .map(|c| c.user_id)
            .unwrap_or_default();

        let pizza_rows = order_pizza::Entity::find()
            .filter(order_pizza::Column::OrderId.eq(id))
            .order_by_asc(order_pizza::Column::Id)
            .all(&self.db)
            .await
            .context("load order pizzas")?;
        let pizza_models = pizza::Entity::find()
            .filter(pizza::Column::Id.is_in(pizza_rows.iter().map(|r| r.pizza_id)))
            .all(&self.db)
            .await
            .context("load ordered pizzas")?;
        let pizzas: HashMap<i32, Pizza> = load_pizzas(&self.db, pizza_models)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let extra_rows = order_extra_item::Entity::find()
            .filter(order_extra_item::Column::OrderId.eq(id))
            .order_by_asc(order_extra_item::Column::Id)
            .find_also_related(extra_item::Entity)
            .all(&self.db)
            .await
            .context("load order extra items")?;

        let discount = match order.discount_code_id {
            Some(code_id) => discount_code::Entity::find_by_id(code_id)
                .one(&self.db)
                .await
                .context("load order discount code")?
                .map(discount_code_from_model),
            None => None,
        };

        let mut extras = Vec::with_capacity(extra_rows.len());
        for (line, item) in extra_rows {
            if let Some(item) = item {
                extras.push(ExtraLine {
                    item: extra_item_from_model(item)?,
                    quantity: line.quantity,
                    is_free: line.is_free,
                });
            }
        }

        Ok(Some(OrderDetails {
            order,
            customer_user_id,
            pizzas: pizza_rows
                .into_iter()
                .filter_map(|row| {
                    pizzas.get(&row.pizza_id).map(|pizza| PizzaLine {
                        pizza: pizza.clone(),
                        quantity: row.quantity,
                    })
                })
                .collect(),
            extras,
            discount,
        }))
    }

    async fn set_status(&self, id: i32, status: OrderStatus) -> Result<(), ShopServiceError> {
        let result = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(status.as_str()))
            .filter(orders::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set order status")?;
        if result.rows_affected == 0 {
            return Err(ShopServiceError::OrderNotFound);
        }
        Ok(())
    }

    async fn unassign(&self, id: i32) -> Result<(), ShopServiceError> {
        let txn = self.db.begin().await.context("begin unassign")?;
        let exists = orders::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock order for unassign")?;
        if exists.is_none() {
            return Err(ShopServiceError::OrderNotFound);
        }
        orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(OrderStatus::InProgress.as_str()))
            .filter(orders::Column::Id.eq(id))
            .filter(orders::Column::Status.eq(OrderStatus::OutForDelivery.as_str()))
            .exec(&txn)
            .await
            .context("return order to kitchen")?;
        orders::Entity::update_many()
            .col_expr(orders::Column::DeliveryPersonId, Expr::value(Option::<i32>::None))
            .filter(orders::Column::Id.eq(id))
            .exec(&txn)
            .await
            .context("clear delivery person")?;
        txn.commit().await.context("commit unassign")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let result = orders::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete order")?;
        if result.rows_affected == 0 {
            return Err(ShopServiceError::OrderNotFound);
        }
        Ok(())
    }
}

// ── Delivery repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDeliveryRepository {
    pub db: DatabaseConnection,
}

impl DeliveryRepository for DbDeliveryRepository {
    async fn assign(
        &self,
        order_id: i32,
        delivery_person_id: i32,
        now: DateTime<Utc>,
    ) -> Result<(), ShopServiceError> {
        let txn = self.db.begin().await.context("begin assign delivery")?;

        let order = orders::Entity::find_by_id(order_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock order")?
            .ok_or(ShopServiceError::OrderNotFound)?;
        let order = order_from_model(order)?;
        let person = delivery_person::Entity::find_by_id(delivery_person_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock delivery person")?
            .map(delivery_person_from_model);
        let active = orders::Entity::find()
            .filter(orders::Column::DeliveryPersonId.eq(delivery_person_id))
            .filter(orders::Column::Status.is_in([
                OrderStatus::InProgress.as_str(),
                OrderStatus::OutForDelivery.as_str(),
            ]))
            .count(&txn)
            .await
            .context("count active deliveries")?;

        check_assignable(&order, person.as_ref(), active > 0, now)?;

        orders::Entity::update_many()
            .col_expr(orders::Column::DeliveryPersonId, Expr::value(delivery_person_id))
            .col_expr(orders::Column::Status, Expr::value(OrderStatus::OutForDelivery.as_str()))
            .filter(orders::Column::Id.eq(order_id))
            .exec(&txn)
            .await
            .context("assign delivery")?;
        txn.commit().await.context("commit assign delivery")?;
        Ok(())
    }

    async fn finish(
        &self,
        order_id: i32,
        status: OrderStatus,
        cooldown: Cooldown,
        by: ClosedBy,
    ) -> Result<(), ShopServiceError> {
        let txn = self.db.begin().await.context("begin finish delivery")?;

        let order = orders::Entity::find_by_id(order_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock order")?
            .ok_or(ShopServiceError::OrderNotFound)?;
        let order = order_from_model(order)?;
        check_closable(&order, by)?;

        orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(status.as_str()))
            .filter(orders::Column::Id.eq(order_id))
            .exec(&txn)
            .await
            .context("set final status")?;
        if let Some(person_id) = order.delivery_person_id {
            delivery_person::Entity::update_many()
                .col_expr(
                    delivery_person::Column::UnavailableUntil,
                    Expr::value(cooldown.unavailable_until()),
                )
                .filter(delivery_person::Column::Id.eq(person_id))
                .exec(&txn)
                .await
                .context("set delivery cooldown")?;
        }
        txn.commit().await.context("commit finish delivery")?;
        Ok(())
    }

    async fn list_available(&self) -> Result<Vec<OrderSummary>, ShopServiceError> {
        let models = orders::Entity::find()
            .filter(orders::Column::Status.eq(OrderStatus::InProgress.as_str()))
            .filter(orders::Column::DeliveryPersonId.is_null())
            .order_by_asc(orders::Column::CreatedAt)
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await
            .context("list available deliveries")?;
        summarize(&self.db, models).await
    }

    async fn list_assigned(
        &self,
        delivery_person_id: i32,
    ) -> Result<Vec<OrderSummary>, ShopServiceError> {
        let models = orders::Entity::find()
            .filter(orders::Column::DeliveryPersonId.eq(delivery_person_id))
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(&self.db)
            .await
            .context("list assigned deliveries")?;
        summarize(&self.db, models).await
    }
}
