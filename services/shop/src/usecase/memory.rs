//! In-memory repositories for use-case tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use pizzeria_auth_types::password::PasswordHasher;
use pizzeria_domain::catalog::ExtraItemCategory;
use pizzeria_domain::order::OrderStatus;
use pizzeria_domain::role::Role;

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

pub fn test_hasher() -> PasswordHasher {
    PasswordHasher::new("test-pepper").with_cost(4)
}

#[derive(Default)]
pub struct Store {
    next_id: i32,
    users: Vec<User>,
    customers: Vec<Customer>,
    delivery_persons: Vec<DeliveryPerson>,
    ingredients: Vec<Ingredient>,
    pizzas: Vec<(i32, String, Vec<i32>)>,
    extras: Vec<ExtraItem>,
    codes: Vec<DiscountCode>,
    usages: Vec<(i32, i32)>,
    orders: Vec<Order>,
    order_pizzas: Vec<(i32, i32, i32)>,
    order_extras: Vec<(i32, i32, i32, bool)>,
}

impl Store {
    fn id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_user(&mut self, user: &NewUser) -> Result<i32, ShopServiceError> {
        if self.users.iter().any(|u| u.username == user.username) {
            return Err(ShopServiceError::UsernameTaken);
        }
        let id = self.id();
        self.users.push(User {
            id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            salt: user.salt.clone(),
            role: user.role,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    fn pizza(&self, id: i32) -> Option<Pizza> {
        let (id, name, ingredient_ids) = self.pizzas.iter().find(|p| p.0 == id)?;
        let ingredients = ingredient_ids
            .iter()
            .filter_map(|iid| self.ingredients.iter().find(|i| i.id == *iid).cloned())
            .collect();
        Some(Pizza {
            id: *id,
            name: name.clone(),
            ingredients,
        })
    }

    fn summary(&self, order: &Order) -> OrderSummary {
        let code = order
            .discount_code_id
            .and_then(|id| self.codes.iter().find(|c| c.id == id));
        OrderSummary {
            order: order.clone(),
            customer_name: self
                .customers
                .iter()
                .find(|c| c.id == order.customer_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            discount_code: code.map(|c| c.code.clone()),
            discount_percentage: code.map(|c| c.discount_percentage),
            delivery_person_name: order
                .delivery_person_id
                .and_then(|id| self.delivery_persons.iter().find(|d| d.id == id))
                .map(|d| d.name.clone()),
        }
    }

    fn summaries<F>(&self, keep: F, newest_first: bool) -> Vec<OrderSummary>
    where
        F: Fn(&Order) -> bool,
    {
        let mut orders: Vec<&Order> = self.orders.iter().filter(|o| keep(*o)).collect();
        orders.sort_by_key(|o| (o.created_at, o.id));
        if newest_first {
            orders.reverse();
        }
        orders.into_iter().map(|o| self.summary(o)).collect()
    }

    fn remove_order(&mut self, id: i32) {
        self.orders.retain(|o| o.id != id);
        self.order_pizzas.retain(|l| l.0 != id);
        self.order_extras.retain(|l| l.0 != id);
    }
}

/// Every repository trait over one shared store, so use cases see each other's writes.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    store: Arc<Mutex<Store>>,
}

impl MemoryRepo {
    pub fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }

    pub fn order(&self, id: i32) -> Option<Order> {
        self.lock().orders.iter().find(|o| o.id == id).cloned()
    }

    pub fn order_lines(&self, id: i32) -> (Vec<(i32, i32)>, Vec<(i32, i32, bool)>) {
        let store = self.lock();
        let pizzas = store
            .order_pizzas
            .iter()
            .filter(|l| l.0 == id)
            .map(|l| (l.1, l.2))
            .collect();
        let extras = store
            .order_extras
            .iter()
            .filter(|l| l.0 == id)
            .map(|l| (l.1, l.2, l.3))
            .collect();
        (pizzas, extras)
    }

    pub fn set_cooldown(&self, delivery_person_id: i32, until: Option<DateTime<Utc>>) {
        if let Some(person) = self
            .lock()
            .delivery_persons
            .iter_mut()
            .find(|d| d.id == delivery_person_id)
        {
            person.unavailable_until = until;
        }
    }

    pub fn set_ingredient_cost(&self, id: i32, cost: Decimal) {
        if let Some(ingredient) = self.lock().ingredients.iter_mut().find(|i| i.id == id) {
            ingredient.cost = cost;
        }
    }

    // ── Seeding helpers ──────────────────────────────────────────────────────

    pub async fn seed_customer(&self, username: &str, birth_date: Option<NaiveDate>) -> (User, Customer) {
        let user_id = self
            .create_customer(
                &new_user(username, Role::Customer),
                &NewCustomer {
                    name: format!("{username} name"),
                    gender: "X".into(),
                    birth_date,
                    address: "Main St 1".into(),
                    postal_code: "1234AB".into(),
                },
            )
            .await
            .unwrap();
        let user = self.find_by_id(user_id).await.unwrap().unwrap();
        let customer = self.find_customer_by_user_id(user_id).await.unwrap().unwrap();
        (user, customer)
    }

    pub async fn seed_delivery_person(&self, username: &str) -> (User, DeliveryPerson) {
        let user_id = self
            .create_delivery_person(
                &new_user(username, Role::Delivery),
                &NewDeliveryPerson {
                    name: format!("{username} name"),
                    vehicle_type: "bike".into(),
                },
            )
            .await
            .unwrap();
        let user = self.find_by_id(user_id).await.unwrap().unwrap();
        let person = self.find_delivery_person_by_user_id(user_id).await.unwrap().unwrap();
        (user, person)
    }

    pub async fn seed_admin(&self, username: &str) -> User {
        let id = self.create_admin(&new_user(username, Role::Admin)).await.unwrap();
        self.find_by_id(id).await.unwrap().unwrap()
    }

    pub async fn seed_ingredient(&self, name: &str, cost_cents: i64, has_meat: bool) -> Ingredient {
        IngredientRepository::create(
            self,
            &NewIngredient {
                name: name.into(),
                cost: Decimal::new(cost_cents, 2),
                has_meat,
                has_animal_products: has_meat,
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_pizza(&self, name: &str, ingredients: &[&Ingredient]) -> Pizza {
        let ids: Vec<i32> = ingredients.iter().map(|i| i.id).collect();
        let id = PizzaRepository::create(self, name, &ids).await.unwrap();
        self.lock().pizza(id).unwrap()
    }

    pub async fn seed_extra(&self, name: &str, category: ExtraItemCategory, price_cents: i64) -> ExtraItem {
        ExtraItemRepository::create(
            self,
            &NewExtraItem {
                name: name.into(),
                category,
                price: Decimal::new(price_cents, 2),
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_code(&self, code: &str, percentage: i32, is_active: bool) -> DiscountCode {
        DiscountCodeRepository::create(
            self,
            &NewDiscountCode {
                code: code.into(),
                discount_percentage: percentage,
                is_active,
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_order(&self, customer: &Customer) -> i32 {
        OrderRepository::create(
            self,
            &NewOrder {
                customer_id: customer.id,
                user_id: customer.user_id,
                delivery_address: customer.address.clone(),
                postal_code: customer.postal_code.clone(),
                pizzas: vec![],
                extras: vec![],
                discount_code_id: None,
            },
        )
        .await
        .unwrap()
    }
}

fn new_user(username: &str, role: Role) -> NewUser {
    let hashed = test_hasher().hash("password").unwrap();
    NewUser {
        username: username.into(),
        password_hash: hashed.hash,
        salt: hashed.salt,
        role,
    }
}

impl UserRepository for MemoryRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ShopServiceError> {
        Ok(self.lock().users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ShopServiceError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_customer(
        &self,
        user: &NewUser,
        customer: &NewCustomer,
    ) -> Result<i32, ShopServiceError> {
        let mut store = self.lock();
        let user_id = store.insert_user(user)?;
        let id = store.id();
        store.customers.push(Customer {
            id,
            user_id,
            name: customer.name.clone(),
            gender: customer.gender.clone(),
            birth_date: customer.birth_date,
            address: customer.address.clone(),
            postal_code: customer.postal_code.clone(),
        });
        Ok(user_id)
    }

    async fn create_delivery_person(
        &self,
        user: &NewUser,
        person: &NewDeliveryPerson,
    ) -> Result<i32, ShopServiceError> {
        let mut store = self.lock();
        let user_id = store.insert_user(user)?;
        let id = store.id();
        store.delivery_persons.push(DeliveryPerson {
            id,
            user_id,
            name: person.name.clone(),
            vehicle_type: person.vehicle_type.clone(),
            unavailable_until: None,
        });
        Ok(user_id)
    }

    async fn create_admin(&self, user: &NewUser) -> Result<i32, ShopServiceError> {
        self.lock().insert_user(user)
    }

    async fn list_non_admin(&self) -> Result<Vec<UserSummary>, ShopServiceError> {
        let store = self.lock();
        let mut users: Vec<UserSummary> = store
            .users
            .iter()
            .filter(|u| u.role != Role::Admin)
            .map(|u| UserSummary {
                id: u.id,
                username: u.username.clone(),
                role: u.role,
                created_at: u.created_at,
                customer: store.customers.iter().find(|c| c.user_id == u.id).cloned(),
                delivery_person: store
                    .delivery_persons
                    .iter()
                    .find(|d| d.user_id == u.id)
                    .cloned(),
            })
            .collect();
        users.sort_by_key(|u| std::cmp::Reverse((u.created_at, u.id)));
        Ok(users)
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        if !store.users.iter().any(|u| u.id == id) {
            return Err(ShopServiceError::UserNotFound);
        }
        if let Some(customer_id) = store.customers.iter().find(|c| c.user_id == id).map(|c| c.id) {
            let order_ids: Vec<i32> = store
                .orders
                .iter()
                .filter(|o| o.customer_id == customer_id)
                .map(|o| o.id)
                .collect();
            for order_id in order_ids {
                store.remove_order(order_id);
            }
            store.customers.retain(|c| c.id != customer_id);
        }
        if let Some(person_id) = store
            .delivery_persons
            .iter()
            .find(|d| d.user_id == id)
            .map(|d| d.id)
        {
            for order in store
                .orders
                .iter_mut()
                .filter(|o| o.delivery_person_id == Some(person_id))
            {
                order.delivery_person_id = None;
                if order.status == OrderStatus::OutForDelivery {
                    order.status = OrderStatus::InProgress;
                }
            }
            store.delivery_persons.retain(|d| d.id != person_id);
        }
        store.usages.retain(|u| u.0 != id);
        store.users.retain(|u| u.id != id);
        Ok(())
    }

    async fn find_customer_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<Customer>, ShopServiceError> {
        Ok(self.lock().customers.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn find_delivery_person_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<DeliveryPerson>, ShopServiceError> {
        Ok(self
            .lock()
            .delivery_persons
            .iter()
            .find(|d| d.user_id == user_id)
            .cloned())
    }

    async fn find_delivery_person(
        &self,
        id: i32,
    ) -> Result<Option<DeliveryPerson>, ShopServiceError> {
        Ok(self.lock().delivery_persons.iter().find(|d| d.id == id).cloned())
    }

    async fn list_delivery_persons(&self) -> Result<Vec<DeliveryPerson>, ShopServiceError> {
        let mut persons = self.lock().delivery_persons.clone();
        persons.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(persons)
    }
}

impl IngredientRepository for MemoryRepo {
    async fn list(&self) -> Result<Vec<Ingredient>, ShopServiceError> {
        let mut ingredients = self.lock().ingredients.clone();
        ingredients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ingredients)
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Ingredient>, ShopServiceError> {
        Ok(self
            .lock()
            .ingredients
            .iter()
            .filter(|i| names.contains(&i.name))
            .cloned()
            .collect())
    }

    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, ShopServiceError> {
        let mut store = self.lock();
        if store.ingredients.iter().any(|i| i.name == ingredient.name) {
            return Err(ShopServiceError::IngredientAlreadyExists);
        }
        let created = Ingredient {
            id: store.id(),
            name: ingredient.name.clone(),
            cost: ingredient.cost,
            has_meat: ingredient.has_meat,
            has_animal_products: ingredient.has_animal_products,
        };
        store.ingredients.push(created.clone());
        Ok(created)
    }

    async fn update(&self, ingredient: &Ingredient) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        if store
            .ingredients
            .iter()
            .any(|i| i.name == ingredient.name && i.id != ingredient.id)
        {
            return Err(ShopServiceError::IngredientAlreadyExists);
        }
        let slot = store
            .ingredients
            .iter_mut()
            .find(|i| i.id == ingredient.id)
            .ok_or(ShopServiceError::IngredientNotFound)?;
        *slot = ingredient.clone();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        if !store.ingredients.iter().any(|i| i.id == id) {
            return Err(ShopServiceError::IngredientNotFound);
        }
        if store.pizzas.iter().any(|p| p.2.contains(&id)) {
            return Err(ShopServiceError::IngredientInUse);
        }
        store.ingredients.retain(|i| i.id != id);
        Ok(())
    }
}

impl PizzaRepository for MemoryRepo {
    async fn list(&self) -> Result<Vec<Pizza>, ShopServiceError> {
        let store = self.lock();
        Ok(store.pizzas.iter().filter_map(|p| store.pizza(p.0)).collect())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Pizza>, ShopServiceError> {
        let store = self.lock();
        Ok(store
            .pizzas
            .iter()
            .filter(|p| ids.contains(&p.0))
            .filter_map(|p| store.pizza(p.0))
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Pizza>, ShopServiceError> {
        let store = self.lock();
        Ok(store
            .pizzas
            .iter()
            .find(|p| p.1 == name)
            .and_then(|p| store.pizza(p.0)))
    }

    async fn create(&self, name: &str, ingredient_ids: &[i32]) -> Result<i32, ShopServiceError> {
        let mut store = self.lock();
        if store.pizzas.iter().any(|p| p.1 == name) {
            return Err(ShopServiceError::PizzaAlreadyExists);
        }
        let id = store.id();
        store.pizzas.push((id, name.to_owned(), ingredient_ids.to_vec()));
        Ok(id)
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        if !store.pizzas.iter().any(|p| p.0 == id) {
            return Err(ShopServiceError::PizzaNotFound);
        }
        store.pizzas.retain(|p| p.0 != id);
        Ok(())
    }
}

impl ExtraItemRepository for MemoryRepo {
    async fn list(&self) -> Result<Vec<ExtraItem>, ShopServiceError> {
        let mut items = self.lock().extras.clone();
        items.sort_by(|a, b| (a.category.as_str(), &a.name).cmp(&(b.category.as_str(), &b.name)));
        Ok(items)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ExtraItem>, ShopServiceError> {
        Ok(self
            .lock()
            .extras
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn cheapest_drink(&self) -> Result<Option<ExtraItem>, ShopServiceError> {
        Ok(self
            .lock()
            .extras
            .iter()
            .filter(|e| e.category == ExtraItemCategory::Drink)
            .min_by_key(|e| (e.price, e.id))
            .cloned())
    }

    async fn create(&self, item: &NewExtraItem) -> Result<ExtraItem, ShopServiceError> {
        let mut store = self.lock();
        let created = ExtraItem {
            id: store.id(),
            name: item.name.clone(),
            category: item.category,
            price: item.price,
        };
        store.extras.push(created.clone());
        Ok(created)
    }

    async fn update(&self, item: &ExtraItem) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        let slot = store
            .extras
            .iter_mut()
            .find(|e| e.id == item.id)
            .ok_or(ShopServiceError::ExtraItemNotFound)?;
        *slot = item.clone();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        if !store.extras.iter().any(|e| e.id == id) {
            return Err(ShopServiceError::ExtraItemNotFound);
        }
        store.extras.retain(|e| e.id != id);
        Ok(())
    }
}

impl DiscountCodeRepository for MemoryRepo {
    async fn list(&self) -> Result<Vec<DiscountCode>, ShopServiceError> {
        let mut codes = self.lock().codes.clone();
        codes.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(codes)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<DiscountCode>, ShopServiceError> {
        Ok(self.lock().codes.iter().find(|c| c.code == code).cloned())
    }

    async fn create(&self, code: &NewDiscountCode) -> Result<DiscountCode, ShopServiceError> {
        let mut store = self.lock();
        if store.codes.iter().any(|c| c.code == code.code) {
            return Err(ShopServiceError::DiscountCodeAlreadyExists);
        }
        let created = DiscountCode {
            id: store.id(),
            code: code.code.clone(),
            discount_percentage: code.discount_percentage,
            is_active: code.is_active,
        };
        store.codes.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        discount_percentage: i32,
        is_active: bool,
    ) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        let code = store
            .codes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ShopServiceError::DiscountCodeNotFound)?;
        code.discount_percentage = discount_percentage;
        code.is_active = is_active;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        if !store.codes.iter().any(|c| c.id == id) {
            return Err(ShopServiceError::DiscountCodeNotFound);
        }
        store.codes.retain(|c| c.id != id);
        store.usages.retain(|u| u.1 != id);
        for order in store.orders.iter_mut().filter(|o| o.discount_code_id == Some(id)) {
            order.discount_code_id = None;
        }
        Ok(())
    }

    async fn is_used_by(&self, user_id: i32, code_id: i32) -> Result<bool, ShopServiceError> {
        Ok(self.lock().usages.contains(&(user_id, code_id)))
    }
}

impl OrderRepository for MemoryRepo {
    async fn create(&self, order: &NewOrder) -> Result<i32, ShopServiceError> {
        let mut store = self.lock();
        if let Some(code_id) = order.discount_code_id {
            if store.usages.contains(&(order.user_id, code_id)) {
                return Err(ShopServiceError::DiscountAlreadyUsed);
            }
            store.usages.push((order.user_id, code_id));
        }
        let id = store.id();
        store.orders.push(Order {
            id,
            customer_id: order.customer_id,
            delivery_address: order.delivery_address.clone(),
            postal_code: order.postal_code.clone(),
            status: OrderStatus::InProgress,
            created_at: Utc::now(),
            discount_code_id: order.discount_code_id,
            delivery_person_id: None,
        });
        for line in order.pizzas.iter().filter(|l| l.quantity > 0) {
            store.order_pizzas.push((id, line.pizza_id, line.quantity));
        }
        for line in &order.extras {
            store
                .order_extras
                .push((id, line.extra_item_id, line.quantity, line.is_free));
        }
        Ok(id)
    }

    async fn list_for_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<OrderSummary>, ShopServiceError> {
        Ok(self.lock().summaries(|o| o.customer_id == customer_id, true))
    }

    async fn list_all(&self) -> Result<Vec<OrderSummary>, ShopServiceError> {
        Ok(self.lock().summaries(|_| true, true))
    }

    async fn find_details(&self, id: i32) -> Result<Option<OrderDetails>, ShopServiceError> {
        let store = self.lock();
        let Some(order) = store.orders.iter().find(|o| o.id == id) else {
            return Ok(None);
        };
        let customer_user_id = store
            .customers
            .iter()
            .find(|c| c.id == order.customer_id)
            .map(|c| c.user_id)
            .unwrap_or_default();
        let pizzas = store
            .order_pizzas
            .iter()
            .filter(|l| l.0 == id)
            .filter_map(|l| {
                store.pizza(l.1).map(|pizza| PizzaLine {
                    pizza,
                    quantity: l.2,
                })
            })
            .collect();
        let extras = store
            .order_extras
            .iter()
            .filter(|l| l.0 == id)
            .filter_map(|l| {
                store.extras.iter().find(|e| e.id == l.1).map(|item| ExtraLine {
                    item: item.clone(),
                    quantity: l.2,
                    is_free: l.3,
                })
            })
            .collect();
        let discount = order
            .discount_code_id
            .and_then(|cid| store.codes.iter().find(|c| c.id == cid).cloned());
        Ok(Some(OrderDetails {
            order: order.clone(),
            customer_user_id,
            pizzas,
            extras,
            discount,
        }))
    }

    async fn set_status(&self, id: i32, status: OrderStatus) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(ShopServiceError::OrderNotFound)?;
        order.status = status;
        Ok(())
    }

    async fn unassign(&self, id: i32) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(ShopServiceError::OrderNotFound)?;
        order.delivery_person_id = None;
        if order.status == OrderStatus::OutForDelivery {
            order.status = OrderStatus::InProgress;
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        if !store.orders.iter().any(|o| o.id == id) {
            return Err(ShopServiceError::OrderNotFound);
        }
        store.remove_order(id);
        Ok(())
    }
}

impl DeliveryRepository for MemoryRepo {
    async fn assign(
        &self,
        order_id: i32,
        delivery_person_id: i32,
        now: DateTime<Utc>,
    ) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        let order = store
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or(ShopServiceError::OrderNotFound)?;
        let person = store
            .delivery_persons
            .iter()
            .find(|d| d.id == delivery_person_id)
            .cloned();
        let busy = store
            .orders
            .iter()
            .any(|o| o.delivery_person_id == Some(delivery_person_id) && o.status.is_active());
        check_assignable(&order, person.as_ref(), busy, now)?;
        if let Some(order) = store.orders.iter_mut().find(|o| o.id == order_id) {
            order.delivery_person_id = Some(delivery_person_id);
            order.status = OrderStatus::OutForDelivery;
        }
        Ok(())
    }

    async fn finish(
        &self,
        order_id: i32,
        status: OrderStatus,
        cooldown: Cooldown,
        by: ClosedBy,
    ) -> Result<(), ShopServiceError> {
        let mut store = self.lock();
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(ShopServiceError::OrderNotFound)?;
        check_closable(order, by)?;
        order.status = status;
        if let Some(person_id) = order.delivery_person_id {
            if let Some(person) = store.delivery_persons.iter_mut().find(|d| d.id == person_id) {
                person.unavailable_until = cooldown.unavailable_until();
            }
        }
        Ok(())
    }

    async fn list_available(&self) -> Result<Vec<OrderSummary>, ShopServiceError> {
        Ok(self.lock().summaries(
            |o| o.status == OrderStatus::InProgress && o.delivery_person_id.is_none(),
            false,
        ))
    }

    async fn list_assigned(
        &self,
        delivery_person_id: i32,
    ) -> Result<Vec<OrderSummary>, ShopServiceError> {
        Ok(self
            .lock()
            .summaries(|o| o.delivery_person_id == Some(delivery_person_id), true))
    }
}
