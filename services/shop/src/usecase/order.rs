use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::info;

use pizzeria_domain::order::OrderStatus;
use pizzeria_domain::role::Role;

use crate::domain::repository::{
    DeliveryRepository, DiscountCodeRepository, ExtraItemRepository, OrderRepository,
    PizzaRepository, UserRepository,
};
use crate::domain::types::{
    ClosedBy, DiscountCode, MAX_ADDRESS_LEN, MAX_POSTAL_CODE_LEN, NewExtraLine, NewOrder,
    NewPizzaLine, OrderDetails, OrderSummary, Pizza, User, cooldown_after, validate_text,
};
use crate::error::ShopServiceError;

// ── CreateOrder ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartItemKind {
    Pizza,
    Extra,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub kind: CartItemKind,
    pub id: i32,
    pub quantity: i32,
}

pub struct CreateOrderInput {
    pub delivery_address: String,
    pub postal_code: String,
    pub discount_code: Option<String>,
    pub cart: Vec<CartLine>,
}

pub struct CreateOrderUseCase<U, P, E, D, O>
where
    U: UserRepository,
    P: PizzaRepository,
    E: ExtraItemRepository,
    D: DiscountCodeRepository,
    O: OrderRepository,
{
    pub users: U,
    pub pizzas: P,
    pub extras: E,
    pub codes: D,
    pub orders: O,
}

impl<U, P, E, D, O> CreateOrderUseCase<U, P, E, D, O>
where
    U: UserRepository,
    P: PizzaRepository,
    E: ExtraItemRepository,
    D: DiscountCodeRepository,
    O: OrderRepository,
{
    /// Place an order for `user`. Returns the new order id.
    ///
    /// Blank address fields fall back to the customer's profile.
    pub async fn execute(&self, user: &User, input: CreateOrderInput) -> Result<i32, ShopServiceError> {
        if input.cart.is_empty() {
            return Err(ShopServiceError::EmptyCart);
        }
        if input.cart.iter().any(|line| line.quantity < 1) {
            return Err(ShopServiceError::InvalidQuantity);
        }
        let customer = self
            .users
            .find_customer_by_user_id(user.id)
            .await?
            .ok_or(ShopServiceError::CustomerNotFound)?;

        let delivery_address = non_blank_or(input.delivery_address, &customer.address);
        let postal_code = non_blank_or(input.postal_code, &customer.postal_code);
        validate_text("delivery address", &delivery_address, MAX_ADDRESS_LEN)?;
        validate_text("postal code", &postal_code, MAX_POSTAL_CODE_LEN)?;

        let pizza_ids = ids_of(&input.cart, CartItemKind::Pizza);
        let extra_ids = ids_of(&input.cart, CartItemKind::Extra);
        let pizzas = self.pizzas.find_by_ids(&pizza_ids).await?;
        if pizzas.len() != pizza_ids.len() {
            return Err(ShopServiceError::PizzaNotFound);
        }
        let extras = self.extras.find_by_ids(&extra_ids).await?;
        if extras.len() != extra_ids.len() {
            return Err(ShopServiceError::ExtraItemNotFound);
        }

        let mut pizza_lines: Vec<NewPizzaLine> = input
            .cart
            .iter()
            .filter(|line| line.kind == CartItemKind::Pizza)
            .map(|line| NewPizzaLine {
                pizza_id: line.id,
                quantity: line.quantity,
            })
            .collect();
        let mut extra_lines: Vec<NewExtraLine> = input
            .cart
            .iter()
            .filter(|line| line.kind == CartItemKind::Extra)
            .map(|line| NewExtraLine {
                extra_item_id: line.id,
                quantity: line.quantity,
                is_free: false,
            })
            .collect();

        let code = self.accepted_code(user, input.discount_code.as_deref()).await?;
        if code.as_ref().is_some_and(DiscountCode::is_birthday) {
            take_cheapest_pizza(&mut pizza_lines, &pizzas);
            if let Some(drink) = self.extras.cheapest_drink().await? {
                extra_lines.push(NewExtraLine {
                    extra_item_id: drink.id,
                    quantity: 1,
                    is_free: true,
                });
            }
        }

        let order_id = self
            .orders
            .create(&NewOrder {
                customer_id: customer.id,
                user_id: user.id,
                delivery_address,
                postal_code,
                pizzas: pizza_lines,
                extras: extra_lines,
                discount_code_id: code.as_ref().map(|c| c.id),
            })
            .await?;
        info!(
            order_id,
            customer_id = customer.id,
            discount_code = code.as_ref().map(|c| c.code.as_str()),
            "order created"
        );
        Ok(order_id)
    }

    /// Found and active codes are accepted unless this user already redeemed them.
    /// Anything else is ignored.
    async fn accepted_code(
        &self,
        user: &User,
        code: Option<&str>,
    ) -> Result<Option<DiscountCode>, ShopServiceError> {
        let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(None);
        };
        match self.codes.find_by_code(code).await? {
            Some(found) if found.is_active => {
                if self.codes.is_used_by(user.id, found.id).await? {
                    return Err(ShopServiceError::DiscountAlreadyUsed);
                }
                Ok(Some(found))
            }
            _ => {
                info!(code, "ignoring unknown or inactive discount code");
                Ok(None)
            }
        }
    }
}

fn non_blank_or(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn ids_of(cart: &[CartLine], kind: CartItemKind) -> Vec<i32> {
    let mut seen = HashSet::new();
    cart.iter()
        .filter(|line| line.kind == kind && seen.insert(line.id))
        .map(|line| line.id)
        .collect()
}

/// One unit of the lowest-priced pizza line becomes free; the first line wins ties.
fn take_cheapest_pizza(lines: &mut [NewPizzaLine], pizzas: &[Pizza]) {
    let price_of = |pizza_id: i32| pizzas.iter().find(|p| p.id == pizza_id).map(Pizza::price);
    let mut cheapest: Option<(usize, rust_decimal::Decimal)> = None;
    for (idx, line) in lines.iter().enumerate() {
        let Some(price) = price_of(line.pizza_id) else {
            continue;
        };
        if cheapest.is_none_or(|(_, best)| price < best) {
            cheapest = Some((idx, price));
        }
    }
    if let Some((idx, _)) = cheapest {
        lines[idx].quantity -= 1;
    }
}

// ── ListCustomerOrders ───────────────────────────────────────────────────────

pub struct ListCustomerOrdersUseCase<U: UserRepository, O: OrderRepository> {
    pub users: U,
    pub orders: O,
}

impl<U: UserRepository, O: OrderRepository> ListCustomerOrdersUseCase<U, O> {
    pub async fn execute(&self, user: &User) -> Result<Vec<OrderSummary>, ShopServiceError> {
        let customer = self
            .users
            .find_customer_by_user_id(user.id)
            .await?
            .ok_or(ShopServiceError::CustomerNotFound)?;
        self.orders.list_for_customer(customer.id).await
    }
}

// ── GetOrderDetails ──────────────────────────────────────────────────────────

pub struct GetOrderDetailsUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> GetOrderDetailsUseCase<O> {
    /// Admins read any order; customers only their own, and other orders look missing to them.
    pub async fn execute(&self, user: &User, order_id: i32) -> Result<OrderDetails, ShopServiceError> {
        if user.role == Role::Delivery {
            return Err(ShopServiceError::Forbidden);
        }
        let details = self
            .orders
            .find_details(order_id)
            .await?
            .ok_or(ShopServiceError::OrderNotFound)?;
        if user.role == Role::Customer && details.customer_user_id != user.id {
            return Err(ShopServiceError::OrderNotFound);
        }
        Ok(details)
    }
}

// ── ListAllOrders ────────────────────────────────────────────────────────────

pub struct ListAllOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListAllOrdersUseCase<O> {
    pub async fn execute(&self) -> Result<Vec<OrderSummary>, ShopServiceError> {
        self.orders.list_all().await
    }
}

// ── UpdateOrderStatus (admin) ────────────────────────────────────────────────

pub struct UpdateOrderStatusUseCase<O: OrderRepository, D: DeliveryRepository> {
    pub orders: O,
    pub deliveries: D,
}

impl<O: OrderRepository, D: DeliveryRepository> UpdateOrderStatusUseCase<O, D> {
    /// Any status is accepted; terminal ones also update the delivery person's cooldown.
    pub async fn execute(
        &self,
        order_id: i32,
        status: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ShopServiceError> {
        let status: OrderStatus = status
            .trim()
            .parse()
            .map_err(|_| ShopServiceError::InvalidStatus)?;
        match cooldown_after(status, now) {
            Some(cooldown) => {
                self.deliveries
                    .finish(order_id, status, cooldown, ClosedBy::Admin)
                    .await?
            }
            None => self.orders.set_status(order_id, status).await?,
        }
        info!(order_id, status = %status, "order status updated by admin");
        Ok(())
    }
}

// ── DeleteOrder (admin) ──────────────────────────────────────────────────────

pub struct DeleteOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> DeleteOrderUseCase<O> {
    pub async fn execute(&self, order_id: i32) -> Result<(), ShopServiceError> {
        self.orders.delete(order_id).await?;
        info!(order_id, "order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::memory::MemoryRepo;
    use chrono::Duration;
    use pizzeria_domain::catalog::ExtraItemCategory;
    use pizzeria_domain::order::BIRTHDAY_CODE;
    use rust_decimal::Decimal;

    type CreateOrder = CreateOrderUseCase<MemoryRepo, MemoryRepo, MemoryRepo, MemoryRepo, MemoryRepo>;

    fn create_order(repo: &MemoryRepo) -> CreateOrder {
        CreateOrderUseCase {
            users: repo.clone(),
            pizzas: repo.clone(),
            extras: repo.clone(),
            codes: repo.clone(),
            orders: repo.clone(),
        }
    }

    fn pizza(id: i32, quantity: i32) -> CartLine {
        CartLine {
            kind: CartItemKind::Pizza,
            id,
            quantity,
        }
    }

    fn extra(id: i32, quantity: i32) -> CartLine {
        CartLine {
            kind: CartItemKind::Extra,
            id,
            quantity,
        }
    }

    fn input(cart: Vec<CartLine>, code: Option<&str>) -> CreateOrderInput {
        CreateOrderInput {
            delivery_address: "Elm St 5".into(),
            postal_code: "5678CD".into(),
            discount_code: code.map(str::to_owned),
            cart,
        }
    }

    struct Menu {
        margherita: Pizza,
        salami: Pizza,
        cola_id: i32,
        water_id: i32,
    }

    async fn menu(repo: &MemoryRepo) -> Menu {
        let tomato = repo.seed_ingredient("Tomato", 60, false).await;
        let cheese = repo.seed_ingredient("Cheese", 50, false).await;
        let salami = repo.seed_ingredient("Salami", 150, true).await;
        Menu {
            margherita: repo.seed_pizza("Margherita", &[&tomato, &cheese]).await,
            salami: repo.seed_pizza("Salami", &[&tomato, &cheese, &salami]).await,
            cola_id: repo.seed_extra("Cola", ExtraItemCategory::Drink, 250).await.id,
            water_id: repo.seed_extra("Water", ExtraItemCategory::Drink, 150).await.id,
        }
    }

    #[tokio::test]
    async fn should_reject_empty_cart_and_bad_quantity() {
        let repo = MemoryRepo::default();
        let (user, _) = repo.seed_customer("carol", None).await;

        let err = create_order(&repo).execute(&user, input(vec![], None)).await.unwrap_err();
        assert!(matches!(err, ShopServiceError::EmptyCart));

        let err = create_order(&repo)
            .execute(&user, input(vec![pizza(1, 0)], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ShopServiceError::InvalidQuantity));
    }

    #[tokio::test]
    async fn should_require_customer_profile() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (courier, _) = repo.seed_delivery_person("dave").await;
        let err = create_order(&repo)
            .execute(&courier, input(vec![pizza(m.margherita.id, 1)], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ShopServiceError::CustomerNotFound));
    }

    #[tokio::test]
    async fn should_reject_unknown_items() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, _) = repo.seed_customer("carol", None).await;

        let err = create_order(&repo)
            .execute(&user, input(vec![pizza(m.margherita.id, 1), pizza(999, 1)], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ShopServiceError::PizzaNotFound));

        let err = create_order(&repo)
            .execute(&user, input(vec![extra(999, 1)], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ShopServiceError::ExtraItemNotFound));
    }

    #[tokio::test]
    async fn should_store_lines_and_start_in_progress() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, customer) = repo.seed_customer("carol", None).await;

        let order_id = create_order(&repo)
            .execute(&user, input(vec![pizza(m.margherita.id, 2), extra(m.cola_id, 1)], None))
            .await
            .unwrap();

        let order = repo.order(order_id).unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(order.customer_id, customer.id);
        assert_eq!(order.delivery_address, "Elm St 5");
        assert_eq!(order.discount_code_id, None);
        let (pizzas, extras) = repo.order_lines(order_id);
        assert_eq!(pizzas, vec![(m.margherita.id, 2)]);
        assert_eq!(extras, vec![(m.cola_id, 1, false)]);
    }

    #[tokio::test]
    async fn should_fall_back_to_profile_address() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, customer) = repo.seed_customer("carol", None).await;
        let order_id = create_order(&repo)
            .execute(
                &user,
                CreateOrderInput {
                    delivery_address: " ".into(),
                    postal_code: String::new(),
                    ..input(vec![pizza(m.margherita.id, 1)], None)
                },
            )
            .await
            .unwrap();
        let order = repo.order(order_id).unwrap();
        assert_eq!(order.delivery_address, customer.address);
        assert_eq!(order.postal_code, customer.postal_code);
    }

    #[tokio::test]
    async fn should_accept_code_once_per_user() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, _) = repo.seed_customer("carol", None).await;
        let code = repo.seed_code("SAVE10", 10, true).await;
        let cart = || vec![pizza(m.margherita.id, 1)];

        let order_id = create_order(&repo)
            .execute(&user, input(cart(), Some("SAVE10")))
            .await
            .unwrap();
        assert_eq!(repo.order(order_id).unwrap().discount_code_id, Some(code.id));
        assert!(repo.is_used_by(user.id, code.id).await.unwrap());

        let err = create_order(&repo)
            .execute(&user, input(cart(), Some("SAVE10")))
            .await
            .unwrap_err();
        assert!(matches!(err, ShopServiceError::DiscountAlreadyUsed));
        assert_eq!(err.to_string(), "discount code already used");
    }

    #[tokio::test]
    async fn should_let_other_users_redeem_same_code() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        repo.seed_code("SAVE10", 10, true).await;
        let (carol, _) = repo.seed_customer("carol", None).await;
        let (erin, _) = repo.seed_customer("erin", None).await;
        for user in [&carol, &erin] {
            create_order(&repo)
                .execute(user, input(vec![pizza(m.margherita.id, 1)], Some("SAVE10")))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn should_silently_ignore_unknown_or_inactive_code() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, _) = repo.seed_customer("carol", None).await;
        repo.seed_code("OLD", 50, false).await;

        for code in ["NOPE", "OLD"] {
            let order_id = create_order(&repo)
                .execute(&user, input(vec![pizza(m.margherita.id, 1)], Some(code)))
                .await
                .unwrap();
            assert_eq!(repo.order(order_id).unwrap().discount_code_id, None);
        }
    }

    #[tokio::test]
    async fn should_give_free_pizza_and_cheapest_drink_on_birthday() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, _) = repo.seed_customer("carol", None).await;
        repo.seed_code(BIRTHDAY_CODE, 100, true).await;

        let order_id = create_order(&repo)
            .execute(&user, input(vec![pizza(m.margherita.id, 2)], Some("BIRTHDAY")))
            .await
            .unwrap();

        let (pizzas, extras) = repo.order_lines(order_id);
        assert_eq!(pizzas, vec![(m.margherita.id, 1)]);
        assert_eq!(extras, vec![(m.water_id, 1, true)]);

        let details = repo.find_details(order_id).await.unwrap().unwrap();
        let totals = details.totals();
        // one Margherita at 9.3086; the drink is free and no percentage applies
        assert_eq!(totals.total, Decimal::new(931, 2));
        assert_eq!(totals.discount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn should_drop_single_cheapest_pizza_line_on_birthday() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, _) = repo.seed_customer("carol", None).await;
        repo.seed_code(BIRTHDAY_CODE, 100, true).await;

        let order_id = create_order(&repo)
            .execute(
                &user,
                input(
                    vec![pizza(m.salami.id, 1), pizza(m.margherita.id, 1)],
                    Some("BIRTHDAY"),
                ),
            )
            .await
            .unwrap();

        let (pizzas, _) = repo.order_lines(order_id);
        assert_eq!(pizzas, vec![(m.salami.id, 1)]);
    }

    #[test]
    fn should_discount_first_of_equally_priced_lines() {
        let mut lines = vec![
            NewPizzaLine {
                pizza_id: 1,
                quantity: 2,
            },
            NewPizzaLine {
                pizza_id: 2,
                quantity: 2,
            },
        ];
        let pizzas = vec![
            Pizza {
                id: 1,
                name: "A".into(),
                ingredients: vec![],
            },
            Pizza {
                id: 2,
                name: "B".into(),
                ingredients: vec![],
            },
        ];
        take_cheapest_pizza(&mut lines, &pizzas);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[1].quantity, 2);
    }

    #[tokio::test]
    async fn should_place_birthday_order_without_drinks() {
        let repo = MemoryRepo::default();
        let tomato = repo.seed_ingredient("Tomato", 60, false).await;
        let marinara = repo.seed_pizza("Marinara", &[&tomato]).await;
        let (user, _) = repo.seed_customer("carol", None).await;
        repo.seed_code(BIRTHDAY_CODE, 100, true).await;

        let order_id = create_order(&repo)
            .execute(&user, input(vec![pizza(marinara.id, 3)], Some("BIRTHDAY")))
            .await
            .unwrap();
        let (pizzas, extras) = repo.order_lines(order_id);
        assert_eq!(pizzas, vec![(marinara.id, 2)]);
        assert!(extras.is_empty());
    }

    #[tokio::test]
    async fn should_price_order_details_at_read_time() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, _) = repo.seed_customer("carol", None).await;
        let order_id = create_order(&repo)
            .execute(&user, input(vec![pizza(m.margherita.id, 1)], None))
            .await
            .unwrap();
        let usecase = GetOrderDetailsUseCase {
            orders: repo.clone(),
        };
        let before = usecase.execute(&user, order_id).await.unwrap().totals().total;

        let tomato = m.margherita.ingredients[0].id;
        repo.set_ingredient_cost(tomato, Decimal::new(160, 2));
        let after = usecase.execute(&user, order_id).await.unwrap().totals().total;
        assert!(after > before);
    }

    #[tokio::test]
    async fn should_hide_other_customers_orders() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (carol, _) = repo.seed_customer("carol", None).await;
        let (erin, _) = repo.seed_customer("erin", None).await;
        let (courier, _) = repo.seed_delivery_person("dave").await;
        let admin = repo.seed_admin("root").await;
        let order_id = create_order(&repo)
            .execute(&carol, input(vec![pizza(m.margherita.id, 1)], None))
            .await
            .unwrap();
        let usecase = GetOrderDetailsUseCase {
            orders: repo.clone(),
        };

        let err = usecase.execute(&erin, order_id).await.unwrap_err();
        assert!(matches!(err, ShopServiceError::OrderNotFound));
        let err = usecase.execute(&courier, order_id).await.unwrap_err();
        assert!(matches!(err, ShopServiceError::Forbidden));
        assert!(usecase.execute(&admin, order_id).await.is_ok());
        assert!(usecase.execute(&carol, order_id).await.is_ok());
    }

    #[tokio::test]
    async fn should_list_customer_orders_newest_first() {
        let repo = MemoryRepo::default();
        let m = menu(&repo).await;
        let (user, _) = repo.seed_customer("carol", None).await;
        let first = create_order(&repo)
            .execute(&user, input(vec![pizza(m.margherita.id, 1)], None))
            .await
            .unwrap();
        let second = create_order(&repo)
            .execute(&user, input(vec![pizza(m.salami.id, 1)], None))
            .await
            .unwrap();

        let orders = ListCustomerOrdersUseCase {
            users: repo.clone(),
            orders: repo.clone(),
        }
        .execute(&user)
        .await
        .unwrap();
        let ids: Vec<i32> = orders.iter().map(|o| o.order.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn should_apply_cooldown_when_admin_marks_delivered() {
        let repo = MemoryRepo::default();
        let (_, customer) = repo.seed_customer("carol", None).await;
        let (_, person) = repo.seed_delivery_person("dave").await;
        let order_id = repo.seed_order(&customer).await;
        let now = Utc::now();
        repo.assign(order_id, person.id, now).await.unwrap();

        let usecase = UpdateOrderStatusUseCase {
            orders: repo.clone(),
            deliveries: repo.clone(),
        };
        let err = usecase.execute(order_id, "LOST", now).await.unwrap_err();
        assert!(matches!(err, ShopServiceError::InvalidStatus));

        usecase.execute(order_id, "DELIVERED", now).await.unwrap();
        assert_eq!(repo.order(order_id).unwrap().status, OrderStatus::Delivered);
        let person = repo.find_delivery_person(person.id).await.unwrap().unwrap();
        assert_eq!(person.unavailable_until, Some(now + Duration::minutes(30)));
    }

    #[tokio::test]
    async fn should_let_admin_correct_a_closed_order() {
        let repo = MemoryRepo::default();
        let (_, customer) = repo.seed_customer("carol", None).await;
        let (_, person) = repo.seed_delivery_person("dave").await;
        let order_id = repo.seed_order(&customer).await;
        let now = Utc::now();
        repo.assign(order_id, person.id, now).await.unwrap();
        let usecase = UpdateOrderStatusUseCase {
            orders: repo.clone(),
            deliveries: repo.clone(),
        };

        usecase.execute(order_id, "DELIVERED", now).await.unwrap();
        usecase.execute(order_id, "FAILED", now).await.unwrap();

        assert_eq!(repo.order(order_id).unwrap().status, OrderStatus::Failed);
        let person = repo.find_delivery_person(person.id).await.unwrap().unwrap();
        assert_eq!(person.unavailable_until, None);
    }

    #[tokio::test]
    async fn should_let_admin_set_non_terminal_status() {
        let repo = MemoryRepo::default();
        let (_, customer) = repo.seed_customer("carol", None).await;
        let order_id = repo.seed_order(&customer).await;
        UpdateOrderStatusUseCase {
            orders: repo.clone(),
            deliveries: repo.clone(),
        }
        .execute(order_id, "OUT_FOR_DELIVERY", Utc::now())
        .await
        .unwrap();
        assert_eq!(repo.order(order_id).unwrap().status, OrderStatus::OutForDelivery);
    }

    #[tokio::test]
    async fn should_delete_order() {
        let repo = MemoryRepo::default();
        let (_, customer) = repo.seed_customer("carol", None).await;
        let order_id = repo.seed_order(&customer).await;
        let usecase = DeleteOrderUseCase {
            orders: repo.clone(),
        };
        usecase.execute(order_id).await.unwrap();
        let err = usecase.execute(order_id).await.unwrap_err();
        assert!(matches!(err, ShopServiceError::OrderNotFound));
    }
}
