#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use pizzeria_domain::order::OrderStatus;

use crate::domain::types::{
    ClosedBy, Cooldown, Customer, DeliveryPerson, DiscountCode, ExtraItem, Ingredient, NewCustomer,
    NewDeliveryPerson, NewDiscountCode, NewExtraItem, NewIngredient, NewOrder, NewUser,
    OrderDetails, OrderSummary, Pizza, User, UserSummary,
};
use crate::error::ShopServiceError;

/// Accounts and the profiles attached to them.
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ShopServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ShopServiceError>;

    /// Insert the user and its customer profile in one transaction. Returns the user id.
    async fn create_customer(
        &self,
        user: &NewUser,
        customer: &NewCustomer,
    ) -> Result<i32, ShopServiceError>;

    /// Insert the user and its delivery-person profile in one transaction. Returns the user id.
    async fn create_delivery_person(
        &self,
        user: &NewUser,
        person: &NewDeliveryPerson,
    ) -> Result<i32, ShopServiceError>;

    async fn create_admin(&self, user: &NewUser) -> Result<i32, ShopServiceError>;

    /// Every non-admin account, newest first.
    async fn list_non_admin(&self) -> Result<Vec<UserSummary>, ShopServiceError>;

    /// Delete the account with everything hanging off it, in one transaction.
    async fn delete(&self, id: i32) -> Result<(), ShopServiceError>;

    async fn find_customer_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<Customer>, ShopServiceError>;

    async fn find_delivery_person_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<DeliveryPerson>, ShopServiceError>;

    async fn find_delivery_person(&self, id: i32)
    -> Result<Option<DeliveryPerson>, ShopServiceError>;

    async fn list_delivery_persons(&self) -> Result<Vec<DeliveryPerson>, ShopServiceError>;
}

pub trait IngredientRepository: Send + Sync {
    /// All ingredients ordered by name.
    async fn list(&self) -> Result<Vec<Ingredient>, ShopServiceError>;
    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Ingredient>, ShopServiceError>;
    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, ShopServiceError>;
    async fn update(&self, ingredient: &Ingredient) -> Result<(), ShopServiceError>;
    /// Fails with `IngredientInUse` while a pizza references it.
    async fn delete(&self, id: i32) -> Result<(), ShopServiceError>;
}

pub trait PizzaRepository: Send + Sync {
    /// All pizzas with their ingredients in recipe order.
    async fn list(&self) -> Result<Vec<Pizza>, ShopServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Pizza>, ShopServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Pizza>, ShopServiceError>;
    /// Insert the pizza and its ingredient rows in one transaction. Returns the pizza id.
    async fn create(&self, name: &str, ingredient_ids: &[i32]) -> Result<i32, ShopServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ShopServiceError>;
}

pub trait ExtraItemRepository: Send + Sync {
    /// All extra items ordered by category, then name.
    async fn list(&self) -> Result<Vec<ExtraItem>, ShopServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ExtraItem>, ShopServiceError>;
    /// The lowest-priced drink, if any drink exists.
    async fn cheapest_drink(&self) -> Result<Option<ExtraItem>, ShopServiceError>;
    async fn create(&self, item: &NewExtraItem) -> Result<ExtraItem, ShopServiceError>;
    async fn update(&self, item: &ExtraItem) -> Result<(), ShopServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ShopServiceError>;
}

pub trait DiscountCodeRepository: Send + Sync {
    /// All codes ordered by code.
    async fn list(&self) -> Result<Vec<DiscountCode>, ShopServiceError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<DiscountCode>, ShopServiceError>;
    async fn create(&self, code: &NewDiscountCode) -> Result<DiscountCode, ShopServiceError>;
    async fn update(
        &self,
        id: i32,
        discount_percentage: i32,
        is_active: bool,
    ) -> Result<(), ShopServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ShopServiceError>;
    async fn is_used_by(&self, user_id: i32, code_id: i32) -> Result<bool, ShopServiceError>;
}

pub trait OrderRepository: Send + Sync {
    /// Insert the order, its lines and the discount usage in one transaction.
    ///
    /// A concurrent redemption of the same code by the same user surfaces as
    /// `DiscountAlreadyUsed`.
    async fn create(&self, order: &NewOrder) -> Result<i32, ShopServiceError>;
    /// Orders of one customer, newest first.
    async fn list_for_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<OrderSummary>, ShopServiceError>;
    /// Every order, newest first.
    async fn list_all(&self) -> Result<Vec<OrderSummary>, ShopServiceError>;
    async fn find_details(&self, id: i32) -> Result<Option<OrderDetails>, ShopServiceError>;
    /// Set the status without touching the assignment.
    async fn set_status(&self, id: i32, status: OrderStatus) -> Result<(), ShopServiceError>;
    /// Clear the delivery person; an order out for delivery goes back to IN_PROGRESS.
    async fn unassign(&self, id: i32) -> Result<(), ShopServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ShopServiceError>;
}

pub trait DeliveryRepository: Send + Sync {
    /// Lock the order and the delivery person, re-check every assignment
    /// precondition and hand the order over, in one transaction.
    async fn assign(
        &self,
        order_id: i32,
        delivery_person_id: i32,
        now: DateTime<Utc>,
    ) -> Result<(), ShopServiceError>;

    /// Lock the order, check it may be closed `by` the caller, then set the
    /// final status and the assigned person's cooldown, in one transaction.
    async fn finish(
        &self,
        order_id: i32,
        status: OrderStatus,
        cooldown: Cooldown,
        by: ClosedBy,
    ) -> Result<(), ShopServiceError>;

    /// IN_PROGRESS orders with nobody assigned, oldest first.
    async fn list_available(&self) -> Result<Vec<OrderSummary>, ShopServiceError>;

    /// Orders assigned to one delivery person, newest first.
    async fn list_assigned(
        &self,
        delivery_person_id: i32,
    ) -> Result<Vec<OrderSummary>, ShopServiceError>;
}
