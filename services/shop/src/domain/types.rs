use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use pizzeria_domain::catalog::{DietFlags, DietType, ExtraItemCategory};
use pizzeria_domain::order::{BIRTHDAY_CODE, DELIVERY_COOLDOWN_MINUTES, OrderStatus};
use pizzeria_domain::pricing;
use pizzeria_domain::role::Role;

use crate::error::ShopServiceError;

pub const MAX_USERNAME_LEN: usize = 100;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_GENDER_LEN: usize = 50;
pub const MAX_ADDRESS_LEN: usize = 256;
pub const MAX_POSTAL_CODE_LEN: usize = 10;
pub const MAX_CATALOG_NAME_LEN: usize = 255;
pub const MAX_DISCOUNT_CODE_LEN: usize = 50;
pub const DEFAULT_VEHICLE_TYPE: &str = "bike";

/// Login account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    pub postal_code: String,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPerson {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub vehicle_type: String,
    pub unavailable_until: Option<DateTime<Utc>>,
}

impl DeliveryPerson {
    /// Still inside the cooldown that follows a completed delivery.
    pub fn is_cooling_down(&self, now: DateTime<Utc>) -> bool {
        self.unavailable_until.is_some_and(|until| until > now)
    }
}

#[derive(Debug, Clone)]
pub struct NewDeliveryPerson {
    pub name: String,
    pub vehicle_type: String,
}

/// Row of the admin user list: the account plus whichever profile it has.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub customer: Option<Customer>,
    pub delivery_person: Option<DeliveryPerson>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub cost: Decimal,
    pub has_meat: bool,
    pub has_animal_products: bool,
}

impl Ingredient {
    pub fn diet_flags(&self) -> DietFlags {
        DietFlags {
            has_meat: self.has_meat,
            has_animal_products: self.has_animal_products,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub cost: Decimal,
    pub has_meat: bool,
    pub has_animal_products: bool,
}

/// Pizza with its ingredients in recipe order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

impl Pizza {
    /// Exact price derived from the current ingredient costs.
    pub fn price(&self) -> Decimal {
        pricing::pizza_price(self.ingredients.iter().map(|i| i.cost))
    }

    pub fn diet(&self) -> DietType {
        DietType::classify(self.ingredients.iter().map(Ingredient::diet_flags))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtraItem {
    pub id: i32,
    pub name: String,
    pub category: ExtraItemCategory,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
pub struct NewExtraItem {
    pub name: String,
    pub category: ExtraItemCategory,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCode {
    pub id: i32,
    pub code: String,
    pub discount_percentage: i32,
    pub is_active: bool,
}

impl DiscountCode {
    pub fn is_birthday(&self) -> bool {
        self.code == BIRTHDAY_CODE
    }
}

#[derive(Debug, Clone)]
pub struct NewDiscountCode {
    pub code: String,
    pub discount_percentage: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub delivery_address: String,
    pub postal_code: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub discount_code_id: Option<i32>,
    pub delivery_person_id: Option<i32>,
}

/// Order row joined with the names the lists display.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub order: Order,
    pub customer_name: String,
    pub discount_code: Option<String>,
    pub discount_percentage: Option<i32>,
    pub delivery_person_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PizzaLine {
    pub pizza: Pizza,
    pub quantity: i32,
}

impl PizzaLine {
    pub fn line_total(&self) -> Decimal {
        self.pizza.price() * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone)]
pub struct ExtraLine {
    pub item: ExtraItem,
    pub quantity: i32,
    pub is_free: bool,
}

impl ExtraLine {
    pub fn line_total(&self) -> Decimal {
        if self.is_free {
            Decimal::ZERO
        } else {
            self.item.price * Decimal::from(self.quantity)
        }
    }
}

/// An order with its lines priced at read time.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub customer_user_id: i32,
    pub pizzas: Vec<PizzaLine>,
    pub extras: Vec<ExtraLine>,
    pub discount: Option<DiscountCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl OrderDetails {
    /// Pizzas plus paid extras, less the percentage of a non-birthday code, in cents.
    pub fn totals(&self) -> OrderTotals {
        let subtotal: Decimal = self.pizzas.iter().map(PizzaLine::line_total).sum::<Decimal>()
            + self.extras.iter().map(ExtraLine::line_total).sum::<Decimal>();
        let discounted = match &self.discount {
            Some(code) if !code.is_birthday() => {
                let percentage = u8::try_from(code.discount_percentage.clamp(0, 100)).unwrap_or(0);
                pricing::apply_percentage_discount(subtotal, percentage)
            }
            _ => subtotal,
        };
        let subtotal = pricing::to_cents(subtotal);
        let total = pricing::to_cents(discounted);
        OrderTotals {
            subtotal,
            discount: subtotal - total,
            total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPizzaLine {
    pub pizza_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExtraLine {
    pub extra_item_id: i32,
    pub quantity: i32,
    pub is_free: bool,
}

/// Everything persisted by the order transaction.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i32,
    pub user_id: i32,
    pub delivery_address: String,
    pub postal_code: String,
    pub pizzas: Vec<NewPizzaLine>,
    pub extras: Vec<NewExtraLine>,
    pub discount_code_id: Option<i32>,
}

/// Preconditions for handing `order` to a delivery person, in the order they are checked.
///
/// Run inside the assignment transaction after both rows are locked.
pub fn check_assignable(
    order: &Order,
    person: Option<&DeliveryPerson>,
    person_has_active_order: bool,
    now: DateTime<Utc>,
) -> Result<(), ShopServiceError> {
    if order.status != OrderStatus::InProgress {
        return Err(ShopServiceError::OrderNotAvailable);
    }
    if order.delivery_person_id.is_some() {
        return Err(ShopServiceError::OrderAlreadyAssigned);
    }
    let person = person.ok_or(ShopServiceError::DeliveryPersonNotFound)?;
    if person.is_cooling_down(now) {
        return Err(ShopServiceError::DeliveryPersonUnavailable);
    }
    if person_has_active_order {
        return Err(ShopServiceError::DeliveryPersonBusy);
    }
    Ok(())
}

/// What closing an order does to its delivery person's availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cooldown {
    /// Unavailable for new orders until this instant.
    Until(DateTime<Utc>),
    /// Available again straight away.
    Clear,
}

impl Cooldown {
    pub fn unavailable_until(self) -> Option<DateTime<Utc>> {
        match self {
            Cooldown::Until(at) => Some(at),
            Cooldown::Clear => None,
        }
    }
}

/// Cooldown to record when an order reaches `status`; `None` unless DELIVERED or FAILED.
pub fn cooldown_after(status: OrderStatus, now: DateTime<Utc>) -> Option<Cooldown> {
    match status {
        OrderStatus::Delivered => Some(Cooldown::Until(
            now + Duration::minutes(DELIVERY_COOLDOWN_MINUTES),
        )),
        OrderStatus::Failed => Some(Cooldown::Clear),
        OrderStatus::InProgress | OrderStatus::OutForDelivery => None,
    }
}

/// Who is moving an order to a final status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedBy {
    /// The assigned delivery person, only while the order is out for delivery.
    DeliveryPerson(i32),
    /// Admin override from any status.
    Admin,
}

/// Checked inside the closing transaction after the order row is locked.
pub fn check_closable(order: &Order, by: ClosedBy) -> Result<(), ShopServiceError> {
    let ClosedBy::DeliveryPerson(person_id) = by else {
        return Ok(());
    };
    if order.delivery_person_id != Some(person_id) {
        return Err(ShopServiceError::Forbidden);
    }
    if order.status != OrderStatus::OutForDelivery {
        return Err(ShopServiceError::OrderNotAvailable);
    }
    Ok(())
}

/// Non-empty and at most `max` characters.
pub fn validate_text(field: &str, value: &str, max: usize) -> Result<(), ShopServiceError> {
    if value.trim().is_empty() {
        return Err(ShopServiceError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(ShopServiceError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
