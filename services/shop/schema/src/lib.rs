//! sea-orm entities for the shop database.

pub mod customer;
pub mod delivery_person;
pub mod discount_code;
pub mod discount_usage;
pub mod extra_item;
pub mod ingredient;
pub mod order_extra_item;
pub mod order_pizza;
pub mod orders;
pub mod pizza;
pub mod pizza_ingredient;
pub mod user;
