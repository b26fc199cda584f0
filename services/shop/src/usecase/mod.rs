pub mod account;
pub mod catalog;
pub mod delivery;
pub mod discount;
pub mod order;
pub mod users;

#[cfg(test)]
pub(crate) mod memory;
