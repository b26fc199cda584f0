//! Domain types shared across the Pizzeria workspace.
//!
//! This crate contains only pure types and rules with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; storage and HTTP adapters convert
//! to and from these types at their boundary.

pub mod birthday;
pub mod catalog;
pub mod order;
pub mod pricing;
pub mod role;
