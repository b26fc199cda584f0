//! Test utilities for pizzeria services.
//!
//! Provides credential header builders and the JSON fixture loader.
//! Import from tests only, never from production code.

pub mod auth;
pub mod fixture;
