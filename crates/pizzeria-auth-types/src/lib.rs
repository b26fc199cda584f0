//! Authentication types shared by the pizzeria binaries.
//!
//! Provides the per-request `Credentials` extractor, the credential cookie
//! builders used by the admin pages, and salted password hashing.

pub mod cookie;
pub mod credentials;
pub mod password;
