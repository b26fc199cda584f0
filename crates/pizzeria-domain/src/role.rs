//! User role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role attached to every user account.
///
/// Wire and storage format: `"ADMIN"`, `"DELIVERY"`, `"CUSTOMER"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Delivery,
    Customer,
}

/// Returned when a persisted or submitted role string is not one of the three known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Delivery => "DELIVERY",
            Self::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "DELIVERY" => Ok(Self::Delivery),
            "CUSTOMER" => Ok(Self::Customer),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_roles_to_persisted_strings() {
        assert_eq!(Role::Admin.as_str(), "ADMIN");
        assert_eq!(Role::Delivery.as_str(), "DELIVERY");
        assert_eq!(Role::Customer.as_str(), "CUSTOMER");
    }

    #[test]
    fn should_parse_persisted_strings() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("DELIVERY".parse::<Role>(), Ok(Role::Delivery));
        assert_eq!("CUSTOMER".parse::<Role>(), Ok(Role::Customer));
    }

    #[test]
    fn should_reject_unknown_role_string() {
        assert_eq!(
            "customer".parse::<Role>(),
            Err(UnknownRole("customer".to_owned()))
        );
    }

    #[test]
    fn should_serialize_like_storage_format() {
        assert_eq!(serde_json::to_string(&Role::Delivery).unwrap(), "\"DELIVERY\"");
        let parsed: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }
}
