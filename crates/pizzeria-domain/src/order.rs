//! Order lifecycle types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Code that triggers the birthday promotion instead of a percentage discount.
pub const BIRTHDAY_CODE: &str = "BIRTHDAY";

/// Minutes a delivery person stays unavailable after a successful delivery.
pub const DELIVERY_COOLDOWN_MINUTES: i64 = 30;

/// Order status.
///
/// `IN_PROGRESS → OUT_FOR_DELIVERY → DELIVERED | FAILED`. The last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    InProgress,
    OutForDelivery,
    Delivered,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl OrderStatus {
    pub const ALL: [Self; 4] = [
        Self::InProgress,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Failed => "FAILED",
        }
    }

    /// An order that still occupies its delivery person.
    pub fn is_active(self) -> bool {
        matches!(self, Self::InProgress | Self::OutForDelivery)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownOrderStatus(s.to_owned()))
    }
}
