//! Pizza pricing.
//!
//! A pizza's price is derived from its ingredients on every read:
//! `(dough + Σ ingredient cost) × margin × VAT`, in that order, in decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed cost of the dough added to every pizza (5.00).
pub fn dough_cost() -> Decimal {
    Decimal::new(500, 2)
}

/// Restaurant margin multiplier (40 %).
pub fn margin() -> Decimal {
    Decimal::new(14, 1)
}

/// VAT multiplier (9 %).
pub fn vat() -> Decimal {
    Decimal::new(109, 2)
}

/// Exact price of a pizza built from the given ingredient costs.
pub fn pizza_price<I>(ingredient_costs: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let base = ingredient_costs
        .into_iter()
        .fold(dough_cost(), |acc, cost| acc + cost);
    base * margin() * vat()
}

/// Round a money amount to cents for presentation, half away from zero.
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an integer amount of cents (as entered in the admin panel) to a money amount.
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Apply a percentage discount (1–100) to an amount.
pub fn apply_percentage_discount(amount: Decimal, percentage: u8) -> Decimal {
    let keep = Decimal::from(100u8.saturating_sub(percentage.min(100)));
    amount * keep / Decimal::ONE_HUNDRED
}
