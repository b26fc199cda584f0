//! Fixed demo catalogue and the pools random profiles are drawn from.

use rand::RngExt;
use rand::rngs::ThreadRng;
use rust_decimal::Decimal;

use pizzeria_shop::usecase::account::RegisterCustomerInput;
use pizzeria_shop::usecase::order::{CartItemKind, CartLine};

/// Name, cost in cents, has meat, has animal products.
pub const INGREDIENTS: &[(&str, i64, bool, bool)] = &[
    ("Tomato sauce", 50, false, false),
    ("Mozzarella", 120, false, true),
    ("Parmesan", 110, false, true),
    ("Vegan cheese", 130, false, false),
    ("Pepperoni", 150, true, true),
    ("Ham", 140, true, true),
    ("Chicken", 160, true, true),
    ("Mushrooms", 80, false, false),
    ("Onion", 40, false, false),
    ("Green pepper", 60, false, false),
    ("Olives", 70, false, false),
    ("Pineapple", 90, false, false),
    ("Spinach", 60, false, false),
    ("Basil", 30, false, false),
];

pub const PIZZAS: &[(&str, &[&str])] = &[
    ("Margherita", &["Tomato sauce", "Mozzarella", "Basil"]),
    ("Marinara", &["Tomato sauce", "Olives", "Basil"]),
    ("Pepperoni", &["Tomato sauce", "Mozzarella", "Pepperoni"]),
    ("Hawaiian", &["Tomato sauce", "Mozzarella", "Ham", "Pineapple"]),
    ("Funghi", &["Tomato sauce", "Mozzarella", "Mushrooms"]),
    (
        "Vegetariana",
        &["Tomato sauce", "Mozzarella", "Mushrooms", "Onion", "Green pepper", "Olives"],
    ),
    (
        "Vegan Garden",
        &["Tomato sauce", "Vegan cheese", "Spinach", "Mushrooms", "Olives"],
    ),
    (
        "Pollo",
        &["Tomato sauce", "Mozzarella", "Chicken", "Onion", "Green pepper"],
    ),
    ("Quattro Formaggi", &["Tomato sauce", "Mozzarella", "Parmesan", "Basil"]),
];

/// Name, category, price in cents.
pub const EXTRA_ITEMS: &[(&str, &str, i64)] = &[
    ("Tiramisu", "dessert", 450),
    ("Panna cotta", "dessert", 395),
    ("Chocolate brownie", "dessert", 350),
    ("Cola", "drink", 250),
    ("Sparkling water", "drink", 195),
    ("Lemonade", "drink", 275),
];

pub const DISCOUNT_CODES: &[(&str, i32)] = &[("SAVE10", 10), ("WELCOME15", 15), ("BIRTHDAY", 100)];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jamie", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Avery", "Quinn", "Sage",
    "Blake", "Drew", "Reese", "Cameron", "Dakota", "Rowan", "Skyler", "Phoenix", "River",
    "Emerson",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Maple Dr", "Cedar Ln", "Pine Rd", "Elm St", "Park Ave",
    "Washington St", "Lake Dr", "Hill Rd", "River Rd", "Forest Ave", "Sunset Blvd", "Broadway",
    "Market St",
];

const GENDERS: &[&str] = &["Male", "Female", "Non-binary", "Prefer not to say"];

pub const VEHICLES: &[&str] = &["bike", "scooter", "car"];

pub fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn pick<'a>(rng: &mut ThreadRng, options: &[&'a str]) -> &'a str {
    options[rng.random_range(0..options.len())]
}

/// A first and last name joined by a space, plus a username built from them.
pub fn random_person(rng: &mut ThreadRng, prefix: &str) -> (String, String) {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let username = format!("{prefix}{first}{last}{}", rng.random_range(0..1000));
    (format!("{first} {last}"), username)
}

pub fn random_customer(rng: &mut ThreadRng, password: &str) -> RegisterCustomerInput {
    let (name, username) = random_person(rng, "");
    let birth_date = format!(
        "{:04}-{:02}-{:02}",
        rng.random_range(1970..2005),
        rng.random_range(1..=12),
        rng.random_range(1..=28)
    );
    RegisterCustomerInput {
        username,
        password: password.to_owned(),
        name,
        gender: pick(rng, GENDERS).to_owned(),
        birth_date,
        no_birth_date: rng.random_bool(0.1),
        address: format!("{} {}", rng.random_range(100..10_000), pick(rng, STREETS)),
        postal_code: format!("{:05}", rng.random_range(10_000..100_000)),
    }
}

/// One to four pizza lines, and extras in roughly six orders out of ten.
pub fn random_cart(rng: &mut ThreadRng, pizza_ids: &[i32], extra_ids: &[i32]) -> Vec<CartLine> {
    let mut cart = Vec::new();
    if !pizza_ids.is_empty() {
        for _ in 0..rng.random_range(1..=4) {
            cart.push(CartLine {
                kind: CartItemKind::Pizza,
                id: pizza_ids[rng.random_range(0..pizza_ids.len())],
                quantity: rng.random_range(1..=3),
            });
        }
    }
    if !extra_ids.is_empty() && rng.random_bool(0.6) {
        for _ in 0..rng.random_range(1..=3).min(extra_ids.len()) {
            cart.push(CartLine {
                kind: CartItemKind::Extra,
                id: extra_ids[rng.random_range(0..extra_ids.len())],
                quantity: rng.random_range(1..=2),
            });
        }
    }
    cart
}
