//! Catalogue classification types: diet and extra-item category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dietary flags carried by a single ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DietFlags {
    pub has_meat: bool,
    pub has_animal_products: bool,
}

/// Diet classification of a pizza, derived from its ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DietType {
    Omnivore,
    Vegetarian,
    Vegan,
}

impl DietType {
    /// Vegan unless any ingredient has meat or animal products; vegetarian unless any has meat.
    ///
    /// A pizza without ingredients is vegan.
    pub fn classify<I>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = DietFlags>,
    {
        let mut diet = Self::Vegan;
        for flags in ingredients {
            if flags.has_meat {
                return Self::Omnivore;
            }
            if flags.has_animal_products {
                diet = Self::Vegetarian;
            }
        }
        diet
    }

    pub fn is_vegan(self) -> bool {
        self == Self::Vegan
    }

    pub fn is_vegetarian(self) -> bool {
        matches!(self, Self::Vegan | Self::Vegetarian)
    }

    /// Human-readable label used on the menu page.
    pub fn label(self) -> &'static str {
        match self {
            Self::Omnivore => "Omnivore",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
        }
    }
}

/// Category of an extra (non-pizza) item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraItemCategory {
    Dessert,
    Drink,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("category must be 'dessert' or 'drink', got {0:?}")]
pub struct UnknownCategory(pub String);

impl ExtraItemCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dessert => "dessert",
            Self::Drink => "drink",
        }
    }
}

impl fmt::Display for ExtraItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtraItemCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dessert" => Ok(Self::Dessert),
            "drink" => Ok(Self::Drink),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}
