use rust_decimal::Decimal;
use tracing::info;

use pizzeria_domain::catalog::ExtraItemCategory;
use pizzeria_domain::pricing;

use crate::domain::repository::{ExtraItemRepository, IngredientRepository, PizzaRepository};
use crate::domain::types::{
    ExtraItem, Ingredient, MAX_CATALOG_NAME_LEN, NewExtraItem, NewIngredient, Pizza, validate_text,
};
use crate::error::ShopServiceError;

// ── Ingredients ──────────────────────────────────────────────────────────────

pub struct IngredientInput {
    pub name: String,
    /// Cost in cents, as entered in the admin panel.
    pub cost_cents: i64,
    pub has_meat: bool,
    pub has_animal_products: bool,
}

impl IngredientInput {
    fn validate(self) -> Result<NewIngredient, ShopServiceError> {
        let name = self.name.trim().to_owned();
        validate_text("name", &name, MAX_CATALOG_NAME_LEN)?;
        if self.cost_cents < 0 {
            return Err(ShopServiceError::Validation("cost must not be negative".into()));
        }
        Ok(NewIngredient {
            name,
            cost: pricing::from_cents(self.cost_cents),
            has_meat: self.has_meat,
            has_animal_products: self.has_animal_products,
        })
    }
}

pub struct ListIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> ListIngredientsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Ingredient>, ShopServiceError> {
        self.repo.list().await
    }
}

pub struct CreateIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> CreateIngredientUseCase<R> {
    pub async fn execute(&self, input: IngredientInput) -> Result<Ingredient, ShopServiceError> {
        let ingredient = self.repo.create(&input.validate()?).await?;
        info!(ingredient_id = ingredient.id, name = %ingredient.name, "ingredient created");
        Ok(ingredient)
    }
}

pub struct UpdateIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> UpdateIngredientUseCase<R> {
    pub async fn execute(&self, id: i32, input: IngredientInput) -> Result<(), ShopServiceError> {
        let new = input.validate()?;
        self.repo
            .update(&Ingredient {
                id,
                name: new.name,
                cost: new.cost,
                has_meat: new.has_meat,
                has_animal_products: new.has_animal_products,
            })
            .await?;
        info!(ingredient_id = id, "ingredient updated");
        Ok(())
    }
}

pub struct DeleteIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> DeleteIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ShopServiceError> {
        self.repo.delete(id).await?;
        info!(ingredient_id = id, "ingredient deleted");
        Ok(())
    }
}

// ── Pizzas ───────────────────────────────────────────────────────────────────

pub struct CreatePizzaInput {
    pub name: String,
    pub ingredient_names: Vec<String>,
}

pub struct CreatePizzaUseCase<P: PizzaRepository, I: IngredientRepository> {
    pub pizzas: P,
    pub ingredients: I,
}

impl<P: PizzaRepository, I: IngredientRepository> CreatePizzaUseCase<P, I> {
    /// Resolve every ingredient name, then insert the pizza in recipe order.
    pub async fn execute(&self, input: CreatePizzaInput) -> Result<i32, ShopServiceError> {
        let name = input.name.trim().to_owned();
        validate_text("name", &name, MAX_CATALOG_NAME_LEN)?;

        let mut names: Vec<String> = Vec::with_capacity(input.ingredient_names.len());
        for n in input.ingredient_names {
            let n = n.trim();
            if !n.is_empty() && !names.iter().any(|seen| seen == n) {
                names.push(n.to_owned());
            }
        }
        if names.is_empty() {
            return Err(ShopServiceError::Validation(
                "a pizza needs at least one ingredient".into(),
            ));
        }

        let found = self.ingredients.find_by_names(&names).await?;
        let ids = names
            .iter()
            .map(|n| {
                found
                    .iter()
                    .find(|i| &i.name == n)
                    .map(|i| i.id)
                    .ok_or(ShopServiceError::IngredientNotFound)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.pizzas.find_by_name(&name).await?.is_some() {
            return Err(ShopServiceError::PizzaAlreadyExists);
        }
        let pizza_id = self.pizzas.create(&name, &ids).await?;
        info!(pizza_id, name = %name, ingredients = ids.len(), "pizza created");
        Ok(pizza_id)
    }
}

pub struct ListPizzasUseCase<R: PizzaRepository> {
    pub repo: R,
}

impl<R: PizzaRepository> ListPizzasUseCase<R> {
    /// The menu: every pizza, cheapest first, ties by name.
    pub async fn execute(&self) -> Result<Vec<Pizza>, ShopServiceError> {
        let mut pizzas = self.repo.list().await?;
        pizzas.sort_by(|a, b| a.price().cmp(&b.price()).then_with(|| a.name.cmp(&b.name)));
        Ok(pizzas)
    }
}

pub struct GetPizzaInformationUseCase<R: PizzaRepository> {
    pub repo: R,
}

impl<R: PizzaRepository> GetPizzaInformationUseCase<R> {
    pub async fn execute(&self, name: &str) -> Result<Pizza, ShopServiceError> {
        self.repo
            .find_by_name(name)
            .await?
            .ok_or(ShopServiceError::PizzaNotFound)
    }
}

pub struct DeletePizzaUseCase<R: PizzaRepository> {
    pub repo: R,
}

impl<R: PizzaRepository> DeletePizzaUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ShopServiceError> {
        self.repo.delete(id).await?;
        info!(pizza_id = id, "pizza deleted");
        Ok(())
    }
}

// ── Extra items ──────────────────────────────────────────────────────────────

pub struct ExtraItemInput {
    pub name: String,
    pub category: String,
    pub price: Decimal,
}

impl ExtraItemInput {
    fn validate(self) -> Result<NewExtraItem, ShopServiceError> {
        let name = self.name.trim().to_owned();
        validate_text("name", &name, MAX_CATALOG_NAME_LEN)?;
        let category: ExtraItemCategory = self
            .category
            .trim()
            .parse()
            .map_err(|_| ShopServiceError::InvalidCategory)?;
        if self.price < Decimal::ZERO {
            return Err(ShopServiceError::Validation("price must not be negative".into()));
        }
        Ok(NewExtraItem {
            name,
            category,
            price: pricing::to_cents(self.price),
        })
    }
}

pub struct ListExtraItemsUseCase<R: ExtraItemRepository> {
    pub repo: R,
}

impl<R: ExtraItemRepository> ListExtraItemsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<ExtraItem>, ShopServiceError> {
        self.repo.list().await
    }
}

pub struct CreateExtraItemUseCase<R: ExtraItemRepository> {
    pub repo: R,
}

impl<R: ExtraItemRepository> CreateExtraItemUseCase<R> {
    pub async fn execute(&self, input: ExtraItemInput) -> Result<ExtraItem, ShopServiceError> {
        let item = self.repo.create(&input.validate()?).await?;
        info!(extra_item_id = item.id, name = %item.name, category = %item.category, "extra item created");
        Ok(item)
    }
}

pub struct UpdateExtraItemUseCase<R: ExtraItemRepository> {
    pub repo: R,
}

impl<R: ExtraItemRepository> UpdateExtraItemUseCase<R> {
    pub async fn execute(&self, id: i32, input: ExtraItemInput) -> Result<(), ShopServiceError> {
        let new = input.validate()?;
        self.repo
            .update(&ExtraItem {
                id,
                name: new.name,
                category: new.category,
                price: new.price,
            })
            .await?;
        info!(extra_item_id = id, "extra item updated");
        Ok(())
    }
}

pub struct DeleteExtraItemUseCase<R: ExtraItemRepository> {
    pub repo: R,
}

impl<R: ExtraItemRepository> DeleteExtraItemUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ShopServiceError> {
        self.repo.delete(id).await?;
        info!(extra_item_id = id, "extra item deleted");
        Ok(())
    }
}
