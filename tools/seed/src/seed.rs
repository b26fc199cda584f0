use anyhow::Context as _;
use chrono::Utc;
use rand::RngExt;
use tracing::{info, warn};

use pizzeria_domain::order::OrderStatus;
use pizzeria_shop::domain::repository::UserRepository;
use pizzeria_shop::error::ShopServiceError;
use pizzeria_shop::state::AppState;
use pizzeria_shop::usecase::account::{
    CreateDeliveryPersonInput, CreateDeliveryPersonUseCase, RegisterCustomerUseCase,
};
use pizzeria_shop::usecase::catalog::{
    CreateExtraItemUseCase, CreateIngredientUseCase, CreatePizzaInput, CreatePizzaUseCase,
    ExtraItemInput, IngredientInput, ListExtraItemsUseCase, ListPizzasUseCase,
};
use pizzeria_shop::usecase::discount::{CreateDiscountCodeInput, CreateDiscountCodeUseCase};
use pizzeria_shop::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, UpdateOrderStatusUseCase,
};

use crate::data;

/// Final statuses drawn for seeded orders.
const SEEDED_STATUSES: [OrderStatus; 3] = [
    OrderStatus::InProgress,
    OrderStatus::Delivered,
    OrderStatus::Failed,
];

/// How much random data to generate on top of the fixed catalogue.
pub struct SeedCounts {
    pub customers: usize,
    pub delivery_persons: usize,
    pub orders: usize,
}

/// Rows that already exist are left alone so the tool can be re-run.
fn skip_existing<T>(result: Result<T, ShopServiceError>, what: &str) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(
            e @ (ShopServiceError::UsernameTaken
            | ShopServiceError::IngredientAlreadyExists
            | ShopServiceError::PizzaAlreadyExists
            | ShopServiceError::DiscountCodeAlreadyExists),
        ) => {
            info!(what, reason = %e, "skipped");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("failed to seed {what}")),
    }
}

pub struct Seeder {
    pub state: AppState,
    pub password: String,
}

impl Seeder {
    pub async fn run(&self, counts: &SeedCounts) -> anyhow::Result<()> {
        self.catalogue().await?;
        let customers = self.customers(counts.customers).await?;
        self.delivery_persons(counts.delivery_persons).await?;
        self.orders(&customers, counts.orders).await?;
        Ok(())
    }

    async fn catalogue(&self) -> anyhow::Result<()> {
        let ingredients = CreateIngredientUseCase {
            repo: self.state.ingredient_repo(),
        };
        for &(name, cost_cents, has_meat, has_animal_products) in data::INGREDIENTS {
            let created = ingredients.execute(IngredientInput {
                name: name.to_owned(),
                cost_cents,
                has_meat,
                has_animal_products,
            });
            skip_existing(created.await, name)?;
        }

        let pizzas = CreatePizzaUseCase {
            pizzas: self.state.pizza_repo(),
            ingredients: self.state.ingredient_repo(),
        };
        for &(name, recipe) in data::PIZZAS {
            let created = pizzas.execute(CreatePizzaInput {
                name: name.to_owned(),
                ingredient_names: recipe.iter().map(|s| (*s).to_owned()).collect(),
            });
            skip_existing(created.await, name)?;
        }

        // Extra items have no unique name, so existing ones are matched by hand.
        let existing = ListExtraItemsUseCase {
            repo: self.state.extra_item_repo(),
        }
        .execute()
        .await
        .context("failed to list extra items")?;
        let extras = CreateExtraItemUseCase {
            repo: self.state.extra_item_repo(),
        };
        for &(name, category, cents) in data::EXTRA_ITEMS {
            if existing.iter().any(|item| item.name == name) {
                continue;
            }
            extras
                .execute(ExtraItemInput {
                    name: name.to_owned(),
                    category: category.to_owned(),
                    price: data::price(cents),
                })
                .await
                .with_context(|| format!("failed to seed {name}"))?;
        }

        let codes = CreateDiscountCodeUseCase {
            repo: self.state.discount_code_repo(),
        };
        for &(code, discount_percentage) in data::DISCOUNT_CODES {
            let created = codes.execute(CreateDiscountCodeInput {
                code: code.to_owned(),
                discount_percentage,
            });
            skip_existing(created.await, code)?;
        }

        info!("catalogue seeded");
        Ok(())
    }

    /// Returns the usernames that were created.
    async fn customers(&self, count: usize) -> anyhow::Result<Vec<String>> {
        let register = RegisterCustomerUseCase {
            repo: self.state.user_repo(),
            hasher: self.state.hasher.clone(),
        };
        let mut usernames = Vec::with_capacity(count);
        for _ in 0..count {
            let input = data::random_customer(&mut rand::rng(), &self.password);
            let username = input.username.clone();
            if skip_existing(register.execute(input).await, &username)?.is_some() {
                usernames.push(username);
            }
        }
        info!(created = usernames.len(), "customers seeded");
        Ok(usernames)
    }

    async fn delivery_persons(&self, count: usize) -> anyhow::Result<()> {
        let create = CreateDeliveryPersonUseCase {
            repo: self.state.user_repo(),
            hasher: self.state.hasher.clone(),
        };
        let mut created = 0;
        for _ in 0..count {
            let (name, username, vehicle) = {
                let mut rng = rand::rng();
                let (name, username) = data::random_person(&mut rng, "delivery_");
                (name, username, data::pick(&mut rng, data::VEHICLES))
            };
            let result = create
                .execute(CreateDeliveryPersonInput {
                    username: username.clone(),
                    password: self.password.clone(),
                    name,
                    vehicle_type: Some(vehicle.to_owned()),
                })
                .await;
            if skip_existing(result, &username)?.is_some() {
                created += 1;
            }
        }
        info!(created, "delivery persons seeded");
        Ok(())
    }

    async fn orders(&self, customers: &[String], count: usize) -> anyhow::Result<()> {
        if customers.is_empty() {
            warn!("no customers to place orders for");
            return Ok(());
        }
        let pizza_ids: Vec<i32> = ListPizzasUseCase {
            repo: self.state.pizza_repo(),
        }
        .execute()
        .await
        .context("failed to list pizzas")?
        .iter()
        .map(|p| p.id)
        .collect();
        let extra_ids: Vec<i32> = ListExtraItemsUseCase {
            repo: self.state.extra_item_repo(),
        }
        .execute()
        .await
        .context("failed to list extra items")?
        .iter()
        .map(|e| e.id)
        .collect();

        let place = CreateOrderUseCase {
            users: self.state.user_repo(),
            pizzas: self.state.pizza_repo(),
            extras: self.state.extra_item_repo(),
            codes: self.state.discount_code_repo(),
            orders: self.state.order_repo(),
        };
        let finish = UpdateOrderStatusUseCase {
            orders: self.state.order_repo(),
            deliveries: self.state.delivery_repo(),
        };
        let users = self.state.user_repo();

        for _ in 0..count {
            let (username, cart, discount_code, status) = {
                let mut rng = rand::rng();
                let username = customers[rng.random_range(0..customers.len())].clone();
                let cart = data::random_cart(&mut rng, &pizza_ids, &extra_ids);
                let discount_code = rng.random_bool(0.2).then(|| "SAVE10".to_owned());
                let status = SEEDED_STATUSES[rng.random_range(0..SEEDED_STATUSES.len())];
                (username, cart, discount_code, status)
            };
            let Some(user) = users
                .find_by_username(&username)
                .await
                .context("failed to load customer")?
            else {
                continue;
            };

            let input = CreateOrderInput {
                delivery_address: String::new(),
                postal_code: String::new(),
                discount_code,
                cart,
            };
            let order_id = match place.execute(&user, input).await {
                Ok(id) => id,
                Err(ShopServiceError::Internal(e)) => return Err(e.context("failed to place order")),
                Err(e) => {
                    warn!(username, reason = %e, "order rejected");
                    continue;
                }
            };

            if status != OrderStatus::InProgress {
                finish
                    .execute(order_id, &status.to_string(), Utc::now())
                    .await
                    .with_context(|| format!("failed to finish order {order_id}"))?;
            }
            info!(order_id, username, status = %status, "order seeded");
        }
        Ok(())
    }
}
