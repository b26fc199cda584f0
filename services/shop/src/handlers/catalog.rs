use axum::{
    Json,
    extract::{Path, State},
    response::{Html, Redirect},
};
use rust_decimal::Decimal;
use serde::Serialize;

use pizzeria_domain::catalog::{DietType, ExtraItemCategory};

use crate::domain::types::{ExtraItem, Pizza};
use crate::error::ShopServiceError;
use crate::html;
use crate::state::AppState;
use crate::usecase::catalog::{
    GetPizzaInformationUseCase, ListExtraItemsUseCase, ListPizzasUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MenuItemResponse {
    pub id: i32,
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub price: Decimal,
    pub diet: DietType,
    pub is_vegan: bool,
    pub is_vegetarian: bool,
}

impl From<Pizza> for MenuItemResponse {
    fn from(pizza: Pizza) -> Self {
        let diet = pizza.diet();
        Self {
            price: pizza.price(),
            id: pizza.id,
            ingredients: pizza.ingredients.into_iter().map(|i| i.name).collect(),
            name: pizza.name,
            diet,
            is_vegan: diet.is_vegan(),
            is_vegetarian: diet.is_vegetarian(),
        }
    }
}

#[derive(Serialize)]
pub struct ExtraItemResponse {
    pub id: i32,
    pub name: String,
    pub category: ExtraItemCategory,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub price: Decimal,
}

impl From<ExtraItem> for ExtraItemResponse {
    fn from(item: ExtraItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            category: item.category,
            price: item.price,
        }
    }
}

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn index() -> Redirect {
    Redirect::to("/menu")
}

// ── GET /menu ────────────────────────────────────────────────────────────────

pub async fn menu_page(State(state): State<AppState>) -> Result<Html<String>, ShopServiceError> {
    let usecase = ListPizzasUseCase {
        repo: state.pizza_repo(),
    };
    let pizzas = usecase.execute().await?;
    Ok(Html(html::menu_page(&pizzas)))
}

// ── GET /menu.json ───────────────────────────────────────────────────────────

pub async fn menu_json(
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuItemResponse>>, ShopServiceError> {
    let usecase = ListPizzasUseCase {
        repo: state.pizza_repo(),
    };
    let pizzas = usecase.execute().await?;
    Ok(Json(pizzas.into_iter().map(Into::into).collect()))
}

// ── GET /menu/{name} ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PizzaInformationResponse {
    pub name: String,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub price: Decimal,
    pub is_vegan: bool,
    pub is_vegetarian: bool,
}

pub async fn pizza_information(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PizzaInformationResponse>, ShopServiceError> {
    let usecase = GetPizzaInformationUseCase {
        repo: state.pizza_repo(),
    };
    let pizza = usecase.execute(&name).await?;
    let diet = pizza.diet();
    Ok(Json(PizzaInformationResponse {
        price: pizza.price(),
        name: pizza.name,
        is_vegan: diet.is_vegan(),
        is_vegetarian: diet.is_vegetarian(),
    }))
}

// ── GET /extra-items ─────────────────────────────────────────────────────────

pub async fn extra_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExtraItemResponse>>, ShopServiceError> {
    let usecase = ListExtraItemsUseCase {
        repo: state.extra_item_repo(),
    };
    let items = usecase.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}
