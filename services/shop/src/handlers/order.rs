use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pizzeria_domain::catalog::ExtraItemCategory;
use pizzeria_domain::order::OrderStatus;

use crate::domain::types::{ExtraLine, Order, OrderDetails, OrderSummary, PizzaLine};
use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::order::{
    CartItemKind, CartLine, CreateOrderInput, CreateOrderUseCase, GetOrderDetailsUseCase,
    ListCustomerOrdersUseCase,
};

use super::{authenticate, authorize_customer};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    #[serde(serialize_with = "pizzeria_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub postal_code: String,
    pub discount_code_id: Option<i32>,
    pub delivery_person_id: Option<i32>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            created_at: order.created_at,
            status: order.status,
            delivery_address: order.delivery_address,
            postal_code: order.postal_code,
            discount_code_id: order.discount_code_id,
            delivery_person_id: order.delivery_person_id,
        }
    }
}

/// Order row as shown by every list endpoint.
#[derive(Serialize)]
pub struct OrderSummaryResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub customer_name: String,
    pub discount_code: Option<String>,
    pub discount_percentage: Option<i32>,
    pub delivery_person_name: Option<String>,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        Self {
            order: summary.order.into(),
            customer_name: summary.customer_name,
            discount_code: summary.discount_code,
            discount_percentage: summary.discount_percentage,
            delivery_person_name: summary.delivery_person_name,
        }
    }
}

#[derive(Serialize)]
pub struct OrderListResponse {
    pub ok: bool,
    pub orders: Vec<OrderSummaryResponse>,
}

impl From<Vec<OrderSummary>> for OrderListResponse {
    fn from(orders: Vec<OrderSummary>) -> Self {
        Self {
            ok: true,
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct OrderPizzaResponse {
    pub pizza_id: i32,
    pub pizza_name: String,
    pub quantity: i32,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub unit_price: Decimal,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub line_total: Decimal,
}

impl From<&PizzaLine> for OrderPizzaResponse {
    fn from(line: &PizzaLine) -> Self {
        Self {
            pizza_id: line.pizza.id,
            pizza_name: line.pizza.name.clone(),
            quantity: line.quantity,
            unit_price: line.pizza.price(),
            line_total: line.line_total(),
        }
    }
}

#[derive(Serialize)]
pub struct OrderExtraItemResponse {
    pub extra_item_id: i32,
    pub extra_item_name: String,
    pub category: ExtraItemCategory,
    pub quantity: i32,
    pub is_free: bool,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub unit_price: Decimal,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub line_total: Decimal,
}

impl From<&ExtraLine> for OrderExtraItemResponse {
    fn from(line: &ExtraLine) -> Self {
        Self {
            extra_item_id: line.item.id,
            extra_item_name: line.item.name.clone(),
            category: line.item.category,
            quantity: line.quantity,
            is_free: line.is_free,
            unit_price: line.item.price,
            line_total: line.line_total(),
        }
    }
}

#[derive(Serialize)]
pub struct OrderDetailsResponse {
    pub order: OrderResponse,
    pub pizzas: Vec<OrderPizzaResponse>,
    pub extra_items: Vec<OrderExtraItemResponse>,
    pub discount_code: Option<String>,
    pub discount_percentage: Option<i32>,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub subtotal: Decimal,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub discount: Decimal,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub total_price: Decimal,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        let totals = details.totals();
        Self {
            pizzas: details.pizzas.iter().map(Into::into).collect(),
            extra_items: details.extras.iter().map(Into::into).collect(),
            discount_code: details.discount.as_ref().map(|c| c.code.clone()),
            discount_percentage: details.discount.as_ref().map(|c| c.discount_percentage),
            order: details.order.into(),
            subtotal: totals.subtotal,
            discount: totals.discount,
            total_price: totals.total,
        }
    }
}

// ── POST /order/create ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CartItemRequest {
    pub id: i32,
    pub quantity: i32,
    /// `"extra"` for desserts and drinks; anything else is a pizza.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub discount_code: Option<String>,
    #[serde(default)]
    pub cart_items: Vec<CartItemRequest>,
}

#[derive(Serialize)]
pub struct CreateOrderResponse {
    pub ok: bool,
    pub order_id: i32,
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ShopServiceError> {
    let user = authorize_customer(&state, &body.username, &body.password).await?;
    let cart = body
        .cart_items
        .into_iter()
        .map(|item| CartLine {
            kind: match item.kind.as_deref() {
                Some("extra") => CartItemKind::Extra,
                _ => CartItemKind::Pizza,
            },
            id: item.id,
            quantity: item.quantity,
        })
        .collect();

    let usecase = CreateOrderUseCase {
        users: state.user_repo(),
        pizzas: state.pizza_repo(),
        extras: state.extra_item_repo(),
        codes: state.discount_code_repo(),
        orders: state.order_repo(),
    };
    let order_id = usecase
        .execute(
            &user,
            CreateOrderInput {
                delivery_address: body.delivery_address,
                postal_code: body.postal_code,
                discount_code: body.discount_code.filter(|c| !c.trim().is_empty()),
                cart,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse { ok: true, order_id }),
    ))
}

// ── POST /order/list ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CustomerRequest {
    pub username: String,
    pub password: String,
}

pub async fn list_orders(
    State(state): State<AppState>,
    Json(body): Json<CustomerRequest>,
) -> Result<Json<OrderListResponse>, ShopServiceError> {
    let user = authorize_customer(&state, &body.username, &body.password).await?;
    let usecase = ListCustomerOrdersUseCase {
        users: state.user_repo(),
        orders: state.order_repo(),
    };
    let orders = usecase.execute(&user).await?;
    Ok(Json(orders.into()))
}

// ── POST /order/details ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OrderDetailsRequest {
    pub username: String,
    pub password: String,
    pub order_id: i32,
}

#[derive(Serialize)]
pub struct OrderDetailsEnvelope {
    pub ok: bool,
    pub order: OrderDetailsResponse,
}

pub async fn order_details(
    State(state): State<AppState>,
    Json(body): Json<OrderDetailsRequest>,
) -> Result<Json<OrderDetailsEnvelope>, ShopServiceError> {
    let user = authenticate(&state, &body.username, &body.password).await?;
    let usecase = GetOrderDetailsUseCase {
        orders: state.order_repo(),
    };
    let details = usecase.execute(&user, body.order_id).await?;
    Ok(Json(OrderDetailsEnvelope {
        ok: true,
        order: details.into(),
    }))
}
