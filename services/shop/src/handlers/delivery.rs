use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use pizzeria_auth_types::credentials::Credentials;
use pizzeria_domain::role::Role;

use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::delivery::{
    AssignDeliveryUseCase, ListAssignedDeliveriesUseCase, ListAvailableDeliveriesUseCase,
    UpdateDeliveryStatusUseCase,
};

use super::authorize;
use super::order::OrderListResponse;

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

// ── GET /delivery/available ──────────────────────────────────────────────────

pub async fn available(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<OrderListResponse>, ShopServiceError> {
    authorize(&state, &credentials, Role::Delivery).await?;
    let usecase = ListAvailableDeliveriesUseCase {
        deliveries: state.delivery_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

// ── GET /delivery/assigned ───────────────────────────────────────────────────

pub async fn assigned(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<OrderListResponse>, ShopServiceError> {
    let user = authorize(&state, &credentials, Role::Delivery).await?;
    let usecase = ListAssignedDeliveriesUseCase {
        users: state.user_repo(),
        deliveries: state.delivery_repo(),
    };
    Ok(Json(usecase.execute(&user).await?.into()))
}

// ── POST /delivery/assign ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignRequest {
    pub order_id: i32,
}

pub async fn assign(
    credentials: Credentials,
    State(state): State<AppState>,
    Json(body): Json<AssignRequest>,
) -> Result<Json<OkResponse>, ShopServiceError> {
    let user = authorize(&state, &credentials, Role::Delivery).await?;
    let usecase = AssignDeliveryUseCase {
        users: state.user_repo(),
        deliveries: state.delivery_repo(),
    };
    usecase.execute(&user, body.order_id, Utc::now()).await?;
    Ok(Json(OkResponse { ok: true }))
}

// ── POST /delivery/update-status ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub order_id: i32,
    pub status: String,
}

pub async fn update_status(
    credentials: Credentials,
    State(state): State<AppState>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<OkResponse>, ShopServiceError> {
    let user = authorize(&state, &credentials, Role::Delivery).await?;
    let usecase = UpdateDeliveryStatusUseCase {
        users: state.user_repo(),
        deliveries: state.delivery_repo(),
    };
    usecase
        .execute(&user, body.order_id, &body.status, Utc::now())
        .await?;
    Ok(Json(OkResponse { ok: true }))
}
