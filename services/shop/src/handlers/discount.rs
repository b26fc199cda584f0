use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use pizzeria_auth_types::credentials::Credentials;
use pizzeria_domain::role::Role;

use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::discount::{CheckBirthdayUseCase, ValidateDiscountCodeUseCase};

use super::authorize;

// ── GET /discount/validate ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ValidateQuery {
    #[serde(default)]
    pub code: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: &'static str,
    pub discount_percentage: Option<i32>,
    pub is_birthday: bool,
}

pub async fn validate_code(
    credentials: Credentials,
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
) -> Result<Json<ValidateResponse>, ShopServiceError> {
    let user = authorize(&state, &credentials, Role::Customer).await?;
    let usecase = ValidateDiscountCodeUseCase {
        repo: state.discount_code_repo(),
    };
    let result = usecase.execute(&user, &query.code).await?;
    Ok(Json(ValidateResponse {
        valid: result.valid,
        message: result.message,
        discount_percentage: result.discount_percentage,
        is_birthday: result.is_birthday,
    }))
}

// ── GET /discount/birthday ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BirthdayResponse {
    pub is_birthday: bool,
    pub already_used: bool,
    pub eligible: bool,
}

pub async fn birthday(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<BirthdayResponse>, ShopServiceError> {
    let user = authorize(&state, &credentials, Role::Customer).await?;
    let usecase = CheckBirthdayUseCase {
        users: state.user_repo(),
        codes: state.discount_code_repo(),
    };
    let status = usecase.execute(&user, Utc::now().date_naive()).await?;
    Ok(Json(BirthdayResponse {
        is_birthday: status.is_birthday,
        already_used: status.already_used,
        eligible: status.eligible,
    }))
}
