use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pizzeria_domain::role::Role;

use crate::domain::types::Customer;
use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::account::{
    AuthenticateUseCase, GetAccountUseCase, RegisterCustomerInput, RegisterCustomerUseCase,
};

use super::authorize_customer;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ── POST /register ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub gender: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub no_birth_date: bool,
    pub address: String,
    #[serde(rename = "postcode", alias = "postal_code")]
    pub postal_code: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub user_id: i32,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ShopServiceError> {
    let usecase = RegisterCustomerUseCase {
        repo: state.user_repo(),
        hasher: state.hasher.clone(),
    };
    let user_id = usecase
        .execute(RegisterCustomerInput {
            username: body.username,
            password: body.password,
            name: body.name,
            gender: body.gender,
            birth_date: body.birth_date,
            no_birth_date: body.no_birth_date,
            address: body.address,
            postal_code: body.postal_code,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { ok: true, user_id })))
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub msg: &'static str,
    pub role: Role,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ShopServiceError> {
    let usecase = AuthenticateUseCase {
        repo: state.user_repo(),
        hasher: state.hasher.clone(),
    };
    let user = usecase.execute(&body.username, &body.password).await?;
    Ok(Json(LoginResponse {
        ok: true,
        msg: "Login successful",
        role: user.role,
    }))
}

// ── POST /account ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CustomerResponse {
    pub name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    pub postal_code: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            name: customer.name,
            gender: customer.gender,
            birth_date: customer.birth_date,
            address: customer.address,
            postal_code: customer.postal_code,
        }
    }
}

#[derive(Serialize)]
pub struct AccountResponse {
    pub ok: bool,
    pub customer: CustomerResponse,
}

pub async fn account(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, ShopServiceError> {
    let user = authorize_customer(&state, &body.username, &body.password).await?;
    let usecase = GetAccountUseCase {
        repo: state.user_repo(),
    };
    let customer = usecase.execute(&user).await?;
    Ok(Json(AccountResponse {
        ok: true,
        customer: customer.into(),
    }))
}
