use axum::{
    Form, Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pizzeria_auth_types::cookie::{clear_admin_cookies, set_admin_cookies};
use pizzeria_auth_types::credentials::Credentials;
use pizzeria_domain::role::Role;

use crate::domain::types::{DeliveryPerson, DiscountCode, Ingredient, User, UserSummary};
use crate::error::ShopServiceError;
use crate::html::{self, AdminDashboard};
use crate::state::AppState;
use crate::usecase::account::{
    CreateAdminUseCase, CreateDeliveryPersonInput, CreateDeliveryPersonUseCase,
    RegisterCustomerInput, RegisterCustomerUseCase,
};
use crate::usecase::catalog::{
    CreateExtraItemUseCase, CreateIngredientUseCase, CreatePizzaInput, CreatePizzaUseCase,
    DeleteExtraItemUseCase, DeleteIngredientUseCase, DeletePizzaUseCase, ExtraItemInput,
    IngredientInput, ListExtraItemsUseCase, ListIngredientsUseCase, ListPizzasUseCase,
    UpdateExtraItemUseCase, UpdateIngredientUseCase,
};
use crate::usecase::delivery::AdminAssignDeliveryUseCase;
use crate::usecase::discount::{
    CreateDiscountCodeInput, CreateDiscountCodeUseCase, DeleteDiscountCodeUseCase,
    ListDiscountCodesUseCase, UpdateDiscountCodeUseCase,
};
use crate::usecase::order::{DeleteOrderUseCase, ListAllOrdersUseCase, UpdateOrderStatusUseCase};
use crate::usecase::users::{
    DeleteDeliveryPersonUseCase, DeleteUserUseCase, ListDeliveryPersonsUseCase, ListUsersUseCase,
};

use super::authorize;
use super::catalog::MenuItemResponse;
use super::order::OrderListResponse;

async fn require_admin(
    state: &AppState,
    credentials: &Credentials,
) -> Result<User, ShopServiceError> {
    authorize(state, credentials, Role::Admin).await
}

fn back_to_dashboard() -> Redirect {
    Redirect::to("/admin")
}

/// HTML checkboxes submit `on` when ticked and nothing otherwise.
fn checked(value: Option<&str>) -> bool {
    matches!(value, Some("on" | "true" | "1"))
}

// ── GET /admin ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct AdminQuery {
    pub username: Option<String>,
    pub password: Option<String>,
}

fn login_page(status: StatusCode, error: Option<&str>) -> Response {
    (status, Html(html::admin_login_page(error))).into_response()
}

/// Turn a rejected login into the login page; anything else is a real failure.
fn login_rejection(err: ShopServiceError) -> Result<Response, ShopServiceError> {
    match err {
        ShopServiceError::InvalidCredentials => Ok(login_page(
            StatusCode::UNAUTHORIZED,
            Some("Invalid username or password"),
        )),
        ShopServiceError::Forbidden => Ok(login_page(
            StatusCode::FORBIDDEN,
            Some("This account is not an administrator"),
        )),
        other => Err(other),
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Query(query): Query<AdminQuery>,
) -> Result<Response, ShopServiceError> {
    let submitted = match (query.username, query.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some(Credentials::new(u, p)),
        _ => None,
    };
    if let Some(credentials) = submitted {
        return match require_admin(&state, &credentials).await {
            Ok(_) => {
                let jar = set_admin_cookies(jar, credentials.username, credentials.password);
                Ok((jar, back_to_dashboard()).into_response())
            }
            Err(e) => login_rejection(e),
        };
    }

    let Some(credentials) = Credentials::from_headers(&headers) else {
        return Ok(login_page(StatusCode::OK, None));
    };
    let admin = match require_admin(&state, &credentials).await {
        Ok(admin) => admin,
        Err(e) => return login_rejection(e),
    };

    let users = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let orders = ListAllOrdersUseCase {
        orders: state.order_repo(),
    };
    let delivery_persons = ListDeliveryPersonsUseCase {
        repo: state.user_repo(),
    };
    let pizzas = ListPizzasUseCase {
        repo: state.pizza_repo(),
    };
    let ingredients = ListIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let extra_items = ListExtraItemsUseCase {
        repo: state.extra_item_repo(),
    };
    let discount_codes = ListDiscountCodesUseCase {
        repo: state.discount_code_repo(),
    };
    let (users, orders, delivery_persons, pizzas, ingredients, extra_items, discount_codes) =
        tokio::try_join!(
            users.execute(),
            orders.execute(),
            delivery_persons.execute(),
            pizzas.execute(),
            ingredients.execute(),
            extra_items.execute(),
            discount_codes.execute(),
        )?;

    let page = html::admin_dashboard(&AdminDashboard {
        admin: &admin.username,
        users: &users,
        orders: &orders,
        delivery_persons: &delivery_persons,
        pizzas: &pizzas,
        ingredients: &ingredients,
        extra_items: &extra_items,
        discount_codes: &discount_codes,
    });
    Ok(Html(page).into_response())
}

// ── POST /admin/logout ───────────────────────────────────────────────────────

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (clear_admin_cookies(jar), back_to_dashboard())
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IdForm {
    pub id: i32,
}

#[derive(Deserialize)]
pub struct CreateUserForm {
    pub role: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub birth_date: String,
    pub no_birth_date: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postal_code: String,
    pub vehicle_type: Option<String>,
}

pub async fn create_user(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<CreateUserForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    match form.role.trim() {
        "customer" => {
            let usecase = RegisterCustomerUseCase {
                repo: state.user_repo(),
                hasher: state.hasher.clone(),
            };
            usecase
                .execute(RegisterCustomerInput {
                    no_birth_date: checked(form.no_birth_date.as_deref()),
                    username: form.username,
                    password: form.password,
                    name: form.name,
                    gender: form.gender,
                    birth_date: form.birth_date,
                    address: form.address,
                    postal_code: form.postal_code,
                })
                .await?;
        }
        "delivery_person" | "delivery" => {
            let usecase = CreateDeliveryPersonUseCase {
                repo: state.user_repo(),
                hasher: state.hasher.clone(),
            };
            usecase
                .execute(CreateDeliveryPersonInput {
                    username: form.username,
                    password: form.password,
                    name: form.name,
                    vehicle_type: form.vehicle_type,
                })
                .await?;
        }
        "admin" => {
            let usecase = CreateAdminUseCase {
                repo: state.user_repo(),
                hasher: state.hasher.clone(),
            };
            usecase.execute(&form.username, &form.password).await?;
        }
        _ => {
            return Err(ShopServiceError::Validation(
                "role must be customer, delivery_person or admin".into(),
            ));
        }
    }
    Ok(back_to_dashboard())
}

pub async fn delete_user(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(form.id).await?;
    Ok(back_to_dashboard())
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: Role,
    #[serde(serialize_with = "pizzeria_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub vehicle_type: Option<String>,
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        let mut response = Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            name: None,
            gender: None,
            birth_date: None,
            address: None,
            postal_code: None,
            vehicle_type: None,
        };
        if let Some(customer) = user.customer {
            response.name = Some(customer.name);
            response.gender = Some(customer.gender);
            response.birth_date = customer.birth_date;
            response.address = Some(customer.address);
            response.postal_code = Some(customer.postal_code);
        } else if let Some(person) = user.delivery_person {
            response.name = Some(person.name);
            response.vehicle_type = Some(person.vehicle_type);
        }
        response
    }
}

#[derive(Serialize)]
pub struct UserListResponse {
    pub ok: bool,
    pub users: Vec<UserResponse>,
}

pub async fn list_users(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(UserListResponse {
        ok: true,
        users: users.into_iter().map(Into::into).collect(),
    }))
}

// ── Orders ───────────────────────────────────────────────────────────────────

pub async fn list_orders(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<OrderListResponse>, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = ListAllOrdersUseCase {
        orders: state.order_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

#[derive(Deserialize)]
pub struct UpdateStatusForm {
    pub id: i32,
    pub status: String,
}

pub async fn update_order_status(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<UpdateStatusForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = UpdateOrderStatusUseCase {
        orders: state.order_repo(),
        deliveries: state.delivery_repo(),
    };
    usecase.execute(form.id, &form.status, Utc::now()).await?;
    Ok(back_to_dashboard())
}

pub async fn delete_order(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = DeleteOrderUseCase {
        orders: state.order_repo(),
    };
    usecase.execute(form.id).await?;
    Ok(back_to_dashboard())
}

#[derive(Deserialize)]
pub struct AssignDeliveryForm {
    pub id: i32,
    /// Empty to unassign.
    #[serde(default)]
    pub delivery_person_id: String,
}

pub async fn assign_delivery(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<AssignDeliveryForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let person = form.delivery_person_id.trim();
    let delivery_person_id = if person.is_empty() {
        None
    } else {
        Some(person.parse::<i32>().map_err(|_| {
            ShopServiceError::Validation("delivery person id must be a number".into())
        })?)
    };
    let usecase = AdminAssignDeliveryUseCase {
        orders: state.order_repo(),
        deliveries: state.delivery_repo(),
    };
    usecase
        .execute(form.id, delivery_person_id, Utc::now())
        .await?;
    Ok(back_to_dashboard())
}

// ── Delivery persons ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeliveryPersonResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub vehicle_type: String,
    #[serde(serialize_with = "pizzeria_core::serde::to_rfc3339_ms_opt")]
    pub unavailable_until: Option<DateTime<Utc>>,
}

impl From<DeliveryPerson> for DeliveryPersonResponse {
    fn from(person: DeliveryPerson) -> Self {
        Self {
            id: person.id,
            user_id: person.user_id,
            name: person.name,
            vehicle_type: person.vehicle_type,
            unavailable_until: person.unavailable_until,
        }
    }
}

#[derive(Serialize)]
pub struct DeliveryPersonListResponse {
    pub ok: bool,
    pub delivery_persons: Vec<DeliveryPersonResponse>,
}

pub async fn list_delivery_persons(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<DeliveryPersonListResponse>, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = ListDeliveryPersonsUseCase {
        repo: state.user_repo(),
    };
    let persons = usecase.execute().await?;
    Ok(Json(DeliveryPersonListResponse {
        ok: true,
        delivery_persons: persons.into_iter().map(Into::into).collect(),
    }))
}

pub async fn delete_delivery_person(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = DeleteDeliveryPersonUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(form.id).await?;
    Ok(back_to_dashboard())
}

// ── Ingredients ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientForm {
    pub id: Option<i32>,
    pub name: String,
    /// Cents.
    pub cost: i64,
    pub has_meat: Option<String>,
    pub has_animal: Option<String>,
}

impl IngredientForm {
    fn into_input(self) -> IngredientInput {
        IngredientInput {
            has_meat: checked(self.has_meat.as_deref()),
            has_animal_products: checked(self.has_animal.as_deref()),
            name: self.name,
            cost_cents: self.cost,
        }
    }
}

pub async fn create_ingredient(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IngredientForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = CreateIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    usecase.execute(form.into_input()).await?;
    Ok(back_to_dashboard())
}

pub async fn update_ingredient(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IngredientForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let id = form
        .id
        .ok_or_else(|| ShopServiceError::Validation("id is required".into()))?;
    let usecase = UpdateIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    usecase.execute(id, form.into_input()).await?;
    Ok(back_to_dashboard())
}

pub async fn delete_ingredient(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = DeleteIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    usecase.execute(form.id).await?;
    Ok(back_to_dashboard())
}

#[derive(Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    #[serde(serialize_with = "pizzeria_core::serde::money")]
    pub cost: Decimal,
    pub has_meat: bool,
    pub has_animal_products: bool,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            cost: ingredient.cost,
            has_meat: ingredient.has_meat,
            has_animal_products: ingredient.has_animal_products,
        }
    }
}

#[derive(Serialize)]
pub struct IngredientListResponse {
    pub ok: bool,
    pub ingredients: Vec<IngredientResponse>,
}

pub async fn list_ingredients(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<IngredientListResponse>, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = ListIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = usecase.execute().await?;
    Ok(Json(IngredientListResponse {
        ok: true,
        ingredients: ingredients.into_iter().map(Into::into).collect(),
    }))
}

// ── Pizzas ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePizzaForm {
    pub name: String,
    /// Comma-separated ingredient names, in recipe order.
    #[serde(default)]
    pub ingredients: String,
}

pub async fn create_pizza(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<CreatePizzaForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = CreatePizzaUseCase {
        pizzas: state.pizza_repo(),
        ingredients: state.ingredient_repo(),
    };
    usecase
        .execute(CreatePizzaInput {
            name: form.name,
            ingredient_names: form.ingredients.split(',').map(str::to_owned).collect(),
        })
        .await?;
    Ok(back_to_dashboard())
}

pub async fn delete_pizza(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = DeletePizzaUseCase {
        repo: state.pizza_repo(),
    };
    usecase.execute(form.id).await?;
    Ok(back_to_dashboard())
}

#[derive(Serialize)]
pub struct PizzaListResponse {
    pub ok: bool,
    pub pizzas: Vec<MenuItemResponse>,
}

pub async fn list_pizzas(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<PizzaListResponse>, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = ListPizzasUseCase {
        repo: state.pizza_repo(),
    };
    let pizzas = usecase.execute().await?;
    Ok(Json(PizzaListResponse {
        ok: true,
        pizzas: pizzas.into_iter().map(Into::into).collect(),
    }))
}

// ── Extra items ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ExtraItemForm {
    pub id: Option<i32>,
    pub name: String,
    pub category: String,
    pub price: Decimal,
}

impl ExtraItemForm {
    fn into_input(self) -> ExtraItemInput {
        ExtraItemInput {
            name: self.name,
            category: self.category,
            price: self.price,
        }
    }
}

pub async fn create_extra_item(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<ExtraItemForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = CreateExtraItemUseCase {
        repo: state.extra_item_repo(),
    };
    usecase.execute(form.into_input()).await?;
    Ok(back_to_dashboard())
}

pub async fn update_extra_item(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<ExtraItemForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let id = form
        .id
        .ok_or_else(|| ShopServiceError::Validation("id is required".into()))?;
    let usecase = UpdateExtraItemUseCase {
        repo: state.extra_item_repo(),
    };
    usecase.execute(id, form.into_input()).await?;
    Ok(back_to_dashboard())
}

pub async fn delete_extra_item(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = DeleteExtraItemUseCase {
        repo: state.extra_item_repo(),
    };
    usecase.execute(form.id).await?;
    Ok(back_to_dashboard())
}

// ── Discount codes ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateDiscountForm {
    pub code: String,
    pub percentage: i32,
}

pub async fn create_discount(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<CreateDiscountForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = CreateDiscountCodeUseCase {
        repo: state.discount_code_repo(),
    };
    usecase
        .execute(CreateDiscountCodeInput {
            code: form.code,
            discount_percentage: form.percentage,
        })
        .await?;
    Ok(back_to_dashboard())
}

#[derive(Deserialize)]
pub struct UpdateDiscountForm {
    pub id: i32,
    pub percentage: i32,
    pub is_active: Option<String>,
}

pub async fn update_discount(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<UpdateDiscountForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = UpdateDiscountCodeUseCase {
        repo: state.discount_code_repo(),
    };
    usecase
        .execute(form.id, form.percentage, checked(form.is_active.as_deref()))
        .await?;
    Ok(back_to_dashboard())
}

pub async fn delete_discount(
    credentials: Credentials,
    State(state): State<AppState>,
    Form(form): Form<IdForm>,
) -> Result<Redirect, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = DeleteDiscountCodeUseCase {
        repo: state.discount_code_repo(),
    };
    usecase.execute(form.id).await?;
    Ok(back_to_dashboard())
}

#[derive(Serialize)]
pub struct DiscountCodeResponse {
    pub id: i32,
    pub code: String,
    pub discount_percentage: i32,
    pub is_active: bool,
}

impl From<DiscountCode> for DiscountCodeResponse {
    fn from(code: DiscountCode) -> Self {
        Self {
            id: code.id,
            code: code.code,
            discount_percentage: code.discount_percentage,
            is_active: code.is_active,
        }
    }
}

#[derive(Serialize)]
pub struct DiscountCodeListResponse {
    pub ok: bool,
    pub discount_codes: Vec<DiscountCodeResponse>,
}

pub async fn list_discounts(
    credentials: Credentials,
    State(state): State<AppState>,
) -> Result<Json<DiscountCodeListResponse>, ShopServiceError> {
    require_admin(&state, &credentials).await?;
    let usecase = ListDiscountCodesUseCase {
        repo: state.discount_code_repo(),
    };
    let codes = usecase.execute().await?;
    Ok(Json(DiscountCodeListResponse {
        ok: true,
        discount_codes: codes.into_iter().map(Into::into).collect(),
    }))
}
