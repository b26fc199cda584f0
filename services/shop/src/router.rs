use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use pizzeria_core::health::{database_ready, healthz};
use pizzeria_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{account, admin, catalog, delivery, discount, order};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Catalogue
        .route("/", get(catalog::index))
        .route("/menu", get(catalog::menu_page))
        .route("/menu.json", get(catalog::menu_json))
        .route("/menu/{name}", get(catalog::pizza_information))
        .route("/extra-items", get(catalog::extra_items))
        // Accounts
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/account", post(account::account))
        // Orders
        .route("/order/create", post(order::create_order))
        .route("/order/list", post(order::list_orders))
        .route("/order/details", post(order::order_details))
        // Discounts
        .route("/discount/validate", get(discount::validate_code))
        .route("/discount/birthday", get(discount::birthday))
        // Delivery
        .route("/delivery/available", get(delivery::available))
        .route("/delivery/assigned", get(delivery::assigned))
        .route("/delivery/assign", post(delivery::assign))
        .route("/delivery/update-status", post(delivery::update_status))
        // Admin
        .route("/admin", get(admin::dashboard))
        .route("/admin/logout", post(admin::logout))
        .route("/admin/users/list", get(admin::list_users))
        .route("/admin/users/create", post(admin::create_user))
        .route("/admin/users/delete", post(admin::delete_user))
        .route("/admin/orders/list", get(admin::list_orders))
        .route("/admin/orders/update-status", post(admin::update_order_status))
        .route("/admin/orders/delete", post(admin::delete_order))
        .route("/admin/orders/assign-delivery", post(admin::assign_delivery))
        .route("/admin/delivery/list", get(admin::list_delivery_persons))
        .route("/admin/delivery/delete", post(admin::delete_delivery_person))
        .route("/admin/ingredient/list", get(admin::list_ingredients))
        .route("/admin/ingredient/create", post(admin::create_ingredient))
        .route("/admin/ingredient/update", post(admin::update_ingredient))
        .route("/admin/ingredient/delete", post(admin::delete_ingredient))
        .route("/admin/pizza/list", get(admin::list_pizzas))
        .route("/admin/pizza/create", post(admin::create_pizza))
        .route("/admin/pizza/delete", post(admin::delete_pizza))
        .route("/admin/extra-items/create", post(admin::create_extra_item))
        .route("/admin/extra-items/update", post(admin::update_extra_item))
        .route("/admin/extra-items/delete", post(admin::delete_extra_item))
        .route("/admin/discount/list", get(admin::list_discounts))
        .route("/admin/discount/create", post(admin::create_discount))
        .route("/admin/discount/update", post(admin::update_discount))
        .route("/admin/discount/delete", post(admin::delete_discount))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
