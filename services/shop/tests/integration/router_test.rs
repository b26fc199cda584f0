use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use serde_json::{Value, json};

use pizzeria_testing::auth::MockCredentials;
use pizzeria_testing::fixture::Fixture;

use crate::helpers::disconnected_server;

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_liveness() {
    let server = disconnected_server();
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let server = disconnected_server();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_echo_request_id() {
    let server = disconnected_server();
    let response = server
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("order-42"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "order-42");
}

// ── Public pages ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_redirect_root_to_menu() {
    let server = disconnected_server();
    let response = server.get("/").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/menu");
}

#[tokio::test]
async fn should_hide_storage_failures_behind_internal_error() {
    let server = disconnected_server();
    let response = server.get("/menu.json").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INTERNAL");
    assert_eq!(body["message"], "internal error");
}

#[tokio::test]
async fn should_reject_invalid_registration_before_touching_storage() {
    let server = disconnected_server();
    let body = Fixture::load("services/shop/tests/fixtures/register_invalid.json");
    let response = server.post("/register").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["kind"], "VALIDATION");
    assert_eq!(error["message"], "gender must not be empty");
}

#[tokio::test]
async fn should_reject_order_without_cart_shape() {
    let server = disconnected_server();
    let response = server
        .post("/order/create")
        .json(&json!({ "username": "sam" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Credentials ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_delivery_endpoints_without_credentials() {
    let server = disconnected_server();
    server
        .get("/delivery/available")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/delivery/assign")
        .json(&json!({ "order_id": 1 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_discount_validation_without_credentials() {
    let server = disconnected_server();
    server
        .get("/discount/validate")
        .add_query_param("code", "SAVE10")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_admin_endpoints_without_credentials() {
    let server = disconnected_server();
    for path in [
        "/admin/users/list",
        "/admin/orders/list",
        "/admin/delivery/list",
        "/admin/ingredient/list",
        "/admin/pizza/list",
        "/admin/discount/list",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
    }

    server
        .post("/admin/ingredient/create")
        .form(&[("name", "Basil"), ("cost", "25")])
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_check_admin_cookies_against_storage() {
    let server = disconnected_server();
    let admin = MockCredentials::new("root", "hunter2");
    let response = server
        .get("/admin/users/list")
        .add_header(header::COOKIE, admin.admin_cookie())
        .await;
    // Credentials were found, so the request got as far as the user lookup.
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

// ── Admin pages ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_show_login_form_without_credentials() {
    let server = disconnected_server();
    let response = server.get("/admin").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<form method=\"get\" action=\"/admin\">"));
    assert!(html.contains("name=\"password\""));
}

#[tokio::test]
async fn should_check_dashboard_cookies_against_storage() {
    let server = disconnected_server();
    let admin = MockCredentials::new("root", "hunter2");
    let response = server
        .get("/admin")
        .add_header(header::COOKIE, admin.admin_cookie())
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INTERNAL");
}

#[tokio::test]
async fn should_expire_admin_cookies_on_logout() {
    let server = disconnected_server();
    let response = server.post("/admin/logout").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/admin");

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("X-Username=")));
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}
