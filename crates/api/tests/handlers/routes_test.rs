use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{TestContext, json_body};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/version")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "carport-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_current_user_requires_token() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/auth")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await["error"],
        "Authentication error: Missing bearer token"
    );
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let ctx = TestContext::new();
    let request = Request::builder()
        .uri("/car")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_requires_login() {
    let ctx = TestContext::new();
    let body = json!({
        "car_id": 1,
        "service_type": "WORKSHOP",
        "order_time": "2024-05-06T02:00:00Z"
    });

    let response = ctx.send(post_json("/order", body)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_require_login() {
    let ctx = TestContext::new();

    for uri in ["/admin/users", "/admin/cars?user_id=1"] {
        let response = ctx.send(get(uri)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_customer_records_require_login() {
    let ctx = TestContext::new();

    for uri in ["/address", "/stnk", "/admin/stnk", "/admin/email", "/inquiry"] {
        let response = ctx.send(get(uri)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_address_edit_requires_login() {
    let ctx = TestContext::new();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/address/3")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "title": "Rumah", "location": "Jl. Merdeka 17" }).to_string()))
        .unwrap();

    let response = ctx.send(request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inquiry_form_rejects_short_phone() {
    let ctx = TestContext::new();
    let body = json!({
        "car_brand": "Honda",
        "car_year": "2019",
        "problem": "AC blows warm air",
        "phone": "0812"
    });

    let response = ctx.send(post_json("/inquiry", body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inquiry_form_requires_problem() {
    let ctx = TestContext::new();
    let body = json!({
        "car_brand": "Honda",
        "car_year": "2019",
        "problem": " ",
        "phone": "081234567890"
    });

    let response = ctx.send(post_json("/inquiry", body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Validation error: problem is required"
    );
}

#[tokio::test]
async fn test_register_rejects_mismatched_passwords() {
    let ctx = TestContext::new();
    let body = json!({
        "name": "Rina",
        "email": "rina@example.com",
        "phone": "081234567890",
        "password": "secret-one",
        "confirm_password": "secret-two"
    });

    let response = ctx.send(post_json("/auth/register", body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Validation error: Password and Confirm Password do not match"
    );
}

#[tokio::test]
async fn test_register_rejects_short_phone() {
    let ctx = TestContext::new();
    let body = json!({
        "name": "Rina",
        "email": "rina@example.com",
        "phone": "0812",
        "password": "secret-one",
        "confirm_password": "secret-one"
    });

    let response = ctx.send(post_json("/auth/register", body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_used_slots_requires_date() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/order/used")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Validation error: date is required"
    );
}

#[tokio::test]
async fn test_used_slots_rejects_malformed_date() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/order/used?date=06-05-2024")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/schedules")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
