use axum::http::StatusCode;
use axum::response::IntoResponse;
use carport_api::handlers::ensure_owner_or_admin;
use carport_core::models::user::Role;
use pretty_assertions::assert_eq;

use crate::test_utils::{fake_user, json_body};

#[test]
fn test_owner_and_admin_may_manage() {
    assert!(ensure_owner_or_admin(&fake_user(10, Role::User), 10, "address").is_ok());
    assert!(ensure_owner_or_admin(&fake_user(1, Role::Admin), 10, "address").is_ok());
}

#[tokio::test]
async fn test_other_customers_are_forbidden() {
    let error = ensure_owner_or_admin(&fake_user(11, Role::User), 10, "STNK").unwrap_err();

    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        json_body(response).await["error"],
        "Authorization error: This STNK belongs to another account"
    );
}
