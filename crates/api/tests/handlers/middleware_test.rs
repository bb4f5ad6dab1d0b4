use axum::http::StatusCode;
use carport_api::middleware::{auth, error_handling::map_error};
use carport_core::errors::CarportError;
use carport_core::scheduling::Rejection;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::json_body;

#[rstest]
#[case::not_found(CarportError::not_found("Car", 7), StatusCode::NOT_FOUND)]
#[case::validation(CarportError::validation("name is required"), StatusCode::BAD_REQUEST)]
#[case::capacity(Rejection::CapacityExceeded.into(), StatusCode::BAD_REQUEST)]
#[case::out_of_hours(Rejection::OutOfOperatingHours.into(), StatusCode::BAD_REQUEST)]
#[case::conflict(CarportError::Conflict("taken".to_string()), StatusCode::CONFLICT)]
#[case::authentication(CarportError::Authentication("bad token".to_string()), StatusCode::UNAUTHORIZED)]
#[case::authorization(CarportError::Authorization("admins only".to_string()), StatusCode::FORBIDDEN)]
#[case::database(CarportError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: CarportError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = CarportError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "disk full",
    )));

    let response = map_error(error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_rejection_message_reaches_client() {
    let response = map_error(Rejection::CapacityExceeded.into());
    let body = json_body(response).await;

    assert_eq!(body["error"], "Exceeded maximum orders for the given time");
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let response = map_error(CarportError::Database(eyre::eyre!(
        "password authentication failed for user carport"
    )));
    let body = json_body(response).await;

    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));

    // Fresh salt per hash
    assert_ne!(hashed, auth::hash_password(password).unwrap());
}

#[tokio::test]
async fn test_verify_password() {
    let hashed = auth::hash_password("correct horse").unwrap();

    assert!(auth::verify_password("correct horse", &hashed).unwrap());
    assert!(!auth::verify_password("wrong horse", &hashed).unwrap());
}

#[tokio::test]
async fn test_verify_password_rejects_malformed_hash() {
    assert!(auth::verify_password("anything", "not-a-phc-string").is_err());
}
