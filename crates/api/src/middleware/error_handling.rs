//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and `{"error": message}` JSON
//! bodies so every handler fails the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carport_core::errors::CarportError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use carport_api::middleware::error_handling::AppError;
/// use carport_core::errors::CarportError;
///
/// async fn handler(id: i64) -> Result<Json<String>, AppError> {
///     Err(AppError(CarportError::not_found("Car", id)))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CarportError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CarportError::NotFound(_) => StatusCode::NOT_FOUND,
            CarportError::Validation(_) => StatusCode::BAD_REQUEST,
            CarportError::Scheduling(_) => StatusCode::BAD_REQUEST,
            CarportError::Conflict(_) => StatusCode::CONFLICT,
            CarportError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CarportError::Authorization(_) => StatusCode::FORBIDDEN,
            CarportError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CarportError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            // Details stay in the log
            tracing::error!("Request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Allows `?` on `Result<T, CarportError>` in handlers.
impl From<CarportError> for AppError {
    fn from(err: CarportError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CarportError::Database(err))
    }
}

/// Maps a CarportError to an HTTP response
pub fn map_error(err: CarportError) -> Response {
    AppError(err).into_response()
}
