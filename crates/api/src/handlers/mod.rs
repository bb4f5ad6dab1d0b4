use axum::Json;
use carport_core::{
    errors::CarportError,
    models::{ApiResponse, user::User},
};

use crate::middleware::error_handling::AppError;

pub mod address;
pub mod admin;
pub mod admin_email;
pub mod article;
pub mod auth;
pub mod car;
pub mod catalog;
pub mod inquiry;
pub mod order;
pub mod stnk;
pub mod voucher;

/// Result type of every JSON handler: the `{message, data}` envelope or an
/// error response.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

pub(crate) fn respond<T>(message: &str, data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::new(message, data)))
}

/// Admins manage everything; everyone else only records they own.
pub fn ensure_owner_or_admin(user: &User, owner_id: i64, what: &str) -> Result<(), AppError> {
    if owner_id != user.id && !user.is_admin() {
        return Err(AppError(CarportError::Authorization(format!(
            "This {} belongs to another account",
            what
        ))));
    }
    Ok(())
}
