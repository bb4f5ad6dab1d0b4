use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use carport_core::{
    errors::CarportError,
    models::admin_email::{AdminEmail, AdminEmailRequest},
};
use carport_db::repositories::admin_email;

use super::{ApiResult, respond};
use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn list_admin_emails(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
) -> ApiResult<Vec<AdminEmail>> {
    let emails = admin_email::list_admin_emails(&state.db_pool)
        .await?
        .into_iter()
        .map(AdminEmail::from)
        .collect();

    respond("Admin emails found", emails)
}

#[axum::debug_handler]
pub async fn add_admin_email(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<AdminEmailRequest>,
) -> ApiResult<AdminEmail> {
    let email = payload.normalized()?;

    let created = admin_email::add_admin_email(&state.db_pool, &email)
        .await?
        .ok_or_else(|| CarportError::Conflict(format!("{} is already on the list", email)))?;

    respond("Admin email added", AdminEmail::from(created))
}

#[axum::debug_handler]
pub async fn delete_admin_email(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if !admin_email::delete_admin_email(&state.db_pool, id).await? {
        return Err(AppError(CarportError::not_found("Admin email", id)));
    }

    respond("Admin email deleted", ())
}
