use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use carport_core::{
    errors::CarportError,
    models::inquiry::{CreateInquiryRequest, Inquiry, UpdateInquiryRequest},
};
use carport_db::repositories::inquiry;

use super::{ApiResult, respond};
use crate::{
    ApiState,
    middleware::{auth::AdminUser, error_handling::AppError},
};

/// Public contact form, no login needed.
#[axum::debug_handler]
pub async fn create_inquiry(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateInquiryRequest>,
) -> ApiResult<Inquiry> {
    payload.validate()?;

    let created = inquiry::create_inquiry(&state.db_pool, &payload).await?;
    respond("Inquiry submitted", Inquiry::from(created))
}

#[axum::debug_handler]
pub async fn list_inquiries(State(state): State<Arc<ApiState>>, _admin: AdminUser) -> ApiResult<Vec<Inquiry>> {
    let inquiries = inquiry::list_inquiries(&state.db_pool)
        .await?
        .into_iter()
        .map(Inquiry::from)
        .collect();

    respond("Inquiries found", inquiries)
}

#[axum::debug_handler]
pub async fn update_inquiry(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateInquiryRequest>,
) -> ApiResult<Inquiry> {
    payload.validate()?;

    let current = inquiry::get_inquiry_by_id(&state.db_pool, id)
        .await?
        .map(Inquiry::from)
        .ok_or_else(|| CarportError::not_found("Inquiry", id))?;

    let updated = inquiry::update_inquiry(&state.db_pool, &payload.apply(&current))
        .await?
        .ok_or_else(|| CarportError::not_found("Inquiry", id))?;

    respond("Inquiry updated", Inquiry::from(updated))
}

#[axum::debug_handler]
pub async fn toggle_inquiry_status(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> ApiResult<Inquiry> {
    let toggled = inquiry::toggle_resolved(&state.db_pool, id)
        .await?
        .ok_or_else(|| CarportError::not_found("Inquiry", id))?;

    respond("Inquiry status changed", Inquiry::from(toggled))
}

#[axum::debug_handler]
pub async fn delete_inquiry(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if !inquiry::delete_inquiry(&state.db_pool, id).await? {
        return Err(AppError(CarportError::not_found("Inquiry", id)));
    }

    respond("Inquiry deleted", ())
}
