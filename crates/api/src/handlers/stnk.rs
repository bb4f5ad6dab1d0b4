//! STNK document handlers. Customers upload and replace their own photos;
//! verification and staff notes sit behind [`AdminUser`].

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use carport_core::{
    errors::CarportError,
    models::stnk::{Stnk, StnkNoteRequest, StnkPhotoRequest},
};
use carport_db::{models::DbStnk, repositories::stnk};

use super::{ApiResult, ensure_owner_or_admin, respond};
use crate::{
    ApiState,
    middleware::{
        auth::{AdminUser, AuthUser},
        error_handling::AppError,
    },
};

async fn load_stnk(state: &ApiState, id: i64) -> Result<DbStnk, AppError> {
    let found = stnk::get_stnk_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CarportError::not_found("STNK", id))?;
    Ok(found)
}

fn updated(row: Option<DbStnk>, id: i64) -> Result<Stnk, AppError> {
    row.map(Stnk::from)
        .ok_or_else(|| AppError(CarportError::not_found("STNK", id)))
}

#[axum::debug_handler]
pub async fn create_stnk(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Json(payload): Json<StnkPhotoRequest>,
) -> ApiResult<Stnk> {
    payload.validate()?;

    let created = stnk::create_stnk(&state.db_pool, current.user.id, &payload.photo_url).await?;
    tracing::info!("STNK {} submitted by user {}", created.id, current.user.id);
    respond("STNK added", Stnk::from(created))
}

#[axum::debug_handler]
pub async fn list_own_stnks(State(state): State<Arc<ApiState>>, current: AuthUser) -> ApiResult<Vec<Stnk>> {
    let stnks = stnk::list_stnks(&state.db_pool, Some(current.user.id))
        .await?
        .into_iter()
        .map(Stnk::from)
        .collect();

    respond("STNK found", stnks)
}

#[axum::debug_handler]
pub async fn replace_photo(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<StnkPhotoRequest>,
) -> ApiResult<Stnk> {
    payload.validate()?;
    let existing = load_stnk(&state, id).await?;
    ensure_owner_or_admin(&current.user, existing.user_id, "STNK")?;

    let row = stnk::update_photo(&state.db_pool, id, &payload.photo_url).await?;
    respond("STNK photo updated", updated(row, id)?)
}

#[axum::debug_handler]
pub async fn clear_note(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Stnk> {
    let existing = load_stnk(&state, id).await?;
    ensure_owner_or_admin(&current.user, existing.user_id, "STNK")?;

    let row = stnk::set_description(&state.db_pool, id, "").await?;
    respond("STNK note cleared", updated(row, id)?)
}

#[axum::debug_handler]
pub async fn list_all_stnks(State(state): State<Arc<ApiState>>, _admin: AdminUser) -> ApiResult<Vec<Stnk>> {
    let stnks = stnk::list_stnks(&state.db_pool, None)
        .await?
        .into_iter()
        .map(Stnk::from)
        .collect();

    respond("STNK found", stnks)
}

#[axum::debug_handler]
pub async fn verify_stnk(
    State(state): State<Arc<ApiState>>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> ApiResult<Stnk> {
    let row = stnk::mark_verified(&state.db_pool, id).await?;
    let verified = updated(row, id)?;

    tracing::info!("STNK {} verified by admin {}", id, admin.0.id);
    respond("STNK verified", verified)
}

#[axum::debug_handler]
pub async fn annotate_stnk(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<StnkNoteRequest>,
) -> ApiResult<Stnk> {
    let row = stnk::set_description(&state.db_pool, id, &payload.description).await?;
    respond("STNK note saved", updated(row, id)?)
}
