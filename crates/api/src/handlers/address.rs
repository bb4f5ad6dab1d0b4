use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use carport_core::{
    errors::CarportError,
    models::{
        address::{Address, AddressRequest},
        user::User,
    },
};
use carport_db::{models::DbAddress, repositories::address};

use super::{ApiResult, ensure_owner_or_admin, respond};
use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

/// Loads an address the caller may use: their own, or any for admins.
pub(crate) async fn load_address(state: &ApiState, user: &User, id: i64) -> Result<DbAddress, AppError> {
    let db_address = address::get_address_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CarportError::not_found("Address", id))?;

    ensure_owner_or_admin(user, db_address.user_id, "address")?;
    Ok(db_address)
}

#[axum::debug_handler]
pub async fn list_addresses(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
) -> ApiResult<Vec<Address>> {
    let addresses = address::list_addresses_by_user(&state.db_pool, current.user.id)
        .await?
        .into_iter()
        .map(Address::from)
        .collect();

    respond("Addresses found", addresses)
}

#[axum::debug_handler]
pub async fn create_address(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Json(payload): Json<AddressRequest>,
) -> ApiResult<Address> {
    payload.validate()?;

    let created = address::create_address(&state.db_pool, current.user.id, &payload).await?;
    respond("Address added", Address::from(created))
}

#[axum::debug_handler]
pub async fn update_address(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<AddressRequest>,
) -> ApiResult<Address> {
    payload.validate()?;
    load_address(&state, &current.user, id).await?;

    let updated = address::update_address(&state.db_pool, id, &payload)
        .await?
        .ok_or_else(|| CarportError::not_found("Address", id))?;

    respond("Address updated", Address::from(updated))
}

#[axum::debug_handler]
pub async fn delete_address(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    load_address(&state, &current.user, id).await?;

    if !address::delete_address(&state.db_pool, id).await? {
        return Err(AppError(CarportError::not_found("Address", id)));
    }

    respond("Address deleted", ())
}
