use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use carport_core::{
    errors::CarportError,
    models::voucher::{CreateVoucherRequest, RedeemRequest, Transaction, Voucher},
};
use carport_db::repositories::{
    catalog::{self, NamedTable},
    user, voucher,
};

use super::{ApiResult, respond};
use crate::{
    ApiState,
    middleware::{
        auth::{AdminUser, AuthUser},
        error_handling::AppError,
    },
};

#[axum::debug_handler]
pub async fn create_voucher(
    State(state): State<Arc<ApiState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateVoucherRequest>,
) -> ApiResult<Voucher> {
    payload.validate()?;

    catalog::get_named(&state.db_pool, NamedTable::Brands, payload.brand_id)
        .await?
        .ok_or_else(|| CarportError::not_found("Brand", payload.brand_id))?;

    let created = voucher::create_voucher(&state.db_pool, &payload).await?;
    respond("Voucher created", Voucher::try_from(created)?)
}

#[axum::debug_handler]
pub async fn get_voucher(State(state): State<Arc<ApiState>>, Path(id): Path<i64>) -> ApiResult<Voucher> {
    let found = voucher::get_voucher_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CarportError::not_found("Voucher", id))?;

    respond("Voucher found", Voucher::try_from(found)?)
}

#[axum::debug_handler]
pub async fn list_brand_vouchers(
    State(state): State<Arc<ApiState>>,
    Path(brand_id): Path<i64>,
) -> ApiResult<Vec<Voucher>> {
    let vouchers = voucher::list_vouchers_by_brand(&state.db_pool, brand_id)
        .await?
        .into_iter()
        .map(Voucher::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;

    respond("Vouchers found", vouchers)
}

#[axum::debug_handler]
pub async fn redeem(
    State(state): State<Arc<ApiState>>,
    current: AuthUser,
    Json(payload): Json<RedeemRequest>,
) -> ApiResult<Transaction> {
    payload.validate()?;

    if payload.customer_id != current.user.id && !current.user.is_admin() {
        return Err(AppError(CarportError::Authorization(
            "Vouchers can only be redeemed for your own account".to_string(),
        )));
    }

    user::get_user_by_id(&state.db_pool, payload.customer_id)
        .await?
        .ok_or_else(|| CarportError::not_found("Customer", payload.customer_id))?;

    let transaction = voucher::redeem(&state.db_pool, &payload).await?;
    respond("Vouchers redeemed", transaction)
}
