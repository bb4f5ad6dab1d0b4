use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/voucher", post(handlers::voucher::create_voucher))
        .route("/voucher/:id", get(handlers::voucher::get_voucher))
        .route(
            "/voucher/brand/:id",
            get(handlers::voucher::list_brand_vouchers),
        )
        .route("/transaction/redeem", post(handlers::voucher::redeem))
}
