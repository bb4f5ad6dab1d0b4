use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/order",
            get(handlers::order::list_orders).post(handlers::order::create_order),
        )
        .route("/order/used", get(handlers::order::used_slots))
        .route("/order/:id", delete(handlers::order::delete_order))
        .route("/order/status/:id", put(handlers::order::update_order_status))
        .route("/order/price/:id", put(handlers::order::update_order_price))
}
