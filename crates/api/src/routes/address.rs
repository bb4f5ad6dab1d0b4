use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/address",
            get(handlers::address::list_addresses).post(handlers::address::create_address),
        )
        .route(
            "/address/:id",
            put(handlers::address::update_address).delete(handlers::address::delete_address),
        )
}
