use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/inquiry",
            get(handlers::inquiry::list_inquiries).post(handlers::inquiry::create_inquiry),
        )
        .route(
            "/inquiry/:id",
            put(handlers::inquiry::update_inquiry).delete(handlers::inquiry::delete_inquiry),
        )
        .route(
            "/inquiry/status/:id",
            put(handlers::inquiry::toggle_inquiry_status),
        )
}
