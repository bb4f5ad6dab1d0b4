use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/color", get(handlers::catalog::list_colors))
        .route("/cartype", get(handlers::catalog::list_car_types))
        .route("/service", get(handlers::catalog::list_services))
        .route(
            "/brand",
            get(handlers::catalog::list_brands).post(handlers::catalog::create_brand),
        )
        .route(
            "/category",
            get(handlers::catalog::list_categories).post(handlers::catalog::create_category),
        )
        .route("/category/:id", delete(handlers::catalog::delete_category))
        .route("/tag", get(handlers::catalog::list_tags))
}
