use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

/// `/car/:id` takes a license plate on GET and a numeric id otherwise; the
/// segment shares one name so both live on the same route.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/car",
            post(handlers::car::create_car).get(handlers::car::list_cars),
        )
        .route(
            "/car/:id",
            get(handlers::car::get_car_by_plate)
                .put(handlers::car::update_car)
                .delete(handlers::car::delete_car),
        )
}
