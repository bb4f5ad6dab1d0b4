use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/cars", get(handlers::admin::list_user_cars))
        .route("/admin/car", post(handlers::admin::create_car))
        .route("/admin/register", post(handlers::admin::register_user))
        .route(
            "/admin/user/:id",
            put(handlers::admin::update_user).delete(handlers::admin::delete_user),
        )
        .route(
            "/admin/email",
            get(handlers::admin_email::list_admin_emails)
                .post(handlers::admin_email::add_admin_email),
        )
        .route(
            "/admin/email/:id",
            delete(handlers::admin_email::delete_admin_email),
        )
}
