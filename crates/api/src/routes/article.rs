use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/article",
            get(handlers::article::list_articles).post(handlers::article::create_article),
        )
        .route(
            "/article/:id",
            get(handlers::article::get_article)
                .put(handlers::article::update_article)
                .delete(handlers::article::delete_article),
        )
        .route(
            "/article/status/:id",
            put(handlers::article::update_article_status),
        )
}
