use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

/// Owner paths under `/stnk`, staff review under `/admin/stnk`.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/stnk",
            get(handlers::stnk::list_own_stnks).post(handlers::stnk::create_stnk),
        )
        .route("/stnk/update/:id", put(handlers::stnk::replace_photo))
        .route("/stnk/desc/delete/:id", put(handlers::stnk::clear_note))
        .route("/admin/stnk", get(handlers::stnk::list_all_stnks))
        .route("/admin/stnk/acc/:id", put(handlers::stnk::verify_stnk))
        .route("/admin/stnk/desc/:id", put(handlers::stnk::annotate_stnk))
}
