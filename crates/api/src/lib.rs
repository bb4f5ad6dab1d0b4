//! # Carport API
//!
//! HTTP surface of the workshop back end: accounts and sessions, cars and
//! their documents, service orders, catalog lookups, articles, vouchers and
//! the public inquiry form.
//!
//! Each area has a `routes::<area>::routes()` that maps paths onto
//! `handlers::<area>` functions; [`build_router`] merges them and attaches
//! [`ApiState`]. Handlers talk to `carport_db` repositories directly, except
//! for bookings, which go through `carport_core::booking` on a
//! `PgAppointmentStore` transaction.

pub mod config;
pub mod handlers;
/// Login extractors and domain error responses
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use carport_core::scheduling::AdmissionPolicy;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// State shared by every handler
pub struct ApiState {
    pub db_pool: PgPool,
    /// Operating hours and bay capacity used when admitting orders
    pub policy: AdmissionPolicy,
    /// How long a login session stays valid
    pub session_ttl: chrono::Duration,
}

impl ApiState {
    pub fn new(db_pool: PgPool, config: &config::ApiConfig) -> Self {
        Self {
            db_pool,
            policy: AdmissionPolicy::new(config.operating_hours),
            session_ttl: chrono::Duration::hours(config.session_ttl_hours),
        }
    }
}

/// Every route with `state` attached. Tests drive this directly.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        // Accounts and sessions
        .merge(routes::auth::routes())
        .merge(routes::admin::routes())
        // Customer records
        .merge(routes::address::routes())
        .merge(routes::stnk::routes())
        // Cars and service orders
        .merge(routes::car::routes())
        .merge(routes::order::routes())
        // Catalog lookups
        .merge(routes::catalog::routes())
        // Articles
        .merge(routes::article::routes())
        // Vouchers and redemptions
        .merge(routes::voucher::routes())
        // Public contact form
        .merge(routes::inquiry::routes())
        .with_state(state)
}

/// Installs logging, wraps the router in CORS, tracing and timeout layers
/// and serves until the process stops.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(db_pool, &config));
    let app = build_router(state);

    // CORS only when origins are configured
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (shop hours {:02}:00-{:02}:00 {})",
        addr,
        config.operating_hours.open_hour,
        config.operating_hours.close_hour,
        config.operating_hours.timezone
    );
    axum::serve(listener, app).await?;

    Ok(())
}
