//! JSON HTTP API over the café register
//!
//! Routes are organized into modules:
//! - routes::transactions: today's list, filters, entry, payment toggle
//! - routes::summary: day totals
//! - routes::lookup: customer search
//! - routes::delete: password-confirmed deletion

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use cafe_config::Config;
use cafe_core::Register;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub register: Arc<RwLock<Register>>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::delete::{api_cancel_delete, api_confirm_delete, api_delete_state, api_request_delete};
    use routes::lookup::api_search;
    use routes::summary::api_summary;
    use routes::transactions::{api_clear_dates, api_create, api_reload, api_toggle, api_transactions};

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions).post(api_create))
        .route("/api/transactions/filter/dates", delete(api_clear_dates))
        .route("/api/transactions/:id/toggle", post(api_toggle))
        .route("/api/summary", get(api_summary))
        .route("/api/search", get(api_search))
        .route("/api/delete", get(api_delete_state))
        .route("/api/delete/confirm", post(api_confirm_delete))
        .route("/api/delete/cancel", post(api_cancel_delete))
        .route("/api/delete/:id", post(api_request_delete))
        .route("/api/reload", post(api_reload))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Binds to `server.host:server.port` and serves until the process stops.
pub async fn start_server(config: Config, register: Arc<RwLock<Register>>) -> std::io::Result<()> {
    let addr = config.bind_address();
    let router = create_router(AppState { register });

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting café register on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /api/transactions (today's list, filters, entry)");
    log::info!("  - /api/summary (day totals)");
    log::info!("  - /api/search (customer lookup)");
    log::info!("  - /api/delete (delete dialog)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================
