//! series-service library - read-only series lookup service
//!
//! Serves universes, series and works loaded from a data directory at
//! startup. Nothing is written after startup.

use std::sync::Arc;

use axum::Router;
use series_common::Lookup;
use tower_http::trace::TraceLayer;

pub mod api;

pub use api::status::ServiceStatus;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded catalog plus enrichment metadata (immutable)
    pub lookup: Arc<Lookup>,
    /// Instance identity and request statistics
    pub status: Arc<ServiceStatus>,
}

impl AppState {
    /// Create new application state
    pub fn new(lookup: Lookup, ab_id: impl Into<String>) -> Self {
        Self {
            lookup: Arc::new(lookup),
            status: Arc::new(ServiceStatus::new(ab_id)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    // Lookup routes count towards request statistics
    let counted = Router::new()
        .route("/", get(api::index))
        .route("/pid", get(api::get_work))
        .route("/series", get(api::get_series))
        .route("/universe", get(api::get_universe))
        .route("/works", get(api::list_works))
        .route("/series/all", get(api::list_series))
        .route("/universes", get(api::list_universes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::count_requests,
        ));

    let service = Router::new()
        .route("/status", get(api::get_status))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(counted)
        .merge(service)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
