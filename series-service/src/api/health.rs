//! Health check endpoint
//!
//! The catalog is fully loaded before the router is built, so a responding
//! service is always ready; the counts show what it is serving.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

const MODULE_NAME: &str = "series-service";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub catalog: CatalogCounts,
}

/// Number of loaded entities per kind
#[derive(Debug, Serialize)]
pub struct CatalogCounts {
    pub universes: usize,
    pub series: usize,
    pub works: usize,
}

/// GET /health
///
/// Not counted in request statistics.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.lookup.catalog();

    Json(HealthResponse {
        status: "ok",
        module: MODULE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        catalog: CatalogCounts {
            universes: catalog.universe_count(),
            series: catalog.series_count(),
            works: catalog.work_count(),
        },
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
