//! Point lookups for works, series and universes
//!
//! Unknown identifiers map to 404 with a JSON error body.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use series_common::query::{SeriesInfo, UniverseInfo, WorkInfo};
use tracing::info;

use crate::AppState;

/// Query parameters for work lookup
#[derive(Debug, Deserialize)]
pub struct WorkQuery {
    pub workid: String,
}

/// Query parameters for series lookup
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub series_title: String,
}

/// Query parameters for universe lookup
#[derive(Debug, Deserialize)]
pub struct UniverseQuery {
    pub universe_title: String,
}

/// GET /
pub async fn index() -> &'static str {
    "Series POC!"
}

/// GET /pid?workid=ID
pub async fn get_work(
    State(state): State<AppState>,
    Query(query): Query<WorkQuery>,
) -> Result<Json<WorkInfo>, LookupError> {
    info!("pid called with argument {}", query.workid);
    state
        .lookup
        .get_work(&query.workid)
        .map(Json)
        .ok_or(LookupError::WorkNotFound(query.workid))
}

/// GET /series?series_title=TITLE
pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<SeriesInfo>, LookupError> {
    info!("series endpoint called with argument {}", query.series_title);
    state
        .lookup
        .get_series(&query.series_title)
        .map(Json)
        .ok_or(LookupError::SeriesNotFound(query.series_title))
}

/// GET /universe?universe_title=TITLE
pub async fn get_universe(
    State(state): State<AppState>,
    Query(query): Query<UniverseQuery>,
) -> Result<Json<UniverseInfo>, LookupError> {
    info!("universe endpoint called with argument {}", query.universe_title);
    state
        .lookup
        .get_universe(&query.universe_title)
        .map(Json)
        .ok_or(LookupError::UniverseNotFound(query.universe_title))
}

/// Lookup errors
#[derive(Debug)]
pub enum LookupError {
    WorkNotFound(String),
    SeriesNotFound(String),
    UniverseNotFound(String),
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let message = match self {
            LookupError::WorkNotFound(id) => format!("Work not found: {}", id),
            LookupError::SeriesNotFound(title) => format!("Series not found: {}", title),
            LookupError::UniverseNotFound(title) => format!("Universe not found: {}", title),
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::NOT_FOUND, body).into_response()
    }
}
