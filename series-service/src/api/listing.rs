//! Listings of all known works, series and universes

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WorkList {
    pub works: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SeriesList {
    pub series: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UniverseList {
    pub universes: Vec<String>,
}

/// GET /works
pub async fn list_works(State(state): State<AppState>) -> Json<WorkList> {
    Json(WorkList {
        works: state.lookup.list_all_works(),
    })
}

/// GET /series/all
///
/// Titles sorted lexicographically.
pub async fn list_series(State(state): State<AppState>) -> Json<SeriesList> {
    Json(SeriesList {
        series: state.lookup.list_all_series(),
    })
}

/// GET /universes
///
/// Titles sorted lexicographically.
pub async fn list_universes(State(state): State<AppState>) -> Json<UniverseList> {
    Json(UniverseList {
        universes: state.lookup.list_all_universes(),
    })
}
