//! Service status and request statistics
//!
//! Reports instance identity, uptime, request count and catalog size.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Json, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::AppState;

/// Per-process identity and counters
#[derive(Debug)]
pub struct ServiceStatus {
    pub instance_id: Uuid,
    pub ab_id: String,
    pub started_at: DateTime<Utc>,
    requests: AtomicU64,
}

impl ServiceStatus {
    pub fn new(ab_id: impl Into<String>) -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            ab_id: ab_id.into(),
            started_at: Utc::now(),
            requests: AtomicU64::new(0),
        }
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub instance_id: String,
    pub ab_id: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
    pub requests: u64,
    pub works: usize,
    pub series: usize,
    pub universes: usize,
}

/// GET /status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = &state.status;
    let catalog = state.lookup.catalog();

    Json(StatusResponse {
        instance_id: status.instance_id.to_string(),
        ab_id: status.ab_id.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: status.started_at,
        uptime_seconds: (Utc::now() - status.started_at).num_seconds(),
        requests: status.requests(),
        works: catalog.work_count(),
        series: catalog.series_count(),
        universes: catalog.universe_count(),
    })
}

/// Middleware counting lookup requests
pub async fn count_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    state.status.record_request();
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_counter_increments() {
        let status = ServiceStatus::new("1");
        assert_eq!(status.requests(), 0);

        status.record_request();
        status.record_request();
        assert_eq!(status.requests(), 2);
    }

    #[test]
    fn test_instances_get_distinct_ids() {
        let a = ServiceStatus::new("1");
        let b = ServiceStatus::new("1");
        assert_ne!(a.instance_id, b.instance_id);
    }
}
