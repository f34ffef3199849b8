//! HTTP API handlers for series-service

pub mod buildinfo;
pub mod health;
pub mod listing;
pub mod lookup;
pub mod status;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use listing::{list_series, list_universes, list_works};
pub use lookup::{get_series, get_universe, get_work, index};
pub use status::{count_requests, get_status};
