//! # Series Common Library
//!
//! Shared code for the series lookup service:
//! - Entity model (universes, series, works)
//! - Data file records and the three-pass loader
//! - Query/projection layer with per-series work ordering
//! - Metadata enrichment gateway
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod loader;
pub mod model;
pub mod query;
pub mod record;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use query::Lookup;
