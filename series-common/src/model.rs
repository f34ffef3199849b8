//! Entity model: universes, series and works
//!
//! Cross references are held as plain titles/identifiers, never as owning
//! pointers. The [`Catalog`](crate::catalog::Catalog) owns the index maps that
//! resolve them.

use std::collections::{BTreeMap, BTreeSet};

/// Top-level grouping of series and works sharing a setting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Universe {
    pub title: String,
    pub description: Option<String>,
    pub alternative_titles: Vec<String>,
    /// Titles of series that declared this universe
    pub included_series: BTreeSet<String>,
    /// Identifiers of works that declared this universe
    pub included_works: BTreeSet<String>,
}

impl Universe {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn add_series(&mut self, series_title: &str) {
        self.included_series.insert(series_title.to_string());
    }

    pub fn add_work(&mut self, work_id: &str) {
        self.included_works.insert(work_id.to_string());
    }
}

/// Ordered (or loosely ordered) grouping of works
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub title: String,
    pub description: Option<String>,
    pub related_series: Option<String>,
    pub number_in_universe: Option<i64>,
    pub alternative_titles: Vec<String>,
    /// Title of the owning universe, if it was resolved at load time
    pub universe: Option<String>,
    pub included_works: BTreeSet<String>,
}

impl Series {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn add_work(&mut self, work_id: &str) {
        self.included_works.insert(work_id.to_string());
    }
}

/// A single bibliographic item
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Work {
    pub id: String,
    pub can_be_read_independently: bool,
    pub universe: Option<String>,
    /// Series title -> membership positions within that series.
    ///
    /// An omnibus spanning volumes 7 and 8 holds `[7.0, 8.0]`; a membership
    /// without recorded positions holds an empty list.
    pub series_positions: BTreeMap<String, Vec<f64>>,
}

impl Work {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Record (or replace) this work's positions within `series_title`
    pub fn set_positions(&mut self, series_title: &str, positions: Vec<f64>) {
        self.series_positions
            .insert(series_title.to_string(), positions);
    }

    /// Smallest recorded position within `series_title`, if any
    pub fn min_position(&self, series_title: &str) -> Option<f64> {
        self.series_positions
            .get(series_title)?
            .iter()
            .copied()
            .min_by(f64::total_cmp)
    }
}
