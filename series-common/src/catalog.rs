//! In-memory entity graph
//!
//! Built once by the [`loader`](crate::loader) and read-only afterwards.

use std::collections::BTreeMap;

use crate::model::{Series, Universe, Work};

/// Universes, series and works indexed by their identity keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub(crate) works: BTreeMap<String, Work>,
    pub(crate) series: BTreeMap<String, Series>,
    pub(crate) universes: BTreeMap<String, Universe>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn work(&self, id: &str) -> Option<&Work> {
        self.works.get(id)
    }

    pub fn series(&self, title: &str) -> Option<&Series> {
        self.series.get(title)
    }

    pub fn universe(&self, title: &str) -> Option<&Universe> {
        self.universes.get(title)
    }

    /// All works, ordered by identifier
    pub fn works(&self) -> impl Iterator<Item = &Work> {
        self.works.values()
    }

    /// All series, ordered by title
    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    /// All universes, ordered by title
    pub fn universes(&self) -> impl Iterator<Item = &Universe> {
        self.universes.values()
    }

    pub fn work_ids(&self) -> Vec<String> {
        self.works.keys().cloned().collect()
    }

    pub fn work_count(&self) -> usize {
        self.works.len()
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn universe_count(&self) -> usize {
        self.universes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty() && self.series.is_empty() && self.universes.is_empty()
    }
}
