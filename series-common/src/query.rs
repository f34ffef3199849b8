//! Query and projection layer
//!
//! [`Lookup`] answers point lookups and listings against a loaded
//! [`Catalog`] plus the enrichment metadata fetched at startup. Results are
//! plain serializable records; an unknown key yields `None`.
//!
//! Work order within each series is derived once, when the lookup is built,
//! and reused for every request.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::model::{Series, Work};

/// Sort key for works without a recorded position in a series.
/// Must exceed any real position number.
pub const UNPOSITIONED: f64 = 100_000.0;

/// Membership of one work in one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesMembership {
    pub series_title: String,
    pub number_in_series: Vec<f64>,
}

/// Response record for a single work
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkInfo {
    pub work_id: String,
    /// Enrichment metadata; empty when the gateway had nothing for this work
    pub metadata: String,
    pub series: Vec<SeriesMembership>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universe_title: Option<String>,
    pub can_be_read_independently: bool,
}

/// Response record for a single series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesInfo {
    pub series_title: String,
    pub series_description: Option<String>,
    /// Work identifiers in reading order
    pub works: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_titles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universe_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_in_universe: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_series: Option<String>,
}

/// Response record for a single universe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniverseInfo {
    pub universe_title: String,
    pub universe_description: Option<String>,
    pub series: Vec<String>,
    pub works: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_titles: Vec<String>,
}

/// Read-only view over the catalog used by the transport layer
#[derive(Debug, Clone)]
pub struct Lookup {
    catalog: Catalog,
    metadata: HashMap<String, String>,
    series_order: HashMap<String, Vec<String>>,
}

impl Lookup {
    pub fn new(catalog: Catalog, metadata: HashMap<String, String>) -> Self {
        let series_order = catalog
            .all_series()
            .map(|series| (series.title.clone(), order_works(series, &catalog.works)))
            .collect();

        Self {
            catalog,
            metadata,
            series_order,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn get_work(&self, work_id: &str) -> Option<WorkInfo> {
        let work = self.catalog.work(work_id)?;

        let series = work
            .series_positions
            .iter()
            .map(|(title, positions)| SeriesMembership {
                series_title: title.clone(),
                number_in_series: positions.clone(),
            })
            .collect();

        Some(WorkInfo {
            work_id: work.id.clone(),
            metadata: self.metadata.get(work_id).cloned().unwrap_or_default(),
            series,
            universe_title: work.universe.clone(),
            can_be_read_independently: work.can_be_read_independently,
        })
    }

    pub fn get_series(&self, series_title: &str) -> Option<SeriesInfo> {
        let series = self.catalog.series(series_title)?;

        Some(SeriesInfo {
            series_title: series.title.clone(),
            series_description: series.description.clone(),
            works: self.ordered_works(series),
            alternative_titles: series.alternative_titles.clone(),
            universe_title: series.universe.clone(),
            number_in_universe: series.number_in_universe,
            related_series: series.related_series.clone(),
        })
    }

    pub fn get_universe(&self, universe_title: &str) -> Option<UniverseInfo> {
        let universe = self.catalog.universe(universe_title)?;

        Some(UniverseInfo {
            universe_title: universe.title.clone(),
            universe_description: universe.description.clone(),
            series: universe.included_series.iter().cloned().collect(),
            works: universe.included_works.iter().cloned().collect(),
            alternative_titles: universe.alternative_titles.clone(),
        })
    }

    /// All work identifiers, sorted
    pub fn list_all_works(&self) -> Vec<String> {
        self.catalog.work_ids()
    }

    /// All series titles, sorted lexicographically
    pub fn list_all_series(&self) -> Vec<String> {
        self.catalog.all_series().map(|s| s.title.clone()).collect()
    }

    /// All universe titles, sorted lexicographically
    pub fn list_all_universes(&self) -> Vec<String> {
        self.catalog.universes().map(|u| u.title.clone()).collect()
    }

    fn ordered_works(&self, series: &Series) -> Vec<String> {
        self.series_order
            .get(&series.title)
            .cloned()
            .unwrap_or_default()
    }
}

/// Order a series' works by their smallest position within that series
///
/// Works with no recorded position (or missing from `works`) sort last via
/// [`UNPOSITIONED`]. Equal keys fall back to identifier order.
pub fn order_works(series: &Series, works: &BTreeMap<String, Work>) -> Vec<String> {
    let mut keyed: Vec<(f64, &String)> = series
        .included_works
        .iter()
        .map(|id| {
            let position = works
                .get(id)
                .and_then(|work| work.min_position(&series.title))
                .unwrap_or(UNPOSITIONED);
            (position, id)
        })
        .collect();

    keyed.sort_by(|(pos_a, id_a), (pos_b, id_b)| pos_a.total_cmp(pos_b).then_with(|| id_a.cmp(id_b)));
    keyed.into_iter().map(|(_, id)| id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CatalogBuilder;
    use crate::record::Record;

    fn lookup(json: &str, metadata: &[(&str, &str)]) -> Lookup {
        let records: Vec<Record> = serde_json::from_str(json).expect("records should parse");
        let mut builder = CatalogBuilder::new();
        builder.apply(&records);
        let metadata = metadata
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Lookup::new(builder.finish(), metadata)
    }

    #[test]
    fn test_series_orders_by_min_position_with_unpositioned_last() {
        let lookup = lookup(
            r#"[
                {"seriesTitle": "S", "workId": "C"},
                {"seriesTitle": "S", "workId": "A", "numberInSeries": ["3"]},
                {"seriesTitle": "S", "workId": "B", "numberInSeries": ["2", "1"]}
            ]"#,
            &[],
        );

        let series = lookup.get_series("S").unwrap();
        assert_eq!(series.works, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_order_is_precomputed_for_every_series() {
        let lookup = lookup(
            r#"[
                {"seriesTitle": "Empty"},
                {"seriesTitle": "S", "workId": "w2", "numberInSeries": ["2"]},
                {"seriesTitle": "S", "workId": "w1", "numberInSeries": ["1"]}
            ]"#,
            &[],
        );

        assert_eq!(lookup.series_order.len(), lookup.catalog().series_count());
        assert_eq!(lookup.series_order["S"], vec!["w1", "w2"]);
        assert!(lookup.get_series("Empty").unwrap().works.is_empty());
    }

    #[test]
    fn test_ties_break_on_identifier() {
        let lookup = lookup(
            r#"[
                {"seriesTitle": "S", "workId": "z", "numberInSeries": ["1"]},
                {"seriesTitle": "S", "workId": "a", "numberInSeries": ["1"]},
                {"seriesTitle": "S", "workId": "y"},
                {"seriesTitle": "S", "workId": "b"}
            ]"#,
            &[],
        );

        assert_eq!(lookup.get_series("S").unwrap().works, vec!["a", "z", "b", "y"]);
    }

    #[test]
    fn test_order_uses_positions_of_the_requested_series_only() {
        let lookup = lookup(
            r#"[
                {"seriesTitle": "S", "workId": "w1", "numberInSeries": ["5"]},
                {"seriesTitle": "T", "workId": "w1", "numberInSeries": ["1"]},
                {"seriesTitle": "S", "workId": "w2", "numberInSeries": ["2"]}
            ]"#,
            &[],
        );

        assert_eq!(lookup.get_series("S").unwrap().works, vec!["w2", "w1"]);
        assert_eq!(lookup.get_series("T").unwrap().works, vec!["w1"]);
    }

    #[test]
    fn test_get_work_reports_all_memberships_and_metadata() {
        let lookup = lookup(
            r#"[
                {"universeTitle": "U"},
                {"seriesTitle": "Alpha", "workId": "W1", "universeTitle": "U", "numberInSeries": ["1"]},
                {"seriesTitle": "Beta", "workId": "W1", "numberInSeries": ["7", "8"]}
            ]"#,
            &[("W1", "Some book")],
        );

        let work = lookup.get_work("W1").unwrap();
        assert_eq!(work.metadata, "Some book");
        assert_eq!(work.universe_title.as_deref(), Some("U"));
        assert_eq!(
            work.series,
            vec![
                SeriesMembership {
                    series_title: "Alpha".to_string(),
                    number_in_series: vec![1.0],
                },
                SeriesMembership {
                    series_title: "Beta".to_string(),
                    number_in_series: vec![7.0, 8.0],
                },
            ]
        );
    }

    #[test]
    fn test_missing_metadata_is_empty_string() {
        let lookup = lookup(r#"[{"workId": "w1"}]"#, &[("other", "x")]);

        let work = lookup.get_work("w1").unwrap();
        assert_eq!(work.metadata, "");
        assert!(work.series.is_empty());
        assert_eq!(work.universe_title, None);
    }

    #[test]
    fn test_unknown_keys_are_not_found() {
        let lookup = lookup(r#"[{"workId": "w1", "seriesTitle": "S", "universeTitle": "U"}]"#, &[]);

        assert!(lookup.get_work("nonexistent").is_none());
        assert!(lookup.get_series("nonexistent").is_none());
        assert!(lookup.get_universe("nonexistent").is_none());
    }

    #[test]
    fn test_listings_are_sorted() {
        let lookup = lookup(
            r#"[
                {"universeTitle": "Zeta", "seriesTitle": "Middle", "workId": "3"},
                {"universeTitle": "Alpha", "seriesTitle": "End", "workId": "1"},
                {"universeTitle": "Mu", "seriesTitle": "Beginning", "workId": "2"}
            ]"#,
            &[],
        );

        assert_eq!(lookup.list_all_universes(), vec!["Alpha", "Mu", "Zeta"]);
        assert_eq!(lookup.list_all_series(), vec!["Beginning", "End", "Middle"]);
        assert_eq!(lookup.list_all_works(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_universe_projection() {
        let lookup = lookup(
            r#"[
                {"universeTitle": "U", "universeDescription": "d", "universeAlternativeTitle": ["V"]},
                {"seriesTitle": "S", "universeTitle": "U", "numberInUniverse": 2},
                {"workId": "w1", "seriesTitle": "S", "universeTitle": "U"}
            ]"#,
            &[],
        );

        let universe = lookup.get_universe("U").unwrap();
        assert_eq!(universe.universe_description.as_deref(), Some("d"));
        assert_eq!(universe.series, vec!["S"]);
        assert_eq!(universe.works, vec!["w1"]);
        assert_eq!(universe.alternative_titles, vec!["V"]);

        let series = lookup.get_series("S").unwrap();
        assert_eq!(series.universe_title.as_deref(), Some("U"));
        assert_eq!(series.number_in_universe, Some(2));
    }
}
