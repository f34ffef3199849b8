//! Data directory loader
//!
//! Each file's records are applied in three passes so that references
//! resolve no matter where in that file an entity is first mentioned:
//!
//! 1. universes
//! 2. series (linked to universes from pass 1)
//! 3. works (linked to series and universes from passes 1-2)
//!
//! The first record mentioning a title or identifier creates the entity and
//! fixes its descriptive fields. Later records only extend back-reference
//! sets and series membership positions, so applying the same records again
//! leaves the graph unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::model::{Series, Universe, Work};
use crate::record::Record;
use crate::{Error, Result};

const DATA_FILE_EXTENSION: &str = "json";

/// Load every `*.json` file directly inside `dir` into a new catalog
///
/// Files are applied one at a time in file name order, each with its own
/// three passes over the running graph. A reference to a title that only a
/// later file declares stays unresolved. Any malformed file aborts the load.
pub fn load_dir(dir: &Path) -> Result<Catalog> {
    let files = data_files(dir)?;
    info!("Reading {} data file(s) from {}", files.len(), dir.display());

    let mut builder = CatalogBuilder::new();
    for path in &files {
        let records = read_records(path)?;
        info!("Applying {} record(s) from {}", records.len(), path.display());
        builder.apply(&records);
    }
    let catalog = builder.finish();

    info!(
        "Loaded {} universe(s), {} series, {} work(s)",
        catalog.universe_count(),
        catalog.series_count(),
        catalog.work_count()
    );
    Ok(catalog)
}

/// List data files directly inside `dir` (non-recursive), sorted by name
pub fn data_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let is_data_file = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == DATA_FILE_EXTENSION);
        if is_data_file {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Parse one data file as a JSON array of records
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Incrementally builds a [`Catalog`] from batches of records
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one batch of records on top of everything applied so far
    pub fn apply(&mut self, records: &[Record]) {
        debug!("Applying {} record(s): universes", records.len());
        for record in records {
            self.apply_universe(record);
        }

        debug!("Applying {} record(s): series", records.len());
        for record in records {
            self.apply_series(record);
        }

        debug!("Applying {} record(s): works", records.len());
        for record in records {
            self.apply_work(record);
        }
    }

    pub fn finish(self) -> Catalog {
        self.catalog
    }

    fn apply_universe(&mut self, record: &Record) {
        let Some(title) = record.universe_title.as_deref() else {
            return;
        };
        if self.catalog.universes.contains_key(title) {
            return;
        }

        let universe = Universe {
            description: record.universe_description.clone(),
            alternative_titles: record.universe_alternative_titles(),
            ..Universe::new(title)
        };
        self.catalog.universes.insert(title.to_string(), universe);
    }

    fn apply_series(&mut self, record: &Record) {
        let Some(title) = record.series_title.as_deref() else {
            return;
        };
        if self.catalog.series.contains_key(title) {
            return;
        }

        let universe = record
            .universe_title
            .as_deref()
            .and_then(|t| self.catalog.universes.get_mut(t));
        let universe_title = universe.map(|universe| {
            universe.add_series(title);
            universe.title.clone()
        });

        let series = Series {
            description: record.series_description.clone(),
            related_series: record.related_series.clone(),
            number_in_universe: record.number_in_universe(),
            alternative_titles: record.series_alternative_titles(),
            universe: universe_title,
            ..Series::new(title)
        };
        self.catalog.series.insert(title.to_string(), series);
    }

    fn apply_work(&mut self, record: &Record) {
        let Some(work_id) = record.work_id.as_deref() else {
            return;
        };

        let series = record
            .series_title
            .as_deref()
            .and_then(|t| self.catalog.series.get_mut(t));
        let series_title = series.map(|series| {
            series.add_work(work_id);
            series.title.clone()
        });

        let universe = record
            .universe_title
            .as_deref()
            .and_then(|t| self.catalog.universes.get_mut(t));
        let universe_title = universe.map(|universe| {
            universe.add_work(work_id);
            universe.title.clone()
        });

        if self.catalog.works.contains_key(work_id) {
            debug!(work_id, series = ?series_title, "Merging repeated work record");
        }
        let work = self
            .catalog
            .works
            .entry(work_id.to_string())
            .or_insert_with(|| Work {
                can_be_read_independently: record.can_be_read_independently(),
                ..Work::new(work_id)
            });

        // Established fields stay; only an absent universe link is filled in
        if work.universe.is_none() {
            work.universe = universe_title;
        }

        if let Some(series_title) = series_title {
            work.set_positions(&series_title, record.positions());
        }
    }
}
