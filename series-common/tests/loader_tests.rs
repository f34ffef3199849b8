//! Integration tests for loading data directories
//!
//! Tests cover:
//! - Merging records across files
//! - Idempotent reloads and split files
//! - Referential consistency of the resulting graph
//! - Fatal handling of malformed files

use std::fs;
use std::path::Path;

use series_common::loader::{data_files, load_dir};
use series_common::{Catalog, Error, Lookup};
use tempfile::TempDir;

const SAMPLE: &str = r#"[
    {"universeTitle": "Discworld", "universeDescription": "A flat world", "universeAlternativeTitle": "The Disc"},
    {"seriesTitle": "City Watch", "universeTitle": "Discworld", "numberInUniverse": "2", "seriesDescription": "Ankh-Morpork's finest"},
    {"workId": "870970-basis:1", "seriesTitle": "City Watch", "universeTitle": "Discworld", "numberInSeries": ["1"]},
    {"workId": "870970-basis:2", "seriesTitle": "City Watch", "universeTitle": "Discworld", "numberInSeries": ["2"]},
    {"workId": "870970-basis:3", "seriesTitle": "City Watch", "numberInSeries": ["3", "4"], "canBeReadIndependently": true},
    {"workId": "870970-basis:4"}
]"#;

/// Test helper: Write data files into a fresh temp directory
fn data_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Should create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("Should write data file");
    }
    dir
}

fn load(dir: &Path) -> Catalog {
    load_dir(dir).expect("Should load data directory")
}

fn assert_referentially_consistent(catalog: &Catalog) {
    for work in catalog.works() {
        for series_title in work.series_positions.keys() {
            let series = catalog.series(series_title).expect("work references known series");
            assert!(series.included_works.contains(&work.id));
        }
        if let Some(universe_title) = &work.universe {
            let universe = catalog.universe(universe_title).expect("work references known universe");
            assert!(universe.included_works.contains(&work.id));
        }
    }
    for series in catalog.all_series() {
        if let Some(universe_title) = &series.universe {
            let universe = catalog.universe(universe_title).expect("series references known universe");
            assert!(universe.included_series.contains(&series.title));
        }
    }
}

#[test]
fn test_load_single_file() {
    let dir = data_dir(&[("series.json", SAMPLE)]);
    let catalog = load(dir.path());

    assert_eq!(catalog.universe_count(), 1);
    assert_eq!(catalog.series_count(), 1);
    assert_eq!(catalog.work_count(), 4);
    assert_referentially_consistent(&catalog);

    let series = catalog.series("City Watch").unwrap();
    assert_eq!(series.number_in_universe, Some(2));
    assert_eq!(series.included_works.len(), 3);
}

#[test]
fn test_loading_same_file_twice_is_idempotent() {
    let once = load(data_dir(&[("a.json", SAMPLE)]).path());
    let twice = load(data_dir(&[("a.json", SAMPLE), ("b.json", SAMPLE)]).path());

    assert_eq!(once, twice);
}

#[test]
fn test_split_file_matches_single_file() {
    let split_first = r#"[
        {"universeTitle": "Discworld", "universeDescription": "A flat world", "universeAlternativeTitle": "The Disc"},
        {"seriesTitle": "City Watch", "universeTitle": "Discworld", "numberInUniverse": "2", "seriesDescription": "Ankh-Morpork's finest"},
        {"workId": "870970-basis:1", "seriesTitle": "City Watch", "universeTitle": "Discworld", "numberInSeries": ["1"]}
    ]"#;
    let split_second = r#"[
        {"workId": "870970-basis:2", "seriesTitle": "City Watch", "universeTitle": "Discworld", "numberInSeries": ["2"]},
        {"workId": "870970-basis:3", "seriesTitle": "City Watch", "numberInSeries": ["3", "4"], "canBeReadIndependently": true},
        {"workId": "870970-basis:4"}
    ]"#;

    let whole = load(data_dir(&[("all.json", SAMPLE)]).path());
    let split = load(data_dir(&[("1.json", split_first), ("2.json", split_second)]).path());

    assert_eq!(whole, split);
}

#[test]
fn test_reference_to_title_from_later_file_stays_unresolved() {
    let dir = data_dir(&[
        (
            "a.json",
            r#"[{"workId": "w1", "seriesTitle": "Late", "universeTitle": "U", "numberInSeries": ["1"]}]"#,
        ),
        ("b.json", r#"[{"seriesTitle": "Late", "universeTitle": "U"}]"#),
    ]);
    let catalog = load(dir.path());

    let work = catalog.work("w1").unwrap();
    assert!(work.series_positions.is_empty());
    assert_eq!(work.universe, None);

    let series = catalog.series("Late").unwrap();
    assert!(series.included_works.is_empty());
    assert_eq!(series.universe, None);
    assert_referentially_consistent(&catalog);
}

#[test]
fn test_later_file_links_to_titles_from_earlier_file() {
    let dir = data_dir(&[
        ("a.json", r#"[{"universeTitle": "U"}, {"seriesTitle": "Early", "universeTitle": "U"}]"#),
        ("b.json", r#"[{"workId": "w1", "seriesTitle": "Early", "universeTitle": "U", "numberInSeries": ["1"]}]"#),
    ]);
    let catalog = load(dir.path());

    let work = catalog.work("w1").unwrap();
    assert_eq!(work.series_positions["Early"], vec![1.0]);
    assert_eq!(work.universe.as_deref(), Some("U"));
    assert!(catalog.universe("U").unwrap().included_series.contains("Early"));
    assert_referentially_consistent(&catalog);
}

#[test]
fn test_work_merged_across_files() {
    let dir = data_dir(&[
        ("a.json", r#"[{"seriesTitle": "Alpha", "workId": "W1", "numberInSeries": ["1"]}]"#),
        ("b.json", r#"[{"seriesTitle": "Beta", "workId": "W1", "numberInSeries": ["5"]}]"#),
    ]);
    let lookup = Lookup::new(load(dir.path()), Default::default());

    let work = lookup.get_work("W1").unwrap();
    let titles: Vec<_> = work.series.iter().map(|m| m.series_title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
    assert_eq!(lookup.get_series("Alpha").unwrap().works, vec!["W1"]);
    assert_eq!(lookup.get_series("Beta").unwrap().works, vec!["W1"]);
}

#[test]
fn test_non_json_files_and_subdirectories_are_ignored() {
    let dir = data_dir(&[
        ("data.json", r#"[{"workId": "w1"}]"#),
        ("notes.txt", "not json at all"),
    ]);
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("more.json"), r#"[{"workId": "w2"}]"#).unwrap();

    let files = data_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);

    let catalog = load(dir.path());
    assert_eq!(catalog.work_ids(), vec!["w1"]);
}

#[test]
fn test_malformed_file_aborts_load() {
    let dir = data_dir(&[
        ("a.json", r#"[{"workId": "w1"}]"#),
        ("b.json", r#"[{"workId": "w2""#),
    ]);

    match load_dir(dir.path()) {
        Err(Error::Json { path, .. }) => assert!(path.ends_with("b.json")),
        other => panic!("Expected malformed file error, got {:?}", other),
    }
}

#[test]
fn test_mistyped_optional_fields_do_not_abort_load() {
    let dir = data_dir(&[(
        "a.json",
        r#"[
            {"workId": "w1"},
            {"workId": "w2", "canBeReadIndependently": "yes"},
            {"seriesTitle": "S", "relatedSeries": ["X"], "numberInUniverse": [1]}
        ]"#,
    )]);
    let catalog = load(dir.path());

    assert_eq!(catalog.work_ids(), vec!["w1", "w2"]);
    assert!(!catalog.work("w2").unwrap().can_be_read_independently);

    let series = catalog.series("S").unwrap();
    assert_eq!(series.related_series, None);
    assert_eq!(series.number_in_universe, None);
}

#[test]
fn test_non_array_file_aborts_load() {
    let dir = data_dir(&[("a.json", r#"{"workId": "w1"}"#)]);
    assert!(matches!(load_dir(dir.path()), Err(Error::Json { .. })));
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(matches!(load_dir(&missing), Err(Error::Io { .. })));
}

#[test]
fn test_empty_directory_yields_empty_catalog() {
    let dir = TempDir::new().unwrap();
    assert!(load(dir.path()).is_empty());
}
