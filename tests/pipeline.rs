use std::collections::BTreeSet;
use std::path::PathBuf;

use venue_explorer::data::loader::{load_file, DataLoadError};
use venue_explorer::data::query::{
    count_by_region, count_postcode_matches, filter_by_regions, top_names,
};
use venue_explorer::state::SessionState;

const CSV_FIXTURE: &str = "\
,name,latitude,longitude,local_authority,postcode
0,Red Lion,51.5,-0.12,Camden,AB1 2CD
1,Red Lion,51.6,-0.13,Camden,AB1 2CD
2,Crown,,-0.14,Westminster,XY9 8ZT
";

/// Write a fixture under the system temp dir and return its path.
fn fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("venue-explorer-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("writing fixture");
    path
}

#[test]
fn csv_load_and_query_end_to_end() {
    let path = fixture("end_to_end.csv", CSV_FIXTURE);
    let dataset = load_file(&path).expect("load");
    std::fs::remove_file(&path).ok();

    assert_eq!(dataset.len(), 3);

    // Missing latitude forward-fills from the preceding row.
    assert_eq!(dataset.venues[2].latitude, 51.6);
    assert_eq!(dataset.venues[2].longitude, -0.14);

    // Each region is counted against the full dataset, aligned positionally.
    let regions = vec!["Camden".to_string(), "Westminster".to_string()];
    assert_eq!(count_by_region(&dataset, &regions), vec![2, 1]);

    // Most frequent name.
    let ranking = top_names(&dataset, 1);
    assert_eq!(ranking.names, vec!["Red Lion"]);
    assert_eq!(ranking.counts, vec![2]);

    // Duplicate postcodes collapse before substring matching.
    assert_eq!(count_postcode_matches(&dataset, "AB1"), 1);
}

#[test]
fn filtered_size_matches_summed_counts() {
    let path = fixture("filter_sum.csv", CSV_FIXTURE);
    let dataset = load_file(&path).expect("load");
    std::fs::remove_file(&path).ok();

    let selection: BTreeSet<String> = dataset.local_authorities.iter().cloned().collect();
    let list: Vec<String> = selection.iter().cloned().collect();

    let filtered = filter_by_regions(&dataset, &selection).len();
    let summed: usize = count_by_region(&dataset, &list).iter().sum();
    assert_eq!(filtered, summed);
    assert_eq!(filtered, dataset.len());
}

#[test]
fn loading_twice_yields_equal_datasets() {
    let path = fixture("idempotent.csv", CSV_FIXTURE);
    let first = load_file(&path).expect("first load");
    let second = load_file(&path).expect("second load");
    std::fs::remove_file(&path).ok();

    assert_eq!(first, second);
}

#[test]
fn session_caches_the_dataset_across_loads() {
    let path = fixture("session_cache.csv", CSV_FIXTURE);
    let mut state = SessionState::default();

    let first = state.ensure_loaded(&path).expect("initial load").clone();
    // Delete the file; the cached dataset must still be served.
    std::fs::remove_file(&path).ok();
    let second = state.ensure_loaded(&path).expect("cached load").clone();

    assert_eq!(first, second);
}

#[test]
fn json_load_matches_csv_load() {
    let json = r#"[
        {"name": "Red Lion", "latitude": 51.5, "longitude": -0.12,
         "local_authority": "Camden", "postcode": "AB1 2CD"},
        {"name": "Red Lion", "latitude": "51.6", "longitude": "-0.13",
         "local_authority": "Camden", "postcode": "AB1 2CD"},
        {"name": "Crown", "latitude": null, "longitude": -0.14,
         "local_authority": "Westminster", "postcode": "XY9 8ZT"}
    ]"#;
    let csv_path = fixture("parity.csv", CSV_FIXTURE);
    let json_path = fixture("parity.json", json);

    let from_csv = load_file(&csv_path).expect("csv load");
    let from_json = load_file(&json_path).expect("json load");
    std::fs::remove_file(&csv_path).ok();
    std::fs::remove_file(&json_path).ok();

    assert_eq!(from_csv, from_json);
}

#[test]
fn missing_required_column_fails_the_load() {
    let path = fixture(
        "missing_column.csv",
        ",name,latitude,longitude,postcode\n0,Red Lion,51.5,-0.12,AB1 2CD\n",
    );
    let err = load_file(&path).expect_err("load should fail");
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, DataLoadError::MissingColumn("local_authority")));
}

#[test]
fn unparseable_coordinate_fails_the_load() {
    let path = fixture(
        "bad_coordinate.csv",
        ",name,latitude,longitude,local_authority,postcode\n\
         0,Red Lion,fifty,-0.12,Camden,AB1 2CD\n",
    );
    let err = load_file(&path).expect_err("load should fail");
    std::fs::remove_file(&path).ok();

    assert!(matches!(
        err,
        DataLoadError::BadCoordinate { row: 0, column: "latitude", .. }
    ));
}

#[test]
fn missing_source_file_surfaces_as_io_error() {
    let path = std::env::temp_dir().join("venue-explorer-does-not-exist.csv");
    let err = load_file(&path).expect_err("load should fail");
    assert!(matches!(err, DataLoadError::Io { .. }));
}

#[test]
fn missing_value_in_first_row_stays_missing_and_fails_coercion() {
    let path = fixture(
        "first_row_missing.csv",
        ",name,latitude,longitude,local_authority,postcode\n\
         0,Red Lion,,-0.12,Camden,AB1 2CD\n\
         1,Crown,51.5,-0.13,Camden,AB2 3EF\n",
    );
    let err = load_file(&path).expect_err("load should fail");
    std::fs::remove_file(&path).ok();

    // Nothing precedes row 0, so the gap survives the fill and is fatal.
    assert!(matches!(
        err,
        DataLoadError::MissingField { row: 0, column: "latitude" }
    ));
}
