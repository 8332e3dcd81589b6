use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Venue, VenueDataset};

/// Columns the source table must carry (looked up by header name).
pub const REQUIRED_COLUMNS: [&str; 5] =
    ["name", "latitude", "longitude", "local_authority", "postcode"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A fatal load-time failure. Query-time "empty input" cases are never
/// errors; everything here aborts startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed JSON: expected a top-level array of records")]
    JsonShape,

    #[error("source is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: '{column}' is missing with no preceding value to fill from")]
    MissingField { row: usize, column: &'static str },

    #[error("row {row}: {column} value '{value}' is not numeric")]
    BadCoordinate {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the venue table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the five required columns (an index column
///             is tolerated and ignored)
/// * `.json` – records-oriented array: `[{ "name": ..., "latitude": ... }]`
///
/// Both paths run the same fill-then-coerce pipeline, so missing values are
/// forward-filled and coordinates are numeric by the time a
/// [`VenueDataset`] exists.
pub fn load_file(path: &Path) -> Result<VenueDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    log::debug!("parsed {} raw rows from {}", raw.len(), path.display());

    let venues = coerce(fill_missing(raw))?;
    Ok(VenueDataset::from_venues(venues))
}

// ---------------------------------------------------------------------------
// Raw rows – parsed but not yet filled or coerced
// ---------------------------------------------------------------------------

/// One source row before normalisation. Every field may be absent; the
/// coordinate fields are still text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVenue {
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub local_authority: Option<String>,
    pub postcode: Option<String>,
}

/// Forward-fill: a missing field takes the preceding row's value for that
/// field. A missing value in the very first row stays missing (known edge
/// case, handled by [`coerce`]).
pub fn fill_missing(rows: Vec<RawVenue>) -> Vec<RawVenue> {
    let mut filled: Vec<RawVenue> = Vec::with_capacity(rows.len());
    for mut row in rows {
        if let Some(prev) = filled.last() {
            fill_field(&mut row.name, &prev.name);
            fill_field(&mut row.latitude, &prev.latitude);
            fill_field(&mut row.longitude, &prev.longitude);
            fill_field(&mut row.local_authority, &prev.local_authority);
            fill_field(&mut row.postcode, &prev.postcode);
        }
        filled.push(row);
    }
    filled
}

fn fill_field(field: &mut Option<String>, prev: &Option<String>) {
    if field.is_none() {
        field.clone_from(prev);
    }
}

/// Coerce filled rows into typed [`Venue`]s. A field still missing after
/// the fill, or a coordinate that does not parse as `f64`, fails the whole
/// load (fail-fast; nothing is dropped or zeroed silently).
pub fn coerce(rows: Vec<RawVenue>) -> Result<Vec<Venue>, DataLoadError> {
    rows.into_iter()
        .enumerate()
        .map(|(row, raw)| {
            Ok(Venue {
                name: require(raw.name, row, "name")?,
                latitude: parse_coordinate(raw.latitude, row, "latitude")?,
                longitude: parse_coordinate(raw.longitude, row, "longitude")?,
                local_authority: require(raw.local_authority, row, "local_authority")?,
                postcode: require(raw.postcode, row, "postcode")?,
            })
        })
        .collect()
}

fn require(
    field: Option<String>,
    row: usize,
    column: &'static str,
) -> Result<String, DataLoadError> {
    field.ok_or(DataLoadError::MissingField { row, column })
}

fn parse_coordinate(
    field: Option<String>,
    row: usize,
    column: &'static str,
) -> Result<f64, DataLoadError> {
    let value = require(field, row, column)?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| DataLoadError::BadCoordinate { row, column, value })
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the five required columns. Extra columns
/// (including an unnamed leading index column) are ignored. An empty cell
/// is a missing value.
fn read_csv(path: &Path) -> Result<Vec<RawVenue>, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|e| DataLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut col_indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in col_indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or(DataLoadError::MissingColumn(column))?;
    }
    let [name_idx, lat_idx, lon_idx, authority_idx, postcode_idx] = col_indices;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawVenue {
            name: cell(&record, name_idx),
            latitude: cell(&record, lat_idx),
            longitude: cell(&record, lon_idx),
            local_authority: cell(&record, authority_idx),
            postcode: cell(&record, postcode_idx),
        });
    }
    Ok(rows)
}

fn cell(record: &csv::StringRecord, idx: usize) -> Option<String> {
    match record.get(idx) {
        Some("") | None => None,
        Some(s) => Some(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "name": "Red Lion",
///     "latitude": 51.5,
///     "longitude": -0.12,
///     "local_authority": "Westminster",
///     "postcode": "SW1A 1AA"
///   },
///   ...
/// ]
/// ```
///
/// Coordinates may be numbers or strings; both go through the same coerce
/// stage as CSV cells. `null` and absent fields are missing values.
fn read_json(path: &Path) -> Result<Vec<RawVenue>, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or(DataLoadError::JsonShape)?;

    let mut rows = Vec::with_capacity(records.len());
    for rec in records {
        rows.push(RawVenue {
            name: json_field(rec, "name"),
            latitude: json_field(rec, "latitude"),
            longitude: json_field(rec, "longitude"),
            local_authority: json_field(rec, "local_authority"),
            postcode: json_field(rec, "postcode"),
        });
    }
    Ok(rows)
}

fn json_field(rec: &JsonValue, key: &str) -> Option<String> {
    match rec.get(key) {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
