use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Venue – one row of the source table
// ---------------------------------------------------------------------------

/// A single venue (one row of the source table), fully typed.
///
/// Coordinates are guaranteed numeric here: anything that could not be
/// coerced to `f64` is rejected during load, before a `Venue` exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub local_authority: String,
    pub postcode: String,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {:.4}, {:.4})",
            self.name, self.local_authority, self.latitude, self.longitude
        )
    }
}

// ---------------------------------------------------------------------------
// VenueDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed value indexes.
///
/// Immutable after construction: queries borrow it, nothing mutates it.
/// Row order is the source file's row order.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueDataset {
    /// All venues (rows), in source order.
    pub venues: Vec<Venue>,
    /// Sorted distinct `local_authority` labels (region pickers read this).
    pub local_authorities: Vec<String>,
    /// Sorted distinct postcode values.
    pub distinct_postcodes: Vec<String>,
}

impl VenueDataset {
    /// Build value indexes from the loaded rows.
    pub fn from_venues(venues: Vec<Venue>) -> Self {
        let mut authorities: BTreeSet<&str> = BTreeSet::new();
        let mut postcodes: BTreeSet<&str> = BTreeSet::new();
        for v in &venues {
            authorities.insert(&v.local_authority);
            postcodes.insert(&v.postcode);
        }
        let local_authorities = authorities.into_iter().map(String::from).collect();
        let distinct_postcodes = postcodes.into_iter().map(String::from).collect();
        VenueDataset {
            venues,
            local_authorities,
            distinct_postcodes,
        }
    }

    /// Number of venues.
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}
