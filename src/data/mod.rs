/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///   .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse → fill_missing → coerce → VenueDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ VenueDataset  │  Vec<Venue>, distinct-value indexes
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  region filter / counts / ranking / postcode matcher
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod query;
