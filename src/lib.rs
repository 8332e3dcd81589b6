//! Exploration core for a static venue dataset.
//!
//! Loads a table of venues (name, coordinates, local authority, postcode)
//! once per session and answers the aggregation queries behind three
//! analytical views: a geospatial scatter map, a region-share pie chart,
//! and frequency bar charts. Rendering is the host UI's job; this crate
//! produces the payloads the renderers consume.

pub mod data;
pub mod state;
pub mod views;
