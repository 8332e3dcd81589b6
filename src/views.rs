use serde::Serialize;

use crate::data::model::VenueDataset;
use crate::data::query::NameRanking;

// ---------------------------------------------------------------------------
// Presentation payloads
// ---------------------------------------------------------------------------
//
// The renderers themselves (map widget, pie/bar chart widgets, page layout)
// live in the host UI. This module only builds the value objects they
// consume, so everything here is plain data, recomputed per query and
// discarded after rendering.

const MAP_STYLE: &str = "mapbox://styles/mapbox/dark-v10";
const MAP_ZOOM: f64 = 5.0;

/// One plotted venue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Scatter-map payload: the points plus the view parameters the map widget
/// needs (centre, zoom, point radius, style).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub points: Vec<MapPoint>,
    pub point_radius: f64,
    pub map_style: String,
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: f64,
}

/// Build the map payload for the venues at `indices`.
///
/// The view centres on the mean coordinate of the plotted points; an empty
/// selection centres on (0, 0) and plots nothing.
pub fn map_view(dataset: &VenueDataset, indices: &[usize], point_radius: f64) -> MapView {
    let points: Vec<MapPoint> = indices
        .iter()
        .map(|&i| {
            let v = &dataset.venues[i];
            MapPoint {
                name: v.name.clone(),
                latitude: v.latitude,
                longitude: v.longitude,
            }
        })
        .collect();

    let (center_latitude, center_longitude) = if points.is_empty() {
        (0.0, 0.0)
    } else {
        let n = points.len() as f64;
        (
            points.iter().map(|p| p.latitude).sum::<f64>() / n,
            points.iter().map(|p| p.longitude).sum::<f64>() / n,
        )
    };

    MapView {
        points,
        point_radius,
        map_style: MAP_STYLE.to_string(),
        center_latitude,
        center_longitude,
        zoom: MAP_ZOOM,
    }
}

/// Pie-chart payload: parallel label/count sequences plus a title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
    pub title: String,
}

/// Region-share pie chart from positionally aligned regions and counts.
pub fn region_pie_chart(regions: &[String], counts: &[usize]) -> PieChart {
    PieChart {
        labels: regions.to_vec(),
        counts: counts.to_vec(),
        title: format!("Venue frequency: {}", regions.join(", ")),
    }
}

/// Bar-chart payload: parallel label/value sequences plus axis labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
}

/// Bar chart of the top-N venue names and their frequencies.
pub fn name_bar_chart(ranking: &NameRanking) -> BarChart {
    BarChart {
        labels: ranking.names.clone(),
        values: ranking.counts.clone(),
        x_label: "Venue".to_string(),
        y_label: "Amount".to_string(),
        title: "Popular venue names and their amount".to_string(),
    }
}

/// Single-bar chart for a postcode search: the needle and its match count.
pub fn postcode_bar_chart(needle: &str, count: usize) -> BarChart {
    BarChart {
        labels: vec![needle.to_string()],
        values: vec![count],
        x_label: "Postcode".to_string(),
        y_label: "Number".to_string(),
        title: "Venues with the selected postcode".to_string(),
    }
}
