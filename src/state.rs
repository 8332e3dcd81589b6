use std::collections::BTreeSet;
use std::path::Path;

use crate::data::loader::{self, DataLoadError};
use crate::data::model::VenueDataset;
use crate::data::query::filter_by_regions;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything a UI session holds between interactions, independent of
/// rendering: the once-loaded dataset plus the user's current selections.
///
/// The dataset is read-only after load; every query is a pure function of
/// (dataset, selections), so there is nothing to lock.
pub struct SessionState {
    /// Loaded dataset (None until the first load).
    pub dataset: Option<VenueDataset>,

    /// Regions ticked in the region picker.
    pub selected_regions: BTreeSet<String>,

    /// Indices of venues matching `selected_regions` (cached).
    pub visible_indices: Vec<usize>,

    /// Map scatter point radius, in metres.
    pub point_radius: f64,

    /// How many top venue names the bar chart shows.
    pub top_n: usize,

    /// Current postcode search text.
    pub postcode_query: String,

    /// Status / error message for the UI to display.
    pub status_message: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            dataset: None,
            selected_regions: BTreeSet::new(),
            visible_indices: Vec::new(),
            point_radius: 1000.0,
            top_n: 0,
            postcode_query: String::new(),
            status_message: None,
        }
    }
}

impl SessionState {
    /// Load the dataset from `path` unless one is already cached.
    ///
    /// The file is read at most once per session; repeated calls hand back
    /// the cached dataset, which is content-equal to a fresh load.
    pub fn ensure_loaded(&mut self, path: &Path) -> Result<&VenueDataset, DataLoadError> {
        if self.dataset.is_none() {
            let dataset = loader::load_file(path)?;
            log::info!(
                "loaded {} venues across {} local authorities from {}",
                dataset.len(),
                dataset.local_authorities.len(),
                path.display()
            );
            self.selected_regions.clear();
            self.visible_indices.clear();
            self.status_message = None;
            return Ok(self.dataset.insert(dataset));
        }
        match &self.dataset {
            Some(ds) => Ok(ds),
            None => unreachable!("dataset cached above"),
        }
    }

    /// Ingest a newly loaded dataset and reset the selections.
    pub fn set_dataset(&mut self, dataset: VenueDataset) {
        self.selected_regions.clear();
        self.visible_indices.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filter_by_regions(ds, &self.selected_regions);
        }
    }

    /// Indices the map should plot: the filtered rows when a selection is
    /// active, otherwise every venue (the default map shows the full
    /// dataset).
    pub fn map_indices(&self) -> Vec<usize> {
        match &self.dataset {
            Some(ds) if self.selected_regions.is_empty() => (0..ds.len()).collect(),
            _ => self.visible_indices.clone(),
        }
    }

    /// Toggle a single region in the selection.
    pub fn toggle_region(&mut self, region: &str) {
        if !self.selected_regions.remove(region) {
            self.selected_regions.insert(region.to_string());
        }
        self.refilter();
    }

    /// Select every known region.
    pub fn select_all_regions(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selected_regions = ds.local_authorities.iter().cloned().collect();
            self.refilter();
        }
    }

    /// Clear the region selection.
    pub fn clear_regions(&mut self) {
        self.selected_regions.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Venue;

    fn dataset() -> VenueDataset {
        let venue = |name: &str, authority: &str| Venue {
            name: name.to_string(),
            latitude: 51.5,
            longitude: -0.1,
            local_authority: authority.to_string(),
            postcode: "N1 1AA".to_string(),
        };
        VenueDataset::from_venues(vec![
            venue("Red Lion", "Camden"),
            venue("Crown", "Westminster"),
            venue("Swan", "Camden"),
        ])
    }

    #[test]
    fn toggling_a_region_refilters() {
        let mut state = SessionState::default();
        state.set_dataset(dataset());

        state.toggle_region("Camden");
        assert_eq!(state.visible_indices, vec![0, 2]);

        state.toggle_region("Camden");
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn map_defaults_to_every_venue_until_a_region_is_picked() {
        let mut state = SessionState::default();
        state.set_dataset(dataset());
        assert_eq!(state.map_indices(), vec![0, 1, 2]);

        state.toggle_region("Westminster");
        assert_eq!(state.map_indices(), vec![1]);
    }

    #[test]
    fn select_all_then_clear() {
        let mut state = SessionState::default();
        state.set_dataset(dataset());

        state.select_all_regions();
        assert_eq!(state.visible_indices.len(), 3);

        state.clear_regions();
        assert!(state.visible_indices.is_empty());
    }
}
