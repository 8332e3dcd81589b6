use std::collections::{BTreeSet, HashMap};

use super::model::VenueDataset;

// ---------------------------------------------------------------------------
// Region filter
// ---------------------------------------------------------------------------

/// Return indices of venues whose `local_authority` is in `regions`,
/// preserving source row order.
///
/// An empty selection yields an empty result (nothing is shown until the
/// user picks something); unknown region names simply match zero rows.
pub fn filter_by_regions(dataset: &VenueDataset, regions: &BTreeSet<String>) -> Vec<usize> {
    if regions.is_empty() {
        return Vec::new();
    }
    dataset
        .venues
        .iter()
        .enumerate()
        .filter(|(_, v)| regions.contains(&v.local_authority))
        .map(|(i, _)| i)
        .collect()
}

/// Like [`filter_by_regions`] but clones the matching rows out into an
/// owned dataset, for callers that hand a subset to a renderer.
pub fn region_subset(dataset: &VenueDataset, regions: &BTreeSet<String>) -> VenueDataset {
    let venues = filter_by_regions(dataset, regions)
        .into_iter()
        .map(|i| dataset.venues[i].clone())
        .collect();
    VenueDataset::from_venues(venues)
}

// ---------------------------------------------------------------------------
// Region counter
// ---------------------------------------------------------------------------

/// Count venues per region, positionally aligned with `regions`.
///
/// Each count runs against the full dataset, never a pre-filtered subset:
/// every selected region gets its own independent total, and duplicates in
/// the input produce duplicate entries in the output.
pub fn count_by_region(dataset: &VenueDataset, regions: &[String]) -> Vec<usize> {
    regions
        .iter()
        .map(|region| {
            dataset
                .venues
                .iter()
                .filter(|v| v.local_authority == *region)
                .count()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Name-frequency ranking
// ---------------------------------------------------------------------------

/// Top-N distinct venue names by occurrence count, as the parallel
/// sequences a bar chart consumes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameRanking {
    pub names: Vec<String>,
    pub counts: Vec<usize>,
}

impl NameRanking {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Rank distinct names by descending occurrence count and keep the first
/// `n`. Equal counts order by name ascending, so re-running the same query
/// against the same dataset always returns the same sequence.
///
/// `n == 0` returns empty sequences; `n` past the number of distinct names
/// returns them all.
pub fn top_names(dataset: &VenueDataset, n: usize) -> NameRanking {
    if n == 0 {
        return NameRanking::default();
    }

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for v in &dataset.venues {
        *occurrences.entry(v.name.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = occurrences.into_iter().collect();
    ranked.sort_by(|(name_a, count_a), (name_b, count_b)| {
        count_b.cmp(count_a).then_with(|| name_a.cmp(name_b))
    });
    ranked.truncate(n);

    let mut result = NameRanking::default();
    for (name, count) in ranked {
        result.names.push(name.to_string());
        result.counts.push(count);
    }
    result
}

// ---------------------------------------------------------------------------
// Postcode matcher
// ---------------------------------------------------------------------------

/// Number of distinct postcodes containing `needle` as a substring.
///
/// Duplicated postcodes collapse before matching. Case-sensitive, no
/// trimming; the empty needle matches every distinct postcode.
pub fn count_postcode_matches(dataset: &VenueDataset, needle: &str) -> usize {
    dataset
        .distinct_postcodes
        .iter()
        .filter(|pc| pc.contains(needle))
        .count()
}
