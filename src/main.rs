use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use venue_explorer::data::loader::load_file;
use venue_explorer::data::query::{count_by_region, count_postcode_matches, top_names};
use venue_explorer::views;

/// Smoke harness for the host UI: load the dataset and dump the payload
/// each renderer would receive as JSON.
///
/// Usage: `venue-explorer [dataset-path] [postcode-needle]`
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| "venues.csv".to_string()));
    let needle = args.next().unwrap_or_default();

    let dataset =
        load_file(&path).with_context(|| format!("loading dataset from {}", path.display()))?;
    log::info!(
        "{} venues, {} local authorities, {} distinct postcodes",
        dataset.len(),
        dataset.local_authorities.len(),
        dataset.distinct_postcodes.len()
    );

    // Map payload over the full dataset (the default map shows every venue).
    let all_indices: Vec<usize> = (0..dataset.len()).collect();
    let map = views::map_view(&dataset, &all_indices, 1000.0);
    println!("--- map ({} points) ---", map.points.len());
    println!("{}", serde_json::to_string_pretty(&map)?);

    // Region-share pie chart over every known region.
    let regions = dataset.local_authorities.clone();
    let counts = count_by_region(&dataset, &regions);
    let pie = views::region_pie_chart(&regions, &counts);
    println!("--- pie ---");
    println!("{}", serde_json::to_string_pretty(&pie)?);

    // Top-10 venue names.
    let bar = views::name_bar_chart(&top_names(&dataset, 10));
    println!("--- names ---");
    println!("{}", serde_json::to_string_pretty(&bar)?);

    if !needle.is_empty() {
        let count = count_postcode_matches(&dataset, &needle);
        let bar = views::postcode_bar_chart(&needle, count);
        println!("--- postcode ---");
        println!("{}", serde_json::to_string_pretty(&bar)?);
    }

    // Sanity cross-check: filtering by every region covers the whole table.
    let every_region: BTreeSet<String> = regions.iter().cloned().collect();
    let subset = venue_explorer::data::query::region_subset(&dataset, &every_region);
    debug_assert_eq!(subset.len(), dataset.len());

    Ok(())
}
