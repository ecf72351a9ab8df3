use std::collections::BTreeMap;

use super::types::SegmentConfig;

/// Arithmetic mean of the multipliers for the selected tags.
///
/// Tags absent from the mapping are skipped; an empty (or fully unknown)
/// selection degrades to the neutral multiplier 1.0 rather than producing a
/// mean over nothing.
fn avg_multiplier(selected: &[String], mapping: &BTreeMap<String, f64>) -> f64 {
    let known: Vec<f64> = selected
        .iter()
        .filter_map(|tag| mapping.get(tag).copied())
        .collect();
    if known.is_empty() {
        1.0
    } else {
        known.iter().sum::<f64>() / known.len() as f64
    }
}

/// Effective segment multiplier for the current filter state: mean of the
/// selected income multipliers times mean of the selected region multipliers.
pub fn segment_multiplier(
    income_sel: &[String],
    region_sel: &[String],
    segments: &SegmentConfig,
) -> f64 {
    avg_multiplier(income_sel, &segments.income) * avg_multiplier(region_sel, &segments.region)
}
