use super::model::{CladeRecord, ExtractedRow, TaxonomicLevel};

// ---------------------------------------------------------------------------
// Level extraction: which records sit exactly at one rank
// ---------------------------------------------------------------------------

/// Whether `clade_name` sits exactly at `level`.
///
/// Both conditions must hold:
/// * the rank marker (e.g. `|g__`) appears as a literal substring
/// * the number of `|` separators equals the rank depth
///
/// The marker alone is not enough: a species path also contains `|g__`.
pub fn is_at_level(clade_name: &str, level: TaxonomicLevel) -> bool {
    clade_name.contains(level.prefix()) && clade_name.matches('|').count() == level.depth()
}

/// Strip everything up to and including the last rank marker.
pub fn level_label(clade_name: &str, level: TaxonomicLevel) -> &str {
    clade_name.rsplit(level.prefix()).next().unwrap_or(clade_name)
}

/// Keep records at exactly `level` and derive their short label.
///
/// Input order is preserved. No match yields an empty vector.
pub fn extract(records: &[CladeRecord], level: TaxonomicLevel) -> Vec<ExtractedRow> {
    let rows: Vec<ExtractedRow> = records
        .iter()
        .filter(|rec| is_at_level(&rec.clade_name, level))
        .map(|rec| ExtractedRow {
            clade_name: rec.clade_name.clone(),
            relative_abundance: rec.relative_abundance,
            label: level_label(&rec.clade_name, level).to_string(),
        })
        .collect();

    log::info!(
        "Extracted {} of {} records at {} level",
        rows.len(),
        records.len(),
        level
    );
    rows
}
