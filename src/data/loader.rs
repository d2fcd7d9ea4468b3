use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::model::CladeRecord;
use crate::error::{PlotError, Result};

const CLADE_COLUMN: &str = "clade_name";
const ABUNDANCE_COLUMN: &str = "relative_abundance";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a taxonomic profile from a tab-separated file.
pub fn load_profile(path: &Path) -> Result<Vec<CladeRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
    let records = parse_profile(&text)?;
    log::info!("Loaded {} clade records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse the text of a profile.
///
/// Layout:
/// * lines starting with `#` are comments
/// * the first remaining line is the header, naming at least `clade_name`
///   and `relative_abundance`
/// * MetaPhlAn 3/4 instead keep the header in the comment block as
///   `#clade_name\t...`; the last such line is used as the header and every
///   non-comment line is data
///
/// Abundance cells that are missing or not numeric become `None`.
pub fn parse_profile(text: &str) -> Result<Vec<CladeRecord>> {
    let commented_header = text
        .lines()
        .take_while(|line| line.starts_with('#'))
        .filter(|line| line.starts_with("#clade_name"))
        .last()
        .map(|line| StringRecord::from(line[1..].split('\t').collect::<Vec<_>>()));

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .flexible(true)
        .has_headers(commented_header.is_none())
        .from_reader(text.as_bytes());

    // A header taken from the comment block is only used to locate columns;
    // the reader itself treats every non-comment line as data.
    let headers = match commented_header {
        Some(h) => h,
        None => reader.headers()?.clone(),
    };

    let clade_idx = column_index(&headers, CLADE_COLUMN)?;
    let abundance_idx = column_index(&headers, ABUNDANCE_COLUMN)?;

    let mut records = Vec::new();
    let mut missing = 0usize;

    for result in reader.records() {
        let row = result?;
        let Some(clade_name) = row.get(clade_idx).filter(|c| !c.is_empty()) else {
            continue;
        };
        let relative_abundance = row.get(abundance_idx).and_then(parse_abundance);
        if relative_abundance.is_none() {
            missing += 1;
        }
        records.push(CladeRecord::new(clade_name, relative_abundance));
    }

    if missing > 0 {
        log::warn!("{missing} rows have a missing or non-numeric relative abundance");
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(PlotError::MissingColumn(name))
}

/// Coerce an abundance cell; anything that is not a finite number is `None`.
fn parse_abundance(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
