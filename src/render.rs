use std::cmp::Ordering;
use std::path::PathBuf;

use crate::color::bar_colors;
use crate::config::ChartConfig;
use crate::data::model::{ExtractedRow, TaxonomicLevel};
use crate::error::Result;
use crate::{app, export};

pub const Y_AXIS_LABEL: &str = "Relative abundance (%)";

// ---------------------------------------------------------------------------
// Chart description shared by the PNG exporter and the viewer window
// ---------------------------------------------------------------------------

/// Where a chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Write a PNG at this path, overwriting silently.
    File(PathBuf),
    /// Show in a window and block until it is closed.
    Window,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    /// `None` is drawn as an empty slot.
    pub value: Option<f64>,
    pub color: [u8; 3],
}

/// Everything needed to draw one bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<ChartBar>,
}

impl BarChartSpec {
    pub fn new(rows: &[ExtractedRow], level: TaxonomicLevel, config: &ChartConfig) -> Self {
        let colors = bar_colors(rows.len(), config.bar_color);
        let bars = rows
            .iter()
            .zip(colors)
            .map(|(row, color)| ChartBar {
                label: row.label.clone(),
                value: row.relative_abundance,
                color,
            })
            .collect();

        Self {
            title: config.title(level.title()),
            x_label: level.title().to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            bars,
        }
    }

    /// Largest finite bar value, `0.0` when there is none.
    pub fn max_value(&self) -> f64 {
        self.bars
            .iter()
            .filter_map(|b| b.value)
            .fold(0.0, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Top-N selection
// ---------------------------------------------------------------------------

/// Descending by abundance; missing abundances after every real value.
fn by_abundance_desc(a: &ExtractedRow, b: &ExtractedRow) -> Ordering {
    match (a.relative_abundance, b.relative_abundance) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort rows by abundance (stable) and keep the first `top_n`.
///
/// `top_n <= 0` keeps nothing; a `top_n` above the row count keeps all rows.
pub fn select_top(mut rows: Vec<ExtractedRow>, top_n: i64) -> Vec<ExtractedRow> {
    let keep = usize::try_from(top_n).unwrap_or(0);
    rows.sort_by(by_abundance_desc);
    rows.truncate(keep);
    rows
}

/// Select the top `top_n` rows and draw them to `destination`.
pub fn render(
    rows: Vec<ExtractedRow>,
    top_n: i64,
    level: TaxonomicLevel,
    destination: &Destination,
    config: &ChartConfig,
) -> Result<()> {
    let top = select_top(rows, top_n);
    for (rank, row) in top.iter().enumerate() {
        log::debug!(
            "#{:<3} {:<40} {}",
            rank + 1,
            row.label,
            row.relative_abundance
                .map(|v| format!("{v:.5}"))
                .unwrap_or_else(|| "<missing>".to_string())
        );
    }

    let spec = BarChartSpec::new(&top, level, config);
    match destination {
        Destination::File(path) => {
            export::write_png(&spec, path, config.width, config.height)?;
            log::info!("Wrote {} bars to {}", spec.bars.len(), path.display());
        }
        Destination::Window => app::show(spec)?,
    }
    Ok(())
}
