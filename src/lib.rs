pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod render;
pub mod state;
pub mod ui;

use std::path::Path;

use config::ChartConfig;
use data::model::TaxonomicLevel;
use render::Destination;

/// Load a profile, keep the taxa at `level` and chart the top `top_n`.
pub fn plot_profile(
    input: &Path,
    level: TaxonomicLevel,
    top_n: i64,
    destination: &Destination,
    config: &ChartConfig,
) -> error::Result<()> {
    let records = data::loader::load_profile(input)?;
    let rows = data::filter::extract(&records, level);
    render::render(rows, top_n, level, destination, config)
}
