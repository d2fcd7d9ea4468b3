use std::path::Path;

use serde::Deserialize;

use crate::error::{PlotError, Result};

/// Chart appearance, loadable from a JSON file and overridable from the CLI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Sample name shown in the chart title.
    pub sample_name: String,
    /// Single fill colour for every bar; a hue palette is used when unset.
    pub bar_color: Option<[u8; 3]>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        // 8 x 5 inches at 300 dpi.
        Self {
            width: 2400,
            height: 1500,
            sample_name: "Sample".to_string(),
            bar_color: None,
        }
    }
}

impl ChartConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| PlotError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Title of the chart for `level`, e.g. `Sample - Top Phylum Composition`.
    pub fn title(&self, level_title: &str) -> String {
        format!("{} - Top {} Composition", self.sample_name, level_title)
    }
}
