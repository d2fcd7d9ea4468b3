use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::TaxonomicLevel;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Invalid level: {}\nValid levels: {}", .0, TaxonomicLevel::valid_names())]
    InvalidLevel(String),

    #[error("Profile header is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed profile: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("Failed to open viewer window: {0}")]
    Viewer(String),

    #[error("Invalid config file {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PlotError>;

impl PlotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }
}
