use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};

use crate::config::ChartConfig;
use crate::data::model::TaxonomicLevel;
use crate::error::PlotError;
use crate::render::Destination;

const DEFAULT_FLAG_OUTPUT: &str = "output.png";

/// Command line for `metaphlanplot`.
///
/// Two equivalent forms are accepted:
/// * positional: `metaphlanplot <PROFILE> <LEVEL>`
/// * flags: `metaphlanplot -i <FILE> -l <LEVEL> [-o <FILE>] [--top-n <N>]`
#[derive(Parser, Debug)]
#[command(
    name = "metaphlanplot",
    version,
    about = "Plot MetaPhlAn taxonomic profiles",
    long_about = "Plot the top N taxa of a MetaPhlAn taxonomic profile at one rank \
                  (phylum, class, order, family, genus or species) as a bar chart."
)]
pub struct Cli {
    /// MetaPhlAn profile file (positional form)
    #[arg(value_name = "PROFILE", conflicts_with = "input")]
    pub profile: Option<PathBuf>,

    /// Taxonomic level (positional form)
    #[arg(value_name = "LEVEL", conflicts_with = "level")]
    pub level_name: Option<String>,

    /// MetaPhlAn profile.tsv file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Taxonomic level
    #[arg(short, long, value_enum)]
    pub level: Option<TaxonomicLevel>,

    /// Output PNG file [default: output.png, or <LEVEL>_barplot.png in positional form]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Top N taxa
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    pub top_n: i64,

    /// Show the chart in a window instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub show: bool,

    /// Sample name used in the chart title
    #[arg(long, value_name = "NAME")]
    pub sample: Option<String>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// JSON file with chart settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// A fully resolved run: what to read, which level, where to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub input: PathBuf,
    pub level: TaxonomicLevel,
    pub top_n: i64,
    pub destination: Destination,
    pub config: ChartConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Bad or missing arguments; reported by clap with its usage exit code.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Plot(#[from] PlotError),
}

impl Cli {
    /// Merge the positional and flag forms into one [`Invocation`].
    pub fn resolve(self) -> Result<Invocation, ResolveError> {
        let (input, level, default_output) = match (self.profile, self.input) {
            (Some(profile), _) => {
                let level = match (self.level_name, self.level) {
                    (Some(name), _) => name.parse::<TaxonomicLevel>()?,
                    (None, Some(level)) => level,
                    (None, None) => {
                        return Err(usage(
                            ErrorKind::MissingRequiredArgument,
                            "the positional form needs both <PROFILE> and <LEVEL>",
                        )
                        .into())
                    }
                };
                let output = PathBuf::from(format!("{}_barplot.png", level.name()));
                (profile, level, output)
            }
            (None, Some(input)) => {
                let level = self.level.ok_or_else(|| {
                    usage(
                        ErrorKind::MissingRequiredArgument,
                        "the following required argument was not provided: --level <LEVEL>",
                    )
                })?;
                (input, level, PathBuf::from(DEFAULT_FLAG_OUTPUT))
            }
            (None, None) => {
                return Err(usage(
                    ErrorKind::MissingRequiredArgument,
                    "the following required argument was not provided: --input <FILE>",
                )
                .into())
            }
        };

        let destination = if self.show {
            Destination::Window
        } else {
            Destination::File(self.output.unwrap_or(default_output))
        };

        let mut config = match &self.config {
            Some(path) => ChartConfig::load(path)?,
            None => ChartConfig::default(),
        };
        if let Some(sample) = self.sample {
            config.sample_name = sample;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }

        Ok(Invocation {
            input,
            level,
            top_n: self.top_n,
            destination,
            config,
        })
    }
}

fn usage(kind: ErrorKind, message: &str) -> clap::Error {
    Cli::command().error(kind, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(args: &[&str]) -> Result<Invocation, ResolveError> {
        let mut argv = vec!["metaphlanplot"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)?.resolve()
    }

    #[test]
    fn positional_form_defaults_output_to_level_name() {
        let inv = resolve(&["profile.txt", "genus"]).unwrap();
        assert_eq!(inv.input, PathBuf::from("profile.txt"));
        assert_eq!(inv.level, TaxonomicLevel::Genus);
        assert_eq!(inv.top_n, 10);
        assert_eq!(
            inv.destination,
            Destination::File(PathBuf::from("genus_barplot.png"))
        );
    }

    #[test]
    fn positional_form_rejects_unknown_level() {
        let err = resolve(&["profile.txt", "kingdom"]).unwrap_err();
        match err {
            ResolveError::Plot(PlotError::InvalidLevel(name)) => assert_eq!(name, "kingdom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn positional_form_needs_a_level() {
        let err = resolve(&["profile.txt"]).unwrap_err();
        assert!(matches!(err, ResolveError::Usage(_)));
    }

    #[test]
    fn flag_form_defaults() {
        let inv = resolve(&["-i", "p.tsv", "-l", "phylum"]).unwrap();
        assert_eq!(inv.level, TaxonomicLevel::Phylum);
        assert_eq!(inv.top_n, 10);
        assert_eq!(inv.destination, Destination::File(PathBuf::from("output.png")));
        assert_eq!(inv.config, ChartConfig::default());
    }

    #[test]
    fn flag_form_overrides() {
        let inv = resolve(&[
            "--input", "p.tsv", "--level", "species", "--output", "s.png", "--top-n", "25",
            "--sample", "Gut_01", "--width", "800", "--height", "600",
        ])
        .unwrap();
        assert_eq!(inv.top_n, 25);
        assert_eq!(inv.destination, Destination::File(PathBuf::from("s.png")));
        assert_eq!(inv.config.sample_name, "Gut_01");
        assert_eq!((inv.config.width, inv.config.height), (800, 600));
    }

    #[test]
    fn flag_form_level_is_restricted_by_the_parser() {
        let err = Cli::try_parse_from(["metaphlanplot", "-i", "p.tsv", "-l", "kingdom"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn flag_form_requires_input_and_level() {
        assert!(matches!(resolve(&["-l", "phylum"]), Err(ResolveError::Usage(_))));
        assert!(matches!(resolve(&["-i", "p.tsv"]), Err(ResolveError::Usage(_))));
        assert!(matches!(resolve(&[]), Err(ResolveError::Usage(_))));
    }

    #[test]
    fn negative_top_n_is_accepted() {
        let inv = resolve(&["-i", "p.tsv", "-l", "class", "--top-n", "-1"]).unwrap();
        assert_eq!(inv.top_n, -1);
    }

    #[test]
    fn show_selects_the_window() {
        let inv = resolve(&["-i", "p.tsv", "-l", "order", "--show"]).unwrap();
        assert_eq!(inv.destination, Destination::Window);
        assert!(Cli::try_parse_from(["metaphlanplot", "-i", "p", "-l", "order", "--show", "-o", "x.png"]).is_err());
    }

    #[test]
    fn mixing_forms_is_rejected() {
        assert!(Cli::try_parse_from(["metaphlanplot", "p.tsv", "-i", "q.tsv", "-l", "genus"]).is_err());
    }

    #[test]
    fn config_file_is_loaded_then_overridden() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        std::fs::write(&path, r#"{ "sample_name": "FromFile", "width": 1000 }"#).unwrap();
        let inv = resolve(&[
            "-i", "p.tsv", "-l", "family", "--config", path.to_str().unwrap(), "--width", "640",
        ])
        .unwrap();
        assert_eq!(inv.config.sample_name, "FromFile");
        assert_eq!(inv.config.width, 640);
        assert_eq!(inv.config.height, 1500);
    }
}
