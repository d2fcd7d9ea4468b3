use std::fmt;
use std::str::FromStr;

use crate::error::PlotError;

// ---------------------------------------------------------------------------
// TaxonomicLevel – one supported rank of the clade hierarchy
// ---------------------------------------------------------------------------

/// A taxonomic rank that can be charted.
///
/// Kingdom is deliberately absent: every clade path starts with `k__`, so
/// there is no pipe-delimited marker for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TaxonomicLevel {
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl TaxonomicLevel {
    /// All supported levels in rank order (shallowest first).
    pub const ALL: [TaxonomicLevel; 6] = [
        TaxonomicLevel::Phylum,
        TaxonomicLevel::Class,
        TaxonomicLevel::Order,
        TaxonomicLevel::Family,
        TaxonomicLevel::Genus,
        TaxonomicLevel::Species,
    ];

    /// The pipe-delimited marker introducing this rank in a clade path.
    pub const fn prefix(self) -> &'static str {
        match self {
            TaxonomicLevel::Phylum => "|p__",
            TaxonomicLevel::Class => "|c__",
            TaxonomicLevel::Order => "|o__",
            TaxonomicLevel::Family => "|f__",
            TaxonomicLevel::Genus => "|g__",
            TaxonomicLevel::Species => "|s__",
        }
    }

    /// Number of `|` separators in a clade path at exactly this rank.
    pub const fn depth(self) -> usize {
        match self {
            TaxonomicLevel::Phylum => 1,
            TaxonomicLevel::Class => 2,
            TaxonomicLevel::Order => 3,
            TaxonomicLevel::Family => 4,
            TaxonomicLevel::Genus => 5,
            TaxonomicLevel::Species => 6,
        }
    }

    /// Lowercase name as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            TaxonomicLevel::Phylum => "phylum",
            TaxonomicLevel::Class => "class",
            TaxonomicLevel::Order => "order",
            TaxonomicLevel::Family => "family",
            TaxonomicLevel::Genus => "genus",
            TaxonomicLevel::Species => "species",
        }
    }

    /// Capitalised name used in chart titles and axis descriptions.
    pub const fn title(self) -> &'static str {
        match self {
            TaxonomicLevel::Phylum => "Phylum",
            TaxonomicLevel::Class => "Class",
            TaxonomicLevel::Order => "Order",
            TaxonomicLevel::Family => "Family",
            TaxonomicLevel::Genus => "Genus",
            TaxonomicLevel::Species => "Species",
        }
    }

    /// Comma-separated list of every valid level name.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|level| level.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TaxonomicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaxonomicLevel {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.name() == s)
            .ok_or_else(|| PlotError::InvalidLevel(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// CladeRecord – one row of the profile table
// ---------------------------------------------------------------------------

/// A single row of a taxonomic profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CladeRecord {
    /// Pipe-delimited lineage, e.g. `k__Bacteria|p__Firmicutes`.
    pub clade_name: String,
    /// Percentage in `[0, 100]`; `None` when the cell was missing or not numeric.
    pub relative_abundance: Option<f64>,
}

impl CladeRecord {
    pub fn new(clade_name: impl Into<String>, relative_abundance: Option<f64>) -> Self {
        Self {
            clade_name: clade_name.into(),
            relative_abundance,
        }
    }
}

// ---------------------------------------------------------------------------
// ExtractedRow – a record matched to exactly one level
// ---------------------------------------------------------------------------

/// A record that sits exactly at the requested level, with its short label.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRow {
    pub clade_name: String,
    pub relative_abundance: Option<f64>,
    /// Taxon name with the ancestor path and rank marker stripped.
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depths_increase_with_rank() {
        let depths: Vec<usize> = TaxonomicLevel::ALL.iter().map(|l| l.depth()).collect();
        assert_eq!(depths, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn parses_every_valid_name() {
        for level in TaxonomicLevel::ALL {
            assert_eq!(level.name().parse::<TaxonomicLevel>().unwrap(), level);
        }
    }

    #[test]
    fn rejects_kingdom_and_unknown_names() {
        for bad in ["kingdom", "Phylum", "strain", ""] {
            let err = bad.parse::<TaxonomicLevel>().unwrap_err();
            assert!(matches!(err, PlotError::InvalidLevel(ref s) if s == bad));
        }
    }

    #[test]
    fn invalid_level_message_lists_valid_names() {
        let err = "kingdom".parse::<TaxonomicLevel>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("kingdom"));
        assert!(msg.contains("phylum, class, order, family, genus, species"));
    }
}
