/// Data layer: core types, loading, and level extraction.
///
/// Architecture:
/// ```text
///  profile.tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse TSV → Vec<CladeRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  prefix + depth match → Vec<ExtractedRow>
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
