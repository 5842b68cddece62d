/// Data layer: record types, loading, and filtering.
///
/// Architecture:
/// ```text
///   record file (.csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse CSV → RecordMap (ID → Record, last wins)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐   ID filter file, one ID per line
///   │  filter  │ ◄──────────────────────────────
///   └──────────┘
///        │
///        ▼
///   rows in filter order, projected through the Layout
/// ```

pub mod filter;
pub mod loader;
pub mod model;
