/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  white.csv      red.csv        (remote, ';'-separated)
///        │           │
///        ▼           ▼
///   ┌──────────────────────┐
///   │  loader               │  fetch, parse, tag `type`, concatenate
///   └──────────────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ WineDataset   │  columns + Vec<WineRecord>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  chained range predicates → selected rows / complement
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
