/// Data layer: core types, loading, filtering, aggregation and suggestions.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WorkloadTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ WorkloadTable │  Vec<WorkloadRecord>, teacher ids
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  teacher selection → subset
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ aggregate  │  │ suggest  │  threshold rules → advisory lines
///   └───────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod suggest;
