/// Data layer: core types, loading, and the chart transforms.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site index, payload bounds
///   └───────────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌───────────┐
///   │ controls │  │aggregate │  │  filter   │
///   └──────────┘  └──────────┘  └───────────┘
///   site options   pie chart     scatter chart
/// ```

pub mod aggregate;
pub mod controls;
pub mod filter;
pub mod loader;
pub mod model;
