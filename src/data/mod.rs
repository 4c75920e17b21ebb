/// Data layer: parsing, classification, caching, qualification and querying.
///
/// Architecture:
/// ```text
///   games.csv / standings.csv / batters.csv / pitchers.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  DatasetSource → raw bytes → UTF-8 text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  text → Vec<Vec<String>>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  header ⨝ rows + schema, memoized per dataset id
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  query    │ ◀─── │ qualify  │  thresholds from games / standings
///   └──────────┘      └──────────┘
///        │
///        ▼
///   ordered rows → renderer
/// ```

pub mod classify;
pub mod columns;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
pub mod qualify;
pub mod query;
pub mod sort;
pub mod store;
