//! Searchable, facetable, sortable tables over baseball CSV snapshots.
//!
//! A [`StatsSession`] owns the dataset cache; [`data::query::query`] is the
//! pure pipeline underneath it.

pub mod app;
pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod state;

pub use app::{StatsSession, TableOutcome, TableView};
pub use catalog::{Catalog, DatasetDef, QualificationKind};
pub use config::Config;
pub use data::loader::{DatasetSource, DirectorySource, MemorySource};
pub use data::model::{ComparableValue, Dataset, Record};
pub use data::qualify::QualificationThreshold;
pub use data::sort::SortDirection;
pub use error::{ConfigError, LoadError};
pub use state::QueryState;
