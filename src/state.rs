use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::data::model::Dataset;
use crate::data::sort::SortDirection;

// ---------------------------------------------------------------------------
// Query state
// ---------------------------------------------------------------------------

/// Everything a table query depends on, besides the data itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    /// Free-text search, matched against every column.
    pub free_text: String,
    /// Selected facet value (whitespace-insensitive).
    pub facet_value: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    /// Show only rows meeting the qualification threshold.
    pub qualified_only: bool,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = text.into();
        self
    }

    pub fn with_facet(mut self, value: impl Into<String>) -> Self {
        self.facet_value = Some(value.into());
        self
    }

    pub fn with_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_column = Some(column.into());
        self.sort_direction = direction;
        self
    }

    pub fn qualified(mut self, on: bool) -> Self {
        self.qualified_only = on;
        self
    }

    /// Pick a sort column. A new column gets its default direction;
    /// the current column flips direction.
    pub fn select_sort(&mut self, column: &str, dataset: &Dataset, config: &Config) {
        if self.sort_column.as_deref() == Some(column) {
            self.toggle_direction();
        } else {
            self.sort_column = Some(column.to_string());
            self.sort_direction = default_direction(column, dataset, config);
        }
    }

    pub fn toggle_direction(&mut self) {
        self.sort_direction = self.sort_direction.flipped();
    }

    /// Back to source order.
    pub fn clear_sort(&mut self) {
        self.sort_column = None;
        self.sort_direction = SortDirection::Asc;
    }
}

/// Lower-is-better columns ascend, other numeric columns descend, text ascends.
pub fn default_direction(column: &str, dataset: &Dataset, config: &Config) -> SortDirection {
    if config.is_lower_better(column) {
        SortDirection::Asc
    } else if dataset.is_numeric(column) {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    }
}
