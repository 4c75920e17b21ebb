use super::classify::Role;
use super::columns::ColumnMap;
use super::filter::{facet_matches, is_hidden, normalize_for_search, text_matches};
use super::model::{Dataset, Record};
use super::qualify::{row_volume, QualificationThreshold};
use super::sort::sort_rows;
use crate::catalog::DatasetDef;
use crate::config::Config;
use crate::state::QueryState;

/// Per-dataset rules a query runs under.
#[derive(Debug, Clone, Copy)]
pub struct TableRules<'a> {
    pub def: &'a DatasetDef,
    pub columns: &'a ColumnMap,
}

impl<'a> TableRules<'a> {
    pub fn new(def: &'a DatasetDef, config: &'a Config) -> Self {
        Self {
            def,
            columns: &config.columns,
        }
    }

    fn role_of(&self, column: &str) -> Role {
        if column == self.columns.innings {
            Role::Innings
        } else {
            Role::Plain
        }
    }
}

/// Run the table pipeline: hide → facet → qualification → free text → sort.
///
/// Pure: the result depends only on the arguments.
pub fn query<'d>(
    dataset: &'d Dataset,
    rules: TableRules<'_>,
    thresholds: QualificationThreshold,
    state: &QueryState,
) -> Vec<&'d Record> {
    let facet = match (&rules.def.facet, &state.facet_value) {
        (Some(col), Some(value)) if !value.trim().is_empty() => {
            Some((col.as_str(), value.as_str()))
        }
        _ => None,
    };
    let minimum = if state.qualified_only {
        thresholds.minimum_for(rules.def.qualification)
    } else {
        None
    };
    let needle = normalize_for_search(&state.free_text);

    let mut rows: Vec<&Record> = dataset
        .rows
        .iter()
        .filter(|r| !is_hidden(r, &rules.def.required))
        .filter(|r| facet.map_or(true, |(col, value)| facet_matches(r, col, value)))
        .filter(|r| {
            minimum.map_or(true, |min| {
                row_volume(r, rules.def.qualification, rules.columns).is_some_and(|v| v >= min)
            })
        })
        .filter(|r| text_matches(r, &dataset.header, &needle))
        .collect();

    if let Some(column) = state.sort_column.as_deref().filter(|c| !c.is_empty()) {
        sort_rows(&mut rows, column, rules.role_of(column), state.sort_direction);
    }
    rows
}

/// Columns offered as sort keys: the dataset's recommended columns that exist
/// (or the whole header if none do), minus name-like columns, numeric only.
pub fn sortable_columns(dataset: &Dataset, rules: TableRules<'_>) -> Vec<String> {
    let recommended: Vec<&String> = rules
        .def
        .recommended_sort
        .iter()
        .filter(|c| dataset.has_column(c))
        .collect();
    let candidates: Vec<&String> = if recommended.is_empty() {
        dataset.header.iter().collect()
    } else {
        recommended
    };

    candidates
        .into_iter()
        .filter(|c| **c != rules.columns.player && **c != rules.columns.opponent)
        .filter(|c| **c == rules.columns.innings || dataset.is_numeric(c))
        .cloned()
        .collect()
}

/// Columns a table shows, in order.
pub fn display_columns(dataset: &Dataset, def: &DatasetDef) -> Vec<String> {
    if def.columns.is_empty() {
        dataset.header.clone()
    } else {
        def.columns.clone()
    }
}
