use std::collections::BTreeMap;

use serde::Serialize;

use super::classify::{infer_schema, Role};

// ---------------------------------------------------------------------------
// ComparableValue – a single cell, typed for comparison
// ---------------------------------------------------------------------------

/// A classified cell. Derived from one raw field plus its column's role.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparableValue {
    Empty,
    Numeric(f64),
    Text(String),
}

impl ComparableValue {
    /// The numeric value, if the cell classified as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ComparableValue::Numeric(n) => Some(*n),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record / Dataset
// ---------------------------------------------------------------------------

/// One data row: column name → raw string.
/// Columns absent from the source row map to the empty string.
pub type Record = BTreeMap<String, String>;

/// Whether a column samples as numbers or as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// A fully loaded dataset. Immutable once it leaves the store.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column names in source order.
    pub header: Vec<String>,
    /// Data rows in source order.
    pub rows: Vec<Record>,
    /// Per-column kind, inferred once at load time.
    pub schema: BTreeMap<String, ColumnKind>,
}

impl Dataset {
    /// Build a dataset from parser output. The first row is the header;
    /// every following row is zipped against it.
    ///
    /// `innings_column` names the column whose cells use the innings role
    /// when the schema is sampled.
    pub fn from_parsed(mut parsed: Vec<Vec<String>>, innings_column: &str) -> Self {
        if parsed.is_empty() {
            return Dataset {
                header: Vec::new(),
                rows: Vec::new(),
                schema: BTreeMap::new(),
            };
        }
        let header = parsed.remove(0);

        let rows: Vec<Record> = parsed
            .into_iter()
            .map(|fields| {
                let mut fields = fields.into_iter();
                header
                    .iter()
                    .map(|h| (h.clone(), fields.next().unwrap_or_default()))
                    .collect()
            })
            .collect();

        let schema = infer_schema(&header, &rows, |col| {
            if col == innings_column {
                Role::Innings
            } else {
                Role::Plain
            }
        });

        Dataset { header, rows, schema }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.header.iter().any(|h| h == column)
    }

    /// Whether the memoized schema marks `column` numeric.
    pub fn is_numeric(&self, column: &str) -> bool {
        self.schema.get(column) == Some(&ColumnKind::Numeric)
    }
}
