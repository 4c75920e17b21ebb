use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::data::filter::facet_options;
use crate::data::loader::DatasetSource;
use crate::data::model::{Dataset, Record};
use crate::data::qualify::{compute_thresholds, QualificationThreshold};
use crate::data::query::{display_columns, query, sortable_columns, TableRules};
use crate::data::store::DatasetStore;
use crate::error::LoadError;
use crate::state::QueryState;

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

/// A rendered-ready table.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub dataset_label: String,
    /// Display columns, in order.
    pub header: Vec<String>,
    pub rows: Vec<Record>,
    pub row_count: usize,
}

impl TableView {
    /// Row cells projected onto `header`, for plain-text output.
    pub fn cells(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(|r| {
            self.header
                .iter()
                .map(|h| r.get(h).map(String::as_str).unwrap_or(""))
                .collect()
        })
    }
}

/// Result of asking for a table. Load failures are a value, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TableOutcome {
    Ready(TableView),
    Unavailable {
        dataset_id: String,
        dataset_label: String,
        reason: String,
    },
}

impl TableOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, TableOutcome::Ready(_))
    }

    pub fn view(&self) -> Option<&TableView> {
        match self {
            TableOutcome::Ready(v) => Some(v),
            TableOutcome::Unavailable { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One browsing session: a dataset cache plus thresholds computed once.
pub struct StatsSession {
    config: Arc<Config>,
    store: DatasetStore,
    thresholds: OnceCell<QualificationThreshold>,
}

impl StatsSession {
    pub fn new(config: Config, source: impl DatasetSource + 'static) -> Self {
        let config = Arc::new(config);
        Self {
            store: DatasetStore::new(Arc::clone(&config), source),
            config,
            thresholds: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Qualification thresholds, derived on first use.
    pub async fn thresholds(&self) -> QualificationThreshold {
        *self
            .thresholds
            .get_or_init(|| compute_thresholds(&self.store))
            .await
    }

    async fn dataset_and_rules(
        &self,
        id: &str,
    ) -> Result<(Arc<Dataset>, TableRules<'_>), LoadError> {
        let def = self
            .config
            .catalog
            .get(id)
            .ok_or_else(|| LoadError::UnknownDataset { id: id.to_string() })?;
        let ds = self.store.load(id).await?;
        Ok((ds, TableRules::new(def, &self.config)))
    }

    /// Query one dataset.
    pub async fn view(&self, id: &str, state: &QueryState) -> TableOutcome {
        let (ds, rules) = match self.dataset_and_rules(id).await {
            Ok(found) => found,
            Err(e) => return self.unavailable(id, &e),
        };

        let thresholds = if state.qualified_only {
            self.thresholds().await
        } else {
            QualificationThreshold::default()
        };

        let rows: Vec<Record> = query(&ds, rules, thresholds, state)
            .into_iter()
            .cloned()
            .collect();
        log::debug!("'{id}': {} of {} rows", rows.len(), ds.len());

        TableOutcome::Ready(TableView {
            dataset_label: rules.def.label.clone(),
            header: display_columns(&ds, rules.def),
            row_count: rows.len(),
            rows,
        })
    }

    /// The "could not load" outcome for `id`.
    pub fn unavailable(&self, id: &str, err: &LoadError) -> TableOutcome {
        let label = self
            .config
            .catalog
            .get(id)
            .map_or_else(|| id.to_string(), |d| d.label.clone());
        TableOutcome::Unavailable {
            dataset_id: id.to_string(),
            dataset_label: label,
            reason: err.to_string(),
        }
    }

    /// Values offered by the dataset's facet selector. Empty when it has none.
    pub async fn facet_options(&self, id: &str) -> Result<Vec<String>, LoadError> {
        let (ds, rules) = self.dataset_and_rules(id).await?;
        Ok(rules
            .def
            .facet
            .as_deref()
            .map(|col| facet_options(&ds, col))
            .unwrap_or_default())
    }

    /// Columns offered as sort keys.
    pub async fn sortable_columns(&self, id: &str) -> Result<Vec<String>, LoadError> {
        let (ds, rules) = self.dataset_and_rules(id).await?;
        Ok(sortable_columns(&ds, rules))
    }

    /// Apply a sort-column pick to `state` using the dataset's schema.
    pub async fn select_sort(
        &self,
        id: &str,
        state: &mut QueryState,
        column: &str,
    ) -> Result<(), LoadError> {
        let ds = self.store.load(id).await?;
        state.select_sort(column, &ds, &self.config);
        Ok(())
    }
}
