use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use super::loader::{decode, DatasetSource};
use super::model::Dataset;
use super::parser::parse;
use crate::catalog::DatasetDef;
use crate::config::Config;
use crate::error::LoadError;

/// Outcome of one fetch+parse, published to every caller waiting on it.
type Outcome = Option<Result<Arc<Dataset>, LoadError>>;

enum Slot {
    Ready(Arc<Dataset>),
    Loading(watch::Receiver<Outcome>),
}

enum Claim {
    Lead(watch::Sender<Outcome>),
    Wait(watch::Receiver<Outcome>),
}

/// Session-scoped dataset cache.
///
/// Each id has at most one load in flight. Concurrent `load` calls for an id
/// all receive that load's outcome, success or failure. A success fills the
/// slot for the rest of the session; a failure clears it once every waiter
/// has been told, so a later call retries. Ids never share a slot.
pub struct DatasetStore {
    config: Arc<Config>,
    source: Box<dyn DatasetSource>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl DatasetStore {
    pub fn new(config: Arc<Config>, source: impl DatasetSource + 'static) -> Self {
        Self {
            config,
            source: Box::new(source),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load a dataset, fetching and parsing it at most once per success.
    pub async fn load(&self, id: &str) -> Result<Arc<Dataset>, LoadError> {
        let def = self
            .config
            .catalog
            .get(id)
            .ok_or_else(|| LoadError::UnknownDataset { id: id.to_string() })?;

        loop {
            let claim = {
                let mut slots = self.slots();
                match slots.get(id) {
                    Some(Slot::Ready(ds)) => {
                        log::debug!("cache hit for '{id}'");
                        return Ok(Arc::clone(ds));
                    }
                    Some(Slot::Loading(rx)) => Claim::Wait(rx.clone()),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        slots.insert(id.to_string(), Slot::Loading(rx));
                        Claim::Lead(tx)
                    }
                }
            };

            match claim {
                Claim::Lead(tx) => return self.lead(def, tx).await,
                Claim::Wait(mut rx) => {
                    let outcome = rx
                        .wait_for(Option::is_some)
                        .await
                        .map(|published| (*published).clone());
                    match outcome {
                        Ok(Some(result)) => return result,
                        Ok(None) => {}
                        // The leading call was dropped before publishing.
                        Err(_) => self.clear_abandoned(id),
                    }
                }
            }
        }
    }

    async fn lead(
        &self,
        def: &DatasetDef,
        tx: watch::Sender<Outcome>,
    ) -> Result<Arc<Dataset>, LoadError> {
        let id = def.id.as_str();
        let result = self.fetch_and_parse(def).await;
        {
            let mut slots = self.slots();
            match &result {
                Ok(ds) => {
                    slots.insert(id.to_string(), Slot::Ready(Arc::clone(ds)));
                }
                Err(e) => {
                    log::warn!("could not load '{id}': {e}");
                    slots.remove(id);
                }
            }
        }
        tx.send_replace(Some(result.clone()));
        result
    }

    async fn fetch_and_parse(&self, def: &DatasetDef) -> Result<Arc<Dataset>, LoadError> {
        let bytes = self.source.fetch(def).await?;
        let text = decode(&def.id, bytes)?;
        let ds = Dataset::from_parsed(parse(&text), &self.config.columns.innings);
        log::info!(
            "loaded '{}': {} rows, {} columns",
            def.id,
            ds.len(),
            ds.header.len()
        );
        Ok(Arc::new(ds))
    }

    fn clear_abandoned(&self, id: &str) {
        let mut slots = self.slots();
        if let Some(Slot::Loading(rx)) = slots.get(id) {
            if rx.has_changed().is_err() {
                slots.remove(id);
            }
        }
    }

    /// The cached dataset, without any I/O.
    pub fn get_cached(&self, id: &str) -> Option<Arc<Dataset>> {
        match self.slots().get(id) {
            Some(Slot::Ready(ds)) => Some(Arc::clone(ds)),
            _ => None,
        }
    }
}
