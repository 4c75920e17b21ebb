use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Failure to obtain one dataset. Always scoped to a single dataset id.
///
/// `Clone` so every caller waiting on one in-flight load gets the same failure.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("dataset '{id}' is not in the catalog")]
    UnknownDataset { id: String },

    #[error("dataset '{id}' has no source resource")]
    Missing { id: String },

    #[error("dataset '{id}': reading {path}")]
    Io {
        id: String,
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("dataset '{id}' is not valid UTF-8")]
    Decode {
        id: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl LoadError {
    /// The dataset this failure belongs to.
    pub fn dataset_id(&self) -> &str {
        match self {
            LoadError::UnknownDataset { id }
            | LoadError::Missing { id }
            | LoadError::Io { id, .. }
            | LoadError::Decode { id, .. } => id,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
