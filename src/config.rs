use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, GAMES_ID, STANDINGS_ID};
use crate::data::columns::{ColumnMap, ERA};
use crate::error::ConfigError;

/// Names that identify the subject team's row in the standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectTeam {
    pub exact: Vec<String>,
    pub suffixes: Vec<String>,
    pub contains: Vec<String>,
}

impl Default for SubjectTeam {
    fn default() -> Self {
        Self {
            exact: vec!["読売ジャイアンツ".into()],
            suffixes: vec!["ジャイアンツ".into()],
            contains: vec!["巨人".into()],
        }
    }
}

impl SubjectTeam {
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.exact.iter().any(|n| n == name)
            || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
            || self.contains.iter().any(|s| name.contains(s.as_str()))
    }
}

/// Session configuration. Every field has a default, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: Catalog,
    pub columns: ColumnMap,
    pub subject_team: SubjectTeam,
    /// Columns where smaller values rank higher (first sort is ascending).
    pub lower_is_better: Vec<String>,
    /// Plate appearances required per team game.
    pub pa_per_game: f64,
    /// Dataset counted for played games.
    pub games_dataset: String,
    /// Dataset holding the subject team's standings row.
    pub standings_dataset: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            columns: ColumnMap::default(),
            subject_team: SubjectTeam::default(),
            lower_is_better: vec![ERA.into()],
            pa_per_game: 3.1,
            games_dataset: GAMES_ID.into(),
            standings_dataset: STANDINGS_ID.into(),
        }
    }
}

impl Config {
    /// Load a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn is_lower_better(&self, column: &str) -> bool {
        self.lower_is_better.iter().any(|c| c == column)
    }
}
