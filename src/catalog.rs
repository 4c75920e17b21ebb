use serde::{Deserialize, Serialize};

use crate::data::columns::*;

/// Which workload threshold a dataset's "qualified only" view applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualificationKind {
    #[default]
    None,
    /// Plate-appearance volume against `min_volume_a`.
    Batting,
    /// Innings-pitched volume against `min_volume_b`.
    Pitching,
}

/// One named dataset and how its table is presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDef {
    pub id: String,
    pub label: String,
    /// Resource path, relative to the source root.
    pub path: String,
    /// Fixed display order. Empty means "use the file header".
    #[serde(default)]
    pub columns: Vec<String>,
    /// Rows blank in any of these columns never reach the table.
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub facet: Option<String>,
    #[serde(default)]
    pub qualification: QualificationKind,
    /// Preferred sort keys, in menu order.
    #[serde(default)]
    pub recommended_sort: Vec<String>,
}

impl DatasetDef {
    fn new(id: &str, label: &str, path: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
            columns: Vec::new(),
            required: Vec::new(),
            facet: None,
            qualification: QualificationKind::None,
            recommended_sort: Vec::new(),
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub const GAMES_ID: &str = "games";
pub const STANDINGS_ID: &str = "standings";
pub const BATTERS_ID: &str = "batters";
pub const PITCHERS_ID: &str = "pitchers";

/// Ordered set of dataset definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<DatasetDef>);

impl Catalog {
    pub fn get(&self, id: &str) -> Option<&DatasetDef> {
        self.0.iter().find(|d| d.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|d| d.id.as_str())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let games = DatasetDef {
            columns: names(&[DATE, WEEKDAY, OPPONENT, SCORE, STARTER]),
            required: names(&[OPPONENT]),
            facet: Some(OPPONENT.into()),
            ..DatasetDef::new(GAMES_ID, "試合結果", "games.csv")
        };
        let standings = DatasetDef::new(STANDINGS_ID, "順位", "standings.csv");
        let batters = DatasetDef {
            qualification: QualificationKind::Batting,
            recommended_sort: names(&[
                BATTING_AVERAGE,
                HOME_RUNS,
                RUNS_BATTED_IN,
                HITS,
                STOLEN_BASES,
                ON_BASE_PCT,
                OPS,
                PLATE_APPEARANCES,
                AT_BATS,
            ]),
            ..DatasetDef::new(BATTERS_ID, "打者", "batters.csv")
        };
        let pitchers = DatasetDef {
            qualification: QualificationKind::Pitching,
            recommended_sort: names(&[ERA, WINS, LOSSES, SAVES, HOLD_POINTS, INNINGS, STRIKEOUTS]),
            ..DatasetDef::new(PITCHERS_ID, "投手", "pitchers.csv")
        };
        Catalog(vec![games, standings, batters, pitchers])
    }
}
