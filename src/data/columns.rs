//! Literal header strings of the source snapshots, behind symbolic names.
//!
//! Everything that addresses a column by name goes through these constants
//! (directly, or via the aliases in [`ColumnMap`]).

use serde::{Deserialize, Serialize};

use super::model::Record;

// games.csv
pub const DATE: &str = "年月日";
pub const WEEKDAY: &str = "曜日";
pub const OPPONENT: &str = "対戦球団";
pub const SCORE: &str = "スコア";
pub const STARTER: &str = "先発投手";

// standings.csv
pub const TEAM: &str = "チーム";
pub const CLUB: &str = "球団";
pub const GAMES: &str = "試合";
pub const WINS: &str = "勝利";
pub const WINS_SHORT: &str = "勝";
pub const LOSSES: &str = "敗北";
pub const LOSSES_SHORT: &str = "敗";
pub const DRAWS: &str = "引分";
pub const DRAWS_SHORT: &str = "分";

// batters.csv
pub const PLAYER: &str = "選手";
pub const PLATE_APPEARANCES: &str = "打席";
pub const PLATE_APPEARANCES_EN: &str = "PA";
pub const AT_BATS: &str = "打数";
pub const AT_BATS_EN: &str = "AB";
pub const HITS: &str = "安打";
pub const HITS_EN: &str = "H";
pub const BATTING_AVERAGE: &str = "打率";
pub const BATTING_AVERAGE_EN: &str = "AVG";
pub const HOME_RUNS: &str = "本塁打";
pub const RUNS_BATTED_IN: &str = "打点";
pub const STOLEN_BASES: &str = "盗塁";
pub const ON_BASE_PCT: &str = "出塁率";
pub const OPS: &str = "OPS";

// pitchers.csv
pub const ERA: &str = "防御率";
pub const SAVES: &str = "セーブ";
pub const HOLD_POINTS: &str = "HP";
pub const INNINGS: &str = "投球回";
pub const STRIKEOUTS: &str = "三振";

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Symbolic column → literal header(s). Alias lists are tried in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub opponent: String,
    pub score: String,
    pub player: String,
    pub innings: String,
    pub team: Vec<String>,
    pub games: Vec<String>,
    pub wins: Vec<String>,
    pub losses: Vec<String>,
    pub draws: Vec<String>,
    pub plate_appearances: Vec<String>,
    pub at_bats: Vec<String>,
    pub hits: Vec<String>,
    pub batting_average: Vec<String>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            opponent: OPPONENT.into(),
            score: SCORE.into(),
            player: PLAYER.into(),
            innings: INNINGS.into(),
            team: names(&[TEAM, CLUB]),
            games: names(&[GAMES]),
            wins: names(&[WINS, WINS_SHORT]),
            losses: names(&[LOSSES, LOSSES_SHORT]),
            draws: names(&[DRAWS, DRAWS_SHORT]),
            plate_appearances: names(&[PLATE_APPEARANCES, PLATE_APPEARANCES_EN]),
            at_bats: names(&[AT_BATS, AT_BATS_EN]),
            hits: names(&[HITS, HITS_EN]),
            batting_average: names(&[BATTING_AVERAGE, BATTING_AVERAGE_EN]),
        }
    }
}

/// Value of the first alias present in the record (even if its cell is empty).
pub fn first_present<'r>(record: &'r Record, aliases: &[String]) -> Option<&'r str> {
    aliases
        .iter()
        .find_map(|name| record.get(name))
        .map(String::as_str)
}

/// Value of the first alias whose cell is non-blank.
pub fn first_non_blank<'r>(record: &'r Record, aliases: &[String]) -> Option<&'r str> {
    aliases
        .iter()
        .filter_map(|name| record.get(name))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}
