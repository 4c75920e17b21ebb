use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::classify::{classify, Role};
use super::columns::{first_non_blank, first_present, ColumnMap};
use super::model::{Dataset, Record};
use super::store::DatasetStore;
use crate::catalog::QualificationKind;
use crate::config::{Config, SubjectTeam};

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Minimum workload for "qualified leaders" views.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct QualificationThreshold {
    /// Plate appearances: `ceil(games * pa_per_game)`.
    pub min_volume_a: f64,
    /// Innings pitched: one per team game.
    pub min_volume_b: f64,
}

impl QualificationThreshold {
    pub fn from_games_played(games: f64, pa_per_game: f64) -> Self {
        if games <= 0.0 || !games.is_finite() {
            return Self::default();
        }
        Self {
            min_volume_a: (games * pa_per_game).ceil(),
            min_volume_b: games,
        }
    }

    /// The threshold a dataset kind is filtered against, if filtering applies.
    /// A zero threshold means "no filter".
    pub fn minimum_for(&self, kind: QualificationKind) -> Option<f64> {
        let min = match kind {
            QualificationKind::None => return None,
            QualificationKind::Batting => self.min_volume_a,
            QualificationKind::Pitching => self.min_volume_b,
        };
        (min > 0.0).then_some(min)
    }
}

fn numeric(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| classify(s, Role::Plain).as_f64())
}

// ---------------------------------------------------------------------------
// Games played: ordered strategies
// ---------------------------------------------------------------------------

fn score_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+\s*-\s*[0-9]+").expect("static regex"))
}

/// A game row counts as played when it has an opponent and a `<int>-<int>`
/// score (result marks such as `○6-5` are allowed around it).
pub fn is_played_game(record: &Record, columns: &ColumnMap) -> bool {
    let opponent = record.get(&columns.opponent).map_or("", |v| v.trim());
    let score = record.get(&columns.score).map_or("", |v| v.trim());
    !opponent.is_empty() && !score.is_empty() && score_pattern().is_match(score)
}

/// The subject team's standings row.
pub fn find_team_row<'d>(
    standings: &'d Dataset,
    team: &SubjectTeam,
    columns: &ColumnMap,
) -> Option<&'d Record> {
    standings
        .rows
        .iter()
        .find(|r| first_non_blank(r, &columns.team).is_some_and(|name| team.matches(name)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamesPlayedStrategy {
    /// Count played rows of the games dataset.
    PlayedGames,
    /// Explicit games column on the team's standings row.
    StandingsGames,
    /// Wins + losses + draws on the team's standings row.
    StandingsRecord,
}

impl GamesPlayedStrategy {
    pub const CHAIN: [GamesPlayedStrategy; 3] = [
        GamesPlayedStrategy::PlayedGames,
        GamesPlayedStrategy::StandingsGames,
        GamesPlayedStrategy::StandingsRecord,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GamesPlayedStrategy::PlayedGames => "played-games",
            GamesPlayedStrategy::StandingsGames => "standings-games",
            GamesPlayedStrategy::StandingsRecord => "standings-record",
        }
    }

    /// Id of the dataset this strategy reads.
    pub fn source<'c>(self, config: &'c Config) -> &'c str {
        match self {
            GamesPlayedStrategy::PlayedGames => config.games_dataset.as_str(),
            _ => config.standings_dataset.as_str(),
        }
    }

    /// Games played according to this strategy. `None` or zero means "try the next".
    pub fn evaluate(self, dataset: &Dataset, config: &Config) -> Option<f64> {
        let cols = &config.columns;
        match self {
            GamesPlayedStrategy::PlayedGames => {
                let n = dataset.rows.iter().filter(|r| is_played_game(r, cols)).count();
                (n > 0).then_some(n as f64)
            }
            GamesPlayedStrategy::StandingsGames => {
                let row = find_team_row(dataset, &config.subject_team, cols)?;
                numeric(first_present(row, &cols.games))
            }
            GamesPlayedStrategy::StandingsRecord => {
                let row = find_team_row(dataset, &config.subject_team, cols)?;
                let w = numeric(first_present(row, &cols.wins))?;
                let l = numeric(first_present(row, &cols.losses))?;
                let d = numeric(first_present(row, &cols.draws))?;
                Some(w + l + d)
            }
        }
    }
}

/// Walk the strategy chain; the first positive count wins. Load failures skip
/// the strategy. Exhausting the chain yields zero thresholds, never an error.
pub async fn compute_thresholds(store: &DatasetStore) -> QualificationThreshold {
    let config = store.config();
    for strategy in GamesPlayedStrategy::CHAIN {
        let id = strategy.source(config);
        let dataset = match store.load(id).await {
            Ok(ds) => ds,
            Err(e) => {
                log::debug!("{}: skipped, {e}", strategy.name());
                continue;
            }
        };
        match strategy.evaluate(&dataset, config) {
            Some(games) if games > 0.0 => {
                log::debug!("{}: {games} games played", strategy.name());
                return QualificationThreshold::from_games_played(games, config.pa_per_game);
            }
            other => log::debug!("{}: no result ({other:?})", strategy.name()),
        }
    }
    log::info!("games played unavailable; qualification filter disabled");
    QualificationThreshold::default()
}

// ---------------------------------------------------------------------------
// Per-row volume
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeStrategy {
    PlateAppearances,
    AtBats,
    /// `hits / average`, an at-bat estimate.
    HitsOverAverage,
}

impl VolumeStrategy {
    pub const BATTING_CHAIN: [VolumeStrategy; 3] = [
        VolumeStrategy::PlateAppearances,
        VolumeStrategy::AtBats,
        VolumeStrategy::HitsOverAverage,
    ];

    pub fn estimate(self, record: &Record, cols: &ColumnMap) -> Option<f64> {
        match self {
            VolumeStrategy::PlateAppearances => {
                numeric(first_present(record, &cols.plate_appearances))
            }
            VolumeStrategy::AtBats => numeric(first_present(record, &cols.at_bats)),
            VolumeStrategy::HitsOverAverage => {
                let hits = numeric(first_present(record, &cols.hits))?;
                let avg = numeric(first_present(record, &cols.batting_average))?;
                (avg > 0.0).then(|| hits / avg)
            }
        }
    }
}

/// Batting volume: first strategy in the chain with a value.
pub fn batting_volume(record: &Record, cols: &ColumnMap) -> Option<f64> {
    VolumeStrategy::BATTING_CHAIN
        .iter()
        .find_map(|s| s.estimate(record, cols))
}

/// Pitching volume: innings pitched with thirds.
pub fn pitching_volume(record: &Record, cols: &ColumnMap) -> Option<f64> {
    record
        .get(&cols.innings)
        .and_then(|v| classify(v, Role::Innings).as_f64())
}

pub fn row_volume(record: &Record, kind: QualificationKind, cols: &ColumnMap) -> Option<f64> {
    match kind {
        QualificationKind::None => None,
        QualificationKind::Batting => batting_volume(record, cols),
        QualificationKind::Pitching => pitching_volume(record, cols),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn dataset(header: &[&str], rows: &[&[&str]]) -> Dataset {
        let mut parsed = vec![header.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
        parsed.extend(rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()));
        Dataset::from_parsed(parsed, INNINGS)
    }

    #[test]
    fn thresholds_from_130_games() {
        let t = QualificationThreshold::from_games_played(130.0, 3.1);
        assert_eq!(t.min_volume_a, 403.0);
        assert_eq!(t.min_volume_b, 130.0);
        assert_eq!(t.minimum_for(QualificationKind::Batting), Some(403.0));
        assert_eq!(t.minimum_for(QualificationKind::Pitching), Some(130.0));
        assert_eq!(t.minimum_for(QualificationKind::None), None);
    }

    #[test]
    fn zero_threshold_is_no_filter() {
        let t = QualificationThreshold::from_games_played(0.0, 3.1);
        assert_eq!(t, QualificationThreshold::default());
        assert_eq!(t.minimum_for(QualificationKind::Batting), None);
    }

    #[test]
    fn played_games_excludes_fixtures() {
        let cols = ColumnMap::default();
        let ds = dataset(
            &[DATE, OPPONENT, SCORE],
            &[
                &["4/1", "阪神", "○6-5"],
                &["4/2", "阪神", "● 2 - 3"],
                &["4/3", "", ""],
                &["4/4", "中日", "中止"],
                &["4/5", "広島", ""],
            ],
        );
        let played: Vec<bool> = ds.rows.iter().map(|r| is_played_game(r, &cols)).collect();
        assert_eq!(played, vec![true, true, false, false, false]);
        assert_eq!(
            GamesPlayedStrategy::PlayedGames.evaluate(&ds, &Config::default()),
            Some(2.0)
        );
    }

    #[test]
    fn played_games_zero_is_no_result() {
        let ds = dataset(&[DATE, OPPONENT, SCORE], &[&["4/1", "", ""]]);
        assert_eq!(GamesPlayedStrategy::PlayedGames.evaluate(&ds, &Config::default()), None);
    }

    #[test]
    fn standings_games_and_record() {
        let cfg = Config::default();
        let with_games = dataset(
            &[TEAM, GAMES, WINS, LOSSES, DRAWS],
            &[
                &["阪神タイガース", "140", "80", "55", "5"],
                &["読売ジャイアンツ", "139", "70", "65", "4"],
            ],
        );
        assert_eq!(GamesPlayedStrategy::StandingsGames.evaluate(&with_games, &cfg), Some(139.0));
        assert_eq!(GamesPlayedStrategy::StandingsRecord.evaluate(&with_games, &cfg), Some(139.0));

        let short = dataset(
            &[CLUB, WINS_SHORT, LOSSES_SHORT, DRAWS_SHORT],
            &[&["巨人", "10", "5", "1"]],
        );
        assert_eq!(GamesPlayedStrategy::StandingsGames.evaluate(&short, &cfg), None);
        assert_eq!(GamesPlayedStrategy::StandingsRecord.evaluate(&short, &cfg), Some(16.0));

        let partial = dataset(&[TEAM, WINS, LOSSES], &[&["読売ジャイアンツ", "10", "5"]]);
        assert_eq!(GamesPlayedStrategy::StandingsRecord.evaluate(&partial, &cfg), None);
    }

    #[test]
    fn batting_volume_precedence() {
        let cols = ColumnMap::default();
        let pa = record(&[
            (PLATE_APPEARANCES, "410"),
            (AT_BATS, "380"),
            (HITS, "100"),
            (BATTING_AVERAGE, "0.250"),
        ]);
        assert_eq!(batting_volume(&pa, &cols), Some(410.0));

        let ab = record(&[(PLATE_APPEARANCES, ""), (AT_BATS, "380")]);
        assert_eq!(batting_volume(&ab, &cols), Some(380.0));

        let est = record(&[(HITS, "100"), (BATTING_AVERAGE, "0.250")]);
        assert_eq!(batting_volume(&est, &cols), Some(400.0));

        let zero_avg = record(&[(HITS, "0"), (BATTING_AVERAGE, "0.000")]);
        assert_eq!(batting_volume(&zero_avg, &cols), None);

        let english = record(&[(PLATE_APPEARANCES_EN, "500")]);
        assert_eq!(batting_volume(&english, &cols), Some(500.0));
    }

    #[test]
    fn pitching_volume_reads_thirds() {
        let cols = ColumnMap::default();
        let v = pitching_volume(&record(&[(INNINGS, "129.2")]), &cols).unwrap();
        assert!((v - 129.667).abs() < 1e-3);
        assert_eq!(pitching_volume(&record(&[(INNINGS, "-")]), &cols), None);
    }
}
