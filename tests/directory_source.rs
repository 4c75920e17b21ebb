// tests/directory_source.rs
//
// Loading snapshots from disk, including BOM-prefixed and CRLF files.

use std::fs;

use stat_ledger::catalog::{BATTERS_ID, GAMES_ID, STANDINGS_ID};
use stat_ledger::data::columns::*;
use stat_ledger::{Config, DirectorySource, QueryState, StatsSession, TableOutcome};

#[tokio::test]
async fn loads_bom_crlf_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let text = format!(
        "\u{feff}{DATE},{WEEKDAY},{OPPONENT},{SCORE},{STARTER}\r\n\
         4/1,火,阪神,○6-5,\"戸郷\"\r\n\
         4/2,水,\"広島, 東洋\",●2-3,菅野\r\n\
         4/3,木,,,\r\n"
    );
    fs::write(dir.path().join("games.csv"), text).unwrap();

    let session = StatsSession::new(Config::default(), DirectorySource::new(dir.path()));
    let outcome = session.view(GAMES_ID, &QueryState::new()).await;
    let view = outcome.view().expect("games.csv should load");

    assert_eq!(view.row_count, 2);
    assert_eq!(view.rows[0][DATE], "4/1");
    assert_eq!(view.rows[0][STARTER], "戸郷");
    assert_eq!(view.rows[1][OPPONENT], "広島, 東洋");

    let ds = session.store().get_cached(GAMES_ID).unwrap();
    assert_eq!(ds.header[0], DATE);
    // Loading never reorders or drops source rows.
    assert_eq!(ds.len(), 3);
}

#[tokio::test]
async fn missing_file_is_unavailable_and_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let standings = format!("{TEAM},{GAMES}\n読売ジャイアンツ,12\n");
    fs::write(dir.path().join("standings.csv"), standings).unwrap();

    let session = StatsSession::new(Config::default(), DirectorySource::new(dir.path()));

    let outcome = session.view(BATTERS_ID, &QueryState::new()).await;
    assert!(matches!(outcome, TableOutcome::Unavailable { .. }));

    assert!(session.view(STANDINGS_ID, &QueryState::new()).await.is_ready());
    // Games is missing too, so thresholds come from the standings row.
    assert_eq!(session.thresholds().await.min_volume_a, 38.0);
}

#[tokio::test]
async fn invalid_utf8_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("games.csv"), [0xff, 0xfe, b'a', b'\n']).unwrap();

    let session = StatsSession::new(Config::default(), DirectorySource::new(dir.path()));
    match session.view(GAMES_ID, &QueryState::new()).await {
        TableOutcome::Unavailable { reason, .. } => assert!(reason.contains("UTF-8")),
        TableOutcome::Ready(_) => panic!("invalid bytes must not load"),
    }
}

#[tokio::test]
async fn config_file_overrides_catalog() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scores.csv"), "team,runs\nA,3\nB,10\nC,\n").unwrap();
    let cfg_path = dir.path().join("config.json");
    fs::write(
        &cfg_path,
        r#"{"catalog":[{"id":"scores","label":"Scores","path":"scores.csv"}]}"#,
    )
    .unwrap();

    let config = Config::from_path(&cfg_path).unwrap();
    let session = StatsSession::new(config, DirectorySource::new(dir.path()));

    let mut state = QueryState::new();
    session.select_sort("scores", &mut state, "runs").await.unwrap();
    let outcome = session.view("scores", &state).await;
    let view = outcome.view().unwrap();
    assert_eq!(view.dataset_label, "Scores");
    let teams: Vec<&str> = view.rows.iter().map(|r| r["team"].as_str()).collect();
    assert_eq!(teams, vec!["B", "A", "C"]);
}
