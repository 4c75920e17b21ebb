//! Write a deterministic set of sample snapshots:
//! `games.csv`, `standings.csv`, `batters.csv`, `pitchers.csv`.
//!
//! Usage: `generate_sample [OUT_DIR]` (default `data`).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use stat_ledger::data::columns::*;

/// splitmix64; the same seed always writes the same files.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_u64() % u64::from(hi - lo + 1)) as u32
    }
}

const SUBJECT: &str = "読売ジャイアンツ";
const RIVALS: [&str; 5] = ["阪神", "DeNA", "広島", "中日", "ヤクルト"];
const WEEKDAYS: [&str; 7] = ["金", "土", "日", "月", "火", "水", "木"];
const STARTERS: [&str; 5] = ["戸郷", "菅野", "山崎", "グリフィン", "井上"];

const SEASON_GAMES: usize = 143;
const PLAYED: usize = 100;

fn season_date(day: usize) -> String {
    // Opening day 3/28; month lengths Mar..Oct.
    let months = [(3, 31), (4, 30), (5, 31), (6, 30), (7, 31), (8, 31), (9, 30), (10, 31)];
    let mut rem = day + 27;
    for (month, len) in months {
        if rem < len {
            return format!("2025/{month}/{}", rem + 1);
        }
        rem -= len;
    }
    "2025/10/31".to_string()
}

fn writer(path: &Path) -> Result<csv::Writer<File>> {
    csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))
}

fn write_games(dir: &Path, rng: &mut SampleRng) -> Result<(u32, u32, u32)> {
    let path = dir.join("games.csv");
    let mut file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    file.write_all("\u{feff}".as_bytes())?;
    let mut w = csv::Writer::from_writer(file);

    w.write_record([DATE, WEEKDAY, OPPONENT, SCORE, STARTER])?;
    let (mut wins, mut losses, mut draws) = (0, 0, 0);
    for g in 0..SEASON_GAMES {
        let date = season_date(g);
        let weekday = WEEKDAYS[g % WEEKDAYS.len()];
        if g >= PLAYED {
            // Scheduled, not yet played.
            w.write_record([date.as_str(), weekday, "", "", ""])?;
            continue;
        }
        let ours = rng.range(0, 9);
        let theirs = rng.range(0, 9);
        let mark = match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => {
                wins += 1;
                "○"
            }
            std::cmp::Ordering::Less => {
                losses += 1;
                "●"
            }
            std::cmp::Ordering::Equal => {
                draws += 1;
                "△"
            }
        };
        let score = format!("{mark}{ours}-{theirs}");
        let opponent = RIVALS[g / 3 % RIVALS.len()];
        let starter = STARTERS[g % STARTERS.len()];
        w.write_record([date.as_str(), weekday, opponent, score.as_str(), starter])?;
    }
    w.flush()?;
    Ok((wins, losses, draws))
}

fn write_standings(dir: &Path, rng: &mut SampleRng, record: (u32, u32, u32)) -> Result<()> {
    let mut w = writer(&dir.join("standings.csv"))?;
    w.write_record([TEAM, GAMES, WINS, LOSSES, DRAWS, "勝率"])?;

    let mut rows = vec![(SUBJECT.to_string(), record)];
    let rivals = [
        "阪神タイガース",
        "横浜DeNAベイスターズ",
        "広島東洋カープ",
        "中日ドラゴンズ",
        "東京ヤクルトスワローズ",
    ];
    for rival in rivals {
        let d = rng.range(0, 4);
        let wins = rng.range(40, 60);
        rows.push((rival.to_string(), (wins, PLAYED as u32 - wins - d, d)));
    }
    for (team, (wins, losses, draws)) in rows {
        let games = wins + losses + draws;
        let pct = wins as f64 / (wins + losses).max(1) as f64;
        w.write_record([
            team,
            games.to_string(),
            wins.to_string(),
            losses.to_string(),
            draws.to_string(),
            format!("{pct:.3}"),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_batters(dir: &Path, rng: &mut SampleRng) -> Result<()> {
    let mut w = writer(&dir.join("batters.csv"))?;
    w.write_record([
        PLAYER,
        BATTING_AVERAGE,
        GAMES,
        PLATE_APPEARANCES,
        AT_BATS,
        HITS,
        HOME_RUNS,
        RUNS_BATTED_IN,
        STOLEN_BASES,
        ON_BASE_PCT,
        OPS,
    ])?;
    for i in 1..=25 {
        let pa = rng.range(10, 450);
        let ab = pa * 88 / 100;
        let avg = 0.180 + rng.next_f64() * 0.150;
        let hits = (ab as f64 * avg).round() as u32;
        let obp = avg + 0.060;
        let ops = obp + avg * 1.6;
        let avg_text = if ab > 0 {
            format!("{:.3}", hits as f64 / ab as f64)
        } else {
            String::new()
        };
        // Every fifth player is missing PA/AB, leaving hits / average.
        let (pa_text, ab_text) = if i % 5 == 0 {
            (String::new(), String::new())
        } else {
            (pa.to_string(), ab.to_string())
        };
        w.write_record([
            format!("選手{i:02}"),
            avg_text,
            rng.range(10, PLAYED as u32).to_string(),
            pa_text,
            ab_text,
            hits.to_string(),
            rng.range(0, 30).to_string(),
            rng.range(0, 80).to_string(),
            rng.range(0, 20).to_string(),
            format!("{obp:.3}"),
            format!("{ops:.3}"),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_pitchers(dir: &Path, rng: &mut SampleRng) -> Result<()> {
    let mut w = writer(&dir.join("pitchers.csv"))?;
    w.write_record([PLAYER, ERA, GAMES, WINS, LOSSES, SAVES, HOLD_POINTS, INNINGS, STRIKEOUTS])?;
    for i in 1..=15 {
        let whole = rng.range(5, 140);
        let thirds = rng.range(0, 2);
        let innings = if thirds == 0 { whole.to_string() } else { format!("{whole}.{thirds}") };
        let ip = whole as f64 + thirds as f64 / 3.0;
        let runs = rng.range(0, (ip * 0.6) as u32 + 1);
        let era = runs as f64 * 9.0 / ip;
        w.write_record([
            format!("投手{i:02}"),
            format!("{era:.2}"),
            rng.range(5, 50).to_string(),
            rng.range(0, 12).to_string(),
            rng.range(0, 10).to_string(),
            rng.range(0, 30).to_string(),
            rng.range(0, 25).to_string(),
            innings,
            ((ip * 0.9) as u32).to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let dir: PathBuf = std::env::args().nth(1).unwrap_or_else(|| "data".into()).into();
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SampleRng(42);
    let record = write_games(&dir, &mut rng)?;
    write_standings(&dir, &mut rng, record)?;
    write_batters(&dir, &mut rng)?;
    write_pitchers(&dir, &mut rng)?;

    println!(
        "Wrote games/standings/batters/pitchers to {} ({PLAYED} of {SEASON_GAMES} games played)",
        dir.display()
    );
    Ok(())
}
