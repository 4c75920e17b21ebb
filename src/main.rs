use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use stat_ledger::{Config, DirectorySource, QueryState, SortDirection, StatsSession, TableOutcome};

/// Query a directory of stats snapshots.
#[derive(Debug, Parser)]
#[command(name = "stat-ledger", version, about)]
struct Cli {
    /// Directory holding the dataset CSV files.
    #[arg(short = 'd', long, default_value = "data")]
    data_dir: PathBuf,

    /// JSON config overriding the built-in catalog and column names.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset id (games, standings, batters, pitchers, ...).
    #[arg(short = 's', long, default_value = "games")]
    dataset: String,

    /// Free-text search across all columns.
    #[arg(short, long, default_value = "")]
    query: String,

    /// Facet value (e.g. an opponent).
    #[arg(short, long)]
    facet: Option<String>,

    /// Sort column (literal header).
    #[arg(long)]
    sort: Option<String>,

    /// Force descending order.
    #[arg(long, conflicts_with = "asc")]
    desc: bool,

    /// Force ascending order.
    #[arg(long)]
    asc: bool,

    /// Only rows meeting the qualification threshold.
    #[arg(long)]
    qualified: bool,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,

    /// List facet values and exit.
    #[arg(long)]
    list_facets: bool,

    /// List sortable columns and exit.
    #[arg(long)]
    list_sort: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let session = StatsSession::new(config, DirectorySource::new(&cli.data_dir));

    if cli.list_facets || cli.list_sort {
        let listed = if cli.list_facets {
            session.facet_options(&cli.dataset).await
        } else {
            session.sortable_columns(&cli.dataset).await
        };
        return Ok(match listed {
            Ok(values) => {
                for v in values {
                    println!("{v}");
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                print_outcome(&session.unavailable(&cli.dataset, &e));
                ExitCode::FAILURE
            }
        });
    }

    let mut state = QueryState::new().with_text(cli.query.clone()).qualified(cli.qualified);
    state.facet_value = cli.facet.clone();
    if let Some(column) = &cli.sort {
        // Unavailable datasets are reported by `view` below.
        if session.select_sort(&cli.dataset, &mut state, column).await.is_err() {
            state.sort_column = Some(column.clone());
        }
        if cli.desc {
            state.sort_direction = SortDirection::Desc;
        } else if cli.asc {
            state.sort_direction = SortDirection::Asc;
        }
    }
    log::debug!("query state: {state:?}");

    let outcome = session.view(&cli.dataset, &state).await;
    if cli.json {
        let text = serde_json::to_string_pretty(&outcome).context("serializing outcome")?;
        println!("{text}");
    } else {
        print_outcome(&outcome);
    }

    Ok(if outcome.is_ready() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(outcome: &TableOutcome) {
    match outcome {
        TableOutcome::Ready(view) => {
            println!("{}  ({} rows)", view.dataset_label, view.row_count);
            println!("{}", view.header.join("\t"));
            for cells in view.cells() {
                let cells: Vec<String> = cells.iter().map(|c| c.replace('\n', " ")).collect();
                println!("{}", cells.join("\t"));
            }
        }
        TableOutcome::Unavailable {
            dataset_label,
            reason,
            ..
        } => {
            eprintln!("{dataset_label}: could not load ({reason})");
        }
    }
}
