//! TradeLens CLI — analytics over broker CSV exports.
//!
//! Commands:
//! - `report` — assemble the full analytics report as JSON
//! - `summary` — print only the dashboard summary block

mod import;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tradelens_analytics::{assemble_report, compute_summary};
use tradelens_core::{TradeFilter, TradeRecord};

use crate::import::load_trades_csv;

#[derive(Parser)]
#[command(
    name = "tradelens",
    about = "TradeLens CLI — trading journal analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the full analytics report and print it as JSON.
    Report {
        /// Path to the CSV trade export.
        #[arg(long)]
        trades: PathBuf,

        /// Optional TOML filter file applied before analysis.
        #[arg(long)]
        filter: Option<PathBuf>,

        /// Pretty-print the JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print only the dashboard summary block as JSON.
    Summary {
        /// Path to the CSV trade export.
        #[arg(long)]
        trades: PathBuf,

        /// Optional TOML filter file applied before analysis.
        #[arg(long)]
        filter: Option<PathBuf>,

        /// Pretty-print the JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            trades,
            filter,
            pretty,
        } => {
            let trades = load_filtered(&trades, filter.as_deref())?;
            let report = assemble_report(&trades).context("Failed to assemble report")?;
            print_json(&report, pretty)
        }
        Commands::Summary {
            trades,
            filter,
            pretty,
        } => {
            let trades = load_filtered(&trades, filter.as_deref())?;
            let summary = compute_summary(&trades).context("Failed to compute summary")?;
            print_json(&summary, pretty)
        }
    }
}

fn load_filtered(
    trades_path: &std::path::Path,
    filter_path: Option<&std::path::Path>,
) -> Result<Vec<TradeRecord>> {
    let trades = load_trades_csv(trades_path).context("Failed to load trade CSV")?;

    let Some(filter_path) = filter_path else {
        return Ok(trades);
    };
    let raw = std::fs::read_to_string(filter_path)
        .with_context(|| format!("Failed to read filter file {}", filter_path.display()))?;
    let filter = TradeFilter::from_toml_str(&raw).context("Invalid filter file")?;

    let filtered = filter.apply(&trades);
    eprintln!(
        "{} of {} trades match the filter",
        filtered.len(),
        trades.len()
    );
    Ok(filtered)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
