// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of PVData.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use pvdata_core::{PvDataset, Selection, graphed, graphed_daily};
use pvdata_types::{DailySummary, UnifiedRow};

#[derive(Parser)]
#[command(name = "pvdata")]
#[command(about = "PV plant historical data utilities", long_about = None)]
struct Cli {
    /// Data folder override (otherwise config.toml, then DATADIR)
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the per-day summary table
    Daily,
    /// Print the unified rows for a selector (a date, a special-date label,
    /// or "daily"/"total" for the summary table)
    Show { selector: String },
    /// Print the plot-ready consumption/generation projection for a selector
    Graph { selector: String },
    /// List every valid selector
    Keys,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    // Initialize tracing with env filter support
    // Respects RUST_LOG environment variable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber")?;

    let cli = Cli::parse();

    let mut app_config = config::AppConfig::load()?;
    if let Some(folder) = cli.data_folder {
        app_config.data_folder = folder;
    }

    info!("Data folder: {}", app_config.data_folder.display());
    info!(
        "Enabled metrics: {}",
        app_config
            .metrics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let dataset = PvDataset::new(app_config.dataset_options());

    match cli.command {
        Command::Daily => {
            let daily = dataset.daily()?;
            print_summaries(&daily, cli.format)?;
        }
        Command::Show { selector } => match dataset.select(&selector)? {
            Selection::Daily(daily) => print_summaries(&daily, cli.format)?,
            Selection::Rows(rows) => print_rows(&rows, cli.format)?,
        },
        Command::Graph { selector } => {
            let graph = match dataset.select(&selector)? {
                Selection::Daily(daily) => graphed_daily(&daily),
                Selection::Rows(rows) => graphed(&rows),
            };
            print_serializable(&graph, cli.format, |row| {
                format!(
                    "{:<12} {:>12} {:>12}",
                    row.date,
                    display(row.consumption),
                    display(row.generation)
                )
            })?;
        }
        Command::Keys => {
            for key in dataset.keys()? {
                println!("{key}");
            }
        }
    }

    Ok(())
}

fn print_summaries(summaries: &[DailySummary], format: Format) -> Result<()> {
    print_serializable(summaries, format, |summary| {
        format!(
            "{:<12} {:>12} {:>12} {:>16} {:>16}",
            summary.date,
            display(summary.consumption_max),
            display(summary.generation_max),
            display(summary.consumption_daily),
            display(summary.generation_daily)
        )
    })
}

fn print_rows(rows: &[UnifiedRow], format: Format) -> Result<()> {
    print_serializable(rows, format, |row| {
        format!(
            "{:<22} {:>10} {:>12} {:>12} {:>16} {:>16}",
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            display(row.delta_time),
            display(row.consumption),
            display(row.generation),
            display(row.consumption_joules),
            display(row.generation_joules)
        )
    })
}

fn print_serializable<T, F>(items: &[T], format: Format, line: F) -> Result<()>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    match format {
        Format::Table => {
            for item in items {
                println!("{}", line(item));
            }
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for item in items {
                writer.serialize(item).context("Failed to write CSV row")?;
            }
            writer.flush().context("Failed to flush CSV output")?;
        }
    }
    Ok(())
}

fn display(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"))
}
