//! Dashboard command
//!
//! Prints the dashboard as a table or exports it as JSON, YAML or CSV.

use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::format_dashboard;
use crate::error::{BunkerError, BunkerResult};
use crate::export::{export_dashboard_json, export_dashboard_yaml, export_envelopes_csv};
use crate::services::DashboardService;
use crate::store::TabularStore;

use super::parse_date;

/// Output format of the dashboard command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DashboardFormat {
    /// Terminal tables
    Table,
    /// Full dashboard as JSON
    Json,
    /// Full dashboard as YAML
    Yaml,
    /// One line per envelope
    Csv,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: DashboardFormat,

    /// Compute the dashboard as of this date (YYYY-MM-DD), defaults to today
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the dashboard command
pub fn handle_dashboard_command(
    store: &dyn TabularStore,
    settings: &Settings,
    args: DashboardArgs,
) -> BunkerResult<()> {
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let view = DashboardService::new(store, settings).build(today)?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BunkerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        DashboardFormat::Table => {
            write!(writer, "{}", format_dashboard(&view, settings))?;
        }
        DashboardFormat::Json => export_dashboard_json(&view, today, &mut writer, args.pretty)?,
        DashboardFormat::Yaml => export_dashboard_yaml(&view, today, &mut writer)?,
        DashboardFormat::Csv => export_envelopes_csv(&view, &mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        println!("Dashboard exported to: {}", path.display());
    }

    Ok(())
}
