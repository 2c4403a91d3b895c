//! aim-report CLI - formats an AiM work-order export for floor-by-floor inspection

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use aim_report_core::{ReportConfig, ReportPipeline};
use aim_report_csv::{CsvReadOptions, CsvReader};
use aim_report_xlsx::{RenderOptions, ReportWriter};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aim-report")]
#[command(
    author,
    version,
    about = "Sort work orders by building, floor and room and save a formatted workbook"
)]
struct Cli {
    /// Work-order export (CSV)
    csv_path: PathBuf,

    /// Output workbook (default: timestamped file next to the CSV)
    output: Option<PathBuf>,

    /// JSON file overriding the default report configuration
    #[arg(short, long, value_name = "FILE.json")]
    config: Option<PathBuf>,

    /// Date ages are measured against (default: today, UTC)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_day)]
    today: Option<NaiveDate>,

    /// Leave out the Dashboard sheet
    #[arg(long)]
    no_dashboard: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = run(cli)?;
    println!("Saved formatted workbook to {}", output.display());
    Ok(())
}

fn run(cli: Cli) -> Result<PathBuf> {
    if !cli.csv_path.is_file() {
        bail!("CSV file not found: {}", cli.csv_path.display());
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ReportConfig::default(),
    };
    let pipeline = ReportPipeline::new(config).context("Invalid report configuration")?;

    let batch = CsvReader::read_file(&cli.csv_path, &CsvReadOptions::default())
        .with_context(|| format!("Failed to read '{}'", cli.csv_path.display()))?;

    let today = cli.today.unwrap_or_else(|| Utc::now().date_naive());
    let report = pipeline
        .run(batch, today)
        .with_context(|| format!("Failed to prepare '{}'", cli.csv_path.display()))?;

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.csv_path, &Local::now()));

    let mut options = RenderOptions::default();
    if cli.no_dashboard {
        options.dashboard_sheet_name = None;
    }
    ReportWriter::new(options)
        .write_file(&report, &output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    Ok(output)
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: &Path) -> Result<ReportConfig> {
    let file =
        File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    let config: ReportConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// `<csv dir>/<YYYYmmdd_HHMMSS>_aim_report.xlsx`
fn default_output_path<Tz: TimeZone>(csv_path: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let name = format!("{}_aim_report.xlsx", now.format("%Y%m%d_%H%M%S"));
    match csv_path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn parse_day(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
