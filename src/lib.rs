#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

// The engine
pub mod engine;

// Re-export commonly used types
pub use analysis::{generate_forecast, generate_forecast_with, validate_inputs};
pub use config::{AccumulationPolicy, ForecastSettings, TrajectoryCurve};
pub use data::{ParsedRecords, export_report, load_history, load_keywords};
pub use domain::{EffortLevel, HistoricalPoint, KeywordRecord, RunParameters};
pub use engine::{ForecastEngine, ForecastRequest, ScenarioResult};
pub use errors::{ForecastError, ForecastResult};
pub use models::{ForecastPoint, ForecastReport, ForecastSummary, KeywordImpact, TierValues};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{CSV_EXTENSION, FORECAST, forecast_export_filename};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Forecast organic traffic from keyword ranking targets", long_about = None)]
pub struct Cli {
    /// Keyword file (.csv, .xlsx/.xls or .json)
    #[arg(long, short = 'k')]
    pub keywords: PathBuf,

    /// Historical traffic file (.csv, .xlsx/.xls or .json); last row is the current baseline
    #[arg(long)]
    pub historical: Option<PathBuf>,

    /// Forecast horizon in months (over 36 is allowed with a warning)
    #[arg(
        long,
        short = 'm',
        default_value_t = 12,
        value_parser = clap::value_parser!(u32).range(0..=FORECAST.validation.cli_max_timeline_months as i64)
    )]
    pub months: u32,

    #[arg(long, short = 'e', value_enum, default_value_t = EffortLevel::Medium)]
    pub effort: EffortLevel,

    /// Project revenue at this value per conversion
    #[arg(long)]
    pub revenue_per_conversion: Option<f64>,

    #[arg(long, value_enum, default_value_t = FORECAST.accumulation)]
    pub policy: AccumulationPolicy,

    #[arg(long, value_enum, default_value_t = FORECAST.trajectory.curve)]
    pub curve: TrajectoryCurve,

    /// Write the forecast here; .csv for the monthly table, .json for the full report.
    /// A directory gets a default CSV filename.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Run low, medium and high effort side by side
    #[arg(long, default_value_t = false)]
    pub scenarios: bool,

    /// Show the per-keyword contribution table
    #[arg(long, default_value_t = false)]
    pub show_impact: bool,
}

impl Cli {
    pub fn settings(&self) -> ForecastSettings {
        ForecastSettings::default()
            .with_accumulation(self.policy)
            .with_curve(self.curve)
    }

    pub fn parameters(&self) -> RunParameters {
        RunParameters::new(self.months, self.effort)
    }

    /// Where to export, resolving a directory to the default filename
    pub fn export_path(&self) -> Option<PathBuf> {
        self.export.as_ref().map(|path| {
            if path.is_dir() {
                path.join(forecast_export_filename(self.months, CSV_EXTENSION))
            } else {
                path.clone()
            }
        })
    }
}

fn report_rejections(path: &Path, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("{}: {} row(s) skipped", path.display(), errors.len());
    for error in errors {
        eprintln!("  {}", error);
    }
}

/// Load the inputs named on the command line into a request.
pub fn build_request(args: &Cli) -> Result<ForecastRequest> {
    // 1. Keywords
    let keywords = load_keywords(&args.keywords)
        .with_context(|| format!("Failed to load keywords from {:?}", args.keywords))?;
    report_rejections(&args.keywords, &keywords.errors);

    // 2. History (optional)
    let history = match &args.historical {
        Some(path) => {
            let history = load_history(path)
                .with_context(|| format!("Failed to load history from {:?}", path))?;
            report_rejections(path, &history.errors);
            history.data
        }
        None => Vec::new(),
    };

    Ok(
        ForecastRequest::new(keywords.data, history, args.parameters())
            .with_revenue_per_conversion(args.revenue_per_conversion),
    )
}

/// Main CLI entry point. Prints the forecast (or effort scenarios) to stdout and
/// exports if asked. Validation failures come back as `ForecastError::Validation`.
pub fn run_cli(args: &Cli) -> Result<()> {
    let request = build_request(args)?;
    let engine = ForecastEngine::new(args.settings());

    if args.scenarios {
        let results = engine.run_effort_scenarios(&request)?;
        println!("{}", ui::render_scenarios(&results));
        return Ok(());
    }

    let report = engine.run(&request)?;
    println!("{}", ui::render_report(&report, args.show_impact));

    if let Some(path) = args.export_path() {
        export_report(&report, &path)
            .with_context(|| format!("Failed to export forecast to {:?}", path))?;
        println!("Forecast written to {}", path.display());
    }

    Ok(())
}
