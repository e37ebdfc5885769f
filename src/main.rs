use std::process::ExitCode;

use clap::Parser;
use seo_forecaster::{Cli, ForecastError, run_cli};

fn main() -> ExitCode {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Run
    match run_cli(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ForecastError>().and_then(|fe| fe.validation_errors()) {
                Some(errors) => {
                    log::error!("Forecast aborted: {} fatal validation issue(s)", errors.len());
                    eprintln!("Input is not valid for forecasting:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                }
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}
