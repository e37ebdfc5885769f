//! Forecast error types

use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

/// Errors that can occur while validating, forecasting, ingesting or exporting.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Input failed validation; carries every fatal message in order
    #[error("Validation failed: {}", join_messages(.errors))]
    Validation { errors: Vec<String> },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to process CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to process JSON {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read spreadsheet {}: {source}", .path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("{} is {size} bytes, above the {limit} byte input limit", .path.display())]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Unsupported file format for {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Tier multipliers that would put conservative above expected or optimistic below it
    #[error(
        "Invalid tier multipliers: conservative {conservative} must be in [0, 1) and optimistic {optimistic} at least 1"
    )]
    InvalidTierPolicy { conservative: f64, optimistic: f64 },

    #[error("Nothing to export: the forecast is empty")]
    EmptyForecast,
}

impl ForecastError {
    /// The validator's messages when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            ForecastError::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

fn join_messages(errors: &[String]) -> String {
    errors.iter().join(", ")
}

pub type ForecastResult<T> = std::result::Result<T, ForecastError>;
