//! Configuration module for the forecaster.

pub mod forecast;

mod debug; // Private: files use crate::config::DEBUG_FLAGS, not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod demo;
pub mod export;

// Re-export commonly used items
pub use demo::DEMO;
pub use export::{CSV_EXTENSION, JSON_EXTENSION, forecast_export_filename};
pub use forecast::{
    AccumulationPolicy, FORECAST, ForecastConfig, ForecastSettings, INDUSTRY_CTR_CURVE,
    TierPolicy, TrajectoryCurve,
};
