// Output models produced by the forecasting engine.
// Plain data: renderers and exporters consume these verbatim.

pub mod forecast_point;
pub mod report;

// Re-export key types for convenience
pub use forecast_point::{ForecastPoint, TierValues};
pub use report::{ForecastReport, ForecastSummary, KeywordImpact};
