// Forecasting core: validation, calibration, trajectory/CTR model and accumulation
pub mod accumulator;
pub mod caveats;
pub mod ctr_curve;
pub mod keyword_impact;
pub mod methodology;
pub mod rate_calibration;
pub mod trajectory;
pub mod validation;

// Re-export commonly used items
pub use accumulator::{TierMultipliers, generate_forecast, generate_forecast_with};
pub use caveats::generate_caveats;
pub use ctr_curve::{ctr_at, ctr_with_override};
pub use keyword_impact::keyword_impact;
pub use methodology::methodology_text;
pub use rate_calibration::calibrate_conversion_rate;
pub use trajectory::{decay_fraction, keyword_trajectory, project_position};
pub use validation::{Severity, ValidationIssue, ValidationReport, validate_inputs};
