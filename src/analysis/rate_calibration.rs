use crate::config::FORECAST;
use crate::domain::HistoricalPoint;
use crate::utils::clamp_f64;

/// Baseline conversion rate from history: total conversions / total sessions,
/// clamped into the configured band. Falls back to the default rate when there
/// is no history or no sessions at all.
pub fn calibrate_conversion_rate(history: &[HistoricalPoint]) -> f64 {
    let calibration = &FORECAST.calibration;
    if history.is_empty() {
        return calibration.default_rate;
    }

    // Negative values are rejected by validation; count them as zero here
    let total_sessions: u64 = history.iter().map(|p| p.sessions.max(0) as u64).sum();
    let total_conversions: u64 = history.iter().map(|p| p.conversions.max(0) as u64).sum();

    if total_sessions == 0 {
        return calibration.default_rate;
    }

    let rate = total_conversions as f64 / total_sessions as f64;
    clamp_f64(rate, calibration.min_rate, calibration.max_rate)
}
