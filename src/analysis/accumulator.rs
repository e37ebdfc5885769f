//! Month-by-month accumulation of keyword traffic into tiered projections.

use crate::analysis::ctr_curve::{ctr_at, ctr_with_override};
use crate::analysis::rate_calibration::calibrate_conversion_rate;
use crate::analysis::trajectory::keyword_trajectory;
use crate::analysis::validation::validate_inputs;
use crate::config::{AccumulationPolicy, DEBUG_FLAGS, ForecastSettings, TierPolicy};
use crate::domain::{HistoricalPoint, KeywordRecord, RunParameters, latest_sessions};
use crate::errors::{ForecastError, ForecastResult};
use crate::models::{ForecastPoint, TierValues};
use crate::utils::round_to_u64;

/// Conservative and optimistic multipliers for a horizon. Expected is always 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierMultipliers {
    pub conservative: f64,
    pub optimistic: f64,
}

impl TierMultipliers {
    pub fn for_policy(policy: &TierPolicy, timeline_months: u32) -> Self {
        match *policy {
            TierPolicy::Fixed {
                conservative,
                optimistic,
            } => TierMultipliers {
                conservative,
                optimistic,
            },
            TierPolicy::WidenWithTimeline {
                base_conservative,
                base_optimistic,
                optimistic_spread,
                reference_months,
                max_risk,
            } => {
                let timeline_risk = (timeline_months as f64 / reference_months).min(max_risk);
                TierMultipliers {
                    conservative: base_conservative * timeline_risk,
                    optimistic: base_optimistic + optimistic_spread * timeline_risk,
                }
            }
        }
    }

    /// Tiers stay ordered around expected: `0 <= conservative < 1 <= optimistic`.
    pub fn is_ordered(&self) -> bool {
        (0.0..1.0).contains(&self.conservative) && self.optimistic >= 1.0
    }
}

/// CTR used for a keyword under the given policy. Custom CTR only counts
/// for absolute sums: incremental deltas need the curve on both sides.
pub fn keyword_ctr(policy: AccumulationPolicy, keyword: &KeywordRecord, position: i32) -> f64 {
    match policy {
        AccumulationPolicy::IncrementalOnBaseline => ctr_at(position),
        AccumulationPolicy::AbsolutePositionSum => ctr_with_override(position, keyword.custom_ctr),
    }
}

/// Forecast with the default settings.
pub fn generate_forecast(
    keywords: &[KeywordRecord],
    history: &[HistoricalPoint],
    parameters: &RunParameters,
    revenue_per_conversion: Option<f64>,
) -> ForecastResult<Vec<ForecastPoint>> {
    generate_forecast_with(
        &ForecastSettings::default(),
        keywords,
        history,
        parameters,
        revenue_per_conversion,
    )
}

/// Validate, then produce one point per month. Any fatal issue fails the whole
/// run with no partial output.
pub fn generate_forecast_with(
    settings: &ForecastSettings,
    keywords: &[KeywordRecord],
    history: &[HistoricalPoint],
    parameters: &RunParameters,
    revenue_per_conversion: Option<f64>,
) -> ForecastResult<Vec<ForecastPoint>> {
    let multipliers = TierMultipliers::for_policy(&settings.tiers, parameters.timeline_months);
    if !multipliers.is_ordered() {
        return Err(ForecastError::InvalidTierPolicy {
            conservative: multipliers.conservative,
            optimistic: multipliers.optimistic,
        });
    }

    let validation = validate_inputs(keywords, history, parameters);
    if !validation.valid {
        return Err(ForecastError::Validation {
            errors: validation.fatal_errors(),
        });
    }

    let conversion_rate = calibrate_conversion_rate(history);
    let expected_sessions = expected_sessions_by_month(settings, keywords, history, parameters);
    let revenue_per_conversion = revenue_per_conversion.filter(|r| r.is_finite() && *r > 0.0);

    let points = expected_sessions
        .iter()
        .enumerate()
        .map(|(idx, &expected)| {
            build_point(
                idx as u32 + 1,
                expected,
                &multipliers,
                conversion_rate,
                revenue_per_conversion,
            )
        })
        .collect();

    Ok(points)
}

/// Unrounded expected sessions for months 1..=timeline_months.
pub fn expected_sessions_by_month(
    settings: &ForecastSettings,
    keywords: &[KeywordRecord],
    history: &[HistoricalPoint],
    parameters: &RunParameters,
) -> Vec<f64> {
    // 1. Project every keyword's position for the whole horizon once
    let trajectories: Vec<Vec<i32>> = keywords
        .iter()
        .map(|keyword| keyword_trajectory(keyword, parameters, settings.curve))
        .collect();

    // 2. Accumulate per policy
    let sessions = match settings.accumulation {
        AccumulationPolicy::IncrementalOnBaseline => {
            accumulate_incremental(keywords, &trajectories, latest_sessions(history).max(0) as f64)
        }
        AccumulationPolicy::AbsolutePositionSum => accumulate_absolute(keywords, &trajectories),
    };

    if cfg!(debug_assertions) && DEBUG_FLAGS.print_accumulation {
        for (idx, expected) in sessions.iter().enumerate() {
            log::debug!("Month {:>2}: expected sessions {:.2}", idx + 1, expected);
        }
    }

    sessions
}

/// Running baseline: each month adds `volume * (CTR now - CTR last month)` per keyword.
fn accumulate_incremental(
    keywords: &[KeywordRecord],
    trajectories: &[Vec<i32>],
    baseline_sessions: f64,
) -> Vec<f64> {
    let months = trajectories.first().map(Vec::len).unwrap_or(0);
    let policy = AccumulationPolicy::IncrementalOnBaseline;
    let mut cumulative_baseline = baseline_sessions;
    let mut sessions = Vec::with_capacity(months);

    for month_idx in 0..months {
        let mut monthly_growth = 0.0;
        for (keyword, positions) in keywords.iter().zip(trajectories) {
            let this_month = positions[month_idx];
            let previous_month = if month_idx == 0 {
                keyword.current_position
            } else {
                positions[month_idx - 1]
            };
            let lift = keyword_ctr(policy, keyword, this_month)
                - keyword_ctr(policy, keyword, previous_month);
            monthly_growth += keyword.search_volume as f64 * lift;
        }
        cumulative_baseline += monthly_growth;
        sessions.push(cumulative_baseline);
    }

    sessions
}

/// Independent months: `volume * CTR(position)` summed over keywords.
fn accumulate_absolute(keywords: &[KeywordRecord], trajectories: &[Vec<i32>]) -> Vec<f64> {
    let months = trajectories.first().map(Vec::len).unwrap_or(0);
    let policy = AccumulationPolicy::AbsolutePositionSum;

    (0..months)
        .map(|month_idx| {
            keywords
                .iter()
                .zip(trajectories)
                .map(|(keyword, positions)| {
                    keyword.search_volume as f64 * keyword_ctr(policy, keyword, positions[month_idx])
                })
                .sum()
        })
        .collect()
}

/// Derive all three tiers from the single expected figure and round once, here.
fn build_point(
    month: u32,
    expected_sessions: f64,
    multipliers: &TierMultipliers,
    conversion_rate: f64,
    revenue_per_conversion: Option<f64>,
) -> ForecastPoint {
    let tier_sessions = [
        expected_sessions * multipliers.conservative,
        expected_sessions,
        expected_sessions * multipliers.optimistic,
    ];

    let sessions = tier_values(tier_sessions.map(round_to_u64));
    let conversions = tier_values(tier_sessions.map(|s| round_to_u64(s * conversion_rate)));
    let revenue = revenue_per_conversion.map(|per_conversion| TierValues {
        conservative: round_to_u64(conversions.conservative as f64 * per_conversion),
        expected: round_to_u64(conversions.expected as f64 * per_conversion),
        optimistic: round_to_u64(conversions.optimistic as f64 * per_conversion),
    });

    ForecastPoint {
        month,
        sessions,
        conversions,
        revenue,
    }
}

fn tier_values([conservative, expected, optimistic]: [u64; 3]) -> TierValues {
    TierValues::new(conservative, expected, optimistic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrajectoryCurve;
    use crate::domain::EffortLevel;

    fn single_keyword() -> Vec<KeywordRecord> {
        vec![KeywordRecord::new("shoes", 10, 1, 10_000)]
    }

    fn params(months: u32) -> RunParameters {
        RunParameters::new(months, EffortLevel::Medium)
    }

    #[test]
    fn test_widening_multipliers() {
        let policy = ForecastSettings::default().tiers;
        let twelve = TierMultipliers::for_policy(&policy, 12);
        assert!((twelve.conservative - 0.6).abs() < 1e-12);
        assert!((twelve.optimistic - 1.6).abs() < 1e-12);

        // capped at 1.5x risk
        let long = TierMultipliers::for_policy(&policy, 48);
        assert!((long.conservative - 0.9).abs() < 1e-12);
        assert!((long.optimistic - 1.7).abs() < 1e-12);

        let short = TierMultipliers::for_policy(&policy, 3);
        assert!((short.conservative - 0.15).abs() < 1e-12);
        assert!(short.conservative < 1.0 && short.optimistic >= 1.0);
    }

    #[test]
    fn test_fixed_multipliers_ignore_horizon() {
        let policy = TierPolicy::Fixed {
            conservative: 0.7,
            optimistic: 1.3,
        };
        assert_eq!(
            TierMultipliers::for_policy(&policy, 3),
            TierMultipliers::for_policy(&policy, 30)
        );
    }

    #[test]
    fn test_default_multipliers_ordered_for_every_horizon() {
        let policy = ForecastSettings::default().tiers;
        for months in 1..=120 {
            assert!(TierMultipliers::for_policy(&policy, months).is_ordered());
        }
    }

    #[test]
    fn test_misordered_fixed_tiers_rejected() {
        let settings = ForecastSettings::default().with_tiers(TierPolicy::Fixed {
            conservative: 1.2,
            optimistic: 0.8,
        });
        let err = generate_forecast_with(&settings, &single_keyword(), &[], &params(12), None)
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidTierPolicy { .. }));

        let nan = ForecastSettings::default().with_tiers(TierPolicy::Fixed {
            conservative: f64::NAN,
            optimistic: 1.3,
        });
        assert!(generate_forecast_with(&nan, &single_keyword(), &[], &params(12), None).is_err());
    }

    #[test]
    fn test_end_to_end_single_keyword() {
        let points = generate_forecast(&single_keyword(), &[], &params(12), None).unwrap();
        assert_eq!(points.len(), 12);
        assert_eq!(points[0].month, 1);
        assert_eq!(points[11].month, 12);
        assert!(points[11].sessions.expected > points[0].sessions.expected);
        for point in &points {
            assert!(point.sessions.is_ordered());
            assert!(point.conversions.is_ordered());
            assert!(point.revenue.is_none());
        }
    }

    #[test]
    fn test_incremental_known_values() {
        // No history: month 1 moves 10 -> 6, month 12 lands on 1
        let points = generate_forecast(&single_keyword(), &[], &params(12), None).unwrap();
        // 10000 * (0.051 - 0.029) = 220
        assert_eq!(points[0].sessions.expected, 220);
        // 10000 * (0.316 - 0.029) = 2870
        assert_eq!(points[11].sessions.expected, 2_870);
        assert_eq!(points[11].sessions.conservative, 1_722);
        assert_eq!(points[11].sessions.optimistic, 4_592);
        // default 2% rate
        assert_eq!(points[11].conversions.expected, 57);
    }

    #[test]
    fn test_incremental_builds_on_latest_baseline() {
        let history = vec![
            HistoricalPoint::new("2024-01", 1_000, 10),
            HistoricalPoint::new("2024-02", 5_000, 40),
        ];
        let keywords = vec![KeywordRecord::new("done", 3, 3, 50_000)];
        let points = generate_forecast(&keywords, &history, &params(6), None).unwrap();
        // Nothing to climb: flat at the latest baseline
        assert!(points.iter().all(|p| p.sessions.expected == 5_000));
        // 50 / 6000
        let rate: f64 = 50.0 / 6_000.0;
        assert_eq!(points[0].conversions.expected, (5_000.0 * rate).round() as u64);
    }

    #[test]
    fn test_absolute_sum_honours_custom_ctr() {
        let settings = ForecastSettings::default()
            .with_accumulation(AccumulationPolicy::AbsolutePositionSum)
            .with_curve(TrajectoryCurve::Plain);
        let keywords = vec![KeywordRecord::new("shoes", 10, 1, 10_000).with_custom_ctr(0.1)];
        let history = vec![HistoricalPoint::new("2024-01", 99_999, 100)];
        let points = generate_forecast_with(&settings, &keywords, &history, &params(6), None).unwrap();
        // No baseline folded in, custom CTR flat across months
        assert!(points.iter().all(|p| p.sessions.expected == 1_000));
    }

    #[test]
    fn test_absolute_sum_uses_curve_without_custom_ctr() {
        let settings = ForecastSettings::default()
            .with_accumulation(AccumulationPolicy::AbsolutePositionSum)
            .with_curve(TrajectoryCurve::Plain);
        let points =
            generate_forecast_with(&settings, &single_keyword(), &[], &params(12), None).unwrap();
        // month 1 plain curve: position 8 -> 10000 * 0.038
        assert_eq!(points[0].sessions.expected, 380);
        assert_eq!(points[11].sessions.expected, 3_160);
    }

    #[test]
    fn test_revenue_only_when_positive() {
        let with_revenue =
            generate_forecast(&single_keyword(), &[], &params(12), Some(50.0)).unwrap();
        let last = &with_revenue[11];
        let revenue = last.revenue.unwrap();
        assert_eq!(revenue.expected, last.conversions.expected * 50);
        assert_eq!(revenue.conservative, last.conversions.conservative * 50);

        let zero = generate_forecast(&single_keyword(), &[], &params(12), Some(0.0)).unwrap();
        assert!(zero.iter().all(|p| p.revenue.is_none()));
    }

    #[test]
    fn test_fatal_validation_fails_without_output() {
        let keywords = vec![KeywordRecord::new("shoes", 0, 1, 100)];
        let err = generate_forecast(&keywords, &[], &params(12), None).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("current position"));
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let keywords = vec![
            KeywordRecord::new("shoes", 10, 1, 10_000),
            KeywordRecord::new("boots", 48, 7, 2_300),
        ];
        let history = vec![HistoricalPoint::new("2024-01", 8_000, 120)];
        let first = generate_forecast(&keywords, &history, &params(18), Some(35.5)).unwrap();
        let second = generate_forecast(&keywords, &history, &params(18), Some(35.5)).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
