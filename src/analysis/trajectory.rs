//! Month-by-month ranking trajectory for a keyword.

use crate::config::{DEBUG_FLAGS, FORECAST, TrajectoryCurve};
use crate::domain::{EffortLevel, KeywordRecord, RunParameters};

/// Fraction of the remaining gap closed at `progress` (0..=1) along the horizon.
/// Approaches 1 asymptotically; ~0.95 at progress 1.
pub fn decay_fraction(progress: f64, curve: TrajectoryCurve) -> f64 {
    let trajectory = &FORECAST.trajectory;
    let progress = match curve {
        TrajectoryCurve::Accelerated => progress.powf(trajectory.acceleration_exponent),
        TrajectoryCurve::Plain => progress,
    };
    1.0 - (-trajectory.decay_rate * progress).exp()
}

/// Projected position at `month_index` (1-based) of `total_months`.
///
/// Already at or better than target: frozen at `current_position`.
/// Otherwise: never better than `target_position`, never worse than `current_position`.
pub fn project_position(
    current_position: i32,
    target_position: i32,
    month_index: u32,
    total_months: u32,
    effort: EffortLevel,
    curve: TrajectoryCurve,
) -> i32 {
    let gap = current_position - target_position;
    if gap <= 0 || total_months == 0 {
        return current_position;
    }

    let progress = month_index as f64 / total_months as f64;
    let improvement = gap as f64 * decay_fraction(progress, curve) * effort.multiplier();
    let projected = (current_position as f64 - improvement).round() as i32;

    projected.clamp(target_position, current_position)
}

/// Positions for months 1..=timeline_months.
pub fn keyword_trajectory(
    keyword: &KeywordRecord,
    parameters: &RunParameters,
    curve: TrajectoryCurve,
) -> Vec<i32> {
    let positions: Vec<i32> = (1..=parameters.timeline_months)
        .map(|month| {
            project_position(
                keyword.current_position,
                keyword.target_position,
                month,
                parameters.timeline_months,
                parameters.effort_level,
                curve,
            )
        })
        .collect();

    if cfg!(debug_assertions) && DEBUG_FLAGS.print_trajectory {
        log::debug!("Trajectory for {}: {:?}", keyword, positions);
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const CURVES: [TrajectoryCurve; 2] = [TrajectoryCurve::Accelerated, TrajectoryCurve::Plain];

    #[test]
    fn test_decay_fraction_shape() {
        for curve in CURVES {
            assert_eq!(decay_fraction(0.0, curve), 0.0);
            let at_end = decay_fraction(1.0, curve);
            assert!((at_end - 0.950_212_9).abs() < 1e-6);
        }
        // Accelerated pulls gains forward
        assert!(
            decay_fraction(0.25, TrajectoryCurve::Accelerated)
                > decay_fraction(0.25, TrajectoryCurve::Plain)
        );
    }

    #[test]
    fn test_frozen_when_at_or_above_target() {
        for effort in EffortLevel::iter() {
            for month in 1..=12 {
                assert_eq!(
                    project_position(3, 5, month, 12, effort, TrajectoryCurve::Accelerated),
                    3
                );
                assert_eq!(
                    project_position(7, 7, month, 12, effort, TrajectoryCurve::Plain),
                    7
                );
            }
        }
    }

    #[test]
    fn test_non_worsening_and_bounded() {
        for curve in CURVES {
            for effort in EffortLevel::iter() {
                for (current, target) in [(10, 1), (100, 1), (45, 12), (21, 20)] {
                    let mut previous = current;
                    for month in 1..=24 {
                        let position = project_position(current, target, month, 24, effort, curve);
                        assert!(position <= previous, "position regressed at month {}", month);
                        assert!(position >= target, "overshot target at month {}", month);
                        assert!(position <= current);
                        previous = position;
                    }
                }
            }
        }
    }

    #[test]
    fn test_reaches_target_at_end_of_horizon() {
        // medium closes ~95% of the gap, rounding finishes it for small gaps
        assert_eq!(
            project_position(10, 1, 12, 12, EffortLevel::Medium, TrajectoryCurve::Accelerated),
            1
        );
        assert_eq!(
            project_position(10, 1, 12, 12, EffortLevel::Medium, TrajectoryCurve::Plain),
            1
        );
        // high effort overshoots in raw terms and is clamped
        assert_eq!(
            project_position(60, 5, 12, 12, EffortLevel::High, TrajectoryCurve::Plain),
            5
        );
    }

    #[test]
    fn test_known_values() {
        // diff 9, progress 1/12: accelerated decay ~0.4094 -> 10 - 3.68 = 6.32 -> 6
        assert_eq!(
            project_position(10, 1, 1, 12, EffortLevel::Medium, TrajectoryCurve::Accelerated),
            6
        );
        // plain decay ~0.2212 -> 10 - 1.99 = 8.01 -> 8
        assert_eq!(
            project_position(10, 1, 1, 12, EffortLevel::Medium, TrajectoryCurve::Plain),
            8
        );
        // low effort never closes the whole gap: 10 - 9 * 0.9502 * 0.6 = 4.87 -> 5
        assert_eq!(
            project_position(10, 1, 12, 12, EffortLevel::Low, TrajectoryCurve::Accelerated),
            5
        );
    }

    #[test]
    fn test_keyword_trajectory_length() {
        let keyword = KeywordRecord::new("shoes", 30, 4, 500);
        let parameters = RunParameters::new(9, EffortLevel::High);
        let positions = keyword_trajectory(&keyword, &parameters, TrajectoryCurve::Accelerated);
        assert_eq!(positions.len(), 9);
        assert!(positions.windows(2).all(|w| w[1] <= w[0]));
    }
}
