use seo_forecaster::analysis::{calibrate_conversion_rate, ctr_at, project_position};
use seo_forecaster::config::TrajectoryCurve;
use seo_forecaster::{
    EffortLevel, ForecastEngine, ForecastError, ForecastRequest, ForecastSettings,
    HistoricalPoint, KeywordRecord, RunParameters, generate_forecast, validate_inputs,
};
use strum::IntoEnumIterator;

const CURVES: [TrajectoryCurve; 2] = [TrajectoryCurve::Accelerated, TrajectoryCurve::Plain];

#[test]
fn position_frozen_when_not_behind_target() {
    for curve in CURVES {
        for effort in EffortLevel::iter() {
            for (current, target) in [(1, 1), (4, 9), (50, 50), (2, 100)] {
                for month in 1..=18 {
                    assert_eq!(
                        project_position(current, target, month, 18, effort, curve),
                        current
                    );
                }
            }
        }
    }
}

#[test]
fn position_improves_monotonically_and_stops_at_target() {
    for curve in CURVES {
        for effort in EffortLevel::iter() {
            for current in 2..=100 {
                let target = (current / 3).max(1);
                let mut previous = current;
                for month in 1..=12 {
                    let position = project_position(current, target, month, 12, effort, curve);
                    assert!(position <= previous);
                    assert!(position >= target);
                    previous = position;
                }
            }
        }
    }
}

#[test]
fn ctr_strictly_decreasing_and_continuous() {
    for position in 1..20 {
        assert!(ctr_at(position) > ctr_at(position + 1));
    }
    assert!((ctr_at(20) - ctr_at(21)).abs() < 0.001);
    assert!((ctr_at(50) - ctr_at(51)).abs() < 0.002);
    for position in 21..150 {
        assert!(ctr_at(position) > 0.0);
    }
}

#[test]
fn rate_calibration_examples() {
    let history = vec![HistoricalPoint::new("2024-06", 10_000, 150)];
    assert!((calibrate_conversion_rate(&history) - 0.015).abs() < 1e-12);
    assert_eq!(calibrate_conversion_rate(&[]), 0.02);
    let implausible = vec![HistoricalPoint::new("2024-06", 100, 90)];
    assert_eq!(calibrate_conversion_rate(&implausible), 0.5);
}

#[test]
fn validator_missing_history_is_advisory() {
    let keywords = vec![KeywordRecord::new("shoes", 5, 3, 1_000)];
    let report = validate_inputs(&keywords, &[], &RunParameters::new(12, EffortLevel::Medium));
    assert!(report.valid);
    assert_eq!(
        report.errors,
        vec!["no historical data provided - default conversion rate will be used".to_string()]
    );
}

#[test]
fn single_keyword_twelve_months() {
    let keywords = vec![KeywordRecord::new("running shoes", 10, 1, 10_000)];
    let points = generate_forecast(
        &keywords,
        &[],
        &RunParameters::new(12, EffortLevel::Medium),
        None,
    )
    .unwrap();

    assert_eq!(points.len(), 12);
    assert!(points[11].sessions.expected > points[0].sessions.expected);
    for (idx, point) in points.iter().enumerate() {
        assert_eq!(point.month as usize, idx + 1);
        assert!(point.sessions.conservative <= point.sessions.expected);
        assert!(point.sessions.expected <= point.sessions.optimistic);
        assert!(point.revenue.is_none());
    }
}

#[test]
fn fatal_input_yields_no_rows() {
    let keywords = vec![
        KeywordRecord::new("shoes", 101, 3, 1_000),
        KeywordRecord::new("boots", 8, 3, -10),
    ];
    let result = generate_forecast(&keywords, &[], &RunParameters::new(0, EffortLevel::Low), None);
    match result {
        Err(ForecastError::Validation { errors }) => {
            // advisory "no history" is not part of the failure
            assert_eq!(errors.len(), 3);
            assert!(errors.iter().all(|e| !e.starts_with("no historical data")));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn identical_requests_serialize_identically() {
    let request = ForecastRequest::new(
        vec![
            KeywordRecord::new("running shoes", 14, 3, 22_000),
            KeywordRecord::new("trail shoes", 9, 2, 6_600).with_custom_ctr(0.04),
        ],
        vec![
            HistoricalPoint::new("2024-05", 13_330, 251),
            HistoricalPoint::new("2024-06", 13_980, 262),
        ],
        RunParameters::new(24, EffortLevel::High),
    )
    .with_revenue_per_conversion(Some(85.0));

    let engine = ForecastEngine::new(ForecastSettings::default());
    let first = serde_json::to_vec(&engine.run(&request).unwrap()).unwrap();
    let second = serde_json::to_vec(&engine.run(&request).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn scenarios_ordered_by_effort() {
    let request = ForecastRequest::new(
        vec![KeywordRecord::new("running shoes", 30, 2, 8_000)],
        vec![HistoricalPoint::new("2024-06", 2_000, 40)],
        RunParameters::new(6, EffortLevel::Medium),
    );
    let results = ForecastEngine::default().run_effort_scenarios(&request).unwrap();

    let levels: Vec<EffortLevel> = results.iter().map(|r| r.effort_level).collect();
    assert_eq!(levels, vec![EffortLevel::Low, EffortLevel::Medium, EffortLevel::High]);

    let totals: Vec<u64> = results
        .iter()
        .map(|r| r.report.summary.total_expected_sessions)
        .collect();
    assert!(totals[0] <= totals[1] && totals[1] <= totals[2]);
}
