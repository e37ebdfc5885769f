use serde::{Deserialize, Serialize};

use crate::config::{AccumulationPolicy, ForecastSettings};
use crate::domain::RunParameters;
use crate::models::forecast_point::ForecastPoint;

/// How much of the final-month uplift a keyword is responsible for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordImpact {
    pub keyword: String,
    pub current_position: i32,
    pub forecast_position: i32,
    pub search_volume: i64,
    pub estimated_monthly_sessions: u64,
    pub contribution_percentage: f64,
}

/// Horizon totals shown alongside the monthly table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub total_expected_sessions: u64,
    pub total_expected_conversions: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_expected_revenue: Option<u64>,
    pub final_month_expected_sessions: u64,
    /// Final month expected sessions minus the historical baseline (saturating at 0)
    pub uplift_over_baseline: u64,
}

impl ForecastSummary {
    pub fn from_points(points: &[ForecastPoint], baseline_sessions: u64) -> Self {
        let total_expected_sessions = points.iter().map(|p| p.sessions.expected).sum();
        let total_expected_conversions = points.iter().map(|p| p.conversions.expected).sum();
        let total_expected_revenue = points
            .iter()
            .map(|p| p.revenue.map(|r| r.expected))
            .sum::<Option<u64>>();
        let final_month_expected_sessions =
            points.last().map(|p| p.sessions.expected).unwrap_or(0);

        ForecastSummary {
            total_expected_sessions,
            total_expected_conversions,
            total_expected_revenue,
            final_month_expected_sessions,
            uplift_over_baseline: final_month_expected_sessions.saturating_sub(baseline_sessions),
        }
    }
}

/// Everything a renderer or exporter needs for one run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub parameters: RunParameters,
    pub settings: ForecastSettings,
    pub conversion_rate: f64,
    pub baseline_sessions: u64,
    pub points: Vec<ForecastPoint>,
    pub summary: ForecastSummary,
    pub keyword_impact: Vec<KeywordImpact>,
    pub caveats: Vec<String>,
    pub methodology: String,
    /// Advisory validation messages that did not block the run
    pub advisories: Vec<String>,
}

impl ForecastReport {
    pub fn policy(&self) -> AccumulationPolicy {
        self.settings.accumulation
    }

    pub fn includes_revenue(&self) -> bool {
        self.points.first().is_some_and(|p| p.revenue.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TierValues;

    fn point(month: u32, sessions: u64, conversions: u64, revenue: Option<u64>) -> ForecastPoint {
        ForecastPoint {
            month,
            sessions: TierValues::new(sessions / 2, sessions, sessions * 2),
            conversions: TierValues::new(conversions / 2, conversions, conversions * 2),
            revenue: revenue.map(|r| TierValues::new(r / 2, r, r * 2)),
        }
    }

    #[test]
    fn test_summary_totals() {
        let points = vec![point(1, 100, 2, Some(20)), point(2, 150, 3, Some(30))];
        let summary = ForecastSummary::from_points(&points, 120);
        assert_eq!(summary.total_expected_sessions, 250);
        assert_eq!(summary.total_expected_conversions, 5);
        assert_eq!(summary.total_expected_revenue, Some(50));
        assert_eq!(summary.final_month_expected_sessions, 150);
        assert_eq!(summary.uplift_over_baseline, 30);
    }

    #[test]
    fn test_summary_without_revenue() {
        let points = vec![point(1, 100, 2, None)];
        let summary = ForecastSummary::from_points(&points, 500);
        assert_eq!(summary.total_expected_revenue, None);
        assert_eq!(summary.uplift_over_baseline, 0);
    }
}
