use std::cmp::Ordering;

use crate::analysis::accumulator::keyword_ctr;
use crate::analysis::trajectory::project_position;
use crate::config::ForecastSettings;
use crate::domain::{KeywordRecord, RunParameters};
use crate::models::KeywordImpact;
use crate::utils::{percentage_of, round_to_u64};

/// Per-keyword share of the final-month uplift, largest first (ties by keyword).
pub fn keyword_impact(
    settings: &ForecastSettings,
    keywords: &[KeywordRecord],
    parameters: &RunParameters,
) -> Vec<KeywordImpact> {
    let lifts: Vec<(&KeywordRecord, i32, f64)> = keywords
        .iter()
        .map(|keyword| {
            let forecast_position = project_position(
                keyword.current_position,
                keyword.target_position,
                parameters.timeline_months,
                parameters.timeline_months,
                parameters.effort_level,
                settings.curve,
            );
            let lift = keyword.search_volume as f64
                * (keyword_ctr(settings.accumulation, keyword, forecast_position)
                    - keyword_ctr(settings.accumulation, keyword, keyword.current_position));
            (keyword, forecast_position, lift.max(0.0))
        })
        .collect();

    let total_lift: f64 = lifts.iter().map(|(_, _, lift)| lift).sum();

    let mut impact: Vec<KeywordImpact> = lifts
        .into_iter()
        .map(|(keyword, forecast_position, lift)| KeywordImpact {
            keyword: keyword.keyword.clone(),
            current_position: keyword.current_position,
            forecast_position,
            search_volume: keyword.search_volume,
            estimated_monthly_sessions: round_to_u64(lift),
            contribution_percentage: percentage_of(lift, total_lift),
        })
        .collect();

    impact.sort_by(|a, b| {
        b.contribution_percentage
            .partial_cmp(&a.contribution_percentage)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });

    impact
}
