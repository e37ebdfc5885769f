use std::time::Instant;

use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::analysis::{
    calibrate_conversion_rate, generate_caveats, generate_forecast_with, keyword_impact,
    methodology_text, validate_inputs,
};
use crate::config::{DEBUG_FLAGS, ForecastSettings};
use crate::domain::{EffortLevel, latest_sessions};
use crate::errors::{ForecastError, ForecastResult};
use crate::models::{ForecastReport, ForecastSummary};

use super::messages::{ForecastRequest, ScenarioResult};

/// Stateless apart from its settings: every run is isolated, so one engine can
/// serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    settings: ForecastSettings,
}

impl ForecastEngine {
    pub fn new(settings: ForecastSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// Full report for one request. Fails with the fatal validation messages
    /// and produces nothing if the input is invalid.
    pub fn run(&self, request: &ForecastRequest) -> ForecastResult<ForecastReport> {
        // 1. Validate (advisories are carried into the report)
        let validation = validate_inputs(&request.keywords, &request.history, &request.parameters);
        if !validation.valid {
            return Err(ForecastError::Validation {
                errors: validation.fatal_errors(),
            });
        }
        for advisory in validation.advisories() {
            log::warn!("{}", advisory);
        }

        log::info!(
            "Forecasting {} keywords over {} months (effort {}, {:?})",
            request.keywords.len(),
            request.parameters.timeline_months,
            request.parameters.effort_level,
            self.settings.accumulation
        );

        // 2. Core pipeline
        let conversion_rate = calibrate_conversion_rate(&request.history);
        let points = generate_forecast_with(
            &self.settings,
            &request.keywords,
            &request.history,
            &request.parameters,
            request.revenue_per_conversion,
        )?;

        // 3. Derived views
        let baseline_sessions = latest_sessions(&request.history).max(0) as u64;
        let summary = ForecastSummary::from_points(&points, baseline_sessions);
        log::info!(
            "Conversion rate {:.4}; expected totals: {} sessions, {} conversions",
            conversion_rate,
            summary.total_expected_sessions,
            summary.total_expected_conversions
        );

        Ok(ForecastReport {
            parameters: request.parameters,
            settings: self.settings,
            conversion_rate,
            baseline_sessions,
            points,
            summary,
            keyword_impact: keyword_impact(&self.settings, &request.keywords, &request.parameters),
            caveats: generate_caveats(&request.keywords, &request.parameters),
            methodology: methodology_text(&self.settings),
            advisories: validation.advisories(),
        })
    }

    /// Run the request once per effort level, in parallel. Results come back
    /// ordered low, medium, high regardless of the request's own effort level.
    pub fn run_effort_scenarios(
        &self,
        request: &ForecastRequest,
    ) -> ForecastResult<Vec<ScenarioResult>> {
        let levels: Vec<EffortLevel> = EffortLevel::iter().collect();

        levels
            .into_par_iter()
            .map(|effort_level| {
                let start = Instant::now();
                let report = self.run(&request.for_effort(effort_level))?;
                let duration_ms = start.elapsed().as_millis();

                if cfg!(debug_assertions) && DEBUG_FLAGS.print_scenario_timing {
                    log::debug!("Scenario {} finished in {}ms", effort_level, duration_ms);
                }

                Ok(ScenarioResult {
                    effort_level,
                    duration_ms,
                    report,
                })
            })
            .collect()
    }
}
