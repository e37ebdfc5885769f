use serde::{Deserialize, Serialize};

use crate::domain::{EffortLevel, HistoricalPoint, KeywordRecord, RunParameters};
use crate::models::ForecastReport;

/// Everything one forecast run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub keywords: Vec<KeywordRecord>,
    pub history: Vec<HistoricalPoint>,
    pub parameters: RunParameters,
    /// Revenue is only projected when this is present and positive
    pub revenue_per_conversion: Option<f64>,
}

impl ForecastRequest {
    pub fn new(
        keywords: Vec<KeywordRecord>,
        history: Vec<HistoricalPoint>,
        parameters: RunParameters,
    ) -> Self {
        Self {
            keywords,
            history,
            parameters,
            revenue_per_conversion: None,
        }
    }

    pub fn with_revenue_per_conversion(mut self, revenue_per_conversion: Option<f64>) -> Self {
        self.revenue_per_conversion = revenue_per_conversion;
        self
    }

    /// Same inputs, different effort level
    pub fn for_effort(&self, effort_level: EffortLevel) -> Self {
        let mut request = self.clone();
        request.parameters.effort_level = effort_level;
        request
    }
}

/// The result of one effort level in a scenario sweep
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub effort_level: EffortLevel,
    pub duration_ms: u128,
    pub report: ForecastReport,
}
