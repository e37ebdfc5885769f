use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FORECAST;

/// Qualitative resourcing of the SEO programme. Scales ranking-improvement speed.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Debug,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl EffortLevel {
    pub fn multiplier(self) -> f64 {
        let effort = &FORECAST.trajectory.effort;
        match self {
            EffortLevel::Low => effort.low,
            EffortLevel::Medium => effort.medium,
            EffortLevel::High => effort.high,
        }
    }
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EffortLevel::Low => write!(f, "low"),
            EffortLevel::Medium => write!(f, "medium"),
            EffortLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunParameters {
    pub timeline_months: u32,
    pub effort_level: EffortLevel,
}

impl RunParameters {
    pub fn new(timeline_months: u32, effort_level: EffortLevel) -> Self {
        RunParameters {
            timeline_months,
            effort_level,
        }
    }
}

impl Default for RunParameters {
    fn default() -> Self {
        RunParameters::new(12, EffortLevel::Medium)
    }
}
