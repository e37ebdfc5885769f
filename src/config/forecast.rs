//! Forecasting model configuration

use serde::{Deserialize, Serialize};

/// Click-through rates for positions 1..=20, indexed by `position - 1`.
/// Aggregated industry data; strictly decreasing.
pub const INDUSTRY_CTR_CURVE: [f64; 20] = [
    0.316, 0.158, 0.105, 0.077, 0.062, 0.051, 0.043, 0.038, 0.033, 0.029, // 1-10
    0.026, 0.023, 0.021, 0.019, 0.017, 0.016, 0.015, 0.014, 0.013, 0.012, // 11-20
];

/// How month-by-month traffic is accumulated across keywords.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationPolicy {
    /// Running total seeded with the latest historical sessions; each month adds
    /// the CTR delta against the previous month's position.
    #[default]
    #[value(name = "incremental")]
    IncrementalOnBaseline,
    /// Each month stands alone: sum of `volume * CTR(position)`, no baseline.
    /// The only mode that honours a keyword's custom CTR.
    #[value(name = "absolute")]
    AbsolutePositionSum,
}

/// Shape of the ranking-improvement curve.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryCurve {
    /// `progress` is raised to `acceleration_exponent` before decay, pulling gains earlier.
    #[default]
    Accelerated,
    /// Plain `1 - e^(-k * progress)`.
    Plain,
}

/// Conservative/optimistic multipliers applied to the expected sessions.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierPolicy {
    /// Constant band regardless of horizon.
    Fixed { conservative: f64, optimistic: f64 },
    /// Band widens with horizon: risk = min(months / reference_months, max_risk),
    /// conservative = base_conservative * risk, optimistic = base_optimistic + optimistic_spread * risk.
    WidenWithTimeline {
        base_conservative: f64,
        base_optimistic: f64,
        optimistic_spread: f64,
        reference_months: f64,
        max_risk: f64,
    },
}

pub struct CtrCurveConfig {
    pub table: &'static [f64; 20],
    // Positions 21..=50: mid_tail_base * e^(-mid_tail_decay * (position - table_end))
    pub table_end: u32,
    pub mid_tail_base: f64,
    pub mid_tail_decay: f64,
    // Positions > 50: deep_tail_base * e^(-deep_tail_decay * (position - mid_tail_end))
    pub mid_tail_end: u32,
    pub deep_tail_base: f64,
    pub deep_tail_decay: f64,
    /// Returned for positions outside every range (non-positive)
    pub floor: f64,
}

pub struct EffortMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

pub struct TrajectoryConfig {
    pub curve: TrajectoryCurve,
    pub decay_rate: f64,
    pub acceleration_exponent: f64,
    pub effort: EffortMultipliers,
}

pub struct TierConfig {
    pub policy: TierPolicy,
}

pub struct CalibrationConfig {
    /// Used when there is no history or no sessions at all
    pub default_rate: f64,
    pub min_rate: f64,
    pub max_rate: f64,
}

pub struct ValidationConfig {
    pub min_position: i32,
    pub max_position: i32,
    pub min_timeline_months: u32,
    /// Longer horizons are allowed but flagged
    pub advisory_timeline_months: u32,
    /// Hard ceiling on `--months`; library callers are only held to the advisory limit
    pub cli_max_timeline_months: u32,
}

pub struct CaveatThresholds {
    pub large_position_gap: f64,
    pub short_timeline_months: u32,
    pub long_timeline_months: u32,
    pub high_volume: i64,
}

pub struct IngestConfig {
    /// Uploaded files are user-controlled; refuse anything larger before parsing
    pub max_input_bytes: u64,
}

/// The Master Forecast Configuration
pub struct ForecastConfig {
    pub accumulation: AccumulationPolicy,

    // Sub-groups
    pub ctr: CtrCurveConfig,
    pub trajectory: TrajectoryConfig,
    pub tiers: TierConfig,
    pub calibration: CalibrationConfig,
    pub validation: ValidationConfig,
    pub caveats: CaveatThresholds,
    pub ingest: IngestConfig,
}

pub const FORECAST: ForecastConfig = ForecastConfig {
    accumulation: AccumulationPolicy::IncrementalOnBaseline,

    ctr: CtrCurveConfig {
        table: &INDUSTRY_CTR_CURVE,
        table_end: 20,
        mid_tail_base: 0.012,
        mid_tail_decay: 0.02,
        mid_tail_end: 50,
        deep_tail_base: 0.005,
        deep_tail_decay: 0.01,
        floor: 0.001,
    },

    trajectory: TrajectoryConfig {
        curve: TrajectoryCurve::Accelerated,
        // ~95% of the gap closed at progress = 1
        decay_rate: 3.0,
        acceleration_exponent: 0.7,
        effort: EffortMultipliers {
            low: 0.6,
            medium: 1.0,
            high: 1.4,
        },
    },

    tiers: TierConfig {
        policy: TierPolicy::WidenWithTimeline {
            base_conservative: 0.6,
            base_optimistic: 1.4,
            optimistic_spread: 0.2,
            reference_months: 12.0,
            max_risk: 1.5,
        },
    },

    calibration: CalibrationConfig {
        default_rate: 0.02,
        min_rate: 0.001,
        max_rate: 0.5,
    },

    validation: ValidationConfig {
        min_position: 1,
        max_position: 100,
        min_timeline_months: 1,
        advisory_timeline_months: 36,
        cli_max_timeline_months: 120,
    },

    caveats: CaveatThresholds {
        large_position_gap: 30.0,
        short_timeline_months: 6,
        long_timeline_months: 18,
        high_volume: 10_000,
    },

    ingest: IngestConfig {
        max_input_bytes: 16 * 1024 * 1024,
    },
};

/// Runtime view of the knobs a single run may override.
/// `Default` mirrors `FORECAST`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    pub accumulation: AccumulationPolicy,
    pub curve: TrajectoryCurve,
    pub tiers: TierPolicy,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            accumulation: FORECAST.accumulation,
            curve: FORECAST.trajectory.curve,
            tiers: FORECAST.tiers.policy,
        }
    }
}

impl ForecastSettings {
    pub fn with_accumulation(mut self, accumulation: AccumulationPolicy) -> Self {
        self.accumulation = accumulation;
        self
    }

    pub fn with_curve(mut self, curve: TrajectoryCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_tiers(mut self, tiers: TierPolicy) -> Self {
        self.tiers = tiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_curve_strictly_decreasing() {
        for pair in INDUSTRY_CTR_CURVE.windows(2) {
            assert!(pair[0] > pair[1], "{} should exceed {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_default_settings_mirror_master_config() {
        let settings = ForecastSettings::default();
        assert_eq!(settings.accumulation, AccumulationPolicy::IncrementalOnBaseline);
        assert_eq!(settings.curve, TrajectoryCurve::Accelerated);
        assert_eq!(settings.tiers, FORECAST.tiers.policy);
    }
}
