use serde::{Deserialize, Serialize};

/// One figure in the three projection bands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierValues {
    pub conservative: u64,
    pub expected: u64,
    pub optimistic: u64,
}

impl TierValues {
    pub fn new(conservative: u64, expected: u64, optimistic: u64) -> Self {
        TierValues {
            conservative,
            expected,
            optimistic,
        }
    }

    /// conservative <= expected <= optimistic
    pub fn is_ordered(&self) -> bool {
        self.conservative <= self.expected && self.expected <= self.optimistic
    }
}

/// Projection for a single month of the horizon (1-based).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForecastPoint {
    pub month: u32,
    pub sessions: TierValues,
    pub conversions: TierValues,
    /// `None` when no revenue per conversion was requested, distinct from zero revenue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<TierValues>,
}
