use serde::{Deserialize, Serialize};

/// One period of observed organic traffic. Sequences are expected in chronological
/// order: the last point is treated as the current baseline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoricalPoint {
    /// Free-form period label, e.g. "2024-06"
    pub date: String,
    pub sessions: i64,
    pub conversions: i64,
}

impl HistoricalPoint {
    pub fn new(date: impl Into<String>, sessions: i64, conversions: i64) -> Self {
        HistoricalPoint {
            date: date.into(),
            sessions,
            conversions,
        }
    }
}

/// Sessions of the most recent point, 0 when there is no history.
pub fn latest_sessions(history: &[HistoricalPoint]) -> i64 {
    history.last().map(|point| point.sessions).unwrap_or(0)
}
