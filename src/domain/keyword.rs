use serde::{Deserialize, Serialize};
use std::fmt;

/// One tracked keyword: where it ranks now, where we want it, and how often it is searched.
///
/// Fields are signed so that out-of-range input from collaborators survives
/// deserialization and is reported by the validator instead of being rejected opaquely.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRecord {
    pub keyword: String,
    pub current_position: i32,
    pub target_position: i32,
    pub search_volume: i64,
    /// Caller-measured CTR, a fraction in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "currentCTR")]
    pub custom_ctr: Option<f64>,
}

impl KeywordRecord {
    pub fn new(
        keyword: impl Into<String>,
        current_position: i32,
        target_position: i32,
        search_volume: i64,
    ) -> Self {
        KeywordRecord {
            keyword: keyword.into(),
            current_position,
            target_position,
            search_volume,
            custom_ctr: None,
        }
    }

    pub fn with_custom_ctr(mut self, ctr: f64) -> Self {
        self.custom_ctr = Some(ctr);
        self
    }

    /// Ranks still to climb. Zero when already at or better than target.
    pub fn position_gap(&self) -> i32 {
        (self.current_position - self.target_position).max(0)
    }

    pub fn has_name(&self) -> bool {
        !self.keyword.trim().is_empty()
    }
}

impl fmt::Display for KeywordRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\"{}\" #{} -> #{} ({} searches/month)",
            self.keyword, self.current_position, self.target_position, self.search_volume
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_gap_never_negative() {
        assert_eq!(KeywordRecord::new("a", 10, 3, 100).position_gap(), 7);
        assert_eq!(KeywordRecord::new("b", 2, 5, 100).position_gap(), 0);
        assert_eq!(KeywordRecord::new("c", 4, 4, 100).position_gap(), 0);
    }

    #[test]
    fn test_deserializes_camel_case_and_legacy_ctr_field() {
        let json = r#"{"keyword":"shoes","currentPosition":5,"targetPosition":3,"searchVolume":1000,"currentCTR":0.04}"#;
        let record: KeywordRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.current_position, 5);
        assert_eq!(record.custom_ctr, Some(0.04));

        let json = r#"{"keyword":"shoes","currentPosition":5,"targetPosition":3,"searchVolume":1000}"#;
        let record: KeywordRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.custom_ctr, None);
    }
}
