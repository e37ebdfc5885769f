use crate::config::FORECAST;
use crate::domain::{KeywordRecord, RunParameters};

const BASE_CAVEATS: [&str; 5] = [
    "Forecasts assume consistent SEO implementation throughout the timeline",
    "Search engine algorithm updates could impact results positively or negatively",
    "Competitive landscape changes may affect ranking achievability",
    "Economic or industry disruption could impact conversion rates",
    "Delays in content or technical implementation will push the timeline",
];

pub const LARGE_GAP_CAVEAT: &str =
    "Large position improvements require significant effort and time investment";
pub const SHORT_TIMELINE_CAVEAT: &str = "Short timeline may limit achievable ranking improvements";
pub const LONG_TIMELINE_CAVEAT: &str =
    "Long-term forecasts have increased uncertainty and should be reviewed quarterly";
pub const HIGH_VOLUME_CAVEAT: &str =
    "High-volume keywords typically have higher competition and may require more resources";

/// Advisory text for a run: the fixed list plus threshold-driven extras, in a fixed order.
pub fn generate_caveats(keywords: &[KeywordRecord], parameters: &RunParameters) -> Vec<String> {
    let thresholds = &FORECAST.caveats;
    let mut caveats: Vec<String> = BASE_CAVEATS.iter().map(|c| c.to_string()).collect();

    if average_position_gap(keywords) > thresholds.large_position_gap {
        caveats.push(LARGE_GAP_CAVEAT.to_string());
    }

    if parameters.timeline_months < thresholds.short_timeline_months {
        caveats.push(SHORT_TIMELINE_CAVEAT.to_string());
    }

    if parameters.timeline_months > thresholds.long_timeline_months {
        caveats.push(LONG_TIMELINE_CAVEAT.to_string());
    }

    if keywords.iter().any(|kw| kw.search_volume > thresholds.high_volume) {
        caveats.push(HIGH_VOLUME_CAVEAT.to_string());
    }

    caveats
}

/// Mean absolute distance between current and target positions.
fn average_position_gap(keywords: &[KeywordRecord]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let total: i64 = keywords
        .iter()
        .map(|kw| (kw.current_position as i64 - kw.target_position as i64).abs())
        .sum();
    total as f64 / keywords.len() as f64
}
