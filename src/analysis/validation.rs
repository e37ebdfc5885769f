//! Structural and range checks run before any computation.
//!
//! Issues are either fatal (the run cannot proceed) or advisory (surfaced to the
//! caller, run continues with a documented default).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FORECAST;
use crate::domain::{HistoricalPoint, KeywordRecord, RunParameters};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Fatal,
    Advisory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    NoKeywords,
    MissingKeywordName,
    CurrentPositionOutOfRange,
    TargetPositionOutOfRange,
    NegativeSearchVolume,
    CustomCtrOutOfRange,
    NoHistoricalData,
    MissingHistoricalDate,
    NegativeSessions,
    NegativeConversions,
    TimelineTooShort,
    TimelineBeyondAdvisoryLimit,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::NoHistoricalData | IssueKind::TimelineBeyondAdvisoryLimit => {
                Severity::Advisory
            }
            _ => Severity::Fatal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    fn new(kind: IssueKind, message: String) -> Self {
        ValidationIssue { kind, message }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// `valid` is true when no issue is fatal. `errors` lists every message, advisory ones included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        ValidationReport {
            valid: !issues.iter().any(ValidationIssue::is_fatal),
            errors: issues.iter().map(|issue| issue.message.clone()).collect(),
            issues,
        }
    }

    pub fn fatal_errors(&self) -> Vec<String> {
        self.messages_with(Severity::Fatal)
    }

    pub fn advisories(&self) -> Vec<String> {
        self.messages_with(Severity::Advisory)
    }

    fn messages_with(&self, severity: Severity) -> Vec<String> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == severity)
            .map(|issue| issue.message.clone())
            .collect()
    }
}

pub const NO_KEYWORDS_MESSAGE: &str = "no keyword data provided";
pub const NO_HISTORY_MESSAGE: &str =
    "no historical data provided - default conversion rate will be used";

/// Check keywords, history and run parameters. Issue order: keywords (input order,
/// field order within each), then history, then timeline.
pub fn validate_inputs(
    keywords: &[KeywordRecord],
    history: &[HistoricalPoint],
    parameters: &RunParameters,
) -> ValidationReport {
    let mut issues = Vec::new();

    if keywords.is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::NoKeywords,
            NO_KEYWORDS_MESSAGE.to_string(),
        ));
    }
    for (index, keyword) in keywords.iter().enumerate() {
        check_keyword(index, keyword, &mut issues);
    }

    if history.is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::NoHistoricalData,
            NO_HISTORY_MESSAGE.to_string(),
        ));
    }
    for (index, point) in history.iter().enumerate() {
        check_historical_point(index, point, &mut issues);
    }

    check_timeline(parameters.timeline_months, &mut issues);

    ValidationReport::from_issues(issues)
}

/// How a keyword is referred to in messages.
fn keyword_label(index: usize, keyword: &KeywordRecord) -> String {
    if keyword.has_name() {
        format!("keyword \"{}\"", keyword.keyword.trim())
    } else {
        format!("keyword at index {}", index)
    }
}

fn check_keyword(index: usize, keyword: &KeywordRecord, issues: &mut Vec<ValidationIssue>) {
    let limits = &FORECAST.validation;
    let positions = limits.min_position..=limits.max_position;
    let label = keyword_label(index, keyword);

    if !keyword.has_name() {
        issues.push(ValidationIssue::new(
            IssueKind::MissingKeywordName,
            format!("keyword at index {} is missing a name", index),
        ));
    }

    if !positions.contains(&keyword.current_position) {
        issues.push(ValidationIssue::new(
            IssueKind::CurrentPositionOutOfRange,
            format!(
                "invalid current position for {}: must be between {}-{} (got {})",
                label, limits.min_position, limits.max_position, keyword.current_position
            ),
        ));
    }

    if !positions.contains(&keyword.target_position) {
        issues.push(ValidationIssue::new(
            IssueKind::TargetPositionOutOfRange,
            format!(
                "invalid target position for {}: must be between {}-{} (got {})",
                label, limits.min_position, limits.max_position, keyword.target_position
            ),
        ));
    }

    if keyword.search_volume < 0 {
        issues.push(ValidationIssue::new(
            IssueKind::NegativeSearchVolume,
            format!(
                "invalid search volume for {}: must not be negative (got {})",
                label, keyword.search_volume
            ),
        ));
    }

    if let Some(ctr) = keyword.custom_ctr {
        // Also rejects NaN
        if !(0.0..=1.0).contains(&ctr) {
            issues.push(ValidationIssue::new(
                IssueKind::CustomCtrOutOfRange,
                format!("invalid CTR for {}: must be between 0-1 (got {})", label, ctr),
            ));
        }
    }
}

fn check_historical_point(index: usize, point: &HistoricalPoint, issues: &mut Vec<ValidationIssue>) {
    let label = if point.date.trim().is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::MissingHistoricalDate,
            format!("historical point at index {} is missing a date", index),
        ));
        format!("historical point at index {}", index)
    } else {
        format!("historical point \"{}\"", point.date.trim())
    };

    if point.sessions < 0 {
        issues.push(ValidationIssue::new(
            IssueKind::NegativeSessions,
            format!(
                "invalid sessions for {}: must not be negative (got {})",
                label, point.sessions
            ),
        ));
    }

    if point.conversions < 0 {
        issues.push(ValidationIssue::new(
            IssueKind::NegativeConversions,
            format!(
                "invalid conversions for {}: must not be negative (got {})",
                label, point.conversions
            ),
        ));
    }
}

fn check_timeline(timeline_months: u32, issues: &mut Vec<ValidationIssue>) {
    let limits = &FORECAST.validation;

    if timeline_months < limits.min_timeline_months {
        issues.push(ValidationIssue::new(
            IssueKind::TimelineTooShort,
            format!(
                "invalid timeline: must be at least {} month",
                limits.min_timeline_months
            ),
        ));
    }

    if timeline_months > limits.advisory_timeline_months {
        issues.push(ValidationIssue::new(
            IssueKind::TimelineBeyondAdvisoryLimit,
            format!(
                "timeline of {} months exceeds {} months - forecasts become increasingly uncertain",
                timeline_months, limits.advisory_timeline_months
            ),
        ));
    }
}
