//! Plain-text rendering of forecast results for the terminal.

use std::fmt::Write;

use crate::engine::ScenarioResult;
use crate::models::{ForecastPoint, ForecastReport, KeywordImpact};
use crate::ui::utils::{format_count, format_currency, format_percentage, section_heading};

const MONTH_WIDTH: usize = 5;
const TIER_WIDTH: usize = 30;

fn tier_cell(conservative: String, expected: String, optimistic: String) -> String {
    format!("{} / {} / {}", conservative, expected, optimistic)
}

fn point_row(point: &ForecastPoint) -> String {
    let mut row = format!(
        "{:>mw$}  {:>tw$}  {:>tw$}",
        point.month,
        tier_cell(
            format_count(point.sessions.conservative),
            format_count(point.sessions.expected),
            format_count(point.sessions.optimistic)
        ),
        tier_cell(
            format_count(point.conversions.conservative),
            format_count(point.conversions.expected),
            format_count(point.conversions.optimistic)
        ),
        mw = MONTH_WIDTH,
        tw = TIER_WIDTH,
    );
    if let Some(revenue) = point.revenue {
        let _ = write!(
            row,
            "  {:>tw$}",
            tier_cell(
                format_currency(revenue.conservative),
                format_currency(revenue.expected),
                format_currency(revenue.optimistic)
            ),
            tw = TIER_WIDTH,
        );
    }
    row
}

/// Monthly table: one row per month, each cell "conservative / expected / optimistic".
pub fn render_table(points: &[ForecastPoint]) -> String {
    let include_revenue = points.first().is_some_and(|p| p.revenue.is_some());
    let mut out = format!(
        "{:>mw$}  {:>tw$}  {:>tw$}",
        "Month",
        "Sessions (low / exp / high)",
        "Conversions (low / exp / high)",
        mw = MONTH_WIDTH,
        tw = TIER_WIDTH,
    );
    if include_revenue {
        let _ = write!(out, "  {:>tw$}", "Revenue (low / exp / high)", tw = TIER_WIDTH);
    }
    out.push('\n');
    for point in points {
        out.push_str(&point_row(point));
        out.push('\n');
    }
    out
}

pub fn render_summary(report: &ForecastReport) -> String {
    let summary = &report.summary;
    let mut out = section_heading("Summary") + "\n";
    let _ = writeln!(
        out,
        "  Conversion rate:           {}",
        format_percentage(report.conversion_rate)
    );
    let _ = writeln!(
        out,
        "  Baseline sessions:         {}",
        format_count(report.baseline_sessions)
    );
    let _ = writeln!(
        out,
        "  Total expected sessions:   {}",
        format_count(summary.total_expected_sessions)
    );
    let _ = writeln!(
        out,
        "  Total expected conversions: {}",
        format_count(summary.total_expected_conversions)
    );
    if let Some(revenue) = summary.total_expected_revenue {
        let _ = writeln!(out, "  Total expected revenue:    {}", format_currency(revenue));
    }
    let _ = writeln!(
        out,
        "  Final month sessions:      {} (+{} over baseline)",
        format_count(summary.final_month_expected_sessions),
        format_count(summary.uplift_over_baseline)
    );
    out
}

pub fn render_keyword_impact(impacts: &[KeywordImpact]) -> String {
    let mut out = section_heading("Keyword impact") + "\n";
    for impact in impacts {
        let _ = writeln!(
            out,
            "  {:<32} #{:>3} -> #{:>3}  {:>10} sessions/month  {:>6.1}%",
            impact.keyword,
            impact.current_position,
            impact.forecast_position,
            format_count(impact.estimated_monthly_sessions),
            impact.contribution_percentage
        );
    }
    out
}

fn render_list(title: &str, items: &[String]) -> String {
    let mut out = section_heading(title) + "\n";
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
    out
}

/// Everything for a single run, in reading order.
pub fn render_report(report: &ForecastReport, show_impact: bool) -> String {
    let mut sections = Vec::new();
    if !report.advisories.is_empty() {
        sections.push(render_list("Advisories", &report.advisories));
    }
    sections.push(render_table(&report.points));
    sections.push(render_summary(report));
    if show_impact {
        sections.push(render_keyword_impact(&report.keyword_impact));
    }
    sections.push(render_list("Caveats", &report.caveats));
    sections.push(section_heading("Methodology") + "\n" + &report.methodology + "\n");
    sections.join("\n")
}

/// One line per effort level.
pub fn render_scenarios(results: &[ScenarioResult]) -> String {
    let mut out = section_heading("Effort scenarios") + "\n";
    for result in results {
        let summary = &result.report.summary;
        let _ = write!(
            out,
            "  {:<7} {:>12} sessions  {:>8} conversions",
            result.effort_level.to_string(),
            format_count(summary.total_expected_sessions),
            format_count(summary.total_expected_conversions)
        );
        if let Some(revenue) = summary.total_expected_revenue {
            let _ = write!(out, "  {:>12}", format_currency(revenue));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TierValues;

    #[test]
    fn test_table_has_row_per_month() {
        let points: Vec<ForecastPoint> = (1..=3)
            .map(|month| ForecastPoint {
                month,
                sessions: TierValues::new(600, 1_000, 1_400),
                conversions: TierValues::new(12, 20, 28),
                revenue: None,
            })
            .collect();
        let table = render_table(&points);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("600 / 1,000 / 1,400"));
        assert!(!table.contains("Revenue"));
    }

    #[test]
    fn test_revenue_column_when_present() {
        let points = vec![ForecastPoint {
            month: 1,
            sessions: TierValues::new(600, 1_000, 1_400),
            conversions: TierValues::new(12, 20, 28),
            revenue: Some(TierValues::new(600, 1_000, 1_400)),
        }];
        let table = render_table(&points);
        assert!(table.contains("Revenue"));
        assert!(table.contains("$600 / $1,000 / $1,400"));
    }
}
