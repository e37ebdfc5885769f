use chrono::NaiveDate;

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const US_DATE_FORMAT: &str = "%m/%d/%Y";
    pub const MONTH_FORMAT: &str = "%Y-%m";

    /// Best-effort parse of a historical period label.
    /// Accepts `2024-06-30`, `06/30/2024` and month-only `2024-06` (first of the month).
    pub fn parse_period_label(label: &str) -> Option<NaiveDate> {
        let label = label.trim();
        if let Ok(date) = NaiveDate::parse_from_str(label, Self::STANDARD_DATE_FORMAT) {
            return Some(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(label, Self::US_DATE_FORMAT) {
            return Some(date);
        }
        // NaiveDate needs a day component
        NaiveDate::parse_from_str(&format!("{}-01", label), Self::STANDARD_DATE_FORMAT).ok()
    }
}

/// Index of the first label that parses to a date earlier than the previous parseable one.
/// Labels that don't parse are skipped, so free-form labels never trigger this.
pub fn first_out_of_order<'a, I>(labels: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut previous: Option<NaiveDate> = None;
    for (idx, label) in labels.into_iter().enumerate() {
        let Some(date) = TimeUtils::parse_period_label(label) else {
            continue;
        };
        if previous.is_some_and(|prev| date < prev) {
            return Some(idx);
        }
        previous = Some(date);
    }
    None
}
