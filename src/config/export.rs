//! Export file naming

/// Base filename for exported forecasts (without extension)
pub const FORECAST_FILENAME_WITHOUT_EXT: &str = "seo-forecast";

/// Supported export formats, keyed by file extension
pub const CSV_EXTENSION: &str = "csv";
pub const JSON_EXTENSION: &str = "json";

/// Generate the default export filename for a given extension.
/// Example: "seo-forecast_12m.csv"
pub fn forecast_export_filename(timeline_months: u32, extension: &str) -> String {
    format!(
        "{}_{}m.{}",
        FORECAST_FILENAME_WITHOUT_EXT, timeline_months, extension
    )
}
