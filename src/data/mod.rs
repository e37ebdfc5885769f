pub mod export;
pub mod ingest;

use std::path::Path;

use crate::errors::{ForecastError, ForecastResult};

pub use export::{export_report, forecast_csv_string, write_forecast_csv};
pub use ingest::{
    ParsedRecords, TabularRecord, load_history, load_keywords, load_records, parse_csv,
    parse_spreadsheet,
};

/// Supported file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    /// Workbook, read-only: first worksheet
    Spreadsheet,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> ForecastResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("json") => Ok(FileFormat::Json),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(FileFormat::Spreadsheet),
            _ => Err(ForecastError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
