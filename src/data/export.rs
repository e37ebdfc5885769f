//! Writing forecast results out as CSV or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data::FileFormat;
use crate::errors::{ForecastError, ForecastResult};
use crate::models::{ForecastPoint, ForecastReport};

const SESSION_HEADERS: [&str; 7] = [
    "Month",
    "Conservative Sessions",
    "Expected Sessions",
    "Optimistic Sessions",
    "Conservative Conversions",
    "Expected Conversions",
    "Optimistic Conversions",
];

const REVENUE_HEADERS: [&str; 3] = [
    "Conservative Revenue",
    "Expected Revenue",
    "Optimistic Revenue",
];

/// One row per month. Revenue columns appear only when the forecast carries revenue.
pub fn write_forecast_csv<W: Write>(points: &[ForecastPoint], writer: W) -> Result<(), csv::Error> {
    let include_revenue = points.first().is_some_and(|p| p.revenue.is_some());
    let mut writer = csv::Writer::from_writer(writer);

    let mut headers: Vec<&str> = SESSION_HEADERS.to_vec();
    if include_revenue {
        headers.extend(REVENUE_HEADERS);
    }
    writer.write_record(&headers)?;

    for point in points {
        let mut row = vec![
            point.month.to_string(),
            point.sessions.conservative.to_string(),
            point.sessions.expected.to_string(),
            point.sessions.optimistic.to_string(),
            point.conversions.conservative.to_string(),
            point.conversions.expected.to_string(),
            point.conversions.optimistic.to_string(),
        ];
        if include_revenue {
            let revenue = point.revenue.unwrap_or_default();
            row.push(revenue.conservative.to_string());
            row.push(revenue.expected.to_string());
            row.push(revenue.optimistic.to_string());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn forecast_csv_string(points: &[ForecastPoint]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_forecast_csv(points, &mut buffer)?;
    // csv only ever writes what we hand it, all of which is ASCII
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn create_writer(path: &Path) -> ForecastResult<BufWriter<File>> {
    let file = File::create(path).map_err(|source| ForecastError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Write the report to `path`, choosing CSV (monthly table) or JSON (full report)
/// from the extension. Workbooks are input-only.
pub fn export_report(report: &ForecastReport, path: &Path) -> ForecastResult<()> {
    if report.points.is_empty() {
        return Err(ForecastError::EmptyForecast);
    }

    match FileFormat::from_path(path)? {
        FileFormat::Csv => write_forecast_csv(&report.points, create_writer(path)?).map_err(
            |source| ForecastError::Csv {
                path: path.to_path_buf(),
                source,
            },
        )?,
        FileFormat::Json => serde_json::to_writer_pretty(create_writer(path)?, report).map_err(
            |source| ForecastError::Json {
                path: path.to_path_buf(),
                source,
            },
        )?,
        FileFormat::Spreadsheet => {
            return Err(ForecastError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    }

    log::info!("Exported {}-month forecast to {}", report.points.len(), path.display());
    Ok(())
}
