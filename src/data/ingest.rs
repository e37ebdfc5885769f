//! Reading keyword and historical records from user-supplied files.
//!
//! CSV and spreadsheet headers are matched loosely (case, spaces, underscores and dashes are
//! ignored, a few aliases are accepted). Rows that fail to parse are skipped
//! and reported; good rows are kept.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use serde::de::DeserializeOwned;

use crate::config::{DEBUG_FLAGS, FORECAST};
use crate::data::FileFormat;
use crate::domain::{HistoricalPoint, KeywordRecord};
use crate::errors::{ForecastError, ForecastResult};
use crate::utils::TimeUtils;
use crate::utils::time_utils::first_out_of_order;

/// Records that parsed, plus a message for every row that didn't.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecords<T> {
    pub data: Vec<T>,
    pub errors: Vec<String>,
}

impl<T> Default for ParsedRecords<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            errors: Vec::new(),
        }
    }
}

pub struct Column {
    pub name: &'static str,
    /// Normalized (lowercase, no separators) header spellings
    pub aliases: &'static [&'static str],
    pub required: bool,
}

/// A record type that can be read from a delimited file.
pub trait TabularRecord: Sized + DeserializeOwned {
    const COLUMNS: &'static [Column];

    /// `cells` follows `COLUMNS` order; `None` for a missing column or blank cell.
    fn from_cells(cells: &[Option<&str>]) -> Result<Self, String>;
}

const KEYWORD_COLUMNS: &[Column] = &[
    Column {
        name: "keyword",
        aliases: &["keyword", "keywords", "query"],
        required: true,
    },
    Column {
        name: "currentPosition",
        aliases: &["currentposition", "position", "currentrank"],
        required: true,
    },
    Column {
        name: "targetPosition",
        aliases: &["targetposition", "targetrank"],
        required: true,
    },
    Column {
        name: "searchVolume",
        aliases: &["searchvolume", "volume", "monthlyvolume"],
        required: true,
    },
    Column {
        name: "currentCTR",
        aliases: &["currentctr", "customctr", "ctr"],
        required: false,
    },
];

const HISTORY_COLUMNS: &[Column] = &[
    Column {
        name: "date",
        aliases: &["date", "month", "period"],
        required: true,
    },
    Column {
        name: "sessions",
        aliases: &["sessions", "organicsessions"],
        required: true,
    },
    Column {
        name: "conversions",
        aliases: &["conversions", "goalcompletions"],
        required: true,
    },
];

impl TabularRecord for KeywordRecord {
    const COLUMNS: &'static [Column] = KEYWORD_COLUMNS;

    fn from_cells(cells: &[Option<&str>]) -> Result<Self, String> {
        let keyword = match cells[0] {
            Some(name) => name.to_string(),
            None => return Err("Missing keyword".to_string()),
        };
        let limits = &FORECAST.validation;
        let in_position_range = |p: f64| p >= limits.min_position as f64 && p <= limits.max_position as f64;

        let current_position = parse_number(cells[1])
            .filter(|p| in_position_range(*p))
            .ok_or_else(|| format!("Invalid current position for \"{}\"", keyword))?;
        let target_position = parse_number(cells[2])
            .filter(|p| in_position_range(*p))
            .ok_or_else(|| format!("Invalid target position for \"{}\"", keyword))?;
        let search_volume = parse_number(cells[3])
            .filter(|v| *v >= 0.0)
            .ok_or_else(|| format!("Invalid search volume for \"{}\"", keyword))?;
        let custom_ctr = match cells[4] {
            Some(raw) => Some(
                parse_ratio(raw).ok_or_else(|| format!("Invalid CTR for \"{}\"", keyword))?,
            ),
            None => None,
        };

        Ok(KeywordRecord {
            keyword,
            current_position: current_position.round() as i32,
            target_position: target_position.round() as i32,
            search_volume: search_volume.round() as i64,
            custom_ctr,
        })
    }
}

impl TabularRecord for HistoricalPoint {
    const COLUMNS: &'static [Column] = HISTORY_COLUMNS;

    fn from_cells(cells: &[Option<&str>]) -> Result<Self, String> {
        let date = cells[0].ok_or_else(|| "Missing date".to_string())?;
        let sessions = parse_number(cells[1])
            .filter(|v| *v >= 0.0)
            .ok_or_else(|| "Invalid sessions value".to_string())?;
        let conversions = parse_number(cells[2])
            .filter(|v| *v >= 0.0)
            .ok_or_else(|| "Invalid conversions value".to_string())?;

        Ok(HistoricalPoint::new(
            date,
            sessions.round() as i64,
            conversions.round() as i64,
        ))
    }
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Finite number, tolerating thousands separators ("12,400").
fn parse_number(cell: Option<&str>) -> Option<f64> {
    let cleaned = cell?.replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A fraction, or a percentage when suffixed with `%` ("4.5%" -> 0.045).
fn parse_ratio(cell: &str) -> Option<f64> {
    match cell.strip_suffix('%') {
        Some(percent) => parse_number(Some(percent.trim())).map(|v| v / 100.0),
        None => parse_number(Some(cell)),
    }
}

/// Position of each of `T::COLUMNS` among the normalized `headers`.
/// Fails with a single message naming every missing required column.
fn map_columns<T: TabularRecord>(headers: &[String]) -> Result<Vec<Option<usize>>, String> {
    let column_indices: Vec<Option<usize>> = T::COLUMNS
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|header| column.aliases.contains(&header.as_str()))
        })
        .collect();

    let missing: Vec<&str> = T::COLUMNS
        .iter()
        .zip(&column_indices)
        .filter(|(column, idx)| column.required && idx.is_none())
        .map(|(column, _)| column.name)
        .collect();
    if !missing.is_empty() {
        return Err(format!("Missing required column(s): {}", missing.join(", ")));
    }

    Ok(column_indices)
}

fn push_row<T: TabularRecord>(
    parsed: &mut ParsedRecords<T>,
    column_indices: &[Option<usize>],
    row_number: usize,
    row: &[&str],
) {
    let cells: Vec<Option<&str>> = column_indices
        .iter()
        .map(|idx| idx.and_then(|i| row.get(i).copied()).filter(|cell| !cell.is_empty()))
        .collect();

    match T::from_cells(&cells) {
        Ok(item) => parsed.data.push(item),
        Err(reason) => parsed.errors.push(format!("Row {}: {}", row_number, reason)),
    }
}

/// Parse a delimited stream with a header row into records of type `T`.
pub fn parse_csv<T: TabularRecord, R: Read>(reader: R) -> Result<ParsedRecords<T>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // 1. Map each expected column to a header index
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    let mut parsed = ParsedRecords::default();
    let column_indices = match map_columns::<T>(&headers) {
        Ok(indices) => indices,
        Err(message) => {
            parsed.errors.push(message);
            return Ok(parsed);
        }
    };

    // 2. Parse rows, keeping the good ones
    for (row_idx, result) in reader.records().enumerate() {
        let row_number = row_idx + 1;
        match result {
            Ok(record) => {
                let row: Vec<&str> = record.iter().collect();
                push_row(&mut parsed, &column_indices, row_number, &row);
            }
            Err(e) => parsed
                .errors
                .push(format!("Row {}: Parse error - {}", row_number, e)),
        }
    }

    Ok(parsed)
}

/// Cell contents as the text a CSV export of the sheet would hold.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        // Date-formatted cells, so history months keep a parseable label
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => datetime
                .date()
                .format(TimeUtils::STANDARD_DATE_FORMAT)
                .to_string(),
            None => value.as_f64().to_string(),
        },
        other => other.to_string(),
    }
}

/// Read the first worksheet of a workbook (.xlsx, .xls, .xlsb, .ods). The first
/// row holds the headers; fully blank rows are ignored.
pub fn parse_spreadsheet<T: TabularRecord>(
    path: &Path,
) -> Result<ParsedRecords<T>, calamine::Error> {
    let mut workbook = open_workbook_auto(path)?;
    let mut parsed = ParsedRecords::default();

    let Some(range) = workbook.worksheet_range_at(0) else {
        parsed.errors.push("Workbook has no worksheets".to_string());
        return Ok(parsed);
    };
    let range = range?;
    let mut rows = range.rows();

    // 1. Header row
    let Some(header_row) = rows.next() else {
        parsed.errors.push("Worksheet is empty".to_string());
        return Ok(parsed);
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell_text(cell)))
        .collect();
    let column_indices = match map_columns::<T>(&headers) {
        Ok(indices) => indices,
        Err(message) => {
            parsed.errors.push(message);
            return Ok(parsed);
        }
    };

    // 2. Data rows, numbered like the CSV path
    for (row_idx, row) in rows.enumerate() {
        let texts: Vec<String> = row.iter().map(cell_text).collect();
        if texts.iter().all(String::is_empty) {
            continue;
        }
        let row: Vec<&str> = texts.iter().map(String::as_str).collect();
        push_row(&mut parsed, &column_indices, row_idx + 1, &row);
    }

    Ok(parsed)
}

fn open_reader(path: &Path) -> ForecastResult<BufReader<File>> {
    let file = File::open(path).map_err(|source| ForecastError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Load records from a `.csv`, `.json` or spreadsheet file. The file size is
/// checked before anything is read.
pub fn load_records<T: TabularRecord>(path: &Path) -> ForecastResult<ParsedRecords<T>> {
    let format = FileFormat::from_path(path)?;

    let size = std::fs::metadata(path)
        .map_err(|source| ForecastError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    let limit = FORECAST.ingest.max_input_bytes;
    if size > limit {
        return Err(ForecastError::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }

    let parsed = match format {
        FileFormat::Csv => parse_csv(open_reader(path)?).map_err(|source| ForecastError::Csv {
            path: path.to_path_buf(),
            source,
        })?,
        FileFormat::Json => ParsedRecords {
            data: serde_json::from_reader(open_reader(path)?).map_err(|source| {
                ForecastError::Json {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
            errors: Vec::new(),
        },
        FileFormat::Spreadsheet => {
            parse_spreadsheet(path).map_err(|source| ForecastError::Spreadsheet {
                path: path.to_path_buf(),
                source,
            })?
        }
    };

    if !parsed.errors.is_empty() {
        log::warn!(
            "{}: skipped {} row(s) that could not be parsed",
            path.display(),
            parsed.errors.len()
        );
        if cfg!(debug_assertions) && DEBUG_FLAGS.print_ingest_rejections {
            for error in &parsed.errors {
                log::debug!("  {}", error);
            }
        }
    }

    Ok(parsed)
}

pub fn load_keywords(path: &Path) -> ForecastResult<ParsedRecords<KeywordRecord>> {
    load_records(path)
}

/// Historical points in file order. Logs a warning when parseable date labels go
/// backwards, since the last point is used as the current baseline.
pub fn load_history(path: &Path) -> ForecastResult<ParsedRecords<HistoricalPoint>> {
    let parsed: ParsedRecords<HistoricalPoint> = load_records(path)?;

    if let Some(idx) = first_out_of_order(parsed.data.iter().map(|p| p.date.as_str())) {
        log::warn!(
            "{}: \"{}\" is earlier than the row before it; history should be chronological",
            path.display(),
            parsed.data[idx].date
        );
    }

    Ok(parsed)
}
