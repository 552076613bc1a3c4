//! Workbook loading for the alarm sheet.
//!
//! Reads the aggregated alarm sheet (one row per month and alarm id) and
//! converts every valid row into a categorized [`AlarmRecord`].

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDate;
use insights_core::models::{AlarmId, AlarmRecord};
use insights_core::{InsightsError, Result};
use tracing::debug;

/// Zero-based sheet row holding the column headers. The row above it is a
/// title banner.
pub const HEADER_ROW: u32 = 1;

pub const MONTH_COLUMN: &str = "Month";
pub const ALARM_ID_COLUMN: &str = "Alarm_ID";
pub const COUNT_COLUMN: &str = "Count";
pub const ALARM_TEXT_COLUMN: &str = "AlarmText";

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and categorize every valid alarm row from `sheet` in `workbook`.
///
/// Rows with a missing month, alarm id or count, an uninterpretable month,
/// or a count that is not a non-negative integer are skipped.
pub fn load_alarm_records(workbook: &Path, sheet: &str) -> Result<Vec<AlarmRecord>> {
    if !workbook.exists() {
        return Err(InsightsError::SourceNotFound(workbook.to_path_buf()));
    }

    let mut book = open_workbook_auto(workbook).map_err(|e| InsightsError::Workbook {
        path: workbook.to_path_buf(),
        message: e.to_string(),
    })?;

    if !book.sheet_names().iter().any(|name| name == sheet) {
        return Err(InsightsError::SheetNotFound {
            path: workbook.to_path_buf(),
            sheet: sheet.to_string(),
        });
    }

    let range = book
        .worksheet_range(sheet)
        .map_err(|e| InsightsError::Workbook {
            path: workbook.to_path_buf(),
            message: e.to_string(),
        })?;

    let records = records_from_range(&range)?;
    debug!(
        "Loaded {} alarm records from {} [{}]",
        records.len(),
        workbook.display(),
        sheet
    );
    Ok(records)
}

/// Convert an in-memory sheet range into alarm records.
///
/// The range may start anywhere at or above [`HEADER_ROW`]; positions are
/// resolved against absolute sheet rows.
pub fn records_from_range(range: &Range<Data>) -> Result<Vec<AlarmRecord>> {
    let start_row = match range.start() {
        Some((row, _)) if !range.is_empty() => row,
        _ => return Err(InsightsError::DataFormat("sheet is empty".to_string())),
    };
    if start_row > HEADER_ROW {
        return Err(InsightsError::DataFormat(format!(
            "header row {} is empty",
            HEADER_ROW + 1
        )));
    }

    let mut rows = range.rows().skip((HEADER_ROW - start_row) as usize);
    let header = rows
        .next()
        .ok_or_else(|| InsightsError::DataFormat("header row is missing".to_string()))?;
    let columns = ColumnIndex::from_header(header)?;

    let mut records = Vec::new();
    let mut rows_read = 0u64;
    let mut rows_dropped = 0u64;

    for row in rows {
        rows_read += 1;
        match columns.parse_row(row) {
            Some(record) => records.push(record),
            None => rows_dropped += 1,
        }
    }

    debug!(
        "Sheet rows: {} read, {} dropped, {} kept",
        rows_read,
        rows_dropped,
        records.len()
    );

    Ok(records)
}

/// Normalize a `YYYYMM` integer to the first day of that month.
///
/// Returns `None` for values that are not six digits or name no real month.
pub fn month_start(yyyymm: i64) -> Option<NaiveDate> {
    if !(100_001..=999_912).contains(&yyyymm) {
        return None;
    }
    let year = i32::try_from(yyyymm / 100).ok()?;
    let month = u32::try_from(yyyymm % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

// ── ColumnIndex ───────────────────────────────────────────────────────────────

/// Positions of the required columns within a sheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    month: usize,
    alarm_id: usize,
    count: usize,
    text: usize,
}

impl ColumnIndex {
    /// Locate the required columns by header name.
    fn from_header(header: &[Data]) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
        };

        let month = find(MONTH_COLUMN);
        let alarm_id = find(ALARM_ID_COLUMN);
        let count = find(COUNT_COLUMN);
        let text = find(ALARM_TEXT_COLUMN);

        match (month, alarm_id, count, text) {
            (Some(month), Some(alarm_id), Some(count), Some(text)) => Ok(Self {
                month,
                alarm_id,
                count,
                text,
            }),
            _ => {
                let missing: Vec<&str> = [
                    (MONTH_COLUMN, month),
                    (ALARM_ID_COLUMN, alarm_id),
                    (COUNT_COLUMN, count),
                    (ALARM_TEXT_COLUMN, text),
                ]
                .iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| *name)
                .collect();
                Err(InsightsError::DataFormat(format!(
                    "missing required columns: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    /// Build a record from one data row, or `None` when the row is invalid.
    fn parse_row(&self, row: &[Data]) -> Option<AlarmRecord> {
        let period = parse_period(row.get(self.month))?;
        let alarm_id = parse_alarm_id(row.get(self.alarm_id))?;
        let count = parse_count(row.get(self.count))?;
        let text = parse_text(row.get(self.text));
        Some(AlarmRecord::new(period, alarm_id, count, text))
    }
}

// ── Cell coercion ─────────────────────────────────────────────────────────────

fn parse_period(cell: Option<&Data>) -> Option<NaiveDate> {
    let raw = match cell? {
        Data::Int(i) => *i,
        Data::Float(f) => float_to_i64(*f)?,
        Data::String(s) => parse_integer(s)?,
        _ => return None,
    };
    month_start(raw)
}

fn parse_alarm_id(cell: Option<&Data>) -> Option<AlarmId> {
    match cell? {
        Data::Int(i) => Some(AlarmId::Number(*i)),
        Data::Float(f) if f.fract() == 0.0 => Some(
            float_to_i64(*f).map_or_else(|| AlarmId::Text(f.to_string()), AlarmId::Number),
        ),
        Data::Float(f) if f.is_finite() => Some(AlarmId::Text(f.to_string())),
        Data::String(s) if !s.trim().is_empty() => Some(AlarmId::Text(s.trim().to_string())),
        Data::Bool(b) => Some(AlarmId::Text(b.to_string())),
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
            cell.map(|c| AlarmId::Text(c.to_string()))
        }
        _ => None,
    }
}

/// Counts must be non-negative integers; fractional values truncate.
fn parse_count(cell: Option<&Data>) -> Option<u64> {
    let raw = match cell? {
        Data::Int(i) => *i,
        Data::Float(f) => float_to_i64(*f)?,
        Data::String(s) => parse_integer(s)?,
        _ => return None,
    };
    u64::try_from(raw).ok()
}

fn parse_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Data::Empty | Data::Error(_) | Data::String(_) => None,
        other => Some(other.to_string()),
    }
}

fn parse_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    trimmed.parse::<f64>().ok().and_then(float_to_i64)
}

/// Truncate `f` toward zero, or `None` when it is not finite or falls outside
/// the `i64` range.
fn float_to_i64(f: f64) -> Option<i64> {
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
