//! Analysis pipeline for the alarm workbook.
//!
//! Loads and categorizes the sheet, then aggregates it into an
//! [`AlarmSummary`] ready for the report writers.

use std::path::Path;
use std::time::Instant;

use insights_core::models::{AlarmRecord, AlarmSummary};
use insights_core::Result;
use tracing::info;

use crate::aggregator::AlarmAggregator;
use crate::reader::load_alarm_records;

// ── Public types ──────────────────────────────────────────────────────────────

/// Timing and volume information about one pipeline run. Logged, never
/// written to the summary file.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// Number of valid records that survived loading.
    pub records_loaded: usize,
    /// Wall-clock seconds spent reading the workbook.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_workbook`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub summary: AlarmSummary,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline.
///
/// 1. Load and categorize the records of `sheet` in `workbook`.
/// 2. Aggregate them into an [`AlarmSummary`].
pub fn analyze_workbook(workbook: &Path, sheet: &str) -> Result<AnalysisResult> {
    let load_start = Instant::now();
    let records = load_alarm_records(workbook, sheet)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let (summary, aggregate_time) = summarize(&records)?;

    let metadata = AnalysisMetadata {
        records_loaded: records.len(),
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    info!(
        "Analyzed {} records ({} to {}) in {:.3}s",
        metadata.records_loaded,
        summary.period_start,
        summary.period_end,
        metadata.load_time_seconds + metadata.aggregate_time_seconds
    );

    Ok(AnalysisResult { summary, metadata })
}

/// Aggregate already-loaded records, returning the summary and the seconds
/// spent.
fn summarize(records: &[AlarmRecord]) -> Result<(AlarmSummary, f64)> {
    let start = Instant::now();
    let summary = AlarmAggregator::build_summary(records)?;
    Ok((summary, start.elapsed().as_secs_f64()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
