use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the alarm insights pipeline.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// The workbook path does not exist.
    #[error("Source workbook not found: {0}")]
    SourceNotFound(PathBuf),

    /// The workbook exists but has no sheet with the requested name.
    #[error("Sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    /// The sheet layout does not match what the loader expects.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// The workbook could not be opened or decoded.
    #[error("Failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// No valid records remained after filtering.
    #[error("No valid alarm records to summarize")]
    EmptyDataset,

    /// An output file could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chart could not be drawn or saved.
    #[error("Chart rendering error: {0}")]
    Chart(String),

    /// The summary could not be serialized.
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the insights crates.
pub type Result<T> = std::result::Result<T, InsightsError>;
