use std::path::{Path, PathBuf};

use insights_core::models::AlarmSummary;
use insights_core::{InsightsError, Result};
use tracing::debug;

/// File name of the JSON summary inside the analysis directory.
pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// Serialize `summary` as pretty-printed JSON.
pub fn render_summary(summary: &AlarmSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Write `summary.json` into `analysis_dir`, creating the directory when
/// needed and replacing any previous file.
///
/// Returns the path of the written file.
pub fn write_summary(summary: &AlarmSummary, analysis_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(analysis_dir).map_err(|source| InsightsError::FileWrite {
        path: analysis_dir.to_path_buf(),
        source,
    })?;

    let path = analysis_dir.join(SUMMARY_FILE_NAME);
    let json = render_summary(summary)?;

    // Write to a temp file then rename so a failed run never leaves a
    // truncated summary behind.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|source| InsightsError::FileWrite {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, &path).map_err(|source| InsightsError::FileWrite {
        path: path.clone(),
        source,
    })?;

    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(path)
}
