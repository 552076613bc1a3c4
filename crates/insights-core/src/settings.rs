use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Generate alarm insights, charts, and JSON summary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "alarm-insights",
    about = "Generate alarm insights, charts, and JSON summary.",
    version
)]
pub struct Settings {
    /// Path to the Excel workbook
    #[arg(long, default_value = "infineon.xlsx")]
    pub workbook: PathBuf,

    /// Sheet name containing aggregated alarm data
    #[arg(long, default_value = "AlarmData")]
    pub sheet: String,

    /// Directory for summary output
    #[arg(long, default_value = "analysis")]
    pub analysis_dir: PathBuf,

    /// Directory for generated charts
    #[arg(long, default_value = "charts")]
    pub charts_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply post-parse overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list so the
    /// parsing can be unit-tested.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::resolve_overrides(Settings::parse_from(args))
    }

    /// `--debug` wins over whatever `--log-level` says.
    fn resolve_overrides(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
