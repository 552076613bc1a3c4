mod bootstrap;

use anyhow::Result;
use insights_core::formatting::{format_count, format_month, format_share};
use insights_core::settings::Settings;
use insights_data::analysis::analyze_workbook;
use insights_report::{render_charts, write_summary};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Alarm Insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Workbook: {}, sheet: {}",
        settings.workbook.display(),
        settings.sheet
    );

    let analysis = analyze_workbook(&settings.workbook, &settings.sheet)?;
    tracing::debug!(
        "Load {:.3}s, aggregate {:.3}s",
        analysis.metadata.load_time_seconds,
        analysis.metadata.aggregate_time_seconds
    );

    let summary_path = write_summary(&analysis.summary, &settings.analysis_dir)?;
    let charts = render_charts(&analysis.summary, &settings.charts_dir)?;

    println!("Wrote analysis summary to {}", summary_path.display());
    for chart in &charts {
        println!("Saved {}", chart.display());
    }

    let summary = &analysis.summary;
    println!();
    println!(
        "{} records, {} to {}",
        format_count(summary.records as u64),
        summary.period_start,
        summary.period_end
    );
    println!(
        "{} alarms logged, top {} alarms cover {}",
        format_count(summary.total_alarms_logged),
        summary.top_alarms.len(),
        format_share(summary.top_alarm_share)
    );
    println!(
        "Busiest month {} ({}), quietest {} ({})",
        format_month(summary.top_month.month),
        format_count(summary.top_month.total_count),
        format_month(summary.lowest_month.month),
        format_count(summary.lowest_month.total_count)
    );

    Ok(())
}
