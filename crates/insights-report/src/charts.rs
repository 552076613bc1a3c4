//! SVG chart rendering for the alarm summary.
//!
//! Figure sizes are given in inches and converted to pixels at [`CHART_DPI`],
//! so all three charts share the same resolution.

use std::path::{Path, PathBuf};

use insights_core::formatting::{format_count, format_month, truncate_label};
use insights_core::models::{AlarmSummary, AlarmTotal, CategoryTotal, MonthlyTotal};
use insights_core::{InsightsError, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

pub const CHART_DPI: u32 = 150;

pub const TOP_ALARMS_FILE: &str = "top_alarms.svg";
pub const MONTHLY_TOTALS_FILE: &str = "monthly_totals.svg";
pub const CATEGORY_TOTALS_FILE: &str = "category_totals.svg";

const FONT: &str = "sans-serif";
const TOP_ALARMS_COLOR: RGBColor = RGBColor(0x25, 0x63, 0xeb);
const MONTHLY_COLOR: RGBColor = RGBColor(0x16, 0xa3, 0x4a);

/// Longest alarm text shown next to a bar.
const MAX_LABEL_CHARS: usize = 48;

/// Width of the bar-label gutter relative to the largest bar.
const LABEL_SPACE_RATIO: f64 = 0.6;

/// Viridis anchor colours at 0, 0.25, 0.5, 0.75 and 1.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Render all three charts into `charts_dir`, creating it when needed.
///
/// Returns the written paths in a fixed order: top alarms, monthly totals,
/// category totals.
pub fn render_charts(summary: &AlarmSummary, charts_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(charts_dir).map_err(|source| InsightsError::FileWrite {
        path: charts_dir.to_path_buf(),
        source,
    })?;

    let period = format!("{} to {}", summary.period_start, summary.period_end);
    let paths = vec![
        plot_top_alarms(&summary.top_alarms, &period, charts_dir)?,
        plot_monthly_totals(&summary.monthly_totals, charts_dir)?,
        plot_category_totals(&summary.category_totals, charts_dir)?,
    ];

    for path in &paths {
        debug!("Rendered chart {}", path.display());
    }
    Ok(paths)
}

/// Horizontal bar chart of the top alarms, largest at the top.
pub fn plot_top_alarms(top: &[AlarmTotal], period: &str, charts_dir: &Path) -> Result<PathBuf> {
    let path = charts_dir.join(TOP_ALARMS_FILE);
    let bars: Vec<Bar> = top
        .iter()
        .map(|t| Bar {
            label: truncate_label(&t.alarm_text, MAX_LABEL_CHARS),
            value: t.count,
            color: TOP_ALARMS_COLOR,
        })
        .collect();

    let x_desc = format!("Total occurrences ({})", period);
    draw_horizontal_bars(
        &path,
        figure_size(10.0, 6.0),
        "Top 10 Alarm Types by Total Count",
        &x_desc,
        &bars,
    )?;
    Ok(path)
}

/// Line chart of total occurrences per month.
pub fn plot_monthly_totals(monthly: &[MonthlyTotal], charts_dir: &Path) -> Result<PathBuf> {
    let path = charts_dir.join(MONTHLY_TOTALS_FILE);
    draw_monthly_line(&path, figure_size(11.0, 5.0), monthly)?;
    Ok(path)
}

/// Horizontal bar chart of occurrences per category, one viridis colour per
/// bar.
pub fn plot_category_totals(categories: &[CategoryTotal], charts_dir: &Path) -> Result<PathBuf> {
    let path = charts_dir.join(CATEGORY_TOTALS_FILE);
    let n = categories.len();
    let bars: Vec<Bar> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| Bar {
            label: c.category.label().to_string(),
            value: c.count,
            color: viridis((i as f64 + 0.5) / n as f64),
        })
        .collect();

    draw_horizontal_bars(
        &path,
        figure_size(9.0, 5.0),
        "Alarm Volume by Cause Category",
        "Total occurrences",
        &bars,
    )?;
    Ok(path)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

struct Bar {
    label: String,
    value: u64,
    color: RGBColor,
}

/// Pixel dimensions of a figure `width_in` × `height_in` inches.
fn figure_size(width_in: f64, height_in: f64) -> (u32, u32) {
    let dpi = f64::from(CHART_DPI);
    ((width_in * dpi).round() as u32, (height_in * dpi).round() as u32)
}

fn chart_err<E: std::fmt::Display>(err: E) -> InsightsError {
    InsightsError::Chart(err.to_string())
}

/// Draw `bars` top to bottom in the given order.
///
/// Labels sit in a gutter left of the zero line, which is why the x range
/// starts below zero and negative tick labels are blanked.
fn draw_horizontal_bars(
    path: &Path,
    size: (u32, u32),
    title: &str,
    x_desc: &str,
    bars: &[Bar],
) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let slots = bars.len().max(1);
    let max = bars.iter().map(|b| b.value).max().unwrap_or(0).max(1) as f64;
    let label_space = max * LABEL_SPACE_RATIO;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(0)
        .build_cartesian_2d(-label_space..max * 1.15, 0f64..slots as f64)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_label_formatter(&|v| {
            if *v < 0.0 {
                String::new()
            } else {
                format!("{:.0}", v)
            }
        })
        .x_desc(x_desc)
        .axis_desc_style((FONT, 18))
        .label_style((FONT, 13))
        .draw()
        .map_err(chart_err)?;

    // Slot 0 is the bottom row.
    let slot_of = |k: usize| (slots - 1 - k) as f64;

    chart
        .draw_series(bars.iter().enumerate().map(|(k, bar)| {
            let y = slot_of(k);
            Rectangle::new(
                [(0.0, y + 0.15), (bar.value as f64, y + 0.85)],
                bar.color.filled(),
            )
        }))
        .map_err(chart_err)?;

    let label_style =
        TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Right, VPos::Center));
    chart
        .draw_series(bars.iter().enumerate().map(|(k, bar)| {
            Text::new(
                bar.label.clone(),
                (-max * 0.01, slot_of(k) + 0.5),
                label_style.clone(),
            )
        }))
        .map_err(chart_err)?;

    let value_style =
        TextStyle::from((FONT, 13).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
    chart
        .draw_series(bars.iter().enumerate().map(|(k, bar)| {
            Text::new(
                format_count(bar.value),
                (bar.value as f64 + max * 0.01, slot_of(k) + 0.5),
                value_style.clone(),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Draw `monthly` as a line with a marker per month, one x slot per month.
fn draw_monthly_line(path: &Path, size: (u32, u32), monthly: &[MonthlyTotal]) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let n = monthly.len();
    let max = monthly
        .iter()
        .map(|m| m.total_count)
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let labels: Vec<String> = monthly.iter().map(|m| format_month(m.month)).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Alarm Totals", (FONT, 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5).max(0.5), 0f64..max * 1.1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(n.max(1))
        .x_label_formatter(&|v| month_label(&labels, *v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc("Month")
        .y_desc("Alarm occurrences")
        .axis_desc_style((FONT, 18))
        .label_style((FONT, 13))
        .draw()
        .map_err(chart_err)?;

    let points: Vec<(f64, f64)> = monthly
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.total_count as f64))
        .collect();

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            MONTHLY_COLOR.stroke_width(2),
        ))
        .map_err(chart_err)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, 4, MONTHLY_COLOR.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Tick label for month index `v`; blank between whole indices.
fn month_label(labels: &[String], v: f64) -> String {
    let idx = v.round();
    if idx < 0.0 || (v - idx).abs() > 1e-6 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Sample the viridis colour map at `t` in `[0, 1]`.
fn viridis(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f64;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[lo + 1]);
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * frac).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insights_core::models::{AlarmId, Category};
    use tempfile::TempDir;

    fn sample_summary() -> AlarmSummary {
        let jan = MonthlyTotal {
            month: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            total_count: 15,
            unique_alarms: 2,
        };
        let feb = MonthlyTotal {
            month: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            total_count: 3,
            unique_alarms: 1,
        };
        AlarmSummary {
            records: 3,
            period_start: "2024-01".to_string(),
            period_end: "2024-02".to_string(),
            total_alarms_logged: 18,
            top_alarm_share: Some(1.0),
            top_alarms: vec![
                AlarmTotal {
                    alarm_id: AlarmId::Text("A1".to_string()),
                    alarm_text: "E84 timeout".to_string(),
                    count: 13,
                },
                AlarmTotal {
                    alarm_id: AlarmId::Text("A2".to_string()),
                    alarm_text: "foup lock failure".to_string(),
                    count: 5,
                },
            ],
            top_month: jan.clone(),
            lowest_month: feb.clone(),
            monthly_totals: vec![jan, feb],
            category_totals: vec![
                CategoryTotal {
                    category: Category::E84Handshaking,
                    count: 13,
                },
                CategoryTotal {
                    category: Category::FoupHandling,
                    count: 5,
                },
            ],
        }
    }

    fn read_svg(path: &Path) -> String {
        let content = std::fs::read_to_string(path).expect("chart file");
        assert!(content.contains("<svg"), "not an svg: {}", path.display());
        content
    }

    // ── render_charts ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_charts_writes_three_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("charts");

        let paths = render_charts(&sample_summary(), &dir).unwrap();

        assert_eq!(
            paths,
            vec![
                dir.join(TOP_ALARMS_FILE),
                dir.join(MONTHLY_TOTALS_FILE),
                dir.join(CATEGORY_TOTALS_FILE),
            ]
        );
        for path in &paths {
            read_svg(path);
        }
    }

    #[test]
    fn test_render_charts_fails_when_dir_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("charts");
        std::fs::write(&blocker, "file").unwrap();

        let err = render_charts(&sample_summary(), &blocker).unwrap_err();
        assert!(matches!(err, InsightsError::FileWrite { path, .. } if path == blocker));
    }

    #[test]
    fn test_chart_titles() {
        let tmp = TempDir::new().unwrap();
        let paths = render_charts(&sample_summary(), tmp.path()).unwrap();

        assert!(read_svg(&paths[0]).contains("Top 10 Alarm Types by Total Count"));
        assert!(read_svg(&paths[1]).contains("Monthly Alarm Totals"));
        assert!(read_svg(&paths[2]).contains("Alarm Volume by Cause Category"));
    }

    #[test]
    fn test_top_alarms_chart_has_labels() {
        let tmp = TempDir::new().unwrap();
        let summary = sample_summary();
        let path = plot_top_alarms(&summary.top_alarms, "2024-01 to 2024-02", tmp.path()).unwrap();
        let svg = read_svg(&path);
        assert!(svg.contains("E84 timeout"));
        assert!(svg.contains("foup lock failure"));
    }

    #[test]
    fn test_charts_overwrite_existing_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(MONTHLY_TOTALS_FILE), "stale").unwrap();

        let path = plot_monthly_totals(&sample_summary().monthly_totals, tmp.path()).unwrap();

        assert!(read_svg(&path).contains("Monthly Alarm Totals"));
    }

    #[test]
    fn test_single_month_and_empty_bars_render() {
        let tmp = TempDir::new().unwrap();
        let mut summary = sample_summary();
        summary.monthly_totals.truncate(1);
        summary.top_alarms.clear();

        let paths = render_charts(&summary, tmp.path()).unwrap();
        assert_eq!(paths.len(), 3);
    }

    // ── helpers ───────────────────────────────────────────────────────────────

    #[test]
    fn test_figure_size_at_150_dpi() {
        assert_eq!(figure_size(10.0, 6.0), (1500, 900));
        assert_eq!(figure_size(11.0, 5.0), (1650, 750));
        assert_eq!(figure_size(9.0, 5.0), (1350, 750));
    }

    #[test]
    fn test_month_label() {
        let labels = vec!["2024-01".to_string(), "2024-02".to_string()];
        assert_eq!(month_label(&labels, 0.0), "2024-01");
        assert_eq!(month_label(&labels, 1.0), "2024-02");
        assert_eq!(month_label(&labels, 0.5), "");
        assert_eq!(month_label(&labels, -0.5), "");
        assert_eq!(month_label(&labels, 2.0), "");
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
        assert_eq!(viridis(0.5), RGBColor(33, 145, 140));
    }
}
