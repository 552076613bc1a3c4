use chrono::NaiveDate;

/// Format an occurrence count with thousands separators.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a month as `YYYY-MM`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use insights_core::formatting::format_month;
///
/// let month = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(format_month(month), "2024-03");
/// ```
pub fn format_month(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// Round `value` to `decimal_places` digits after the point.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::round_to;
///
/// assert_eq!(round_to(0.123456, 4), 0.1235);
/// assert_eq!(round_to(1.0, 4), 1.0);
/// ```
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10_f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}

/// Render a fractional share as a percentage with one decimal, or `"n/a"`
/// when the share is undefined.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_share;
///
/// assert_eq!(format_share(Some(0.875)), "87.5%");
/// assert_eq!(format_share(Some(1.0)), "100.0%");
/// assert_eq!(format_share(None), "n/a");
/// ```
pub fn format_share(share: Option<f64>) -> String {
    match share {
        Some(s) => format!("{:.1}%", s * 100.0),
        None => "n/a".to_string(),
    }
}

/// Shorten `text` to at most `max_chars` characters, ending with `…` when
/// anything was cut. Used for chart axis labels.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
