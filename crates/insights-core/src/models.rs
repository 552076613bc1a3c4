use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cause category assigned to an alarm by keyword matching.
///
/// Variants are listed in rule priority order; see
/// [`crate::categories::CATEGORY_RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "E84 handshaking & interlocks")]
    E84Handshaking,
    #[serde(rename = "FOUP handling & lock issues")]
    FoupHandling,
    #[serde(rename = "Robot hand motion/control")]
    RobotHandMotion,
    #[serde(rename = "Sensors & detection")]
    SensorsDetection,
    #[serde(rename = "Communication & power")]
    CommunicationPower,
    #[serde(rename = "Other / misc")]
    Other,
}

impl Category {
    /// Every category, fallback last.
    pub const ALL: [Category; 6] = [
        Category::E84Handshaking,
        Category::FoupHandling,
        Category::RobotHandMotion,
        Category::SensorsDetection,
        Category::CommunicationPower,
        Category::Other,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Category::E84Handshaking => "E84 handshaking & interlocks",
            Category::FoupHandling => "FOUP handling & lock issues",
            Category::RobotHandMotion => "Robot hand motion/control",
            Category::SensorsDetection => "Sensors & detection",
            Category::CommunicationPower => "Communication & power",
            Category::Other => "Other / misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Alarm identifier as it appears in the sheet: numeric codes stay numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlarmId {
    Number(i64),
    Text(String),
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmId::Number(n) => write!(f, "{}", n),
            AlarmId::Text(s) => f.write_str(s),
        }
    }
}

/// One row of the alarm sheet after validation and categorization.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmRecord {
    /// First day of the month the counts belong to.
    pub period: NaiveDate,
    pub alarm_id: AlarmId,
    /// Number of occurrences logged for this alarm in `period`.
    pub count: u64,
    /// Free-text alarm description; `None` when the cell was blank.
    pub text: Option<String>,
    pub category: Category,
}

impl AlarmRecord {
    /// Build a record, deriving its category from `text`.
    pub fn new(period: NaiveDate, alarm_id: AlarmId, count: u64, text: Option<String>) -> Self {
        let category = crate::categories::categorize(text.as_deref().unwrap_or_default());
        Self {
            period,
            alarm_id,
            count,
            text,
            category,
        }
    }
}

/// Summed count for one `(alarm id, alarm text)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmTotal {
    #[serde(rename = "Alarm_ID")]
    pub alarm_id: AlarmId,
    #[serde(rename = "AlarmText")]
    pub alarm_text: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    #[serde(rename = "Month")]
    pub month: NaiveDate,
    pub total_count: u64,
    /// Number of distinct alarm ids seen in the month.
    pub unique_alarms: usize,
}

/// Summed count for one cause category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Count")]
    pub count: u64,
}

/// Statistical summary written to `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmSummary {
    /// Number of valid records the summary was built from.
    pub records: usize,
    /// Earliest month, formatted `YYYY-MM`.
    pub period_start: String,
    /// Latest month, formatted `YYYY-MM`.
    pub period_end: String,
    pub total_alarms_logged: u64,
    /// Fraction of all occurrences covered by `top_alarms`, rounded to four
    /// decimals. `None` when nothing was logged.
    pub top_alarm_share: Option<f64>,
    pub top_alarms: Vec<AlarmTotal>,
    pub top_month: MonthlyTotal,
    pub lowest_month: MonthlyTotal,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub category_totals: Vec<CategoryTotal>,
}
