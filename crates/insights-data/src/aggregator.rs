//! Grouped aggregation over alarm records.
//!
//! Every grouping walks its keys in ascending order and sorts with a stable
//! sort, so equal totals keep that key order.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use insights_core::formatting::{format_month, round_to};
use insights_core::models::{
    AlarmId, AlarmRecord, AlarmSummary, AlarmTotal, Category, CategoryTotal, MonthlyTotal,
};
use insights_core::{InsightsError, Result};
use tracing::{debug, warn};

/// Number of alarms listed in the top-alarms ranking.
pub const TOP_ALARM_LIMIT: usize = 10;

/// Decimal places kept for `top_alarm_share`.
pub const SHARE_DECIMALS: u32 = 4;

// ── MonthAccumulator ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct MonthAccumulator<'a> {
    total_count: u64,
    alarm_ids: BTreeSet<&'a AlarmId>,
}

// ── AlarmAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups alarm records and builds the summary.
pub struct AlarmAggregator;

impl AlarmAggregator {
    /// Sum of all record counts.
    ///
    /// Fails with [`InsightsError::DataFormat`] when the sum does not fit in a
    /// `u64`. Every grouped sum is bounded by this total.
    pub fn grand_total(records: &[AlarmRecord]) -> Result<u64> {
        records
            .iter()
            .try_fold(0u64, |acc, r| acc.checked_add(r.count))
            .ok_or_else(|| {
                InsightsError::DataFormat("total alarm count overflows u64".to_string())
            })
    }

    /// Rank `(alarm id, alarm text)` pairs by summed count, descending, and
    /// keep the first `limit`.
    ///
    /// Records without alarm text are not part of any pair.
    pub fn top_alarms(records: &[AlarmRecord], limit: usize) -> Vec<AlarmTotal> {
        let mut groups: BTreeMap<(&AlarmId, &str), u64> = BTreeMap::new();
        for record in records {
            if let Some(text) = record.text.as_deref() {
                let total = groups.entry((&record.alarm_id, text)).or_default();
                *total = total.saturating_add(record.count);
            }
        }

        let mut totals: Vec<AlarmTotal> = groups
            .into_iter()
            .map(|((alarm_id, text), count)| AlarmTotal {
                alarm_id: alarm_id.clone(),
                alarm_text: text.to_string(),
                count,
            })
            .collect();

        totals.sort_by(|a, b| b.count.cmp(&a.count));
        totals.truncate(limit);
        totals
    }

    /// Per-month totals and distinct alarm ids, ordered by month.
    pub fn monthly_totals(records: &[AlarmRecord]) -> Vec<MonthlyTotal> {
        let mut months: BTreeMap<NaiveDate, MonthAccumulator<'_>> = BTreeMap::new();
        for record in records {
            let acc = months.entry(record.period).or_default();
            acc.total_count = acc.total_count.saturating_add(record.count);
            acc.alarm_ids.insert(&record.alarm_id);
        }

        months
            .into_iter()
            .map(|(month, acc)| MonthlyTotal {
                month,
                total_count: acc.total_count,
                unique_alarms: acc.alarm_ids.len(),
            })
            .collect()
    }

    /// Per-category totals, largest first. Only categories that occur are
    /// listed.
    pub fn category_totals(records: &[AlarmRecord]) -> Vec<CategoryTotal> {
        let mut groups: BTreeMap<&'static str, (Category, u64)> = BTreeMap::new();
        for record in records {
            let total = &mut groups
                .entry(record.category.label())
                .or_insert((record.category, 0))
                .1;
            *total = total.saturating_add(record.count);
        }

        let mut totals: Vec<CategoryTotal> = groups
            .into_values()
            .map(|(category, count)| CategoryTotal { category, count })
            .collect();
        totals.sort_by(|a, b| b.count.cmp(&a.count));
        totals
    }

    /// Months with the highest and lowest `total_count`. Ties go to the
    /// earliest month. `None` when `monthly` is empty.
    pub fn extrema(monthly: &[MonthlyTotal]) -> Option<(&MonthlyTotal, &MonthlyTotal)> {
        let first = monthly.first()?;
        let mut top = first;
        let mut lowest = first;
        for month in &monthly[1..] {
            if month.total_count > top.total_count {
                top = month;
            }
            if month.total_count < lowest.total_count {
                lowest = month;
            }
        }
        Some((top, lowest))
    }

    /// Fraction of `grand_total` covered by `top`, rounded to
    /// [`SHARE_DECIMALS`]. `None` when `grand_total` is zero.
    pub fn top_alarm_share(top: &[AlarmTotal], grand_total: u64) -> Option<f64> {
        if grand_total == 0 {
            return None;
        }
        let covered = top.iter().fold(0u64, |acc, t| acc.saturating_add(t.count));
        Some(round_to(
            covered as f64 / grand_total as f64,
            SHARE_DECIMALS,
        ))
    }

    /// Build the full summary for `records`.
    ///
    /// Fails with [`InsightsError::EmptyDataset`] when there are no records and
    /// with [`InsightsError::DataFormat`] when the counts overflow.
    pub fn build_summary(records: &[AlarmRecord]) -> Result<AlarmSummary> {
        if records.is_empty() {
            return Err(InsightsError::EmptyDataset);
        }
        let total_alarms_logged = Self::grand_total(records)?;

        let monthly_totals = Self::monthly_totals(records);
        let (top_month, lowest_month) = Self::extrema(&monthly_totals)
            .map(|(top, low)| (top.clone(), low.clone()))
            .ok_or(InsightsError::EmptyDataset)?;

        let period_start = monthly_totals
            .first()
            .map(|m| format_month(m.month))
            .unwrap_or_default();
        let period_end = monthly_totals
            .last()
            .map(|m| format_month(m.month))
            .unwrap_or_default();

        let top_alarms = Self::top_alarms(records, TOP_ALARM_LIMIT);
        let top_alarm_share = Self::top_alarm_share(&top_alarms, total_alarms_logged);
        if top_alarm_share.is_none() {
            warn!("No alarm occurrences logged; top alarm share is undefined");
        }
        let category_totals = Self::category_totals(records);

        debug!(
            "Summary: {} records, {} months, {} categories, {} top alarms",
            records.len(),
            monthly_totals.len(),
            category_totals.len(),
            top_alarms.len()
        );

        Ok(AlarmSummary {
            records: records.len(),
            period_start,
            period_end,
            total_alarms_logged,
            top_alarm_share,
            top_alarms,
            top_month,
            lowest_month,
            monthly_totals,
            category_totals,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
