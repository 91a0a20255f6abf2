//! Dashboard aggregation functions.
//!
//! Pure functions over maintenance query results: monthly histogram,
//! month-over-month trend, distribution by automation and the 30-day
//! snapshot cards. They never mutate storage and never fail on empty
//! input; absence of data degrades to zero counts and N/A labels. The
//! clock is injected so callers pass `Utc::now()` and tests pass a fixed
//! date.

use crate::models::Maintenance;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// Fixed palette cycled by bucket index in the distribution chart.
pub const CHART_COLORS: [&str; 6] = [
    "#4299E1", "#48BB78", "#ECC94B", "#F56565", "#9F7AEA", "#38B2AC",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One calendar-month bucket of the maintenance histogram.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyBucket {
    /// Full English month name
    pub month: String,
    pub year: i32,
    /// Maintenance events dated in this month
    pub maintenance: u64,
}

/// One slice of the distribution pie.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DistributionBucket {
    /// Automation name, or "Others" for the collapsed tail
    pub system: String,
    pub maintenance: u64,
    /// Palette color assigned by final bucket index
    pub fill: String,
}

/// Distribution of maintenance events by automation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Distribution {
    pub buckets: Vec<DistributionBucket>,
    /// Sum of all bucket counts
    pub total: u64,
}

/// Dashboard card metrics over the trailing 30 days.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    /// Distinct automations with maintenance in the window
    pub automations_serviced: u64,
    /// Total maintenance records in the window
    pub total_maintenance: u64,
    /// Events per automation, rounded to 1 decimal; None when no
    /// automation appears in the window
    pub efficiency: Option<f64>,
    /// Automation name with the highest count in the window
    pub most_maintained: Option<String>,
}

impl DashboardSnapshot {
    /// Card label: "4.5/month", or "N/A" when no automation was serviced.
    pub fn efficiency_label(&self) -> String {
        match self.efficiency {
            Some(value) => format!("{}/month", value),
            None => "N/A".to_string(),
        }
    }

    /// Card label: the top automation name, "None" when records exist but
    /// none carries an automation, "N/A" when the window is empty.
    pub fn most_maintained_label(&self) -> String {
        if self.total_maintenance == 0 {
            return "N/A".to_string();
        }
        self.most_maintained
            .clone()
            .unwrap_or_else(|| "None".to_string())
    }
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month as usize - 1) % 12]
}

/// Step `months_back` whole calendar months backwards from (year, month).
fn month_offset(year: i32, month: u32, months_back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - months_back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Six calendar-month buckets ending in `today`'s month, chronological.
/// Records are matched into buckets by month name plus year, so a bucket
/// never absorbs the same month of another year.
pub fn monthly_histogram(records: &[Maintenance], today: NaiveDate) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = (0..6)
        .rev()
        .map(|back| {
            let (year, month) = month_offset(today.year(), today.month(), back);
            MonthlyBucket {
                month: month_name(month).to_string(),
                year,
                maintenance: 0,
            }
        })
        .collect();

    for record in records {
        let Some(date) = record.date else { continue };
        let name = month_name(date.month());
        let year = date.year();
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| b.month == name && b.year == year)
        {
            bucket.maintenance += 1;
        }
    }

    buckets
}

/// Month-over-month trend of the last two buckets, as a percentage rounded
/// to 1 decimal. Zero when the previous month had no events or fewer than
/// two buckets exist, never infinity or NaN.
pub fn trend_percentage(buckets: &[MonthlyBucket]) -> f64 {
    if buckets.len() < 2 {
        return 0.0;
    }
    let current = buckets[buckets.len() - 1].maintenance as f64;
    let previous = buckets[buckets.len() - 2].maintenance as f64;
    if previous <= 0.0 {
        return 0.0;
    }
    round1((current - previous) / previous * 100.0)
}

/// Maintenance counts grouped by automation name, descending. More than
/// five distinct automations collapse to the top four plus an "Others"
/// bucket summing the remainder, which always sits last. Rows without an
/// automation are excluded.
pub fn distribution_by_automation(records: &[Maintenance]) -> Distribution {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records {
        if let Some(automation) = &record.automation {
            *counts.entry(automation.name.clone()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    // Deterministic order: count descending, name ascending on ties.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if ranked.len() > 5 {
        let tail: u64 = ranked.split_off(4).into_iter().map(|(_, n)| n).sum();
        ranked.push(("Others".to_string(), tail));
    }

    let total = ranked.iter().map(|(_, n)| n).sum();
    let buckets = ranked
        .into_iter()
        .enumerate()
        .map(|(index, (system, maintenance))| DistributionBucket {
            system,
            maintenance,
            fill: CHART_COLORS[index % CHART_COLORS.len()].to_string(),
        })
        .collect();

    Distribution { buckets, total }
}

/// Card metrics over records dated within the last 30 days of `today`.
pub fn thirty_day_snapshot(records: &[Maintenance], today: DateTime<Utc>) -> DashboardSnapshot {
    let cutoff = today - Duration::days(30);
    let window: Vec<&Maintenance> = records
        .iter()
        .filter(|r| r.date.is_some_and(|d| d >= cutoff))
        .collect();

    let mut distinct: Vec<Uuid> = window.iter().filter_map(|r| r.automation_id()).collect();
    distinct.sort_unstable();
    distinct.dedup();

    let total_maintenance = window.len() as u64;
    let automations_serviced = distinct.len() as u64;

    let efficiency = (automations_serviced > 0)
        .then(|| round1(total_maintenance as f64 / automations_serviced as f64));

    let mut name_counts: HashMap<&str, u64> = HashMap::new();
    for record in &window {
        if let Some(automation) = &record.automation {
            *name_counts.entry(automation.name.as_str()).or_insert(0) += 1;
        }
    }
    let most_maintained = name_counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name.to_string());

    DashboardSnapshot {
        automations_serviced,
        total_maintenance,
        efficiency,
        most_maintained,
    }
}
