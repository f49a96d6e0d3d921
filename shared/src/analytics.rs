//! Historical analytics aggregation
//!
//! Bounded, read-only scan over a window of historical day records producing
//! correlation pairs, revenue grouped by weather category, headline KPIs and
//! prediction-accuracy figures. Plotting is out of scope; this only
//! assembles the data.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AutomationRule, FieldConfig, HistoricalDayRecord};
use crate::types::WeatherCategory;

/// Default historical window
pub const DEFAULT_WINDOW_DAYS: i64 = 90;

/// Golf score below this counts the day as lost to weather
const DAY_LOST_SCORE: i32 = 30;
/// Good-weather / bad-weather cut points for occupancy comparison
const GOOD_WEATHER_SCORE: i32 = 70;
const BAD_WEATHER_SCORE: i32 = 40;

/// One scatter-plot point: playability vs occupancy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub date: NaiveDate,
    pub golf_score: i32,
    pub occupancy_pct: f64,
    pub is_weekend: bool,
}

/// Revenue summed over one weather category band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueByCategory {
    pub category: WeatherCategory,
    pub revenue: Decimal,
    pub days: i64,
    pub avg_revenue: Decimal,
}

/// Headline KPIs over the window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsKpis {
    pub total_days: usize,
    pub days_lost_to_weather: usize,
    pub avg_occupancy_good_weather_pct: f64,
    pub avg_occupancy_bad_weather_pct: f64,
    pub total_revenue: Decimal,
    /// `days_lost × capacity × average rate`
    pub revenue_lost_estimate: Decimal,
    /// `100 − MAPE` over tracked days, floored at 0; None when nothing
    /// is tracked yet
    pub prediction_accuracy_pct: Option<f64>,
}

/// How close one prediction landed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyBadge {
    /// Within 15 occupancy points
    Accurate,
    /// Within 30 occupancy points
    Close,
    Missed,
}

pub fn classify_accuracy(delta_pts: f64) -> AccuracyBadge {
    if delta_pts <= 15.0 {
        AccuracyBadge::Accurate
    } else if delta_pts <= 30.0 {
        AccuracyBadge::Close
    } else {
        AccuracyBadge::Missed
    }
}

/// One tracked day in the accuracy timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyEntry {
    pub date: NaiveDate,
    pub predicted_pct: f64,
    pub actual_pct: f64,
    pub delta_pts: f64,
    pub badge: AccuracyBadge,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccuracyDistribution {
    pub accurate: usize,
    pub close: usize,
    pub missed: usize,
}

/// Accuracy block over days carrying both predicted and actual occupancy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub tracked_days: usize,
    pub avg_delta_pts: f64,
    pub distribution: AccuracyDistribution,
    pub timeline: Vec<AccuracyEntry>,
}

/// Cumulative totals over the automation rule set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationStatsSummary {
    pub total_sent: i64,
    pub total_bookings: i64,
    pub total_revenue: Decimal,
    pub avg_open_rate_pct: f64,
}

/// Full analytics report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub correlation: Vec<CorrelationPoint>,
    pub revenue_by_category: Vec<RevenueByCategory>,
    pub kpis: AnalyticsKpis,
    pub accuracy: AccuracySummary,
    pub automation_stats: AutomationStatsSummary,
}

/// Aggregate a window of historical records into the analytics report
pub fn aggregate(
    records: &[HistoricalDayRecord],
    config: &FieldConfig,
    rules: &[AutomationRule],
) -> AnalyticsReport {
    let correlation: Vec<CorrelationPoint> = records
        .iter()
        .filter_map(|r| {
            let occupancy_pct = r.effective_occupancy_pct()?;
            Some(CorrelationPoint {
                date: r.date,
                golf_score: r.golf_score,
                occupancy_pct,
                is_weekend: matches!(r.date.weekday(), Weekday::Sat | Weekday::Sun),
            })
        })
        .collect();

    let mut by_category: BTreeMap<WeatherCategory, (Decimal, i64)> = BTreeMap::new();
    for record in records {
        let category = WeatherCategory::from_golf_score(record.golf_score);
        let entry = by_category.entry(category).or_insert((Decimal::ZERO, 0));
        entry.0 += record.effective_revenue();
        entry.1 += 1;
    }
    let revenue_by_category = by_category
        .into_iter()
        .map(|(category, (revenue, days))| RevenueByCategory {
            category,
            revenue,
            days,
            avg_revenue: (revenue / Decimal::from(days)).round_dp(2),
        })
        .collect();

    let kpis = compute_kpis(records, config);
    let accuracy = compute_accuracy(records);
    let automation_stats = summarize_automation_stats(rules);

    AnalyticsReport {
        correlation,
        revenue_by_category,
        kpis,
        accuracy,
        automation_stats,
    }
}

fn compute_kpis(records: &[HistoricalDayRecord], config: &FieldConfig) -> AnalyticsKpis {
    let total_days = records.len();
    let days_lost_to_weather = records
        .iter()
        .filter(|r| r.golf_score < DAY_LOST_SCORE)
        .count();

    let avg_occupancy = |predicate: &dyn Fn(&HistoricalDayRecord) -> bool| -> f64 {
        let occupancies: Vec<f64> = records
            .iter()
            .filter(|r| predicate(r))
            .filter_map(|r| r.effective_occupancy_pct())
            .collect();
        if occupancies.is_empty() {
            0.0
        } else {
            occupancies.iter().sum::<f64>() / occupancies.len() as f64
        }
    };

    let total_revenue: Decimal = records.iter().map(|r| r.effective_revenue()).sum();
    let revenue_lost_estimate = Decimal::from(days_lost_to_weather as i64)
        * Decimal::from(config.capacity)
        * config.average_rate();

    AnalyticsKpis {
        total_days,
        days_lost_to_weather,
        avg_occupancy_good_weather_pct: avg_occupancy(&|r| r.golf_score >= GOOD_WEATHER_SCORE),
        avg_occupancy_bad_weather_pct: avg_occupancy(&|r| r.golf_score < BAD_WEATHER_SCORE),
        total_revenue,
        revenue_lost_estimate,
        prediction_accuracy_pct: prediction_accuracy(records),
    }
}

/// `100 − mean absolute percentage error` over tracked days, floored at 0.
/// Days with an actual occupancy of 0 are skipped: the ratio is undefined.
fn prediction_accuracy(records: &[HistoricalDayRecord]) -> Option<f64> {
    let errors: Vec<f64> = records
        .iter()
        .filter_map(|r| {
            let predicted = r.predicted_occupancy_pct?;
            let actual = r.actual_occupancy_pct?;
            if actual == 0.0 {
                return None;
            }
            Some(((predicted - actual).abs() / actual) * 100.0)
        })
        .collect();

    if errors.is_empty() {
        return None;
    }
    let mape = errors.iter().sum::<f64>() / errors.len() as f64;
    Some((100.0 - mape).max(0.0))
}

fn compute_accuracy(records: &[HistoricalDayRecord]) -> AccuracySummary {
    let timeline: Vec<AccuracyEntry> = records
        .iter()
        .filter_map(|r| {
            let predicted_pct = r.predicted_occupancy_pct?;
            let actual_pct = r.actual_occupancy_pct?;
            let delta_pts = (predicted_pct - actual_pct).abs();
            Some(AccuracyEntry {
                date: r.date,
                predicted_pct,
                actual_pct,
                delta_pts,
                badge: classify_accuracy(delta_pts),
            })
        })
        .collect();

    let tracked_days = timeline.len();
    let avg_delta_pts = if tracked_days == 0 {
        0.0
    } else {
        timeline.iter().map(|e| e.delta_pts).sum::<f64>() / tracked_days as f64
    };

    let mut distribution = AccuracyDistribution::default();
    for entry in &timeline {
        match entry.badge {
            AccuracyBadge::Accurate => distribution.accurate += 1,
            AccuracyBadge::Close => distribution.close += 1,
            AccuracyBadge::Missed => distribution.missed += 1,
        }
    }

    AccuracySummary {
        tracked_days,
        avg_delta_pts,
        distribution,
        timeline,
    }
}

/// Sum the cumulative counters over the rule set
pub fn summarize_automation_stats(rules: &[AutomationRule]) -> AutomationStatsSummary {
    let total_sent = rules.iter().map(|r| r.stats.sent).sum();
    let total_bookings = rules.iter().map(|r| r.stats.bookings).sum();
    let total_revenue = rules.iter().map(|r| r.stats.revenue).sum();
    let avg_open_rate_pct = if rules.is_empty() {
        0.0
    } else {
        rules.iter().map(|r| r.stats.open_rate_pct).sum::<f64>() / rules.len() as f64
    };

    AutomationStatsSummary {
        total_sent,
        total_bookings,
        total_revenue,
        avg_open_rate_pct,
    }
}
