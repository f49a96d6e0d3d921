//! Historical analytics tests

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::analytics::{
    aggregate, classify_accuracy, summarize_automation_stats, AccuracyBadge,
};
use shared::demo::{
    demo_history, is_sparse, DEMO_HISTORY_DAYS, DEMO_HISTORY_VERSION, MIN_REAL_RECORDS,
};
use shared::models::{
    default_automation_rules, AutomationRule, FieldConfig, HistoricalDayRecord, RuleStats,
};
use shared::types::WeatherCategory;

fn record(
    date: NaiveDate,
    golf_score: i32,
    predicted_pct: Option<f64>,
    actual_pct: Option<f64>,
    actual_revenue: Option<i64>,
) -> HistoricalDayRecord {
    HistoricalDayRecord {
        id: Uuid::new_v4(),
        date,
        golf_score,
        temperature_max_c: Some(20.0),
        temperature_min_c: Some(12.0),
        precipitation_sum_mm: Some(0.0),
        windspeed_max_kmh: Some(10.0),
        weather_code: Some(1),
        daylight_hours: Some(12.0),
        predicted_occupancy_pct: predicted_pct,
        predicted_reservations: predicted_pct.map(|p| (p * 0.8) as i32),
        predicted_revenue: Some(Decimal::from(2000)),
        confidence_pct: Some(95),
        actual_occupancy_pct: actual_pct,
        actual_reservations: actual_pct.map(|p| (p * 0.8) as i32),
        actual_revenue: actual_revenue.map(Decimal::from),
        is_closed: golf_score == 0,
        closure_reason: None,
    }
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

#[test]
fn empty_window_produces_an_empty_report() {
    let report = aggregate(&[], &FieldConfig::default(), &default_automation_rules());

    assert!(report.correlation.is_empty());
    assert!(report.revenue_by_category.is_empty());
    assert_eq!(report.kpis.total_days, 0);
    assert_eq!(report.kpis.days_lost_to_weather, 0);
    assert_eq!(report.kpis.prediction_accuracy_pct, None);
    assert_eq!(report.accuracy.tracked_days, 0);
}

#[test]
fn days_lost_and_revenue_lost_use_the_average_rate() {
    let config = FieldConfig::default();
    let records = vec![
        record(date(20), 85, Some(80.0), Some(75.0), Some(3000)),
        record(date(21), 10, Some(0.0), None, Some(0)),
        record(date(22), 0, Some(0.0), None, Some(0)),
    ];

    let report = aggregate(&records, &config, &[]);
    assert_eq!(report.kpis.total_days, 3);
    assert_eq!(report.kpis.days_lost_to_weather, 2);

    // 2 days * capacity 80 * average rate (45+65)/2 = 55
    assert_eq!(report.kpis.revenue_lost_estimate, Decimal::from(8800));
}

#[test]
fn occupancy_splits_by_weather_quality() {
    let config = FieldConfig::default();
    let records = vec![
        record(date(18), 90, None, Some(80.0), Some(4000)),
        record(date(19), 75, None, Some(60.0), Some(3000)),
        record(date(20), 20, None, Some(10.0), Some(500)),
    ];

    let report = aggregate(&records, &config, &[]);
    assert_eq!(report.kpis.avg_occupancy_good_weather_pct, 70.0);
    assert_eq!(report.kpis.avg_occupancy_bad_weather_pct, 10.0);
}

#[test]
fn revenue_groups_by_score_band_and_prefers_actuals() {
    let config = FieldConfig::default();
    let records = vec![
        // Sunny band, actual revenue wins over predicted
        record(date(18), 85, Some(50.0), Some(80.0), Some(4000)),
        record(date(19), 78, None, Some(70.0), Some(3000)),
        // Storm band
        record(date(20), 10, Some(0.0), Some(0.0), Some(0)),
    ];

    let report = aggregate(&records, &config, &[]);

    let sunny = report
        .revenue_by_category
        .iter()
        .find(|r| r.category == WeatherCategory::Sunny)
        .unwrap();
    assert_eq!(sunny.days, 2);
    assert_eq!(sunny.revenue, Decimal::from(7000));
    assert_eq!(sunny.avg_revenue, Decimal::from(3500));

    let storm = report
        .revenue_by_category
        .iter()
        .find(|r| r.category == WeatherCategory::Storm)
        .unwrap();
    assert_eq!(storm.days, 1);
    assert_eq!(storm.revenue, Decimal::ZERO);
}

#[test]
fn correlation_skips_days_without_any_occupancy() {
    let config = FieldConfig::default();
    let records = vec![
        record(date(18), 85, Some(80.0), None, None),
        record(date(19), 70, None, None, None),
    ];

    let report = aggregate(&records, &config, &[]);
    // The second day has neither prediction nor actual
    assert_eq!(report.correlation.len(), 1);
    assert_eq!(report.correlation[0].occupancy_pct, 80.0);
}

#[test]
fn accuracy_badges_follow_the_delta_bands() {
    assert_eq!(classify_accuracy(0.0), AccuracyBadge::Accurate);
    assert_eq!(classify_accuracy(15.0), AccuracyBadge::Accurate);
    assert_eq!(classify_accuracy(15.1), AccuracyBadge::Close);
    assert_eq!(classify_accuracy(30.0), AccuracyBadge::Close);
    assert_eq!(classify_accuracy(30.1), AccuracyBadge::Missed);
}

#[test]
fn accuracy_summary_counts_tracked_days_only() {
    let config = FieldConfig::default();
    let records = vec![
        record(date(18), 85, Some(80.0), Some(70.0), Some(3500)), // delta 10: accurate
        record(date(19), 80, Some(80.0), Some(60.0), Some(3000)), // delta 20: close
        record(date(20), 75, Some(80.0), Some(40.0), Some(2000)), // delta 40: missed
        record(date(21), 70, Some(60.0), None, None),             // untracked
    ];

    let report = aggregate(&records, &config, &[]);
    assert_eq!(report.accuracy.tracked_days, 3);
    assert_eq!(report.accuracy.distribution.accurate, 1);
    assert_eq!(report.accuracy.distribution.close, 1);
    assert_eq!(report.accuracy.distribution.missed, 1);

    let deltas: Vec<f64> = report.accuracy.timeline.iter().map(|e| e.delta_pts).collect();
    assert_eq!(deltas, vec![10.0, 20.0, 40.0]);
}

#[test]
fn prediction_accuracy_is_one_hundred_minus_mape() {
    let config = FieldConfig::default();
    // |80-100|/100 = 20% error, so accuracy 80
    let records = vec![record(date(18), 85, Some(80.0), Some(100.0), Some(5000))];
    let report = aggregate(&records, &config, &[]);
    assert_eq!(report.kpis.prediction_accuracy_pct, Some(80.0));
}

#[test]
fn zero_actual_occupancy_days_do_not_poison_accuracy() {
    let config = FieldConfig::default();
    let records = vec![
        // Undefined ratio, skipped
        record(date(18), 85, Some(50.0), Some(0.0), Some(0)),
        record(date(19), 85, Some(90.0), Some(100.0), Some(5000)),
    ];

    let report = aggregate(&records, &config, &[]);
    assert_eq!(report.kpis.prediction_accuracy_pct, Some(90.0));
}

#[test]
fn accuracy_is_floored_at_zero() {
    let config = FieldConfig::default();
    // |100-5|/5 = 1900% error
    let records = vec![record(date(18), 85, Some(100.0), Some(5.0), Some(300))];
    let report = aggregate(&records, &config, &[]);
    assert_eq!(report.kpis.prediction_accuracy_pct, Some(0.0));
}

#[test]
fn automation_stats_roll_up_across_rules() {
    let mut rules = default_automation_rules();
    rules[0].stats = RuleStats {
        sent: 10,
        bookings: 4,
        revenue: Decimal::from(900),
        open_rate_pct: 60.0,
    };
    rules[1].stats = RuleStats {
        sent: 30,
        bookings: 6,
        revenue: Decimal::from(1500),
        open_rate_pct: 20.0,
    };

    let summary = summarize_automation_stats(&rules);
    assert_eq!(summary.total_sent, 40);
    assert_eq!(summary.total_bookings, 10);
    assert_eq!(summary.total_revenue, Decimal::from(2400));
    assert_eq!(summary.avg_open_rate_pct, 20.0);
}

#[test]
fn stats_summary_over_no_rules_is_all_zero() {
    let rules: Vec<AutomationRule> = Vec::new();
    let summary = summarize_automation_stats(&rules);
    assert_eq!(summary.total_sent, 0);
    assert_eq!(summary.avg_open_rate_pct, 0.0);
}

#[test]
fn demo_history_spans_six_months_ending_today() {
    let today = date(24);
    let config = FieldConfig::default();
    let records = demo_history(today, &config);

    assert_eq!(records.len(), DEMO_HISTORY_DAYS);
    assert_eq!(records.last().map(|r| r.date), Some(today));
    assert!(records.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
}

#[test]
fn demo_history_is_deterministic_and_in_bounds() {
    let today = date(24);
    let config = FieldConfig::default();
    let a = demo_history(today, &config);
    let b = demo_history(today, &config);

    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.date, y.date);
        assert_eq!(x.golf_score, y.golf_score);
        assert_eq!(x.actual_occupancy_pct, y.actual_occupancy_pct);
        assert_eq!(x.actual_revenue, y.actual_revenue);
    }

    for record in &a {
        assert!((0..=100).contains(&record.golf_score));
        let occupancy = record.actual_occupancy_pct.unwrap();
        assert!((5.0..=100.0).contains(&occupancy));
        let reservations = record.actual_reservations.unwrap();
        assert!(reservations <= config.capacity);

        let is_weekend = matches!(
            record.date.weekday(),
            chrono::Weekday::Sat | chrono::Weekday::Sun
        );
        let rate = if is_weekend {
            config.rate_weekend
        } else {
            config.rate_weekday
        };
        assert_eq!(record.actual_revenue, Some(Decimal::from(reservations) * rate));
    }
}

#[test]
fn demo_history_feeds_a_non_empty_report() {
    let config = FieldConfig::default();
    let records = demo_history(date(24), &config);
    let report = aggregate(&records, &config, &default_automation_rules());

    assert_eq!(report.kpis.total_days, DEMO_HISTORY_DAYS);
    assert!(!report.correlation.is_empty());
    assert!(!report.revenue_by_category.is_empty());
    assert!(report.kpis.total_revenue > Decimal::ZERO);
    // Demo days carry actuals only, so the accuracy block stays empty
    assert_eq!(report.accuracy.tracked_days, 0);
    assert_eq!(report.kpis.prediction_accuracy_pct, None);
}

#[test]
fn sparse_history_threshold_is_thirty_real_records() {
    assert_eq!(DEMO_HISTORY_VERSION, 1);
    assert!(is_sparse(0));
    assert!(is_sparse(MIN_REAL_RECORDS - 1));
    assert!(!is_sparse(MIN_REAL_RECORDS));
    assert!(!is_sparse(500));
}
