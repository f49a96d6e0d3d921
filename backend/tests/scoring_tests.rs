//! Playability scoring tests

use chrono::NaiveDate;
use proptest::prelude::*;

use shared::models::{DailyObservation, FieldConfig};
use shared::scoring::ScoringPolicy;

fn observation(
    temperature_max_c: f64,
    precipitation_sum_mm: f64,
    windspeed_max_kmh: f64,
    daylight_hours: f64,
) -> DailyObservation {
    DailyObservation {
        date: NaiveDate::from_ymd_opt(2026, 8, 22).unwrap(),
        temperature_max_c,
        temperature_min_c: temperature_max_c - 8.0,
        precipitation_sum_mm,
        windspeed_max_kmh,
        weather_code: 1,
        daylight_hours,
        sunrise: "2026-08-22T07:29".to_string(),
        sunset: "2026-08-22T21:07".to_string(),
    }
}

#[test]
fn perfect_day_scores_100() {
    let day = ScoringPolicy::default().score_day(&observation(22.0, 0.0, 0.0, 12.0), &FieldConfig::default());
    assert_eq!(day.golf_score, 100);
    assert!(!day.is_closed);
}

#[test]
fn mild_wind_costs_proportional_points() {
    // 10 km/h against a 50 km/h closure threshold is a fifth of the 30-point
    // wind penalty
    let day = ScoringPolicy::default().score_day(&observation(22.0, 0.0, 10.0, 10.0), &FieldConfig::default());
    assert_eq!(day.golf_score, 94);
    assert!(!day.is_closed);
}

#[test]
fn cold_drizzly_day_loses_points_on_every_axis() {
    // precip 2mm -> 10, wind 20 -> 12, temp 9 -> 9, daylight 9h -> 1
    let day = ScoringPolicy::default().score_day(&observation(9.0, 2.0, 20.0, 9.0), &FieldConfig::default());
    assert_eq!(day.golf_score, 68);
    assert!(!day.is_closed);
}

#[test]
fn heavy_rain_closes_the_field() {
    let day = ScoringPolicy::default().score_day(&observation(22.0, 12.0, 5.0, 12.0), &FieldConfig::default());
    assert!(day.is_closed);
    assert_eq!(day.golf_score, 0);
}

#[test]
fn extreme_wind_closes_the_field() {
    let day = ScoringPolicy::default().score_day(&observation(22.0, 0.0, 55.0, 12.0), &FieldConfig::default());
    assert!(day.is_closed);
    assert_eq!(day.golf_score, 0);
}

#[test]
fn rain_exactly_at_threshold_stays_open() {
    let config = FieldConfig::default();
    let day = ScoringPolicy::default().score_day(
        &observation(22.0, config.rain_closure_threshold_mm, 0.0, 12.0),
        &config,
    );
    assert!(!day.is_closed);
}

#[test]
fn temperature_penalty_is_capped() {
    // 45C is 17 degrees over the band; the penalty caps at 15 points
    let day = ScoringPolicy::default().score_day(&observation(45.0, 0.0, 0.0, 12.0), &FieldConfig::default());
    assert_eq!(day.golf_score, 85);
}

#[test]
fn score_days_preserves_input_order() {
    let config = FieldConfig::default();
    let observations = vec![
        observation(22.0, 0.0, 0.0, 12.0),
        observation(22.0, 12.0, 0.0, 12.0),
    ];
    let scored = ScoringPolicy::default().score_days(&observations, &config);
    assert_eq!(scored.len(), 2);
    assert!(!scored[0].is_closed);
    assert!(scored[1].is_closed);
}

proptest! {
    #[test]
    fn score_is_always_in_bounds(
        temp in -20.0..50.0f64,
        precip in 0.0..60.0f64,
        wind in 0.0..100.0f64,
        daylight in 6.0..16.0f64,
    ) {
        let day = ScoringPolicy::default().score_day(
            &observation(temp, precip, wind, daylight),
            &FieldConfig::default(),
        );
        prop_assert!((0..=100).contains(&day.golf_score));
    }

    #[test]
    fn closed_days_always_score_zero(
        temp in -20.0..50.0f64,
        precip in 0.0..60.0f64,
        wind in 0.0..100.0f64,
    ) {
        let config = FieldConfig::default();
        let day = ScoringPolicy::default().score_day(&observation(temp, precip, wind, 12.0), &config);
        if day.is_closed {
            prop_assert_eq!(day.golf_score, 0);
        }
    }

    #[test]
    fn more_rain_never_raises_the_score(
        precip_low in 0.0..5.0f64,
        extra in 0.0..5.0f64,
    ) {
        let config = FieldConfig::default();
        let policy = ScoringPolicy::default();
        let dry = policy.score_day(&observation(22.0, precip_low, 0.0, 12.0), &config);
        let wet = policy.score_day(&observation(22.0, precip_low + extra, 0.0, 12.0), &config);
        prop_assert!(wet.golf_score <= dry.golf_score);
    }

    #[test]
    fn more_wind_never_raises_the_score(
        wind_low in 0.0..25.0f64,
        extra in 0.0..25.0f64,
    ) {
        let config = FieldConfig::default();
        let policy = ScoringPolicy::default();
        let calm = policy.score_day(&observation(22.0, 0.0, wind_low, 12.0), &config);
        let windy = policy.score_day(&observation(22.0, 0.0, wind_low + extra, 12.0), &config);
        prop_assert!(windy.golf_score <= calm.golf_score);
    }
}
