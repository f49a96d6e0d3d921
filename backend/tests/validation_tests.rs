//! Input validation tests

use rust_decimal::Decimal;

use shared::validation::{
    validate_capacity, validate_coordinates, validate_forecast_days, validate_occupancy_pct,
    validate_revenue, MAX_FORECAST_DAYS,
};

#[test]
fn forecast_horizon_bounds() {
    assert!(validate_forecast_days(0).is_err());
    assert!(validate_forecast_days(1).is_ok());
    assert!(validate_forecast_days(MAX_FORECAST_DAYS).is_ok());
    assert!(validate_forecast_days(MAX_FORECAST_DAYS + 1).is_err());
}

#[test]
fn coordinates_must_be_on_the_globe() {
    assert!(validate_coordinates(40.9651, -5.664).is_ok());
    assert!(validate_coordinates(90.0, 180.0).is_ok());
    assert!(validate_coordinates(90.1, 0.0).is_err());
    assert!(validate_coordinates(0.0, -180.1).is_err());
}

#[test]
fn occupancy_is_a_percentage() {
    assert!(validate_occupancy_pct(0.0).is_ok());
    assert!(validate_occupancy_pct(100.0).is_ok());
    assert!(validate_occupancy_pct(-0.1).is_err());
    assert!(validate_occupancy_pct(100.1).is_err());
}

#[test]
fn revenue_cannot_be_negative() {
    assert!(validate_revenue(Decimal::ZERO).is_ok());
    assert!(validate_revenue(Decimal::from(1305)).is_ok());
    assert!(validate_revenue(Decimal::from(-1)).is_err());
}

#[test]
fn capacity_must_be_positive() {
    assert!(validate_capacity(80).is_ok());
    assert!(validate_capacity(1).is_ok());
    assert!(validate_capacity(0).is_err());
    assert!(validate_capacity(-5).is_err());
}
