//! Validation utilities for the Golf Club Operations Platform

use rust_decimal::Decimal;

/// Open-Meteo serves at most 16 forecast days
pub const MAX_FORECAST_DAYS: u32 = 16;

/// Validate a requested forecast horizon
pub fn validate_forecast_days(days: u32) -> Result<(), &'static str> {
    if days == 0 || days > MAX_FORECAST_DAYS {
        return Err("Forecast horizon must be between 1 and 16 days");
    }
    Ok(())
}

/// Validate GPS coordinates
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate an occupancy percentage
pub fn validate_occupancy_pct(occupancy: f64) -> Result<(), &'static str> {
    if !(0.0..=100.0).contains(&occupancy) {
        return Err("Occupancy must be between 0 and 100%");
    }
    Ok(())
}

/// Validate a monetary amount is non-negative
pub fn validate_revenue(revenue: Decimal) -> Result<(), &'static str> {
    if revenue < Decimal::ZERO {
        return Err("Revenue cannot be negative");
    }
    Ok(())
}

/// Validate a field capacity
pub fn validate_capacity(capacity: i32) -> Result<(), &'static str> {
    if capacity <= 0 {
        return Err("Field capacity must be positive");
    }
    Ok(())
}
