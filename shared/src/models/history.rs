//! Historical day record models
//!
//! A record is created at snapshot time with predicted fields only; the
//! actual fields are filled later from operational input. Corrections are
//! idempotent upserts keyed by date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day of history: frozen prediction plus (eventually) observed actuals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalDayRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub golf_score: i32,
    pub temperature_max_c: Option<f64>,
    pub temperature_min_c: Option<f64>,
    pub precipitation_sum_mm: Option<f64>,
    pub windspeed_max_kmh: Option<f64>,
    pub weather_code: Option<i32>,
    pub daylight_hours: Option<f64>,
    // Frozen at forecast time
    pub predicted_occupancy_pct: Option<f64>,
    pub predicted_reservations: Option<i32>,
    pub predicted_revenue: Option<Decimal>,
    pub confidence_pct: Option<i32>,
    // Filled later by operational input
    pub actual_occupancy_pct: Option<f64>,
    pub actual_reservations: Option<i32>,
    pub actual_revenue: Option<Decimal>,
    pub is_closed: bool,
    pub closure_reason: Option<String>,
}

impl HistoricalDayRecord {
    /// Occupancy for analytics: actuals win, predictions fill the gap
    pub fn effective_occupancy_pct(&self) -> Option<f64> {
        self.actual_occupancy_pct.or(self.predicted_occupancy_pct)
    }

    /// Revenue for analytics: actuals win, predictions fill the gap
    pub fn effective_revenue(&self) -> Decimal {
        self.actual_revenue
            .or(self.predicted_revenue)
            .unwrap_or(Decimal::ZERO)
    }
}
