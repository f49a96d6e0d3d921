//! Demand prediction models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DemandLevel, Season};

/// Per-day demand prediction, derived deterministically from a scored day
/// plus the field configuration and tournament dates. Recomputed on every
/// forecast run, never partially mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandPrediction {
    pub date: NaiveDate,
    pub golf_score: i32,
    /// 0-100, already clamped; 0 when the field is closed
    pub estimated_occupancy_pct: f64,
    /// Never exceeds the configured capacity
    pub expected_reservations: i32,
    /// Exactly `expected_reservations * applicable_rate`
    pub estimated_revenue: Decimal,
    /// Rate selected for the day (holiday > weekend > weekday)
    pub applicable_rate: Decimal,
    /// Decays with forecast horizon, never below the policy floor
    pub confidence_pct: i32,
    pub demand_level: DemandLevel,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub has_tournament: bool,
    pub season: Season,
    pub season_multiplier: f64,
}
