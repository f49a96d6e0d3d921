//! Field (course) configuration models
//!
//! Owned by the external settings store; the engine treats a `FieldConfig`
//! as read-only input per call. When the club has no stored configuration the
//! documented defaults below apply and the caller is informed.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Season;

/// Month-to-season-tier calendar. Months are 1-12; a month listed in no tier
/// falls back to the low season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonCalendar {
    pub high: Vec<u32>,
    pub medium: Vec<u32>,
    pub low: Vec<u32>,
}

impl SeasonCalendar {
    pub fn tier_for_month(&self, month: u32) -> Season {
        if self.high.contains(&month) {
            Season::High
        } else if self.medium.contains(&month) {
            Season::Medium
        } else {
            Season::Low
        }
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self {
            high: vec![4, 5, 6, 7, 8, 9, 10],
            medium: vec![3, 11],
            low: vec![12, 1, 2],
        }
    }
}

/// Demand multiplier per season tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeasonMultipliers {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl SeasonMultipliers {
    pub fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::High => self.high,
            Season::Medium => self.medium,
            Season::Low => self.low,
        }
    }
}

impl Default for SeasonMultipliers {
    fn default() -> Self {
        Self {
            high: 1.2,
            medium: 1.0,
            low: 0.7,
        }
    }
}

/// Spanish national holidays plus Castilla y León for 2026. Applied by
/// `FieldConfig::default()` so the holiday rate and multiplier work even
/// before the club stores its own calendar.
pub fn default_holidays_2026() -> BTreeSet<NaiveDate> {
    [
        (2026, 1, 1),   // Año Nuevo
        (2026, 1, 6),   // Reyes Magos
        (2026, 4, 2),   // Jueves Santo
        (2026, 4, 3),   // Viernes Santo
        (2026, 4, 23),  // Día de Castilla y León
        (2026, 5, 1),   // Día del Trabajador
        (2026, 6, 15),  // Corpus Christi (CyL)
        (2026, 8, 15),  // Asunción de la Virgen
        (2026, 10, 12), // Día de la Hispanidad
        (2026, 11, 1),  // Todos los Santos
        (2026, 12, 6),  // Día de la Constitución
        (2026, 12, 8),  // Inmaculada Concepción
        (2026, 12, 25), // Navidad
    ]
    .into_iter()
    .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
    .collect()
}

/// Club field configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Maximum daily bookings
    pub capacity: i32,
    pub rate_weekday: Decimal,
    pub rate_weekend: Decimal,
    pub rate_holiday: Decimal,
    /// Daily precipitation above this closes the field outright (mm)
    pub rain_closure_threshold_mm: f64,
    /// Max wind speed above this closes the field outright (km/h)
    pub wind_closure_threshold_kmh: f64,
    pub season_calendar: SeasonCalendar,
    pub season_multipliers: SeasonMultipliers,
    pub custom_holidays: BTreeSet<NaiveDate>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            name: "Campo de Golf".to_string(),
            latitude: 40.9651,
            longitude: -5.664,
            capacity: 80,
            rate_weekday: Decimal::from(45),
            rate_weekend: Decimal::from(65),
            rate_holiday: Decimal::from(75),
            rain_closure_threshold_mm: 10.0,
            wind_closure_threshold_kmh: 50.0,
            season_calendar: SeasonCalendar::default(),
            season_multipliers: SeasonMultipliers::default(),
            custom_holidays: default_holidays_2026(),
        }
    }
}

impl FieldConfig {
    /// Mean of weekday and weekend rates, used for lost-revenue estimates
    pub fn average_rate(&self) -> Decimal {
        (self.rate_weekday + self.rate_weekend) / Decimal::from(2)
    }
}
