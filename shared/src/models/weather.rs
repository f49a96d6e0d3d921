//! Meteorological observation models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of forecast data, normalized from the weather provider.
/// Immutable once fetched for a given forecast run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    pub precipitation_sum_mm: f64,
    pub windspeed_max_kmh: f64,
    /// WMO weather code
    pub weather_code: i32,
    pub daylight_hours: f64,
    pub sunrise: String,
    pub sunset: String,
}

/// One hour of forecast data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyObservation {
    /// ISO-8601 local time from the provider
    pub time: String,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub windspeed_kmh: f64,
    pub cloud_cover_pct: i32,
    pub weather_code: i32,
    /// Playable tee-time hour: daytime, mild, dry and calm
    pub is_optimal: bool,
}

/// A daily observation annotated with the playability score.
/// Invariant: `is_closed` implies `golf_score == 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDay {
    #[serde(flatten)]
    pub observation: DailyObservation,
    /// 0-100 playability index
    pub golf_score: i32,
    pub is_closed: bool,
}

impl ScoredDay {
    pub fn date(&self) -> NaiveDate {
        self.observation.date
    }
}

/// Spanish label for a WMO weather code, used in alerts and messaging
pub fn weather_code_label(code: i32) -> &'static str {
    match code {
        0 => "Cielo despejado",
        1 | 2 => "Parcialmente nublado",
        3 => "Cubierto",
        45 => "Niebla",
        48 => "Niebla helada",
        51 => "Llovizna ligera",
        53 => "Llovizna moderada",
        55 => "Llovizna intensa",
        61 => "Lluvia ligera",
        63 => "Lluvia moderada",
        65 => "Lluvia intensa",
        71 => "Nieve ligera",
        73 => "Nieve moderada",
        75 => "Nieve intensa",
        80 => "Chubascos ligeros",
        81 => "Chubascos moderados",
        82 => "Chubascos fuertes",
        95 => "Tormenta",
        96 => "Tormenta con granizo",
        99 => "Tormenta con granizo fuerte",
        _ => "Desconocido",
    }
}
