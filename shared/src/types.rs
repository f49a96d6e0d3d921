//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Predicted demand bucket for a single day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandLevel {
    /// Field closed for weather reasons
    Cerrado,
    Baja,
    Media,
    Alta,
}

impl std::fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemandLevel::Cerrado => write!(f, "Cierre recomendado"),
            DemandLevel::Baja => write!(f, "Baja"),
            DemandLevel::Media => write!(f, "Media"),
            DemandLevel::Alta => write!(f, "Alta"),
        }
    }
}

/// Discrete weather category derived from golf score bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Sunny,
    Overcast,
    Rain,
    Storm,
}

impl WeatherCategory {
    /// Band the 0-100 golf score into a category
    pub fn from_golf_score(golf_score: i32) -> Self {
        match golf_score {
            75..=i32::MAX => WeatherCategory::Sunny,
            55..=74 => WeatherCategory::Overcast,
            30..=54 => WeatherCategory::Rain,
            _ => WeatherCategory::Storm,
        }
    }

    /// Spanish label used in reports and outbound messaging
    pub fn label(&self) -> &'static str {
        match self {
            WeatherCategory::Sunny => "Soleado",
            WeatherCategory::Overcast => "Nublado",
            WeatherCategory::Rain => "Lluvia",
            WeatherCategory::Storm => "Viento/Tormenta",
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Season tier driving the demand multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    High,
    Medium,
    Low,
}

/// Calendar classification of a day, in rate-precedence order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Weekday,
    Weekend,
    /// Holiday rate takes precedence over the weekend rate
    Holiday,
}

/// Date range for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}
