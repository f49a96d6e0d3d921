//! Operational alert models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Alert kinds raised over a forecast run.
/// At most one alert of each type exists per date per run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    ClosureRisk,
    HighDemand,
    MarketingOpportunity,
}

/// Alert severity, ordered so that `max` picks the most urgent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// One operational alert for a forecast day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub date: NaiveDate,
    /// Days ahead of the first day of the forecast run
    pub days_ahead: usize,
    pub message: String,
}
