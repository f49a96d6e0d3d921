//! Operational alert generation
//!
//! One pass per forecast run, paired by date. The dedup invariant is that at
//! most one alert of each type survives per date; when several conditions
//! for the same type fire, the highest-severity one wins.

use std::collections::HashMap;

use crate::models::{
    weather_code_label, Alert, AlertSeverity, AlertType, DemandPrediction, FieldConfig, ScoredDay,
};

/// Occupancy above this flags a capacity-constrained day
const HIGH_DEMAND_OCCUPANCY_PCT: f64 = 90.0;
/// Golf score below this flags closure risk even when the field stays open
const CLOSURE_RISK_SCORE: i32 = 30;
/// A good-weather day under-booked below this is a marketing opportunity
const OPPORTUNITY_OCCUPANCY_PCT: f64 = 40.0;
const OPPORTUNITY_SCORE: i32 = 70;

/// Generate the alert set for a forecast run. Scored days and predictions
/// are expected to be date-aligned, as produced by the engine stages.
pub fn generate_alerts(
    days: &[ScoredDay],
    predictions: &[DemandPrediction],
    _config: &FieldConfig,
) -> Vec<Alert> {
    let predictions_by_date: HashMap<_, _> =
        predictions.iter().map(|p| (p.date, p)).collect();

    let mut best: HashMap<(chrono::NaiveDate, AlertType), Alert> = HashMap::new();
    let mut keep = |alert: Alert| {
        let key = (alert.date, alert.alert_type);
        match best.get(&key) {
            Some(existing) if existing.severity >= alert.severity => {}
            _ => {
                best.insert(key, alert);
            }
        }
    };

    for (days_ahead, day) in days.iter().enumerate() {
        let date = day.date();
        let Some(prediction) = predictions_by_date.get(&date) else {
            continue;
        };

        if day.is_closed {
            keep(Alert {
                alert_type: AlertType::ClosureRisk,
                severity: AlertSeverity::Critical,
                date,
                days_ahead,
                message: format!(
                    "Cierre operativo: {} — precipitación {:.1} mm, viento {:.0} km/h",
                    weather_code_label(day.observation.weather_code),
                    day.observation.precipitation_sum_mm,
                    day.observation.windspeed_max_kmh
                ),
            });
        } else if day.golf_score < CLOSURE_RISK_SCORE {
            keep(Alert {
                alert_type: AlertType::ClosureRisk,
                severity: AlertSeverity::Warning,
                date,
                days_ahead,
                message: format!(
                    "Condiciones adversas ({}): golf score {} — posibles cancelaciones",
                    weather_code_label(day.observation.weather_code),
                    day.golf_score
                ),
            });
        }

        if !day.is_closed && prediction.estimated_occupancy_pct > HIGH_DEMAND_OCCUPANCY_PCT {
            keep(Alert {
                alert_type: AlertType::HighDemand,
                severity: AlertSeverity::Warning,
                date,
                days_ahead,
                message: format!(
                    "Ocupación estimada {:.0}% — activar lista de espera",
                    prediction.estimated_occupancy_pct
                ),
            });
        }

        if !day.is_closed
            && day.golf_score >= OPPORTUNITY_SCORE
            && prediction.estimated_occupancy_pct < OPPORTUNITY_OCCUPANCY_PCT
        {
            keep(Alert {
                alert_type: AlertType::MarketingOpportunity,
                severity: AlertSeverity::Info,
                date,
                days_ahead,
                message: format!(
                    "Golf score {} con solo {:.0}% de ocupación — ideal para campaña last-minute",
                    day.golf_score, prediction.estimated_occupancy_pct
                ),
            });
        }
    }

    let mut alerts: Vec<Alert> = best.into_values().collect();
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.date.cmp(&b.date))
    });
    alerts
}
