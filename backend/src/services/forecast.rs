//! Forecast orchestration service
//!
//! Glues the weather gateway to the deterministic engine: fetches a forecast,
//! scores it, predicts demand, generates alerts and matches automation rules,
//! and freezes today's prediction into the historical record.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::OpenMeteoClient;
use crate::services::SettingsService;
use shared::alerts::generate_alerts;
use shared::automation::match_rules;
use shared::demand::DemandPolicy;
use shared::models::{
    weather_code_label, Alert, DailyObservation, DemandPrediction, FieldConfig,
    HistoricalDayRecord, HourlyObservation, ScoredDay,
};
use shared::scoring::ScoringPolicy;
use shared::types::WeatherCategory;
use shared::validation;

/// One forecast day with everything derived from it
#[derive(Debug, Clone, Serialize)]
pub struct ForecastDay {
    #[serde(flatten)]
    pub scored: ScoredDay,
    pub weather_label: &'static str,
    pub weather_category: WeatherCategory,
    pub prediction: DemandPrediction,
    /// Ids of enabled automation rules whose trigger matches this day
    pub matched_rules: Vec<String>,
}

/// Full forecast response
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub generated_at: DateTime<Utc>,
    pub field_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// True when no stored configuration existed and defaults applied
    pub defaults_used: bool,
    pub days: Vec<ForecastDay>,
    pub alerts: Vec<Alert>,
    /// Active tournament dates falling inside the forecast window
    pub tournament_dates: Vec<NaiveDate>,
    /// Hourly detail for the first forecast day only
    pub today_hourly: Vec<HourlyObservation>,
}

/// Operational input closing out a past day
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DailyRecordInput {
    pub date: NaiveDate,
    pub actual_occupancy_pct: f64,
    #[validate(range(min = 0, message = "Reservations cannot be negative"))]
    pub actual_reservations: i32,
    pub actual_revenue: Decimal,
    pub is_closed: Option<bool>,
    pub closure_reason: Option<String>,
}

#[derive(Clone)]
pub struct ForecastService {
    db: PgPool,
    client: OpenMeteoClient,
}

/// Database row mirror of `HistoricalDayRecord`
#[derive(sqlx::FromRow)]
pub(crate) struct DayRecordRow {
    id: uuid::Uuid,
    date: NaiveDate,
    golf_score: i32,
    temperature_max_c: Option<f64>,
    temperature_min_c: Option<f64>,
    precipitation_sum_mm: Option<f64>,
    windspeed_max_kmh: Option<f64>,
    weather_code: Option<i32>,
    daylight_hours: Option<f64>,
    predicted_occupancy_pct: Option<f64>,
    predicted_reservations: Option<i32>,
    predicted_revenue: Option<Decimal>,
    confidence_pct: Option<i32>,
    actual_occupancy_pct: Option<f64>,
    actual_reservations: Option<i32>,
    actual_revenue: Option<Decimal>,
    is_closed: bool,
    closure_reason: Option<String>,
}

impl From<DayRecordRow> for HistoricalDayRecord {
    fn from(row: DayRecordRow) -> Self {
        HistoricalDayRecord {
            id: row.id,
            date: row.date,
            golf_score: row.golf_score,
            temperature_max_c: row.temperature_max_c,
            temperature_min_c: row.temperature_min_c,
            precipitation_sum_mm: row.precipitation_sum_mm,
            windspeed_max_kmh: row.windspeed_max_kmh,
            weather_code: row.weather_code,
            daylight_hours: row.daylight_hours,
            predicted_occupancy_pct: row.predicted_occupancy_pct,
            predicted_reservations: row.predicted_reservations,
            predicted_revenue: row.predicted_revenue,
            confidence_pct: row.confidence_pct,
            actual_occupancy_pct: row.actual_occupancy_pct,
            actual_reservations: row.actual_reservations,
            actual_revenue: row.actual_revenue,
            is_closed: row.is_closed,
            closure_reason: row.closure_reason,
        }
    }
}

pub(crate) const RECORD_COLUMNS: &str = "id, date, golf_score, temperature_max_c, temperature_min_c, \
     precipitation_sum_mm, windspeed_max_kmh, weather_code, daylight_hours, \
     predicted_occupancy_pct, predicted_reservations, predicted_revenue, confidence_pct, \
     actual_occupancy_pct, actual_reservations, actual_revenue, is_closed, closure_reason";

impl ForecastService {
    pub fn new(db: PgPool, client: OpenMeteoClient) -> Self {
        Self { db, client }
    }

    /// Run the full forecast pipeline for `days` days starting today
    pub async fn run_forecast(&self, days: u32) -> AppResult<ForecastReport> {
        validation::validate_forecast_days(days)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let settings = SettingsService::new(self.db.clone());
        let (config, config_defaulted) = settings.field_config().await?;
        let (rules, _) = settings.automation_rules().await?;

        let bundle = self
            .client
            .fetch_forecast(config.latitude, config.longitude, days)
            .await?;

        let scored = ScoringPolicy::default().score_days(&bundle.daily, &config);
        let tournaments = self
            .tournament_dates(scored.first().map(|d| d.date()), scored.last().map(|d| d.date()))
            .await?;

        let policy = DemandPolicy::default();
        let predictions = policy.predict_range(&scored, &config, &tournaments);
        let alerts = generate_alerts(&scored, &predictions, &config);

        let today_hourly = match scored.first() {
            Some(first) => {
                let prefix = first.date().to_string();
                bundle
                    .hourly
                    .iter()
                    .filter(|h| h.time.starts_with(&prefix))
                    .cloned()
                    .collect()
            }
            None => Vec::new(),
        };

        let days = scored
            .into_iter()
            .zip(predictions)
            .map(|(scored, prediction)| {
                let matched_rules = match_rules(&scored, &prediction, &rules)
                    .into_iter()
                    .map(|rule| rule.id.clone())
                    .collect();
                ForecastDay {
                    weather_label: weather_code_label(scored.observation.weather_code),
                    weather_category: WeatherCategory::from_golf_score(scored.golf_score),
                    prediction,
                    matched_rules,
                    scored,
                }
            })
            .collect();

        Ok(ForecastReport {
            generated_at: Utc::now(),
            field_name: config.name.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
            defaults_used: config_defaulted,
            days,
            alerts,
            tournament_dates: tournaments.into_iter().collect(),
            today_hourly,
        })
    }

    /// Freeze today's prediction into the historical record. Reruns on the
    /// same day overwrite the predicted fields; actuals are never touched.
    pub async fn snapshot_today(&self) -> AppResult<HistoricalDayRecord> {
        let settings = SettingsService::new(self.db.clone());
        let (config, _) = settings.field_config().await?;

        let bundle = self
            .client
            .fetch_forecast(config.latitude, config.longitude, 1)
            .await?;
        let scored = ScoringPolicy::default().score_days(&bundle.daily, &config);
        let today = scored
            .first()
            .ok_or_else(|| AppError::UpstreamUnavailable("empty forecast".to_string()))?;

        let tournaments = self
            .tournament_dates(Some(today.date()), Some(today.date()))
            .await?;
        let prediction = DemandPolicy::default().predict(today, &config, &tournaments, 0);
        let reason = closure_reason(&today.observation, &config);

        let query = format!(
            r#"
            INSERT INTO weather_daily_records
                (date, golf_score, temperature_max_c, temperature_min_c,
                 precipitation_sum_mm, windspeed_max_kmh, weather_code, daylight_hours,
                 predicted_occupancy_pct, predicted_reservations, predicted_revenue,
                 confidence_pct, is_closed, closure_reason)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (date) DO UPDATE SET
                golf_score = EXCLUDED.golf_score,
                temperature_max_c = EXCLUDED.temperature_max_c,
                temperature_min_c = EXCLUDED.temperature_min_c,
                precipitation_sum_mm = EXCLUDED.precipitation_sum_mm,
                windspeed_max_kmh = EXCLUDED.windspeed_max_kmh,
                weather_code = EXCLUDED.weather_code,
                daylight_hours = EXCLUDED.daylight_hours,
                predicted_occupancy_pct = EXCLUDED.predicted_occupancy_pct,
                predicted_reservations = EXCLUDED.predicted_reservations,
                predicted_revenue = EXCLUDED.predicted_revenue,
                confidence_pct = EXCLUDED.confidence_pct,
                is_closed = EXCLUDED.is_closed,
                closure_reason = EXCLUDED.closure_reason,
                updated_at = NOW()
            RETURNING {}
            "#,
            RECORD_COLUMNS
        );

        let row: DayRecordRow = sqlx::query_as(&query)
            .bind(today.date())
            .bind(today.golf_score)
            .bind(today.observation.temperature_max_c)
            .bind(today.observation.temperature_min_c)
            .bind(today.observation.precipitation_sum_mm)
            .bind(today.observation.windspeed_max_kmh)
            .bind(today.observation.weather_code)
            .bind(today.observation.daylight_hours)
            .bind(prediction.estimated_occupancy_pct)
            .bind(prediction.expected_reservations)
            .bind(prediction.estimated_revenue)
            .bind(prediction.confidence_pct)
            .bind(today.is_closed)
            .bind(reason)
            .fetch_one(&self.db)
            .await?;

        tracing::info!(
            date = %row.date,
            golf_score = row.golf_score,
            "Snapshot stored"
        );

        Ok(row.into())
    }

    /// Record observed actuals for a day, creating the row if no snapshot
    /// was ever taken for it
    pub async fn record_actuals(&self, input: DailyRecordInput) -> AppResult<HistoricalDayRecord> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        validation::validate_occupancy_pct(input.actual_occupancy_pct).map_err(|e| {
            AppError::Validation {
                field: "actual_occupancy_pct".to_string(),
                message: e.to_string(),
                message_es: "La ocupación debe estar entre 0 y 100%".to_string(),
            }
        })?;
        validation::validate_revenue(input.actual_revenue).map_err(|e| AppError::Validation {
            field: "actual_revenue".to_string(),
            message: e.to_string(),
            message_es: "Los ingresos no pueden ser negativos".to_string(),
        })?;

        let query = format!(
            r#"
            INSERT INTO weather_daily_records
                (date, golf_score, actual_occupancy_pct, actual_reservations,
                 actual_revenue, is_closed, closure_reason)
            VALUES ($1, 0, $2, $3, $4, COALESCE($5, FALSE), $6)
            ON CONFLICT (date) DO UPDATE SET
                actual_occupancy_pct = EXCLUDED.actual_occupancy_pct,
                actual_reservations = EXCLUDED.actual_reservations,
                actual_revenue = EXCLUDED.actual_revenue,
                is_closed = COALESCE($5, weather_daily_records.is_closed),
                closure_reason = COALESCE($6, weather_daily_records.closure_reason),
                updated_at = NOW()
            RETURNING {}
            "#,
            RECORD_COLUMNS
        );

        let row: DayRecordRow = sqlx::query_as(&query)
            .bind(input.date)
            .bind(input.actual_occupancy_pct)
            .bind(input.actual_reservations)
            .bind(input.actual_revenue)
            .bind(input.is_closed)
            .bind(&input.closure_reason)
            .fetch_one(&self.db)
            .await?;

        Ok(row.into())
    }

    /// Look up the historical record for one date
    pub async fn get_record(&self, date: NaiveDate) -> AppResult<HistoricalDayRecord> {
        let query = format!(
            "SELECT {} FROM weather_daily_records WHERE date = $1",
            RECORD_COLUMNS
        );

        let row: Option<DayRecordRow> = sqlx::query_as(&query)
            .bind(date)
            .fetch_optional(&self.db)
            .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("daily record for {}", date)))
    }

    async fn tournament_dates(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<BTreeSet<NaiveDate>> {
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(BTreeSet::new());
        };

        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT date FROM tournaments WHERE is_active AND date BETWEEN $1 AND $2",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|(date,)| date).collect())
    }
}

/// Human-readable closure reason when a hard threshold was exceeded
fn closure_reason(observation: &DailyObservation, config: &FieldConfig) -> Option<String> {
    if observation.precipitation_sum_mm > config.rain_closure_threshold_mm {
        Some(format!(
            "Lluvia prevista de {:.1} mm",
            observation.precipitation_sum_mm
        ))
    } else if observation.windspeed_max_kmh > config.wind_closure_threshold_kmh {
        Some(format!(
            "Viento previsto de {:.0} km/h",
            observation.windspeed_max_kmh
        ))
    } else {
        None
    }
}
