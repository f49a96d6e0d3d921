//! Weather, demand and automation handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::{
    analytics::AnalyticsResponse,
    automation::{DispatchInput, DispatchReceipt},
    forecast::{DailyRecordInput, ForecastReport},
    AnalyticsService, AutomationService, ForecastService,
};
use crate::AppState;
use shared::models::{AutomationRule, HistoricalDayRecord};

const DEFAULT_FORECAST_DAYS: u32 = 7;

#[derive(Deserialize)]
pub struct ForecastQuery {
    pub days: Option<u32>,
}

#[derive(Deserialize)]
pub struct DailyRecordQuery {
    pub date: Option<NaiveDate>,
}

/// A missing date gets the structured bilingual error body, not the
/// extractor's plain-text rejection
fn require_date(date: Option<NaiveDate>) -> AppResult<NaiveDate> {
    date.ok_or_else(|| AppError::Validation {
        field: "date".to_string(),
        message: "Query parameter 'date' is required".to_string(),
        message_es: "Falta el parámetro 'date'".to_string(),
    })
}

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub window_days: Option<i64>,
}

#[derive(Serialize)]
pub struct AutomationsResponse {
    pub rules: Vec<AutomationRule>,
    pub defaults_used: bool,
}

/// GET /api/v1/weather/forecast?days=N
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<ForecastReport>> {
    let days = query.days.unwrap_or(DEFAULT_FORECAST_DAYS);
    let service = ForecastService::new(state.db.clone(), state.weather_client.clone());
    let report = service.run_forecast(days).await?;
    Ok(Json(report))
}

/// POST /api/v1/weather/snapshot
pub async fn create_snapshot(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<HistoricalDayRecord>)> {
    let service = ForecastService::new(state.db.clone(), state.weather_client.clone());
    let record = service.snapshot_today().await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/weather/daily-record?date=YYYY-MM-DD
pub async fn get_daily_record(
    State(state): State<AppState>,
    Query(query): Query<DailyRecordQuery>,
) -> AppResult<Json<HistoricalDayRecord>> {
    let date = require_date(query.date)?;
    let service = ForecastService::new(state.db.clone(), state.weather_client.clone());
    let record = service.get_record(date).await?;
    Ok(Json(record))
}

/// POST /api/v1/weather/daily-record
pub async fn upsert_daily_record(
    State(state): State<AppState>,
    Json(input): Json<DailyRecordInput>,
) -> AppResult<Json<HistoricalDayRecord>> {
    let service = ForecastService::new(state.db.clone(), state.weather_client.clone());
    let record = service.record_actuals(input).await?;
    Ok(Json(record))
}

/// GET /api/v1/weather/analytics?window_days=N
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse>> {
    let service = AnalyticsService::new(state.db.clone());
    let response = service.report(query.window_days).await?;
    Ok(Json(response))
}

/// GET /api/v1/weather/automations
pub async fn list_automations(
    State(state): State<AppState>,
) -> AppResult<Json<AutomationsResponse>> {
    let service = AutomationService::new(state.db.clone());
    let (rules, defaults_used) = service.list_rules().await?;
    Ok(Json(AutomationsResponse {
        rules,
        defaults_used,
    }))
}

/// PUT /api/v1/weather/automations
pub async fn replace_automations(
    State(state): State<AppState>,
    Json(rules): Json<Vec<AutomationRule>>,
) -> AppResult<Json<AutomationsResponse>> {
    let service = AutomationService::new(state.db.clone());
    let rules = service.replace_rules(rules).await?;
    Ok(Json(AutomationsResponse {
        rules,
        defaults_used: false,
    }))
}

/// POST /api/v1/weather/automations/:rule_id/dispatch
pub async fn dispatch_automation(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
    Json(input): Json<DispatchInput>,
) -> AppResult<Json<DispatchReceipt>> {
    let service = AutomationService::new(state.db.clone());
    let receipt = service.record_dispatch(&rule_id, input).await?;
    Ok(Json(receipt))
}
