//! Historical analytics service
//!
//! Loads a bounded window of daily records plus the current configuration
//! and rule counters, then hands the pure aggregation to the engine. Until
//! enough real history accumulates the report is built from the demo
//! dataset and flagged as simulated.

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::services::{AutomationService, SettingsService};
use shared::analytics::{aggregate, AnalyticsReport, DEFAULT_WINDOW_DAYS};
use shared::demo::{demo_history, is_sparse};
use shared::models::HistoricalDayRecord;

/// Largest permitted analytics window
pub const MAX_WINDOW_DAYS: i64 = 365;

/// Analytics report plus its provenance
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse {
    /// True when the report was built from the demo dataset because real
    /// history was too sparse
    pub is_simulated: bool,
    pub window_days: i64,
    #[serde(flatten)]
    pub report: AnalyticsReport,
}

#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
}

impl AnalyticsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build the analytics report over the trailing window ending today
    pub async fn report(&self, window_days: Option<i64>) -> AppResult<AnalyticsResponse> {
        let window_days = window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        if window_days < 1 || window_days > MAX_WINDOW_DAYS {
            return Err(AppError::ValidationError(format!(
                "Analytics window must be between 1 and {} days",
                MAX_WINDOW_DAYS
            )));
        }

        let today = Utc::now().date_naive();
        let from = today - Duration::days(window_days - 1);

        let settings = SettingsService::new(self.db.clone());
        let (config, _) = settings.field_config().await?;
        let (rules, _) = AutomationService::new(self.db.clone()).list_rules().await?;

        let real_records = self.load_records(from, today).await?;
        let is_simulated = is_sparse(real_records.len());
        let records = if is_simulated {
            tracing::debug!(
                real_records = real_records.len(),
                "Sparse history, serving demo dataset"
            );
            demo_history(today, &config)
        } else {
            real_records
        };

        Ok(AnalyticsResponse {
            is_simulated,
            window_days,
            report: aggregate(&records, &config, &rules),
        })
    }

    async fn load_records(
        &self,
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> AppResult<Vec<HistoricalDayRecord>> {
        let rows: Vec<super::forecast::DayRecordRow> = sqlx::query_as(
            &format!(
                "SELECT {} FROM weather_daily_records WHERE date BETWEEN $1 AND $2 ORDER BY date",
                super::forecast::RECORD_COLUMNS
            ),
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
