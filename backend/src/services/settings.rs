//! Club settings service
//!
//! The club keeps one settings row holding the field configuration and the
//! automation rule set as JSON documents. Missing or null documents fall back
//! to the shipped defaults and the caller is told, so responses can flag
//! `defaults_used` instead of silently presenting defaults as configuration.

use sqlx::{PgPool, Row};

use crate::error::{AppError, AppResult};
use shared::models::{default_automation_rules, AutomationRule, FieldConfig};
use shared::validation::{validate_capacity, validate_coordinates};

const SETTINGS_ROW_ID: &str = "default";

#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

impl SettingsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Load the field configuration; the flag is true when defaults applied
    pub async fn field_config(&self) -> AppResult<(FieldConfig, bool)> {
        let value = self.fetch_document("field_config").await?;

        match value {
            Some(raw) => {
                let config: FieldConfig = serde_json::from_value(raw).map_err(|e| {
                    AppError::Configuration(format!("stored field_config is invalid: {}", e))
                })?;
                validate_capacity(config.capacity).map_err(|e| {
                    AppError::Configuration(format!("stored field_config is invalid: {}", e))
                })?;
                validate_coordinates(config.latitude, config.longitude).map_err(|e| {
                    AppError::Configuration(format!("stored field_config is invalid: {}", e))
                })?;
                Ok((config, false))
            }
            None => Ok((FieldConfig::default(), true)),
        }
    }

    /// Load the automation rule set; the flag is true when defaults applied
    pub async fn automation_rules(&self) -> AppResult<(Vec<AutomationRule>, bool)> {
        let value = self.fetch_document("weather_automations").await?;

        match value {
            Some(raw) => {
                let rules: Vec<AutomationRule> = serde_json::from_value(raw).map_err(|e| {
                    AppError::Configuration(format!("stored automations are invalid: {}", e))
                })?;
                Ok((rules, false))
            }
            None => Ok((default_automation_rules(), true)),
        }
    }

    /// Replace the stored automation rule set atomically
    pub async fn replace_automation_rules(&self, rules: &[AutomationRule]) -> AppResult<()> {
        let document = serde_json::to_value(rules)
            .map_err(|e| AppError::Internal(format!("serializing automations: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO club_settings (id, weather_automations, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO UPDATE
            SET weather_automations = EXCLUDED.weather_automations,
                updated_at = NOW()
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(&document)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn fetch_document(&self, column: &str) -> AppResult<Option<serde_json::Value>> {
        // Column name comes from the two call sites above, never from input
        let query = format!("SELECT {} FROM club_settings WHERE id = $1", column);
        let row = sqlx::query(&query)
            .bind(SETTINGS_ROW_ID)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => Ok(row.try_get::<Option<serde_json::Value>, _>(0)?),
            None => Ok(None),
        }
    }
}
