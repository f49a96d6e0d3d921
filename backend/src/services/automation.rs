//! Automation rule administration and dispatch accounting
//!
//! Rule definitions live in club settings; cumulative performance counters
//! live in their own table and are merged in when rules are listed. Dispatch
//! accounting is idempotent per (rule id, date): replaying a dispatch for a
//! day that was already counted changes nothing.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::services::SettingsService;
use shared::models::{AutomationRule, RuleStats};

/// Payload accounting for one automated send
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchInput {
    pub date: NaiveDate,
    #[serde(default)]
    pub opened: bool,
    #[serde(default)]
    pub bookings: i64,
    #[serde(default)]
    pub revenue: Decimal,
}

/// Outcome of a dispatch attempt
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReceipt {
    pub rule_id: String,
    pub date: NaiveDate,
    /// False when this (rule, date) pair was already counted
    pub recorded: bool,
}

#[derive(Clone)]
pub struct AutomationService {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    rule_id: String,
    sent: i64,
    opens: i64,
    bookings: i64,
    revenue: Decimal,
}

impl StatsRow {
    fn into_stats(self) -> RuleStats {
        let open_rate_pct = if self.sent == 0 {
            0.0
        } else {
            (self.opens as f64 / self.sent as f64) * 100.0
        };
        RuleStats {
            sent: self.sent,
            bookings: self.bookings,
            revenue: self.revenue,
            open_rate_pct,
        }
    }
}

impl AutomationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the configured rules with live counters merged in; the flag is
    /// true when the shipped defaults applied
    pub async fn list_rules(&self) -> AppResult<(Vec<AutomationRule>, bool)> {
        let settings = SettingsService::new(self.db.clone());
        let (mut rules, defaults_used) = settings.automation_rules().await?;

        let rows: Vec<StatsRow> = sqlx::query_as(
            "SELECT rule_id, sent, opens, bookings, revenue FROM automation_stats",
        )
        .fetch_all(&self.db)
        .await?;

        for row in rows {
            if let Some(rule) = rules.iter_mut().find(|r| r.id == row.rule_id) {
                rule.stats = row.into_stats();
            }
        }

        Ok((rules, defaults_used))
    }

    /// Replace the configured rule set. Counters are keyed by rule id and
    /// survive the replacement for ids that persist.
    pub async fn replace_rules(&self, rules: Vec<AutomationRule>) -> AppResult<Vec<AutomationRule>> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.id.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Automation rule id cannot be empty".to_string(),
                ));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(AppError::Conflict(format!(
                    "Duplicate automation rule id: {}",
                    rule.id
                )));
            }
        }

        let settings = SettingsService::new(self.db.clone());
        settings.replace_automation_rules(&rules).await?;

        let (stored, _) = self.list_rules().await?;
        Ok(stored)
    }

    /// Count one dispatch of a rule for a date, exactly once
    pub async fn record_dispatch(
        &self,
        rule_id: &str,
        input: DispatchInput,
    ) -> AppResult<DispatchReceipt> {
        let (rules, _) = self.list_rules().await?;
        if !rules.iter().any(|r| r.id == rule_id) {
            return Err(AppError::NotFound(format!("automation rule {}", rule_id)));
        }

        let mut tx = self.db.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO automation_dispatches (rule_id, date)
            VALUES ($1, $2)
            ON CONFLICT (rule_id, date) DO NOTHING
            "#,
        )
        .bind(rule_id)
        .bind(input.date)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        // Counters move only when the dispatch row was actually new
        if inserted == 1 {
            sqlx::query(
                r#"
                INSERT INTO automation_stats (rule_id, sent, opens, bookings, revenue)
                VALUES ($1, 1, $2, $3, $4)
                ON CONFLICT (rule_id) DO UPDATE SET
                    sent = automation_stats.sent + 1,
                    opens = automation_stats.opens + $2,
                    bookings = automation_stats.bookings + $3,
                    revenue = automation_stats.revenue + $4
                "#,
            )
            .bind(rule_id)
            .bind(if input.opened { 1_i64 } else { 0 })
            .bind(input.bookings)
            .bind(input.revenue)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(DispatchReceipt {
            rule_id: rule_id.to_string(),
            date: input.date,
            recorded: inserted == 1,
        })
    }
}
