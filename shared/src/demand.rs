//! Demand prediction engine
//!
//! Translates a scored day plus calendar and business context into occupancy,
//! booking and revenue predictions with a horizon-decaying confidence.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DemandPrediction, FieldConfig, ScoredDay};
use crate::types::{DayKind, DemandLevel};

/// Tunable demand model parameters. Like the scoring weights these are
/// policy, exposed as configuration rather than hard-coded at call sites.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemandPolicy {
    /// Base occupancy percent contributed per golf-score point. The default
    /// maps score 100 to 85% so the calendar/season multipliers have
    /// headroom below the clamp.
    pub base_occupancy_per_point: f64,
    pub weekend_multiplier: f64,
    pub holiday_multiplier: f64,
    /// Occupancy forced on tournament dates (pre-committed demand);
    /// a weather closure still wins over a tournament.
    pub tournament_occupancy_pct: f64,
    /// Occupancy below this is BAJA
    pub low_demand_cut_pct: f64,
    /// Occupancy at or above this is ALTA
    pub high_demand_cut_pct: f64,
    pub base_confidence_pct: i32,
    pub confidence_decay_per_day: i32,
    pub confidence_floor_pct: i32,
}

impl Default for DemandPolicy {
    fn default() -> Self {
        Self {
            base_occupancy_per_point: 0.85,
            weekend_multiplier: 1.25,
            holiday_multiplier: 1.30,
            tournament_occupancy_pct: 95.0,
            low_demand_cut_pct: 40.0,
            high_demand_cut_pct: 75.0,
            base_confidence_pct: 95,
            confidence_decay_per_day: 3,
            confidence_floor_pct: 60,
        }
    }
}

/// Calendar classification with the holiday rate taking precedence
pub fn day_kind(date: NaiveDate, config: &FieldConfig) -> DayKind {
    if config.custom_holidays.contains(&date) {
        DayKind::Holiday
    } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        DayKind::Weekend
    } else {
        DayKind::Weekday
    }
}

impl DemandPolicy {
    /// Predict demand for one scored day. `horizon_days` is 0 for the first
    /// day of the forecast run.
    pub fn predict(
        &self,
        day: &ScoredDay,
        config: &FieldConfig,
        tournament_dates: &BTreeSet<NaiveDate>,
        horizon_days: usize,
    ) -> DemandPrediction {
        let date = day.date();
        let kind = day_kind(date, config);
        let is_weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let is_holiday = kind == DayKind::Holiday;
        let has_tournament = tournament_dates.contains(&date);

        let season = config.season_calendar.tier_for_month(date.month());
        let season_multiplier = config.season_multipliers.for_season(season);

        let calendar_multiplier = match kind {
            DayKind::Holiday => self.holiday_multiplier,
            DayKind::Weekend => self.weekend_multiplier,
            DayKind::Weekday => 1.0,
        };

        let estimated_occupancy_pct = if day.is_closed {
            0.0
        } else if has_tournament {
            self.tournament_occupancy_pct
        } else {
            let base = day.golf_score as f64 * self.base_occupancy_per_point;
            (base * calendar_multiplier * season_multiplier)
                .round()
                .clamp(0.0, 100.0)
        };

        let expected_reservations = ((estimated_occupancy_pct / 100.0)
            * config.capacity as f64)
            .round()
            .min(config.capacity as f64) as i32;

        let applicable_rate = match kind {
            DayKind::Holiday => config.rate_holiday,
            DayKind::Weekend => config.rate_weekend,
            DayKind::Weekday => config.rate_weekday,
        };
        let estimated_revenue = Decimal::from(expected_reservations) * applicable_rate;

        let confidence_pct = (self.base_confidence_pct
            - self.confidence_decay_per_day * horizon_days as i32)
            .max(self.confidence_floor_pct);

        let demand_level = if day.is_closed {
            DemandLevel::Cerrado
        } else if estimated_occupancy_pct < self.low_demand_cut_pct {
            DemandLevel::Baja
        } else if estimated_occupancy_pct < self.high_demand_cut_pct {
            DemandLevel::Media
        } else {
            DemandLevel::Alta
        };

        DemandPrediction {
            date,
            golf_score: day.golf_score,
            estimated_occupancy_pct,
            expected_reservations,
            estimated_revenue,
            applicable_rate,
            confidence_pct,
            demand_level,
            is_weekend,
            is_holiday,
            has_tournament,
            season,
            season_multiplier,
        }
    }

    /// Predict a whole forecast run; index in the slice is the horizon
    pub fn predict_range(
        &self,
        days: &[ScoredDay],
        config: &FieldConfig,
        tournament_dates: &BTreeSet<NaiveDate>,
    ) -> Vec<DemandPrediction> {
        days.iter()
            .enumerate()
            .map(|(horizon, day)| self.predict(day, config, tournament_dates, horizon))
            .collect()
    }
}
