//! Playability scoring engine
//!
//! Maps raw weather signals to a 0-100 golf score plus a closure flag.
//! The score is a base of 100 minus composable penalties; closure is a hard
//! override on top of the additive blend, because an extreme single factor
//! closes the field outright even when everything else looks fine.

use serde::{Deserialize, Serialize};

use crate::models::{DailyObservation, FieldConfig, ScoredDay};

/// Tunable penalty weights. These are policy parameters, not structural
/// requirements; the defaults document the shipped behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringPolicy {
    /// Max penalty as precipitation approaches the closure threshold
    pub max_precipitation_penalty: f64,
    /// Max penalty as wind approaches the closure threshold
    pub max_wind_penalty: f64,
    /// Max penalty for temperatures outside the ideal band
    pub max_temperature_penalty: f64,
    pub ideal_temp_low_c: f64,
    pub ideal_temp_high_c: f64,
    pub temp_penalty_per_degree: f64,
    /// Max penalty for short-daylight days
    pub max_daylight_penalty: f64,
    /// Days with less daylight than this lose points
    pub short_daylight_hours: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            max_precipitation_penalty: 50.0,
            max_wind_penalty: 30.0,
            max_temperature_penalty: 15.0,
            ideal_temp_low_c: 15.0,
            ideal_temp_high_c: 28.0,
            temp_penalty_per_degree: 1.5,
            max_daylight_penalty: 5.0,
            short_daylight_hours: 10.0,
        }
    }
}

impl ScoringPolicy {
    /// Score a single observation against the field thresholds
    pub fn score_day(&self, observation: &DailyObservation, config: &FieldConfig) -> ScoredDay {
        let is_closed = observation.precipitation_sum_mm > config.rain_closure_threshold_mm
            || observation.windspeed_max_kmh > config.wind_closure_threshold_kmh;

        if is_closed {
            return ScoredDay {
                observation: observation.clone(),
                golf_score: 0,
                is_closed: true,
            };
        }

        let penalties = self.precipitation_penalty(observation, config)
            + self.wind_penalty(observation, config)
            + self.temperature_penalty(observation)
            + self.daylight_penalty(observation);

        let golf_score = (100.0 - penalties).round().clamp(0.0, 100.0) as i32;

        ScoredDay {
            observation: observation.clone(),
            golf_score,
            is_closed: false,
        }
    }

    /// Score a whole forecast run, preserving order
    pub fn score_days(
        &self,
        observations: &[DailyObservation],
        config: &FieldConfig,
    ) -> Vec<ScoredDay> {
        observations
            .iter()
            .map(|obs| self.score_day(obs, config))
            .collect()
    }

    /// Linear in precipitation, saturating at the closure threshold
    fn precipitation_penalty(&self, obs: &DailyObservation, config: &FieldConfig) -> f64 {
        let threshold = config.rain_closure_threshold_mm.max(f64::EPSILON);
        let fraction = (obs.precipitation_sum_mm.max(0.0) / threshold).min(1.0);
        fraction * self.max_precipitation_penalty
    }

    /// Linear in wind speed, saturating at the closure threshold
    fn wind_penalty(&self, obs: &DailyObservation, config: &FieldConfig) -> f64 {
        let threshold = config.wind_closure_threshold_kmh.max(f64::EPSILON);
        let fraction = (obs.windspeed_max_kmh.max(0.0) / threshold).min(1.0);
        fraction * self.max_wind_penalty
    }

    /// Symmetric penalty for daily max temperature outside the ideal band
    fn temperature_penalty(&self, obs: &DailyObservation) -> f64 {
        let deviation = if obs.temperature_max_c < self.ideal_temp_low_c {
            self.ideal_temp_low_c - obs.temperature_max_c
        } else if obs.temperature_max_c > self.ideal_temp_high_c {
            obs.temperature_max_c - self.ideal_temp_high_c
        } else {
            0.0
        };
        (deviation * self.temp_penalty_per_degree).min(self.max_temperature_penalty)
    }

    /// Short days reduce playable hours
    fn daylight_penalty(&self, obs: &DailyObservation) -> f64 {
        let missing = (self.short_daylight_hours - obs.daylight_hours).max(0.0);
        missing.min(self.max_daylight_penalty)
    }
}
