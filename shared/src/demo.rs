//! Demo historical dataset
//!
//! Six months of plausible day records served by analytics until enough real
//! operational history accumulates. Deterministic: a fixed-seed generator
//! produces the same dataset for the same end date, so the numbers a new
//! club sees are stable across requests.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{FieldConfig, HistoricalDayRecord};

/// Version of the generated dataset below. Bump when the shape of the demo
/// numbers changes so consumers can tell datasets apart.
pub const DEMO_HISTORY_VERSION: u32 = 1;

/// Days of demo history generated
pub const DEMO_HISTORY_DAYS: usize = 180;

/// Real records below this count are considered too sparse for meaningful
/// analytics and the demo dataset is served instead
pub const MIN_REAL_RECORDS: usize = 30;

/// Whether a real-record count is too sparse to report on
pub fn is_sparse(real_record_count: usize) -> bool {
    real_record_count < MIN_REAL_RECORDS
}

/// Park-Miller linear congruential generator, fixed seed
struct DemoRng {
    seed: u64,
}

impl DemoRng {
    fn new() -> Self {
        Self { seed: 42 }
    }

    fn next(&mut self) -> f64 {
        self.seed = (self.seed * 16807) % 2147483647;
        (self.seed - 1) as f64 / 2147483646.0
    }
}

/// Generate the demo dataset: `DEMO_HISTORY_DAYS` days ending at `today`,
/// with golf scores following the season, occupancy correlated with score
/// and weekends, and revenue at the configured rates.
pub fn demo_history(today: NaiveDate, config: &FieldConfig) -> Vec<HistoricalDayRecord> {
    let mut rng = DemoRng::new();
    let start = today - Duration::days(DEMO_HISTORY_DAYS as i64 - 1);

    (0..DEMO_HISTORY_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset as i64);
            let month = date.month();
            let is_weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);

            let mut base_score = match month {
                4..=10 => 65.0 + rng.next() * 30.0,
                3 | 11 => 45.0 + rng.next() * 35.0,
                _ => 25.0 + rng.next() * 40.0,
            };
            // Occasional genuinely bad day in any season
            if rng.next() < 0.15 {
                base_score = (base_score - 30.0 - rng.next() * 20.0).max(10.0);
            }
            let golf_score = base_score.round() as i32;

            let mut occupancy = golf_score as f64 * 0.85 + rng.next() * 15.0;
            if is_weekend {
                occupancy += 15.0;
            }
            if (4..=10).contains(&month) {
                occupancy += 5.0;
            }
            let occupancy = occupancy.clamp(5.0, 100.0).round();

            let rate = if is_weekend {
                config.rate_weekend
            } else {
                config.rate_weekday
            };
            let reservations =
                ((occupancy / 100.0) * config.capacity as f64).round() as i32;
            let revenue = Decimal::from(reservations) * rate;

            HistoricalDayRecord {
                id: Uuid::new_v4(),
                date,
                golf_score,
                temperature_max_c: None,
                temperature_min_c: None,
                precipitation_sum_mm: None,
                windspeed_max_kmh: None,
                weather_code: None,
                daylight_hours: None,
                predicted_occupancy_pct: None,
                predicted_reservations: None,
                predicted_revenue: None,
                confidence_pct: None,
                actual_occupancy_pct: Some(occupancy),
                actual_reservations: Some(reservations),
                actual_revenue: Some(revenue),
                is_closed: false,
                closure_reason: None,
            }
        })
        .collect()
}
