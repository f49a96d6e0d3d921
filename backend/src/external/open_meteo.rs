//! Weather data gateway
//!
//! Fetches and normalizes forecast series from the Open-Meteo API. Fresh
//! data is a hard requirement for predictions, so any upstream failure
//! (unreachable, timeout, non-success status) propagates as
//! `UpstreamUnavailable` instead of being defaulted away.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use shared::models::{DailyObservation, HourlyObservation};
use shared::validation::validate_forecast_days;

/// Normalized forecast series for one fetch
#[derive(Debug, Clone)]
pub struct ForecastBundle {
    pub daily: Vec<DailyObservation>,
    pub hourly: Vec<HourlyObservation>,
}

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    retry_attempts: u32,
}

/// Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: DailySeries,
    hourly: HourlySeries,
}

#[derive(Debug, Deserialize)]
struct DailySeries {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<Option<f64>>,
    windspeed_10m_max: Vec<f64>,
    weathercode: Vec<i32>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    precipitation: Vec<Option<f64>>,
    windspeed_10m: Vec<f64>,
    cloudcover: Vec<i32>,
    weathercode: Vec<i32>,
}

impl OpenMeteoClient {
    /// Create a client with a bounded request timeout
    pub fn new(base_url: String, timeout_secs: u64, retry_attempts: u32) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            retry_attempts,
        })
    }

    /// Fetch a daily + hourly forecast series of `days` length (1-16)
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> AppResult<ForecastBundle> {
        validate_forecast_days(days).map_err(|e| AppError::ValidationError(e.to_string()))?;
        shared::validation::validate_coordinates(latitude, longitude)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let url = format!(
            "{}/forecast?latitude={}&longitude={}\
             &daily=temperature_2m_max,temperature_2m_min,precipitation_sum,\
             windspeed_10m_max,weathercode,sunrise,sunset\
             &hourly=temperature_2m,precipitation,windspeed_10m,cloudcover,weathercode\
             &forecast_days={}&timezone=Europe%2FMadrid",
            self.base_url, latitude, longitude, days
        );

        let data = self.get_with_retry(&url).await?;
        convert_response(data)
    }

    /// Bounded retry on transport errors only; a response from the provider,
    /// even an error status, is never retried here.
    async fn get_with_retry(&self, url: &str) -> AppResult<OpenMeteoResponse> {
        let mut last_error = String::new();

        for attempt in 0..=self.retry_attempts {
            match self.client.get(url).send().await {
                Ok(response) => {
                    if !response.status().is_success() {
                        let status = response.status();
                        return Err(AppError::UpstreamUnavailable(format!(
                            "Open-Meteo returned {}",
                            status
                        )));
                    }
                    return response
                        .json::<OpenMeteoResponse>()
                        .await
                        .map_err(|e| {
                            AppError::UpstreamUnavailable(format!("malformed response: {}", e))
                        });
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < self.retry_attempts {
                        tracing::warn!("Open-Meteo request failed, retrying: {}", last_error);
                    }
                }
            }
        }

        Err(AppError::UpstreamUnavailable(last_error))
    }
}

/// Normalize a provider response into engine observations
fn convert_response(data: OpenMeteoResponse) -> AppResult<ForecastBundle> {
    let d = &data.daily;
    let mut daily = Vec::with_capacity(d.time.len());

    for (i, date) in d.time.iter().enumerate() {
        let sunrise = d
            .sunrise
            .get(i)
            .cloned()
            .ok_or_else(|| upstream_gap("sunrise"))?;
        let sunset = d
            .sunset
            .get(i)
            .cloned()
            .ok_or_else(|| upstream_gap("sunset"))?;

        daily.push(DailyObservation {
            date: *date,
            temperature_max_c: copy_at(&d.temperature_2m_max, i, "temperature_2m_max")?,
            temperature_min_c: copy_at(&d.temperature_2m_min, i, "temperature_2m_min")?,
            precipitation_sum_mm: d
                .precipitation_sum
                .get(i)
                .copied()
                .flatten()
                .unwrap_or(0.0),
            windspeed_max_kmh: copy_at(&d.windspeed_10m_max, i, "windspeed_10m_max")?,
            weather_code: *d.weathercode.get(i).ok_or_else(|| upstream_gap("weathercode"))?,
            daylight_hours: daylight_hours_between(&sunrise, &sunset),
            sunrise,
            sunset,
        });
    }

    let h = &data.hourly;
    let mut hourly = Vec::with_capacity(h.time.len());

    for (i, time) in h.time.iter().enumerate() {
        let temperature_c = copy_at(&h.temperature_2m, i, "temperature_2m")?;
        let precipitation_mm = h.precipitation.get(i).copied().flatten().unwrap_or(0.0);
        let windspeed_kmh = copy_at(&h.windspeed_10m, i, "windspeed_10m")?;

        hourly.push(HourlyObservation {
            is_optimal: is_optimal_hour(time, temperature_c, precipitation_mm, windspeed_kmh),
            time: time.clone(),
            temperature_c,
            precipitation_mm,
            windspeed_kmh,
            cloud_cover_pct: *h.cloudcover.get(i).ok_or_else(|| upstream_gap("cloudcover"))?,
            weather_code: *h.weathercode.get(i).ok_or_else(|| upstream_gap("weathercode"))?,
        });
    }

    Ok(ForecastBundle { daily, hourly })
}

fn copy_at(values: &[f64], index: usize, field: &str) -> AppResult<f64> {
    values.get(index).copied().ok_or_else(|| upstream_gap(field))
}

fn upstream_gap(field: &str) -> AppError {
    AppError::UpstreamUnavailable(format!("incomplete series: missing {}", field))
}

/// Hours between two provider-local ISO timestamps, rounded to one decimal
fn daylight_hours_between(sunrise: &str, sunset: &str) -> f64 {
    match (parse_local(sunrise), parse_local(sunset)) {
        (Some(rise), Some(set)) => {
            let minutes = (set - rise).num_minutes().max(0) as f64;
            (minutes / 60.0 * 10.0).round() / 10.0
        }
        _ => 0.0,
    }
}

/// Playable tee-time hour: daytime, mild, dry and calm
fn is_optimal_hour(time: &str, temperature_c: f64, precipitation_mm: f64, windspeed_kmh: f64) -> bool {
    let Some(hour) = parse_local(time).map(|t| t.hour()) else {
        return false;
    };
    (7..=19).contains(&hour)
        && (12.0..=30.0).contains(&temperature_c)
        && precipitation_mm < 0.5
        && windspeed_kmh < 30.0
}

fn parse_local(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daylight_hours_from_sun_times() {
        assert_eq!(daylight_hours_between("2026-06-20T06:44", "2026-06-20T21:57"), 15.2);
        assert_eq!(daylight_hours_between("2026-12-21T08:44", "2026-12-21T17:59"), 9.3);
        // Garbage input collapses to zero daylight rather than a panic
        assert_eq!(daylight_hours_between("", "2026-12-21T17:59"), 0.0);
    }

    #[test]
    fn optimal_hours_require_daytime_and_calm_weather() {
        assert!(is_optimal_hour("2026-08-24T10:00", 22.0, 0.0, 12.0));
        // Night hour
        assert!(!is_optimal_hour("2026-08-24T03:00", 22.0, 0.0, 12.0));
        // Raining
        assert!(!is_optimal_hour("2026-08-24T10:00", 22.0, 1.2, 12.0));
        // Too windy
        assert!(!is_optimal_hour("2026-08-24T10:00", 22.0, 0.0, 35.0));
        // Too cold
        assert!(!is_optimal_hour("2026-08-24T10:00", 8.0, 0.0, 12.0));
    }

    #[test]
    fn converts_provider_response_into_observations() {
        let raw = serde_json::json!({
            "daily": {
                "time": ["2026-08-24", "2026-08-25"],
                "temperature_2m_max": [27.1, 31.4],
                "temperature_2m_min": [14.2, 16.0],
                "precipitation_sum": [0.0, null],
                "windspeed_10m_max": [14.0, 22.5],
                "weathercode": [1, 3],
                "sunrise": ["2026-08-24T07:31", "2026-08-25T07:32"],
                "sunset": ["2026-08-24T21:04", "2026-08-25T21:02"]
            },
            "hourly": {
                "time": ["2026-08-24T09:00", "2026-08-24T10:00"],
                "temperature_2m": [19.5, 21.0],
                "precipitation": [0.0, 0.0],
                "windspeed_10m": [9.0, 11.0],
                "cloudcover": [20, 35],
                "weathercode": [1, 1]
            }
        });

        let parsed: OpenMeteoResponse = serde_json::from_value(raw).unwrap();
        let bundle = convert_response(parsed).unwrap();

        assert_eq!(bundle.daily.len(), 2);
        assert_eq!(bundle.daily[0].daylight_hours, 13.6);
        // Null precipitation normalizes to zero
        assert_eq!(bundle.daily[1].precipitation_sum_mm, 0.0);
        assert_eq!(bundle.hourly.len(), 2);
        assert!(bundle.hourly.iter().all(|h| h.is_optimal));
    }
}
