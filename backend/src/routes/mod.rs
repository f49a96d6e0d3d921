//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::weather;
use crate::AppState;

/// All /api/v1 routes
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/weather", weather_routes())
}

fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(weather::get_forecast))
        .route("/snapshot", post(weather::create_snapshot))
        .route(
            "/daily-record",
            get(weather::get_daily_record).post(weather::upsert_daily_record),
        )
        .route("/analytics", get(weather::get_analytics))
        .route(
            "/automations",
            get(weather::list_automations).put(weather::replace_automations),
        )
        .route(
            "/automations/:rule_id/dispatch",
            post(weather::dispatch_automation),
        )
}
