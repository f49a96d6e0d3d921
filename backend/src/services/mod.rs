//! Business logic services

pub mod analytics;
pub mod automation;
pub mod forecast;
pub mod settings;

pub use analytics::AnalyticsService;
pub use automation::AutomationService;
pub use forecast::ForecastService;
pub use settings::SettingsService;
