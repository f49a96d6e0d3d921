//! Marketing automation rule models
//!
//! Rules are configuration: they are created and edited externally and the
//! engine only matches them against day conditions and reads their cumulative
//! stats. Dispatch accounting is keyed by (rule id, date) so a rule can never
//! be double-counted for the same day.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DemandLevel, WeatherCategory};

/// Predicate over the (weather category, demand level) pair of a day.
/// An empty list acts as a wildcard for that dimension.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TriggerCondition {
    #[serde(default)]
    pub weather: Vec<WeatherCategory>,
    #[serde(default)]
    pub demand: Vec<DemandLevel>,
}

impl TriggerCondition {
    pub fn matches(&self, weather: WeatherCategory, demand: DemandLevel) -> bool {
        let weather_ok = self.weather.is_empty() || self.weather.contains(&weather);
        let demand_ok = self.demand.is_empty() || self.demand.contains(&demand);
        weather_ok && demand_ok
    }
}

/// Cumulative performance counters for a rule
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleStats {
    pub sent: i64,
    pub bookings: i64,
    pub revenue: Decimal,
    pub open_rate_pct: f64,
}

/// One marketing automation rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutomationRule {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub trigger: TriggerCondition,
    pub channel: String,
    pub template_ref: String,
    #[serde(default)]
    pub stats: RuleStats,
}

/// Version of the built-in default rule set below. Bump when the defaults
/// change so persisted copies can be told apart from the shipped ones.
pub const DEFAULT_RULES_VERSION: u32 = 1;

/// Built-in rule set used until the club configures its own, with stats
/// zeroed. Kept as an explicit object so it can be tested independently of
/// the live configuration store.
pub fn default_automation_rules() -> Vec<AutomationRule> {
    vec![
        AutomationRule {
            id: "fin_de_semana_perfecto".to_string(),
            name: "Fin de semana perfecto".to_string(),
            enabled: true,
            trigger: TriggerCondition {
                weather: vec![WeatherCategory::Sunny],
                demand: vec![DemandLevel::Alta],
            },
            channel: "whatsapp+email".to_string(),
            template_ref: "tpl_fin_de_semana".to_string(),
            stats: RuleStats::default(),
        },
        AutomationRule {
            id: "recuperacion_post_lluvia".to_string(),
            name: "Recuperación post-lluvia".to_string(),
            enabled: true,
            trigger: TriggerCondition {
                weather: vec![WeatherCategory::Sunny, WeatherCategory::Overcast],
                demand: vec![DemandLevel::Baja, DemandLevel::Media],
            },
            channel: "whatsapp".to_string(),
            template_ref: "tpl_recuperacion".to_string(),
            stats: RuleStats::default(),
        },
        AutomationRule {
            id: "puente_con_sol".to_string(),
            name: "Puente con sol".to_string(),
            enabled: true,
            trigger: TriggerCondition {
                weather: vec![WeatherCategory::Sunny],
                demand: vec![DemandLevel::Media, DemandLevel::Alta],
            },
            channel: "email+whatsapp".to_string(),
            template_ref: "tpl_puente".to_string(),
            stats: RuleStats::default(),
        },
        AutomationRule {
            id: "dia_invierno_indoor".to_string(),
            name: "Día de invierno — oferta indoor".to_string(),
            enabled: false,
            trigger: TriggerCondition {
                weather: vec![WeatherCategory::Rain, WeatherCategory::Storm],
                demand: vec![DemandLevel::Baja, DemandLevel::Cerrado],
            },
            channel: "whatsapp".to_string(),
            template_ref: "tpl_indoor".to_string(),
            stats: RuleStats::default(),
        },
    ]
}
