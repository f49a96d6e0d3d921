//! Automation rule matching tests

use chrono::NaiveDate;
use rust_decimal::Decimal;

use shared::automation::match_rules;
use shared::models::{
    default_automation_rules, AutomationRule, DailyObservation, DemandPrediction, RuleStats,
    ScoredDay, TriggerCondition,
};
use shared::types::{DemandLevel, Season, WeatherCategory};

fn scored_day(golf_score: i32) -> ScoredDay {
    let date = NaiveDate::from_ymd_opt(2026, 8, 22).unwrap();
    ScoredDay {
        observation: DailyObservation {
            date,
            temperature_max_c: 24.0,
            temperature_min_c: 15.0,
            precipitation_sum_mm: 0.0,
            windspeed_max_kmh: 10.0,
            weather_code: 0,
            daylight_hours: 13.5,
            sunrise: "2026-08-22T07:29".to_string(),
            sunset: "2026-08-22T21:00".to_string(),
        },
        golf_score,
        is_closed: golf_score == 0,
    }
}

fn prediction(golf_score: i32, level: DemandLevel) -> DemandPrediction {
    DemandPrediction {
        date: NaiveDate::from_ymd_opt(2026, 8, 22).unwrap(),
        golf_score,
        estimated_occupancy_pct: 80.0,
        expected_reservations: 64,
        estimated_revenue: Decimal::from(4160),
        applicable_rate: Decimal::from(65),
        confidence_pct: 95,
        demand_level: level,
        is_weekend: true,
        is_holiday: false,
        has_tournament: false,
        season: Season::High,
        season_multiplier: 1.2,
    }
}

fn rule(id: &str, enabled: bool, weather: Vec<WeatherCategory>, demand: Vec<DemandLevel>) -> AutomationRule {
    AutomationRule {
        id: id.to_string(),
        name: id.to_string(),
        enabled,
        trigger: TriggerCondition { weather, demand },
        channel: "whatsapp".to_string(),
        template_ref: format!("tpl_{}", id),
        stats: RuleStats::default(),
    }
}

#[test]
fn default_rule_set_is_complete() {
    let rules = default_automation_rules();
    assert_eq!(rules.len(), 4);

    let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"fin_de_semana_perfecto"));
    assert!(ids.contains(&"recuperacion_post_lluvia"));
    assert!(ids.contains(&"puente_con_sol"));
    assert!(ids.contains(&"dia_invierno_indoor"));

    // The indoor offer ships disabled
    let indoor = rules.iter().find(|r| r.id == "dia_invierno_indoor").unwrap();
    assert!(!indoor.enabled);

    // Fresh defaults carry no history
    assert!(rules.iter().all(|r| r.stats == RuleStats::default()));
}

#[test]
fn sunny_high_demand_day_fires_the_weekend_rules() {
    let rules = default_automation_rules();
    let day = scored_day(92);
    let matched = match_rules(&day, &prediction(92, DemandLevel::Alta), &rules);

    let ids: Vec<&str> = matched.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["fin_de_semana_perfecto", "puente_con_sol"]);
}

#[test]
fn overcast_medium_day_fires_the_recovery_rule() {
    let rules = default_automation_rules();
    // Score 60 bands as overcast
    let day = scored_day(60);
    let matched = match_rules(&day, &prediction(60, DemandLevel::Media), &rules);

    let ids: Vec<&str> = matched.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["recuperacion_post_lluvia"]);
}

#[test]
fn disabled_rules_never_match() {
    let rules = default_automation_rules();
    // Storm + closed is exactly the indoor rule's trigger, but it is disabled
    let day = scored_day(0);
    let matched = match_rules(&day, &prediction(0, DemandLevel::Cerrado), &rules);
    assert!(matched.is_empty());
}

#[test]
fn empty_trigger_lists_are_wildcards() {
    let catch_all = rule("todo", true, vec![], vec![]);
    let day = scored_day(45);
    let matched = match_rules(&day, &prediction(45, DemandLevel::Baja), std::slice::from_ref(&catch_all));
    assert_eq!(matched.len(), 1);

    let weather_only = rule("solo_lluvia", true, vec![WeatherCategory::Rain], vec![]);
    let matched = match_rules(&day, &prediction(45, DemandLevel::Alta), std::slice::from_ref(&weather_only));
    assert_eq!(matched.len(), 1);
}

#[test]
fn both_trigger_dimensions_must_match() {
    let r = rule(
        "estricta",
        true,
        vec![WeatherCategory::Sunny],
        vec![DemandLevel::Alta],
    );

    // Sunny but only medium demand
    let day = scored_day(90);
    let matched = match_rules(&day, &prediction(90, DemandLevel::Media), std::slice::from_ref(&r));
    assert!(matched.is_empty());

    // High demand but overcast
    let day = scored_day(60);
    let matched = match_rules(&day, &prediction(60, DemandLevel::Alta), std::slice::from_ref(&r));
    assert!(matched.is_empty());
}

#[test]
fn trigger_condition_matches_directly() {
    let trigger = TriggerCondition {
        weather: vec![WeatherCategory::Sunny, WeatherCategory::Overcast],
        demand: vec![DemandLevel::Baja],
    };

    assert!(trigger.matches(WeatherCategory::Sunny, DemandLevel::Baja));
    assert!(trigger.matches(WeatherCategory::Overcast, DemandLevel::Baja));
    assert!(!trigger.matches(WeatherCategory::Rain, DemandLevel::Baja));
    assert!(!trigger.matches(WeatherCategory::Sunny, DemandLevel::Alta));
}

#[test]
fn category_bands_line_up_with_rule_expectations() {
    assert_eq!(WeatherCategory::from_golf_score(100), WeatherCategory::Sunny);
    assert_eq!(WeatherCategory::from_golf_score(75), WeatherCategory::Sunny);
    assert_eq!(WeatherCategory::from_golf_score(74), WeatherCategory::Overcast);
    assert_eq!(WeatherCategory::from_golf_score(55), WeatherCategory::Overcast);
    assert_eq!(WeatherCategory::from_golf_score(54), WeatherCategory::Rain);
    assert_eq!(WeatherCategory::from_golf_score(30), WeatherCategory::Rain);
    assert_eq!(WeatherCategory::from_golf_score(29), WeatherCategory::Storm);
    assert_eq!(WeatherCategory::from_golf_score(0), WeatherCategory::Storm);
}
