//! Automation rule matching
//!
//! Matching is pure and side-effect-free: it answers "would this rule fire
//! today" and nothing else. Updating a rule's cumulative stats happens in a
//! separate, explicit operation once a message is actually sent, keyed by
//! (rule id, date) so dispatch stays at-most-once per rule per day.

use crate::models::{AutomationRule, DemandPrediction, ScoredDay};
use crate::types::WeatherCategory;

/// Return the enabled rules whose trigger matches the day's weather category
/// and demand level.
pub fn match_rules<'a>(
    day: &ScoredDay,
    prediction: &DemandPrediction,
    rules: &'a [AutomationRule],
) -> Vec<&'a AutomationRule> {
    let category = WeatherCategory::from_golf_score(day.golf_score);
    rules
        .iter()
        .filter(|rule| rule.enabled && rule.trigger.matches(category, prediction.demand_level))
        .collect()
}
