//! Suggestion and notification policy.
//!
//! Each night carries thresholds expressed in "drink count" units. The
//! predicates here compare BAC against those thresholds at a fixed
//! conversion of 0.02 BAC per drink. The conversion is intentionally
//! decoupled from the per-type alcohol math in the estimator; it mirrors
//! the product's long-standing night-settings convention.
//!
//! All predicates are stateless. Deduplicating repeated notifications is
//! the caller's job.

use crate::NightThresholds;

/// Approximate BAC contributed by one configured "drink"
const BAC_PER_DRINK: f64 = 0.02;

/// Whether the user should be offered a ride home
pub fn should_suggest_ride(bac: f64, ride_threshold_drinks: f64) -> bool {
    bac >= ride_threshold_drinks * BAC_PER_DRINK
}

/// Whether the user should be nudged to order food
pub fn should_suggest_food(bac: f64, food_threshold_drinks: f64) -> bool {
    bac >= food_threshold_drinks * BAC_PER_DRINK
}

/// Whether an overconsumption warning should fire
pub fn should_warn(bac: f64, notification_threshold_drinks: f64) -> bool {
    bac >= notification_threshold_drinks * BAC_PER_DRINK
}

/// The three trigger decisions for one BAC reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuggestionTriggers {
    pub ride: bool,
    pub food: bool,
    pub warn: bool,
}

impl SuggestionTriggers {
    /// Evaluate all three predicates against a night's thresholds
    pub fn evaluate(bac: f64, thresholds: &NightThresholds) -> Self {
        Self {
            ride: should_suggest_ride(bac, thresholds.ride),
            food: should_suggest_food(bac, thresholds.food),
            warn: should_warn(bac, thresholds.notification),
        }
    }
}
