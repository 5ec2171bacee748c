//! Blood alcohol estimation.
//!
//! Single-compartment Widmark approximation with linear first-order
//! elimination:
//! - Per-drink alcohol mass from serving volume and alcohol percentage
//! - Distribution over body water (weight x gender constant)
//! - Elimination at a fixed population-average rate from the first drink
//!
//! Everything here is pure computation over in-memory values. The reference
//! time is always an explicit parameter so results are deterministic.

use crate::{BacReading, BodyProfile, Catalog, DrinkEvent};
use chrono::{DateTime, Utc};

/// Default body weight used when the caller has no profile
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Default gender constant (male physiology; ~0.55 for female)
pub const DEFAULT_GENDER_CONSTANT: f64 = 0.68;

/// BAC eliminated per hour (population average)
pub const METABOLISM_RATE_PER_HOUR: f64 = 0.015;

/// Density of ethanol in g/mL
const ETHANOL_DENSITY_G_PER_ML: f64 = 0.789;

/// Estimate a user's current BAC from their logged drinks
///
/// Filters `events` to those owned by `user_id`, sums the alcohol mass of
/// each drink via the catalog, distributes it over body water, and subtracts
/// elimination for the hours between the earliest drink and `now`.
///
/// Never negative. A user with no events gets 0. An event whose `type_id`
/// has no catalog entry contributes zero alcohol but still participates in
/// the elapsed-time baseline. Elimination is measured from the first drink
/// of the session, not integrated per drink.
///
/// A `profile` with zero or negative weight or gender constant is caller
/// error: the result is unspecified (non-finite values are possible).
pub fn estimate_bac(
    events: &[DrinkEvent],
    user_id: &str,
    catalog: &Catalog,
    profile: &BodyProfile,
    now: DateTime<Utc>,
) -> f64 {
    let user_events: Vec<&DrinkEvent> = events.iter().filter(|e| e.user_id == user_id).collect();

    if user_events.is_empty() {
        return 0.0;
    }

    let total_alcohol_grams: f64 = user_events
        .iter()
        .map(|e| {
            catalog
                .drink_type(&e.type_id)
                .map(alcohol_grams)
                .unwrap_or(0.0)
        })
        .sum();

    // BAC formula: alcohol grams / (weight in kg * gender constant)
    let raw_bac = total_alcohol_grams / (profile.weight_kg * profile.gender_constant);

    // Elimination runs from the earliest drink; a future-dated event never
    // produces negative elapsed time because `now` seeds the fold.
    let earliest = user_events
        .iter()
        .map(|e| e.timestamp)
        .fold(now, |earliest, t| if t < earliest { t } else { earliest });

    let hours_since_first = (now - earliest).num_milliseconds() as f64 / 3_600_000.0;
    let metabolized = hours_since_first * METABOLISM_RATE_PER_HOUR;

    (raw_bac - metabolized).max(0.0)
}

/// Alcohol mass in grams for one serving of a drink type
fn alcohol_grams(drink: &crate::DrinkType) -> f64 {
    drink.volume_ml * drink.alcohol_content / 100.0 * ETHANOL_DENSITY_G_PER_ML
}

/// BAC series for a user, one reading per drink
///
/// Sorts the user's drinks chronologically and evaluates the estimate at
/// each drink's timestamp over the drinks logged up to that point. This is
/// the data behind the night timeline chart.
pub fn bac_timeline(
    events: &[DrinkEvent],
    user_id: &str,
    catalog: &Catalog,
    profile: &BodyProfile,
) -> Vec<BacReading> {
    let mut mine: Vec<DrinkEvent> = events
        .iter()
        .filter(|e| e.user_id == user_id)
        .cloned()
        .collect();
    mine.sort_by_key(|e| e.timestamp);

    tracing::debug!("Building BAC timeline over {} drinks", mine.len());

    mine.iter()
        .enumerate()
        .map(|(i, e)| BacReading {
            at: e.timestamp,
            bac: estimate_bac(&mine[..=i], user_id, catalog, profile, e.timestamp),
        })
        .collect()
}
