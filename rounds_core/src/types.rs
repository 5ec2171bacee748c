//! Core domain types for the Rounds drink tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Drink types and the catalog
//! - Logged drink events and their location/photo metadata
//! - Derived BAC readings and body parameters
//! - Nights (tracked sessions) and their thresholds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Drink Types
// ============================================================================

/// A drink type definition (e.g., "Beer")
///
/// `standard_drinks` is informational only; the BAC math works from
/// `volume_ml` and `alcohol_content` directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrinkType {
    pub id: String,
    pub name: String,
    /// Display icon, opaque to all computation
    pub icon: String,
    /// Alcohol percentage by volume
    pub alcohol_content: f64,
    /// Serving volume in milliliters
    pub volume_ml: f64,
    /// Standard drink equivalents
    pub standard_drinks: f64,
}

// ============================================================================
// Drink Events
// ============================================================================

/// Where a drink was logged
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A logged drink
///
/// Immutable fact: created once when a user logs a drink, never updated.
/// Location and photo are carried through untouched and play no part in
/// any computation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrinkEvent {
    pub id: Uuid,
    pub user_id: String,
    pub type_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub photo: Option<String>,
}

// ============================================================================
// Derived Readings and Body Parameters
// ============================================================================

/// Body parameters for the Widmark BAC estimate
///
/// `gender_constant` is the total-body-water distribution ratio
/// (~0.68 for male physiology, ~0.55 for female). Callers supply it;
/// nothing here is hardcoded per-user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyProfile {
    pub weight_kg: f64,
    pub gender_constant: f64,
}

impl Default for BodyProfile {
    fn default() -> Self {
        Self {
            weight_kg: crate::bac::DEFAULT_WEIGHT_KG,
            gender_constant: crate::bac::DEFAULT_GENDER_CONSTANT,
        }
    }
}

/// A derived BAC sample at a point in time
///
/// Ephemeral: produced on demand, never persisted. `bac` is never negative.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BacReading {
    pub at: DateTime<Utc>,
    pub bac: f64,
}

// ============================================================================
// Nights (tracked sessions)
// ============================================================================

/// Per-night suggestion thresholds, in "drink count" units
///
/// Compared against a BAC-derived proxy by the policy module, not against
/// raw drink counts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct NightThresholds {
    pub ride: f64,
    pub food: f64,
    pub notification: f64,
}

impl Default for NightThresholds {
    fn default() -> Self {
        Self {
            ride: 4.0,
            food: 3.0,
            notification: 5.0,
        }
    }
}

/// A tracked drinking session ("night")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Night {
    pub id: Uuid,
    pub group_id: String,
    pub name: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub thresholds: NightThresholds,
    pub is_active: bool,
}

/// Persistent tracker state across nights
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TrackerState {
    pub nights: Vec<Night>,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete catalog of drink type definitions
#[derive(Clone, Debug)]
pub struct Catalog {
    pub drinks: HashMap<String, DrinkType>,
}

impl Catalog {
    /// Look up a drink type by id
    pub fn drink_type(&self, id: &str) -> Option<&DrinkType> {
        self.drinks.get(id)
    }
}
