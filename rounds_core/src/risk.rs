//! Risk tier classification for BAC values.

use serde::{Deserialize, Serialize};

/// Common legal driving limit, used for display alongside readings
pub const LEGAL_DRIVING_LIMIT: f64 = 0.08;

/// Ordered intoxication risk tier
///
/// Breakpoints are fixed, half-open intervals with the lower bound
/// inclusive. A BAC of exactly 0.08 is `Drunk`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BacLevel {
    Sober,
    Buzzed,
    Tipsy,
    Drunk,
    Danger,
}

impl BacLevel {
    /// Classify a BAC value into its risk tier
    pub fn classify(bac: f64) -> Self {
        if bac < 0.02 {
            BacLevel::Sober
        } else if bac < 0.05 {
            BacLevel::Buzzed
        } else if bac < LEGAL_DRIVING_LIMIT {
            BacLevel::Tipsy
        } else if bac < 0.15 {
            BacLevel::Drunk
        } else {
            BacLevel::Danger
        }
    }

    /// Short descriptive text for UI consumption
    pub fn label(&self) -> &'static str {
        match self {
            BacLevel::Sober => "Minimal impairment",
            BacLevel::Buzzed => "Mild relaxation, lowered inhibition",
            BacLevel::Tipsy => "Impaired judgment and coordination",
            BacLevel::Drunk => "Over the legal driving limit",
            BacLevel::Danger => "Serious risk! Seek help",
        }
    }

    /// Lowercase tier name as used in serialized payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            BacLevel::Sober => "sober",
            BacLevel::Buzzed => "buzzed",
            BacLevel::Tipsy => "tipsy",
            BacLevel::Drunk => "drunk",
            BacLevel::Danger => "danger",
        }
    }
}
