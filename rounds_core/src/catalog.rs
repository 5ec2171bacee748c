//! Default catalog of drink type definitions.
//!
//! This module provides the built-in drink types for the system.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
///
/// This function returns a reference to the pre-built catalog, avoiding
/// the overhead of rebuilding it on every operation.
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog of drink types
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    let mut drinks = HashMap::new();

    drinks.insert(
        "beer".into(),
        DrinkType {
            id: "beer".into(),
            name: "Beer".into(),
            icon: "🍺".into(),
            alcohol_content: 5.0,
            volume_ml: 355.0,
            standard_drinks: 1.0,
        },
    );

    drinks.insert(
        "wine".into(),
        DrinkType {
            id: "wine".into(),
            name: "Wine".into(),
            icon: "🍷".into(),
            alcohol_content: 12.0,
            volume_ml: 150.0,
            standard_drinks: 1.5,
        },
    );

    drinks.insert(
        "cocktail".into(),
        DrinkType {
            id: "cocktail".into(),
            name: "Cocktail".into(),
            icon: "🍸".into(),
            alcohol_content: 15.0,
            volume_ml: 180.0,
            standard_drinks: 2.0,
        },
    );

    drinks.insert(
        "shot".into(),
        DrinkType {
            id: "shot".into(),
            name: "Shot".into(),
            icon: "🥃".into(),
            alcohol_content: 40.0,
            volume_ml: 45.0,
            standard_drinks: 1.5,
        },
    );

    drinks.insert(
        "cider".into(),
        DrinkType {
            id: "cider".into(),
            name: "Cider".into(),
            icon: "🍎".into(),
            alcohol_content: 4.5,
            volume_ml: 330.0,
            standard_drinks: 0.8,
        },
    );

    drinks.insert(
        "seltzer".into(),
        DrinkType {
            id: "seltzer".into(),
            name: "Seltzer".into(),
            icon: "🥂".into(),
            alcohol_content: 5.0,
            volume_ml: 355.0,
            standard_drinks: 1.0,
        },
    );

    Catalog { drinks }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (id, drink) in &self.drinks {
            if id.is_empty() || drink.id.is_empty() {
                errors.push("Drink type has empty ID".to_string());
            }
            if id != &drink.id {
                errors.push(format!(
                    "Drink key '{}' doesn't match drink.id '{}'",
                    id, drink.id
                ));
            }
            if drink.name.is_empty() {
                errors.push(format!("Drink type '{}' has empty name", id));
            }
            if drink.alcohol_content < 0.0 {
                errors.push(format!(
                    "Drink type '{}' has negative alcohol content {}",
                    id, drink.alcohol_content
                ));
            }
            if drink.volume_ml < 0.0 {
                errors.push(format!(
                    "Drink type '{}' has negative volume {}",
                    id, drink.volume_ml
                ));
            }
            if drink.standard_drinks < 0.0 {
                errors.push(format!(
                    "Drink type '{}' has negative standard drink count {}",
                    id, drink.standard_drinks
                ));
            }
        }

        errors
    }
}
