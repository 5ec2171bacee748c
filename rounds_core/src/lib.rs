#![forbid(unsafe_code)]

//! Core domain model and business logic for the Rounds drink tracker.
//!
//! This crate provides:
//! - Domain types (drink types, drink events, nights, readings)
//! - Catalog management
//! - BAC estimation, risk tiers, and suggestion policy
//! - Aggregate counts and health insights
//! - Persistence (WAL, CSV, tracker state)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod wal;
pub mod csv_rollup;
pub mod night;
pub mod history;
pub mod bac;
pub mod risk;
pub mod policy;
pub mod stats;
pub mod timefmt;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use wal::{DrinkSink, JsonlSink};
pub use history::{events_for_night, load_recent_events};
pub use bac::{bac_timeline, estimate_bac};
pub use risk::{BacLevel, LEGAL_DRIVING_LIMIT};
pub use policy::{should_suggest_food, should_suggest_ride, should_warn, SuggestionTriggers};
pub use stats::{
    count_by_type, drinks_for_user, estimate_life_impact_years, health_insight, monthly_trend,
    total_drinks, weekly_average, HealthInsight, MonthlyTrend,
};
pub use timefmt::{format_date, format_time, time_ago};
