//! Drink history loading with a cutoff window.
//!
//! This module loads drink history from both the WAL and the CSV archive
//! to feed the status, history, and health views.

use crate::{DrinkEvent, Location, Night, Result};
use chrono::{DateTime, Duration, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// CSV row format for reading archived drinks
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    user_id: String,
    type_id: String,
    timestamp: String,
    location_name: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    photo: Option<String>,
}

impl TryFrom<CsvRow> for DrinkEvent {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        let location = row.location_name.map(|name| Location {
            name,
            lat: row.lat,
            lng: row.lng,
        });

        Ok(DrinkEvent {
            id,
            user_id: row.user_id,
            type_id: row.type_id,
            timestamp,
            location,
            photo: row.photo,
        })
    }
}

/// Load drinks from the last N days from both WAL and CSV
///
/// Returns drinks sorted by timestamp (newest first).
/// Automatically deduplicates drinks that appear in both WAL and CSV.
pub fn load_recent_events(wal_path: &Path, csv_path: &Path, days: i64) -> Result<Vec<DrinkEvent>> {
    let cutoff = Utc::now() - Duration::days(days);
    let mut events = Vec::new();
    let mut seen_ids = HashSet::new();

    // Load from WAL first (most recent)
    if wal_path.exists() {
        let wal_events = crate::wal::read_events(wal_path)?;
        for event in wal_events {
            if event.timestamp >= cutoff {
                seen_ids.insert(event.id);
                events.push(event);
            }
        }
        tracing::debug!("Loaded {} drinks from WAL", events.len());
    }

    // Load from CSV (archived)
    if csv_path.exists() {
        let csv_events = load_events_from_csv(csv_path)?;
        let mut csv_count = 0;
        for event in csv_events {
            if event.timestamp >= cutoff && !seen_ids.contains(&event.id) {
                seen_ids.insert(event.id);
                events.push(event);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} drinks from CSV", csv_count);
    }

    // Sort by timestamp, newest first
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    tracing::info!("Loaded {} total drinks from last {} days", events.len(), days);

    Ok(events)
}

/// Load all drinks from a CSV file
fn load_events_from_csv(path: &Path) -> Result<Vec<DrinkEvent>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut events = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match DrinkEvent::try_from(row) {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    // Continue processing other rows
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(events)
}

/// Drinks that fall inside a night's time window
///
/// An active night is open-ended; an ended night is bounded by `ended_at`.
pub fn events_for_night<'a>(events: &'a [DrinkEvent], night: &Night) -> Vec<&'a DrinkEvent> {
    events
        .iter()
        .filter(|e| {
            e.timestamp >= night.started_at
                && night.ended_at.map_or(true, |end| e.timestamp <= end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wal::DrinkSink;
    use crate::NightThresholds;

    fn create_test_event(type_id: &str, hours_ago: i64) -> DrinkEvent {
        DrinkEvent {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
            type_id: type_id.into(),
            timestamp: Utc::now() - Duration::hours(hours_ago),
            location: None,
            photo: None,
        }
    }

    #[test]
    fn test_load_recent_events_from_wal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("drinks.wal");
        let csv_path = temp_dir.path().join("drinks.csv");

        let mut sink = crate::wal::JsonlSink::new(&wal_path);
        sink.append(&create_test_event("beer", 1)).unwrap();
        sink.append(&create_test_event("wine", 20)).unwrap();
        sink.append(&create_test_event("shot", 24 * 10)).unwrap(); // Too old

        let events = load_recent_events(&wal_path, &csv_path, 7).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_deduplication_across_wal_and_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("drinks.wal");
        let csv_path = temp_dir.path().join("drinks.csv");

        let event = create_test_event("beer", 1);
        let event_id = event.id;
        let mut sink = crate::wal::JsonlSink::new(&wal_path);
        sink.append(&event).unwrap();

        // Roll up to CSV (which includes the same drink)
        crate::csv_rollup::wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();

        let events =
            load_recent_events(&temp_dir.path().join("nonexistent.wal"), &csv_path, 7).unwrap();

        let count = events.iter().filter(|e| e.id == event_id).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_events_sorted_newest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("drinks.wal");
        let csv_path = temp_dir.path().join("drinks.csv");

        let mut sink = crate::wal::JsonlSink::new(&wal_path);
        sink.append(&create_test_event("old_round", 30)).unwrap();
        sink.append(&create_test_event("new_round", 1)).unwrap();

        let events = load_recent_events(&wal_path, &csv_path, 7).unwrap();

        assert_eq!(events[0].type_id, "new_round");
        assert_eq!(events[1].type_id, "old_round");
    }

    #[test]
    fn test_location_survives_csv_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("drinks.wal");
        let csv_path = temp_dir.path().join("drinks.csv");

        let mut event = create_test_event("cocktail", 2);
        event.location = Some(Location {
            name: "Tiki Lounge".into(),
            lat: Some(40.71),
            lng: Some(-74.0),
        });
        event.photo = Some("photos/tiki.jpg".into());

        let mut sink = crate::wal::JsonlSink::new(&wal_path);
        sink.append(&event).unwrap();
        crate::csv_rollup::wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();

        let events = load_recent_events(&wal_path, &csv_path, 7).unwrap();
        assert_eq!(events.len(), 1);
        let loc = events[0].location.as_ref().unwrap();
        assert_eq!(loc.name, "Tiki Lounge");
        assert_eq!(loc.lat, Some(40.71));
        assert_eq!(events[0].photo.as_deref(), Some("photos/tiki.jpg"));
    }

    #[test]
    fn test_events_for_night_window() {
        let night = Night {
            id: Uuid::new_v4(),
            group_id: "g1".into(),
            name: None,
            started_at: Utc::now() - Duration::hours(6),
            ended_at: Some(Utc::now() - Duration::hours(1)),
            thresholds: NightThresholds::default(),
            is_active: false,
        };

        let inside = create_test_event("beer", 3);
        let before = create_test_event("wine", 10);
        let after = create_test_event("shot", 0);
        let events = vec![inside.clone(), before, after];

        let in_night = events_for_night(&events, &night);
        assert_eq!(in_night.len(), 1);
        assert_eq!(in_night[0].id, inside.id);
    }

    #[test]
    fn test_events_for_active_night_is_open_ended() {
        let night = Night {
            id: Uuid::new_v4(),
            group_id: "g1".into(),
            name: None,
            started_at: Utc::now() - Duration::hours(2),
            ended_at: None,
            thresholds: NightThresholds::default(),
            is_active: true,
        };

        let events = vec![create_test_event("beer", 1), create_test_event("wine", 0)];
        assert_eq!(events_for_night(&events, &night).len(), 2);
    }
}
