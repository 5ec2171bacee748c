//! CSV rollup functionality for archiving WAL drinks.
//!
//! This module implements atomic WAL-to-CSV conversion with proper error
//! handling to prevent data loss. Location and photo metadata survive the
//! round trip.

use crate::{DrinkEvent, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
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

impl From<&DrinkEvent> for CsvRow {
    fn from(event: &DrinkEvent) -> Self {
        CsvRow {
            id: event.id.to_string(),
            user_id: event.user_id.clone(),
            type_id: event.type_id.clone(),
            timestamp: event.timestamp.to_rfc3339(),
            location_name: event.location.as_ref().map(|l| l.name.clone()),
            lat: event.location.as_ref().and_then(|l| l.lat),
            lng: event.location.as_ref().and_then(|l| l.lng),
            photo: event.photo.clone(),
        }
    }
}

/// Roll up WAL drinks into CSV and archive the WAL atomically
///
/// This function:
/// 1. Reads all drinks from the WAL
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the WAL to .processed
/// 5. Returns the number of drinks processed
///
/// # Safety
/// - CSV is fsynced before WAL is renamed
/// - WAL is renamed (not deleted) to allow manual recovery if needed
/// - Processed WAL files can be cleaned up manually
pub fn wal_to_csv_and_archive(wal_path: &Path, csv_path: &Path) -> Result<usize> {
    let events = crate::wal::read_events(wal_path)?;

    if events.is_empty() {
        tracing::info!("No drinks in WAL to roll up");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Headers only when the file is fresh; appends must not repeat them
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for event in &events {
        let row = CsvRow::from(event);
        writer.serialize(row)?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} drinks to CSV", events.len());

    // Atomically archive the WAL by renaming it
    let processed_path = wal_path.with_extension("wal.processed");
    std::fs::rename(wal_path, &processed_path)?;

    tracing::info!("Archived WAL to {:?}", processed_path);

    Ok(events.len())
}

/// Clean up old processed WAL files
///
/// This removes all .wal.processed files in the given directory.
pub fn cleanup_processed_wals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed WAL: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed WAL files", count);
    }

    Ok(count)
}
