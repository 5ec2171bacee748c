//! Write-Ahead Log (WAL) for drink persistence.
//!
//! Drinks are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access from multiple group members' shells.

use crate::{DrinkEvent, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Drink sink trait for persisting logged drinks
pub trait DrinkSink {
    fn append(&mut self, event: &DrinkEvent) -> Result<()>;
}

/// JSONL-based drink sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl DrinkSink for JsonlSink {
    fn append(&mut self, event: &DrinkEvent) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Exclusive lock: group members may log from separate processes
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(event)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended drink {} to WAL", event.id);
        Ok(())
    }
}

/// Read all drinks from a WAL file
///
/// Malformed lines are skipped with a warning so one bad record never
/// hides an entire night.
pub fn read_events(path: &Path) -> Result<Vec<DrinkEvent>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut events = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<DrinkEvent>(&line) {
            Ok(event) => events.push(event),
            Err(e) => {
                tracing::warn!("Failed to parse drink at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} drinks from WAL", events.len());
    Ok(events)
}
