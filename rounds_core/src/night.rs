//! Night lifecycle and tracker state persistence.
//!
//! At most one night is active at a time; starting a new one ends the
//! current night first. State is saved with file locking and an atomic
//! temp-file rename so a crash never leaves a half-written file.

use crate::{Error, Night, NightThresholds, Result, TrackerState};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

impl TrackerState {
    /// The currently active night, if any
    pub fn active_night(&self) -> Option<&Night> {
        self.nights.iter().find(|n| n.is_active)
    }

    /// Ended nights, newest first
    pub fn past_nights(&self) -> Vec<&Night> {
        let mut past: Vec<&Night> = self.nights.iter().filter(|n| !n.is_active).collect();
        past.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        past
    }

    /// Start a new night, ending any currently active one first
    ///
    /// Returns the id of the new night.
    pub fn start_night(
        &mut self,
        group_id: impl Into<String>,
        name: Option<String>,
        thresholds: Option<NightThresholds>,
        now: DateTime<Utc>,
    ) -> Uuid {
        if let Some(active) = self.nights.iter_mut().find(|n| n.is_active) {
            tracing::info!("Ending night {} before starting a new one", active.id);
            active.is_active = false;
            active.ended_at = Some(now);
        }

        let night = Night {
            id: Uuid::new_v4(),
            group_id: group_id.into(),
            name,
            started_at: now,
            ended_at: None,
            thresholds: thresholds.unwrap_or_default(),
            is_active: true,
        };
        let id = night.id;
        self.nights.insert(0, night);

        tracing::info!("Started night {}", id);
        id
    }

    /// End the currently active night
    ///
    /// Returns an error if no night is active.
    pub fn end_active_night(&mut self, now: DateTime<Utc>) -> Result<Uuid> {
        let night = self
            .nights
            .iter_mut()
            .find(|n| n.is_active)
            .ok_or_else(|| Error::State("no active night".into()))?;

        night.is_active = false;
        night.ended_at = Some(now);

        tracing::info!("Ended night {}", night.id);
        Ok(night.id)
    }

    /// Load tracker state from a file with shared locking
    ///
    /// Returns default state if file doesn't exist.
    /// If file is corrupted, logs a warning and returns default state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No state file found, using default state");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open state file {:?}: {}. Using defaults.", path, e);
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock state file {:?}: {}. Using defaults.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read state file {:?}: {}. Using defaults.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<TrackerState>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded tracker state from {:?}", path);
                Ok(state)
            }
            Err(e) => {
                tracing::warn!("Failed to parse state file {:?}: {}. Using defaults.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save tracker state to a file with exclusive locking
    ///
    /// Atomically writes state by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "state path missing parent")
        })?)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old state file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved tracker state to {:?}", path);
        Ok(())
    }

    /// Load state, modify it, and save it back atomically
    ///
    /// This is a convenience method that handles the load-modify-save pattern
    /// with proper error handling.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut TrackerState) -> Result<()>,
    {
        let mut state = Self::load(path)?;
        f(&mut state)?;
        state.save(path)?;
        Ok(state)
    }
}
