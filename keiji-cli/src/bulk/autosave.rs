//! Best-effort local auto-save for the bulk grid
//!
//! A debounced snapshot of all rows is written to the platform data dir,
//! keyed by user id. Snapshots older than 24 hours are discarded unread;
//! newer ones are returned so the caller can offer a restore prompt.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BulkRow;

pub const SNAPSHOT_MAX_AGE_HOURS: i64 = 24;

/// A serialized copy of the grid rows at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: Uuid,
    pub user_id: String,
    pub saved_at: DateTime<Utc>,
    pub rows: Vec<BulkRow>,
}

impl Snapshot {
    pub fn age_hours(&self) -> i64 {
        (Utc::now() - self.saved_at).num_hours()
    }
}

/// Snapshot persistence, one file per user id
#[derive(Debug, Clone)]
pub struct AutosaveStore {
    dir: PathBuf,
}

impl AutosaveStore {
    /// Store under the platform data directory
    pub fn new() -> Result<Self> {
        let dir = dirs::data_dir()
            .context("No platform data directory available")?
            .join("keiji-cli");
        Ok(Self { dir })
    }

    /// Store under an explicit directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        // Keep the file name safe regardless of what the backend uses as id
        let safe: String = user_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("autosave-{}.json", safe))
    }

    /// Write a snapshot of the rows, replacing any previous one
    pub fn save(&self, user_id: &str, rows: &[BulkRow]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create autosave dir: {}", self.dir.display()))?;
        let snapshot = Snapshot {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            saved_at: Utc::now(),
            rows: rows.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&snapshot).context("Failed to serialize snapshot")?;
        let path = self.path_for(user_id);
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        log::debug!("autosaved {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    /// Load the snapshot for a user. Expired or unreadable snapshots are
    /// deleted and reported as absent.
    pub fn load(&self, user_id: &str) -> Result<Option<Snapshot>> {
        let path = self.path_for(user_id);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        let snapshot: Snapshot = match serde_json::from_slice(&bytes) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("discarding unreadable snapshot {}: {}", path.display(), e);
                std::fs::remove_file(&path).ok();
                return Ok(None);
            }
        };
        if snapshot.age_hours() >= SNAPSHOT_MAX_AGE_HOURS {
            log::info!("discarding expired snapshot: {}", path.display());
            std::fs::remove_file(&path).ok();
            return Ok(None);
        }
        Ok(Some(snapshot))
    }

    /// Drop the snapshot for a user, if any
    pub fn discard(&self, user_id: &str) -> Result<()> {
        let path = self.path_for(user_id);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove snapshot: {}", path.display()))?;
        }
        Ok(())
    }
}

/// Tracks pending changes and reports when the save delay has elapsed
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The page's save delay
    pub fn default_delay() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Record a change; restarts the delay window
    pub fn mark(&mut self) {
        self.pending = Some(Instant::now());
    }

    pub fn ready(&self) -> bool {
        self.pending
            .map(|t| t.elapsed() >= self.delay)
            .unwrap_or(false)
    }

    /// Consume the pending change if the delay has elapsed
    pub fn take(&mut self) -> bool {
        if self.ready() {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
