//! File-based data source.
//!
//! Reads a JSON feed file of the form
//! `{ "conditions": { ... }, "hazards": [ ... ] }`.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{ConditionsProvider, HazardsProvider, StillWaiting};
use crate::data::{ConditionRecord, HazardEntry, TickerFeed};
use crate::error::TickerError;

#[derive(Debug, Default)]
struct FileState {
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    /// Last successfully parsed feed, served until the file changes
    cached: Option<TickerFeed>,
}

/// A data source that reads feeds from a JSON file.
///
/// The source tracks the file's modification time and only re-reads it when
/// it has been updated. A feed that fails to parse leaves the previous good
/// feed in place and records the error.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    state: Mutex<FileState>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            state: Mutex::new(FileState::default()),
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The error from the last read attempt, if it failed.
    pub fn error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    /// Get the file's modification time.
    async fn get_modified_time(&self) -> Option<SystemTime> {
        tokio::fs::metadata(&self.path).await.ok()?.modified().ok()
    }

    async fn read_file(&self) -> Result<TickerFeed, TickerError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Return the current feed, re-reading the file if it changed.
    async fn load(&self, still_waiting: StillWaiting<'_>) -> Option<TickerFeed> {
        let current_modified = self.get_modified_time().await;

        let file_changed = {
            let state = self.state.lock();
            match (&state.last_modified, &current_modified) {
                (_, None) => false,       // Missing, keep whatever we had
                (None, Some(_)) => true,  // First sighting, always read
                (Some(last), Some(current)) => current > last,
            }
        };

        if current_modified.is_none() {
            let mut state = self.state.lock();
            if state.cached.is_none() {
                state.last_error = Some(format!("Waiting for {}", self.path.display()));
                drop(state);
                still_waiting();
                return None;
            }
        }

        if file_changed {
            match self.read_file().await {
                Ok(feed) => {
                    debug!(path = %self.path.display(), "Loaded ticker feed");
                    let mut state = self.state.lock();
                    state.last_error = None;
                    state.last_modified = current_modified;
                    state.cached = Some(feed);
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "Failed to load ticker feed");
                    self.state.lock().last_error = Some(e.to_string());
                }
            }
        }

        self.state.lock().cached.clone()
    }
}

#[async_trait]
impl ConditionsProvider for FileSource {
    async fn fetch_current(&self, still_waiting: StillWaiting<'_>) -> Option<ConditionRecord> {
        self.load(still_waiting).await?.conditions
    }

    fn error(&self) -> Option<String> {
        FileSource::error(self)
    }
}

#[async_trait]
impl HazardsProvider for FileSource {
    async fn fetch_hazards(&self, still_waiting: StillWaiting<'_>) -> Option<Vec<HazardEntry>> {
        self.load(still_waiting).await?.hazards
    }
}
