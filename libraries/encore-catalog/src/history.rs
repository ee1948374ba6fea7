//! Recently-played persistence

use async_trait::async_trait;
use encore_core::{HistoryEntry, HistoryPersistence, Result};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// History store kept in memory, optionally mirrored to a JSON file
///
/// Same rules as the engine's log: most recent first, one entry per track,
/// bounded by `capacity`.
pub struct MemoryHistoryStore {
    entries: Mutex<VecDeque<HistoryEntry>>,
    capacity: usize,
    path: Option<PathBuf>,
}

impl MemoryHistoryStore {
    /// Volatile store
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            path: None,
        }
    }

    /// Store backed by `path`, loading any entries already there
    pub async fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut entries: VecDeque<HistoryEntry> = match tokio::fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => VecDeque::new(),
            Err(e) => return Err(e.into()),
        };
        entries.truncate(capacity);

        debug!(path = %path.display(), entries = entries.len(), "Opened history store");
        Ok(Self {
            entries: Mutex::new(entries),
            capacity,
            path: Some(path),
        })
    }

    async fn write_through(&self, entries: &VecDeque<HistoryEntry>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryPersistence for MemoryHistoryStore {
    async fn persist(&self, entry: &HistoryEntry) -> Result<()> {
        let mut entries = self.entries.lock().await;

        entries.retain(|e| e.track.id != entry.track.id);
        entries.push_front(entry.clone());
        entries.truncate(self.capacity);

        self.write_through(&entries).await
    }

    async fn load_recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.lock().await.iter().take(limit).cloned().collect())
    }
}
