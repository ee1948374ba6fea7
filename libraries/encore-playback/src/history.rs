//! Playback history tracking
//!
//! Maintains the bounded recently-played log shown to the listener

use chrono::{DateTime, Utc};
use encore_core::{HistoryEntry, Track, TrackId};
use std::collections::VecDeque;

/// Recently-played log with bounded size
///
/// Most recent entry is at the front. A track appears at most once: playing
/// it again moves it to the front instead of adding a second entry.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = front)
    entries: VecDeque<HistoryEntry>,

    /// Maximum history size
    capacity: usize,
}

impl History {
    /// Create new history with specified capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a play of `track`
    ///
    /// Removes any older entry for the same track, inserts at the front, then
    /// trims the oldest entries beyond capacity.
    pub fn record(&mut self, track: Track, played_at: DateTime<Utc>) -> HistoryEntry {
        self.remove(track.id);

        let entry = HistoryEntry::new(track, played_at);
        self.entries.push_front(entry.clone());
        self.entries.truncate(self.capacity);
        entry
    }

    /// Seed the log from persisted entries (most-recent-first)
    ///
    /// Duplicates keep their most recent occurrence; capacity still applies.
    pub fn restore(&mut self, entries: impl IntoIterator<Item = HistoryEntry>) {
        self.entries.clear();
        for entry in entries {
            if self.contains(entry.track.id) {
                continue;
            }
            if self.entries.len() == self.capacity {
                break;
            }
            self.entries.push_back(entry);
        }
    }

    /// First `limit` entries, most recent first
    pub fn list(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Whether the track is in the log
    pub fn contains(&self, track_id: TrackId) -> bool {
        self.entries.iter().any(|e| e.track.id == track_id)
    }

    fn remove(&mut self, track_id: TrackId) {
        self.entries.retain(|e| e.track.id != track_id);
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get maximum history size
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(crate::types::HISTORY_CAPACITY)
    }
}
