//! Play history entry

use super::Track;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the recently-played log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Track that was played
    pub track: Track,

    /// When playback of the track started
    pub played_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry stamped with the given time
    pub fn new(track: Track, played_at: DateTime<Utc>) -> Self {
        Self { track, played_at }
    }
}
