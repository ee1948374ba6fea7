//! Core types for playback management

use crate::error::{PlaybackError, Result};
use encore_core::{HistoryEntry, LyricsDocument, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Length of an anonymous preview, in seconds
pub const PREVIEW_LIMIT_SECS: u32 = 50;

/// Default bound on the recently-played log
pub const HISTORY_CAPACITY: usize = 50;

/// Default number of history entries returned by a listing
pub const HISTORY_LIST_DEFAULT: usize = 20;

/// Engine status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    /// No track has been chosen yet
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-track, at the end of the queue, or after a preview ended
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    Queue,

    /// Loop current track only
    Track,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: Off → Queue → Track → Off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::Queue,
            Self::Queue => Self::Track,
            Self::Track => Self::Off,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Queue => "queue",
            Self::Track => "track",
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Preview length for anonymous sessions (default: 50)
    pub preview_limit_secs: u32,

    /// Maximum history size (default: 50)
    pub history_capacity: usize,

    /// Entries returned by a default history listing (default: 20)
    pub history_list_default: usize,

    /// Elapsed seconds after which "previous" restarts the track (default: 3)
    pub restart_threshold_secs: u32,

    /// Initial volume (0-100, default: 80)
    pub initial_volume: u8,

    /// Transport clock period in milliseconds (default: 1000)
    pub tick_interval_ms: u64,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            preview_limit_secs: PREVIEW_LIMIT_SECS,
            history_capacity: HISTORY_CAPACITY,
            history_list_default: HISTORY_LIST_DEFAULT,
            restart_threshold_secs: 3,
            initial_volume: 80,
            tick_interval_ms: 1000,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}

impl PlayerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(PlaybackError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.history_capacity == 0 {
            return Err(PlaybackError::Config(
                "history_capacity must be greater than zero".to_string(),
            ));
        }
        if self.initial_volume > 100 {
            return Err(PlaybackError::Config(format!(
                "initial_volume must be 0-100, got {}",
                self.initial_volume
            )));
        }
        Ok(())
    }

    /// Transport clock period, never shorter than 1 ms
    ///
    /// Configs that skipped [`PlayerConfig::validate`] may carry a zero
    /// interval, which a tokio interval cannot run at.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Read-only copy of the engine state handed to UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub status: EngineStatus,
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub elapsed: u32,
    pub effective_duration: u32,
    pub is_authenticated: bool,
    pub volume: u8,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub queue: Vec<Track>,
    pub queue_position: Option<usize>,
    pub history: Vec<HistoryEntry>,
    pub lyrics: Option<LyricsDocument>,
    pub active_lyric_line: Option<usize>,
}

impl PlayerSnapshot {
    /// Playback progress in `[0.0, 1.0]` for progress bars
    pub fn progress(&self) -> f32 {
        if self.effective_duration == 0 {
            0.0
        } else {
            (self.elapsed as f32 / self.effective_duration as f32).clamp(0.0, 1.0)
        }
    }
}
