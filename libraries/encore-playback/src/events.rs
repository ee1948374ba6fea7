//! Playback notifications
//!
//! The engine queues semantic notifications as it changes state. A
//! `NotificationSink` decides how (or whether) to show them.

use crate::types::RepeatMode;
use encore_core::TrackId;
use serde::{Deserialize, Serialize};

/// Notifications emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// Full playback of a track started
    NowPlaying { track_id: TrackId, title: String },

    /// Anonymous playback of a track started
    PreviewStarted {
        track_id: TrackId,
        title: String,
        limit_secs: u32,
    },

    /// Anonymous preview reached its limit
    PreviewEnded { track_id: TrackId },

    /// Add-to-queue skipped a duplicate
    AlreadyQueued { track_id: TrackId, title: String },

    /// Track appended to the queue
    AddedToQueue { track_id: TrackId, title: String },

    /// Track removed from the queue
    RemovedFromQueue { track_id: TrackId, title: String },

    /// Shuffle flag changed
    ShuffleToggled { enabled: bool },

    /// Repeat mode changed
    RepeatToggled { mode: RepeatMode },

    /// Audio source failed; playback stopped
    PlaybackFailed {
        track_id: Option<TrackId>,
        reason: String,
    },

    /// Lyrics arrived for the current track
    LyricsLoaded { track_id: TrackId },

    /// Lyrics provider had nothing for the current track
    LyricsUnavailable { track_id: TrackId },
}

/// How prominently a notification should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    /// Human-readable message for transient display
    pub fn message(&self) -> String {
        match self {
            Self::NowPlaying { title, .. } => format!("Now playing: {}", title),
            Self::PreviewStarted {
                title, limit_secs, ..
            } => format!("Preview: {} ({} second preview)", title, limit_secs),
            Self::PreviewEnded { .. } => "Preview ended. Sign up for full access!".to_string(),
            Self::AlreadyQueued { title, .. } => format!("\"{}\" is already in queue", title),
            Self::AddedToQueue { title, .. } => format!("Added \"{}\" to queue", title),
            Self::RemovedFromQueue { title, .. } => format!("Removed \"{}\" from queue", title),
            Self::ShuffleToggled { enabled: true } => "Shuffle on".to_string(),
            Self::ShuffleToggled { enabled: false } => "Shuffle off".to_string(),
            Self::RepeatToggled { mode } => match mode {
                RepeatMode::Off => "Repeat off".to_string(),
                RepeatMode::Queue => "Repeat queue".to_string(),
                RepeatMode::Track => "Repeat track".to_string(),
            },
            Self::PlaybackFailed { .. } => "Failed to load track".to_string(),
            Self::LyricsLoaded { .. } => "Lyrics loaded".to_string(),
            Self::LyricsUnavailable { .. } => "Lyrics not available for this track".to_string(),
        }
    }

    /// Display severity
    pub fn severity(&self) -> Severity {
        match self {
            Self::PreviewStarted { .. } | Self::AlreadyQueued { .. } | Self::LyricsUnavailable { .. } => {
                Severity::Info
            }
            Self::PreviewEnded { .. } => Severity::Warning,
            Self::PlaybackFailed { .. } => Severity::Error,
            _ => Severity::Success,
        }
    }
}

/// Receiver of engine notifications
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification; must not block
    fn notify(&self, notification: &Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn notify(&self, notification: &Notification) {
        self(notification);
    }
}

/// Sink that writes notifications to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: &Notification) {
        match notification.severity() {
            Severity::Error => tracing::error!(text = %notification.message(), "notification"),
            Severity::Warning => tracing::warn!(text = %notification.message(), "notification"),
            Severity::Info | Severity::Success => {
                tracing::info!(text = %notification.message(), "notification");
            }
        }
    }
}
