//! Encore - Playback Engine
//!
//! Client-side playback state machine for Encore.
//!
//! This crate provides:
//! - Play queue with shuffle and repeat (Off, Queue, Track)
//! - Recently-played history (bounded, most recent first)
//! - Preview gating: anonymous sessions hear at most 50 seconds per track
//! - Transport clock driving elapsed time at one-second resolution
//! - Time-synchronised lyrics with stale-result protection
//! - Volume and mute
//! - An async driver that runs the engine on a tokio task
//!
//! # Architecture
//!
//! [`PlaybackEngine`] is synchronous and owns all state. It never performs
//! I/O; notifications, history writes, and lyrics fetches are queued and
//! drained by the caller. [`spawn_player`] wraps the engine in a tokio task
//! that does that draining and publishes [`PlayerSnapshot`]s.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use encore_core::{Track, TrackId};
//! use encore_playback::{EngineStatus, PlaybackEngine, PlayerConfig};
//!
//! let mut engine = PlaybackEngine::new(PlayerConfig::default());
//!
//! let album = vec![
//!     Track::new(TrackId::new(1), "Blinding Lights", "The Weeknd", 200),
//!     Track::new(TrackId::new(2), "Save Your Tears", "The Weeknd", 215),
//! ];
//!
//! // Anonymous sessions get a 50-second preview
//! engine.play(album[0].clone(), album.clone(), 0, false).unwrap();
//! assert_eq!(engine.effective_duration(), 50);
//!
//! engine.tick();
//! assert_eq!(engine.elapsed(), 1);
//!
//! engine.toggle_play_pause();
//! assert_eq!(engine.state(), EngineStatus::Paused);
//! ```
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust
//! use encore_playback::{PlaybackEngine, RepeatMode};
//!
//! let mut engine = PlaybackEngine::default();
//!
//! engine.toggle_shuffle();
//! assert_eq!(engine.toggle_repeat(), RepeatMode::Queue);
//! assert_eq!(engine.toggle_repeat(), RepeatMode::Track);
//! ```
//!
//! # Example: Async Driver
//!
//! ```rust,no_run
//! use encore_core::{Track, TrackId};
//! use encore_playback::{spawn_player, Collaborators, PlaybackEngine};
//!
//! # async fn run() -> encore_playback::Result<()> {
//! let (player, task) = spawn_player(PlaybackEngine::default(), Collaborators::default());
//!
//! let track = Track::new(TrackId::new(1), "Blinding Lights", "The Weeknd", 200);
//! player.play(track, Vec::new(), 0, true).await?;
//!
//! let mut updates = player.subscribe();
//! updates.changed().await.ok();
//! println!("elapsed: {}", updates.borrow().elapsed);
//!
//! player.shutdown()?;
//! task.await.ok();
//! # Ok(())
//! # }
//! ```

mod clock;
mod driver;
mod engine;
mod error;
mod events;
mod history;
mod lyrics;
mod queue;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use clock::{ClockSignal, SimulatedClock, TransportClock};
pub use driver::{spawn_player, Collaborators, PlayerCommand, PlayerHandle};
pub use engine::{LyricsRequest, PlaybackEngine, TickOutcome};
pub use error::{PlaybackError, Result};
pub use events::{Notification, NotificationSink, Severity, TracingSink};
pub use history::History;
pub use lyrics::{active_line, LyricsSynchronizer};
pub use queue::{AddOutcome, NextResolution, PreviousResolution, Queue};
pub use types::{
    EngineStatus, PlayerConfig, PlayerSnapshot, RepeatMode, HISTORY_CAPACITY,
    HISTORY_LIST_DEFAULT, PREVIEW_LIMIT_SECS,
};
pub use volume::Volume;
