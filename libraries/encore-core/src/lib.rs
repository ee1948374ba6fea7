//! Encore Core
//!
//! Platform-agnostic domain types, collaborator traits, and error handling for
//! the Encore playback engine.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Album`, `Playlist`, `LyricsDocument`, `HistoryEntry`
//! - **Collaborator Traits**: `CatalogProvider`, `PlaylistStore`, `LyricsProvider`,
//!   `HistoryPersistence`
//! - **Error Handling**: Unified `EncoreError` and `Result` types
//!
//! The playback engine only ever holds cloned values of these types; the
//! collaborators own the backing data.
//!
//! # Example
//!
//! ```rust
//! use encore_core::types::{LyricLine, LyricsDocument, Track, TrackId};
//!
//! let track = Track::new(TrackId::new(1), "Blinding Lights", "The Weeknd", 200);
//! assert_eq!(track.duration, 200);
//!
//! let lyrics = LyricsDocument::new(
//!     track.id,
//!     &track.title,
//!     &track.artist,
//!     vec![LyricLine::new(3, "First verse"), LyricLine::new(0, "Intro")],
//! );
//! assert_eq!(lyrics.lines[0].text, "Intro");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{EncoreError, Result};
pub use traits::{CatalogProvider, HistoryPersistence, LyricsProvider, PlaylistStore};

pub use types::{
    Album, AlbumId, Artist, HistoryEntry, LyricLine, LyricsDocument, NewPlaylist, Playlist,
    PlaylistId, PlaylistUpdate, SearchResults, Track, TrackId, LYRICS_UNAVAILABLE_TEXT,
};
