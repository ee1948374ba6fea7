//! Time-stamped lyrics

use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// Text shown when a track has no lyrics
pub const LYRICS_UNAVAILABLE_TEXT: &str = "Lyrics not available for this track";

/// One lyric line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Offset from the start of the track, in seconds
    pub time: u32,

    /// Line text
    pub text: String,
}

impl LyricLine {
    /// Create a lyric line
    pub fn new(time: u32, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// Lyrics for a single track
///
/// Lines are kept sorted by time; the constructor sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsDocument {
    /// Track these lyrics belong to
    pub track_id: TrackId,

    /// Track title (for display)
    pub title: String,

    /// Artist name (for display)
    pub artist: String,

    /// Time-ordered lines
    pub lines: Vec<LyricLine>,

    /// False for the "not available" placeholder
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl LyricsDocument {
    /// Create a document, sorting lines by timestamp
    ///
    /// The sort is stable so lines sharing a timestamp keep their order.
    pub fn new(
        track_id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        lines: Vec<LyricLine>,
    ) -> Self {
        let mut document = Self {
            track_id,
            title: title.into(),
            artist: artist.into(),
            lines,
            available: true,
        };
        document.sort_lines();
        document
    }

    /// Restore time order after deserialization or direct construction
    ///
    /// Stable, so lines sharing a timestamp keep their relative order.
    pub fn sort_lines(&mut self) {
        self.lines.sort_by_key(|line| line.time);
    }

    /// Single-line placeholder for tracks without lyrics
    pub fn unavailable(
        track_id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            track_id,
            title: title.into(),
            artist: artist.into(),
            lines: vec![LyricLine::new(0, LYRICS_UNAVAILABLE_TEXT)],
            available: false,
        }
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
