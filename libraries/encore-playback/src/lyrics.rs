//! Lyrics loading and line synchronisation

use encore_core::{LyricsDocument, LyricsProvider, Track};
use std::sync::Arc;
use tracing::{debug, warn};

/// Loads lyrics for tracks and resolves the active line
#[derive(Clone)]
pub struct LyricsSynchronizer {
    provider: Arc<dyn LyricsProvider>,
}

impl LyricsSynchronizer {
    /// Create a synchronizer backed by `provider`
    pub fn new(provider: Arc<dyn LyricsProvider>) -> Self {
        Self { provider }
    }

    /// Fetch lyrics for `track`
    ///
    /// Never fails: a missing document or a provider error yields the
    /// single-line "not available" placeholder.
    pub async fn load(&self, track: &Track) -> LyricsDocument {
        match self.provider.get_lyrics(track.id).await {
            Ok(Some(mut document)) => {
                document.sort_lines();
                debug!(track_id = %track.id, lines = document.len(), "Lyrics loaded");
                document
            }
            Ok(None) => {
                debug!(track_id = %track.id, "No lyrics for track");
                LyricsDocument::unavailable(track.id, &track.title, &track.artist)
            }
            Err(e) => {
                warn!(track_id = %track.id, error = %e, "Lyrics provider failed");
                LyricsDocument::unavailable(track.id, &track.title, &track.artist)
            }
        }
    }
}

/// Index of the line to highlight at `elapsed` seconds
///
/// The last line whose timestamp is at or before `elapsed`; the latest one
/// wins when several share a timestamp. Returns 0 when `elapsed` precedes
/// every line or the document is empty.
pub fn active_line(document: &LyricsDocument, elapsed: u32) -> usize {
    // Lines are time-sorted, so the qualifying prefix ends at the partition point
    let qualifying = document.lines.partition_point(|line| line.time <= elapsed);
    qualifying.saturating_sub(1)
}
