//! Static lyrics provider

use async_trait::async_trait;
use encore_core::{LyricLine, LyricsDocument, LyricsProvider, Result, TrackId};
use std::collections::HashMap;
use std::time::Duration;

/// Lyrics served from a fixed table
///
/// An optional delay stands in for network latency.
#[derive(Debug, Clone, Default)]
pub struct StaticLyricsProvider {
    documents: HashMap<TrackId, LyricsDocument>,
    delay: Duration,
}

impl StaticLyricsProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the document for its track
    #[must_use]
    pub fn with_document(mut self, document: LyricsDocument) -> Self {
        self.documents.insert(document.track_id, document);
        self
    }

    /// Wait `delay` before answering each request
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Provider with timed lyrics for the first two demo catalog tracks
    pub fn demo() -> Self {
        Self::new()
            .with_document(LyricsDocument::new(
                TrackId::new(1),
                "Blinding Lights",
                "The Weeknd",
                timed_lines(
                    &[0, 3, 6, 10, 15, 18, 21, 25, 28, 32, 36, 40],
                    &[
                        "(synth intro)",
                        "Verse one, line one",
                        "Verse one, line two",
                        "Verse one, line three",
                        "Pre-chorus, line one",
                        "Pre-chorus, line two",
                        "Pre-chorus, line three",
                        "Pre-chorus, line four",
                        "Chorus, line one",
                        "Chorus, line two",
                        "Chorus, line three",
                        "Chorus, line four",
                    ],
                ),
            ))
            .with_document(LyricsDocument::new(
                TrackId::new(2),
                "Watermelon Sugar",
                "Harry Styles",
                timed_lines(
                    &[0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40],
                    &[
                        "Verse one, line one",
                        "Verse one, line two",
                        "Verse one, line three",
                        "Verse one, line four",
                        "Pre-chorus, line one",
                        "Pre-chorus, line two",
                        "Pre-chorus, line three",
                        "Pre-chorus, line four",
                        "Hook",
                        "Hook",
                        "Hook",
                    ],
                ),
            ))
            .with_delay(Duration::from_millis(500))
    }

    /// Number of tracks with lyrics
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no lyrics are stored
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn timed_lines(times: &[u32], texts: &[&str]) -> Vec<LyricLine> {
    times
        .iter()
        .zip(texts)
        .map(|(time, text)| LyricLine::new(*time, *text))
        .collect()
}

#[async_trait]
impl LyricsProvider for StaticLyricsProvider {
    async fn get_lyrics(&self, track_id: TrackId) -> Result<Option<LyricsDocument>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.documents.get(&track_id).cloned())
    }
}
