/// Track domain type
use super::ids::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog track
///
/// Owned by the catalog provider. The playback engine only keeps clones and
/// never mutates them; `liked` is toggled through the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album title
    #[serde(default)]
    pub album: String,

    /// Duration in whole seconds
    pub duration: u32,

    /// Cover art reference
    #[serde(default)]
    pub cover_url: String,

    /// Audio source reference
    #[serde(default)]
    pub audio_url: String,

    /// Whether the user liked this track
    #[serde(default)]
    pub liked: bool,
}

impl Track {
    /// Create a track with the metadata playback needs
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            duration,
            cover_url: String::new(),
            audio_url: String::new(),
            liked: false,
        }
    }

    /// Set the album title
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the audio source reference
    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = url.into();
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration))
    }

    /// Case-insensitive match against title, artist, or album
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self.artist.to_lowercase().contains(needle_lowercase)
            || self.album.to_lowercase().contains(needle_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_creation() {
        let track = Track::new(TrackId::new(1), "Test Song", "Test Artist", 180)
            .with_album("Test Album");
        assert_eq!(track.title, "Test Song");
        assert_eq!(track.album, "Test Album");
        assert!(!track.liked);
        assert_eq!(track.duration(), Duration::from_secs(180));
    }

    #[test]
    fn track_matches_any_text_field() {
        let track = Track::new(TrackId::new(1), "Levitating", "Dua Lipa", 203)
            .with_album("Future Nostalgia");
        assert!(track.matches("levit"));
        assert!(track.matches("dua"));
        assert!(track.matches("nostalgia"));
        assert!(!track.matches("weeknd"));
    }

    #[test]
    fn track_deserializes_from_catalog_json() {
        let json = r#"{
            "id": 3,
            "title": "Save Your Tears",
            "artist": "The Weeknd",
            "album": "After Hours",
            "duration": 215,
            "coverUrl": "https://img/3.jpg",
            "audioUrl": "https://audio/3.mp3",
            "liked": true
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, TrackId::new(3));
        assert_eq!(track.cover_url, "https://img/3.jpg");
        assert!(track.liked);
    }
}
