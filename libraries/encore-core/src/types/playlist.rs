/// Playlist domain types
use super::ids::{PlaylistId, TrackId};
use serde::{Deserialize, Serialize};

/// Playlist
///
/// Featured playlists ship with the catalog; the rest are user playlists
/// managed through a `PlaylistStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist title
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Cover art reference
    #[serde(default)]
    pub cover_url: String,

    /// Ordered track references
    #[serde(default)]
    pub track_ids: Vec<TrackId>,

    /// Curated (catalog) playlist rather than a user playlist
    #[serde(default)]
    pub featured: bool,
}

impl Playlist {
    /// Case-insensitive match against title or description
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self.description.to_lowercase().contains(needle_lowercase)
    }
}

/// Data for creating a new user playlist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlaylist {
    pub title: String,
    pub description: String,
    pub track_ids: Vec<TrackId>,
}

impl NewPlaylist {
    /// Create an empty playlist definition
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Data for updating a playlist (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}
