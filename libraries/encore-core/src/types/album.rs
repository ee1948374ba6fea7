//! Album types

use super::ids::{AlbumId, TrackId};
use serde::{Deserialize, Serialize};

/// An album in the static catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub cover_url: String,
    /// Tracks in album order
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

impl Album {
    /// Case-insensitive match against title or artist
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self.artist.to_lowercase().contains(needle_lowercase)
    }
}
