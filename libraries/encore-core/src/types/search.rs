//! Search result types

use super::{Album, Playlist, Track};
use serde::{Deserialize, Serialize};

/// Artist entry derived from catalog tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub track_count: usize,
}

/// Combined search results across the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
    pub playlists: Vec<Playlist>,
    pub artists: Vec<Artist>,
}

impl SearchResults {
    /// True when nothing matched
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
            && self.albums.is_empty()
            && self.playlists.is_empty()
            && self.artists.is_empty()
    }
}
