//! In-memory catalog provider

use crate::data::CatalogData;
use async_trait::async_trait;
use encore_core::{
    Album, AlbumId, Artist, CatalogProvider, EncoreError, Playlist, PlaylistId, Result,
    SearchResults, Track, TrackId,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Catalog served from a static dataset
///
/// Tracks keep the dataset order; trending is the head of that list. Only the
/// `liked` flag is mutable.
pub struct MemoryCatalog {
    tracks: RwLock<Vec<Track>>,
    albums: Vec<Album>,
    playlists: Vec<Playlist>,
}

impl MemoryCatalog {
    /// Create a catalog over `data`
    pub fn new(data: CatalogData) -> Self {
        Self {
            tracks: RwLock::new(data.tracks),
            albums: data.albums,
            playlists: data.playlists,
        }
    }

    /// Catalog with the built-in sample dataset
    pub fn demo() -> Result<Self> {
        Ok(Self::new(CatalogData::demo()?))
    }

    /// Every track in dataset order
    pub async fn all_tracks(&self) -> Vec<Track> {
        self.tracks.read().await.clone()
    }

    /// All albums
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// Editorial playlists
    pub fn featured_playlists(&self) -> Vec<Playlist> {
        self.playlists.iter().filter(|p| p.featured).cloned().collect()
    }

    /// Tracks of an album in album order
    pub async fn album_tracks(&self, id: AlbumId) -> Result<Vec<Track>> {
        let album = self.get_album(id).await?;
        self.get_tracks_by_ids(&album.track_ids).await
    }

    /// Tracks of a catalog playlist in playlist order
    pub async fn playlist_tracks(&self, id: PlaylistId) -> Result<Vec<Track>> {
        let playlist = self.get_playlist(id).await?;
        self.get_tracks_by_ids(&playlist.track_ids).await
    }
}

/// Group matching tracks by artist, in order of first appearance
fn aggregate_artists(tracks: &[Track]) -> Vec<Artist> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for track in tracks {
        let count = counts.entry(track.artist.as_str()).or_insert(0);
        if *count == 0 {
            order.push(track.artist.clone());
        }
        *count += 1;
    }

    order
        .into_iter()
        .map(|name| {
            let track_count = counts.get(name.as_str()).copied().unwrap_or(0);
            Artist { name, track_count }
        })
        .collect()
}

#[async_trait]
impl CatalogProvider for MemoryCatalog {
    async fn get_track(&self, id: TrackId) -> Result<Track> {
        self.tracks
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(EncoreError::TrackNotFound(id))
    }

    async fn get_tracks_by_ids(&self, ids: &[TrackId]) -> Result<Vec<Track>> {
        let tracks = self.tracks.read().await;
        let by_id: HashMap<TrackId, &Track> = tracks.iter().map(|t| (t.id, t)).collect();

        Ok(ids
            .iter()
            .filter_map(|id| by_id.get(id).map(|t| (*t).clone()))
            .collect())
    }

    async fn search(&self, query: &str) -> Result<SearchResults> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(SearchResults::default());
        }

        let tracks: Vec<Track> = self
            .tracks
            .read()
            .await
            .iter()
            .filter(|t| t.matches(&needle))
            .cloned()
            .collect();

        let results = SearchResults {
            artists: aggregate_artists(&tracks),
            albums: self
                .albums
                .iter()
                .filter(|a| a.matches(&needle))
                .cloned()
                .collect(),
            playlists: self
                .playlists
                .iter()
                .filter(|p| p.matches(&needle))
                .cloned()
                .collect(),
            tracks,
        };

        debug!(
            query = %needle,
            tracks = results.tracks.len(),
            albums = results.albums.len(),
            playlists = results.playlists.len(),
            "Search"
        );
        Ok(results)
    }

    async fn get_album(&self, id: AlbumId) -> Result<Album> {
        self.albums
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(EncoreError::AlbumNotFound(id))
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Playlist> {
        self.playlists
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(EncoreError::PlaylistNotFound(id))
    }

    async fn trending(&self, limit: usize) -> Result<Vec<Track>> {
        Ok(self.tracks.read().await.iter().take(limit).cloned().collect())
    }

    async fn toggle_like(&self, id: TrackId) -> Result<Track> {
        let mut tracks = self.tracks.write().await;
        let track = tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(EncoreError::TrackNotFound(id))?;

        track.liked = !track.liked;
        debug!(track_id = %id, liked = track.liked, "Toggled like");
        Ok(track.clone())
    }
}
