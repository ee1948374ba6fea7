/// Collaborator traits consumed by the Encore playback engine
///
/// Every collaborator is asynchronous and object-safe so the player driver can
/// hold them as `Arc<dyn Trait>` and call them from spawned tasks.
use crate::error::Result;
use crate::types::{
    Album, AlbumId, HistoryEntry, LyricsDocument, NewPlaylist, Playlist, PlaylistId,
    PlaylistUpdate, SearchResults, Track, TrackId,
};
use async_trait::async_trait;

/// Catalog provider trait
///
/// Read-only access to the track/album/playlist dataset, assumed
/// eventually-consistent with a static backing store.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Get a track by ID
    async fn get_track(&self, id: TrackId) -> Result<Track>;

    /// Get several tracks, preserving the order of `ids`
    ///
    /// Unknown IDs are skipped.
    async fn get_tracks_by_ids(&self, ids: &[TrackId]) -> Result<Vec<Track>>;

    /// Search tracks, albums, playlists, and artists
    ///
    /// A blank query returns empty results.
    async fn search(&self, query: &str) -> Result<SearchResults>;

    /// Get an album by ID
    async fn get_album(&self, id: AlbumId) -> Result<Album>;

    /// Get a playlist by ID
    async fn get_playlist(&self, id: PlaylistId) -> Result<Playlist>;

    /// Curated tracks shown to anonymous listeners
    async fn trending(&self, limit: usize) -> Result<Vec<Track>>;

    /// Flip the liked flag of a track and return the updated track
    async fn toggle_like(&self, id: TrackId) -> Result<Track>;
}

/// Playlist store trait
///
/// Persistence of user playlists. Not consulted by the engine; UI flows read
/// playlists here and then issue play commands.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Create a new user playlist
    async fn create(&self, playlist: NewPlaylist) -> Result<Playlist>;

    /// Update playlist details
    async fn update(&self, id: PlaylistId, update: PlaylistUpdate) -> Result<Playlist>;

    /// Delete a playlist
    async fn delete(&self, id: PlaylistId) -> Result<()>;

    /// Append a track to a playlist
    async fn add_track(&self, id: PlaylistId, track_id: TrackId) -> Result<Playlist>;

    /// Remove every occurrence of a track from a playlist
    async fn remove_track(&self, id: PlaylistId, track_id: TrackId) -> Result<Playlist>;

    /// List all user playlists
    async fn list(&self) -> Result<Vec<Playlist>>;
}

/// Lyrics provider trait
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Get lyrics for a track, `None` when the provider has none
    async fn get_lyrics(&self, track_id: TrackId) -> Result<Option<LyricsDocument>>;
}

/// Optional persistence for the recently-played log
///
/// Calls are best-effort: failures are logged by the caller and never reach
/// playback.
#[async_trait]
pub trait HistoryPersistence: Send + Sync {
    /// Store one history entry
    async fn persist(&self, entry: &HistoryEntry) -> Result<()>;

    /// Load the most recent entries, most-recent-first
    async fn load_recent(&self, limit: usize) -> Result<Vec<HistoryEntry>>;
}
