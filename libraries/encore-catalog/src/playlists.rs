//! In-memory playlist store

use async_trait::async_trait;
use encore_core::{
    EncoreError, NewPlaylist, Playlist, PlaylistId, PlaylistStore, PlaylistUpdate, Result,
    TrackId,
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Default)]
struct Inner {
    playlists: BTreeMap<PlaylistId, Playlist>,
    next_id: i64,
}

/// User playlists held in memory
#[derive(Default)]
pub struct MemoryPlaylistStore {
    inner: RwLock<Inner>,
}

impl MemoryPlaylistStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing playlists
    pub fn with_playlists(playlists: impl IntoIterator<Item = Playlist>) -> Self {
        let playlists: BTreeMap<_, _> = playlists.into_iter().map(|p| (p.id, p)).collect();
        let next_id = playlists.keys().map(|id| id.get()).max().unwrap_or(0);

        Self {
            inner: RwLock::new(Inner { playlists, next_id }),
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(EncoreError::invalid_input("playlist title must not be empty"));
    }
    Ok(())
}

#[async_trait]
impl PlaylistStore for MemoryPlaylistStore {
    async fn create(&self, playlist: NewPlaylist) -> Result<Playlist> {
        validate_title(&playlist.title)?;

        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = PlaylistId::new(inner.next_id);

        let created = Playlist {
            id,
            title: playlist.title.trim().to_string(),
            description: playlist.description,
            cover_url: String::new(),
            track_ids: playlist.track_ids,
            featured: false,
        };
        inner.playlists.insert(id, created.clone());

        info!(playlist_id = %id, title = %created.title, "Created playlist");
        Ok(created)
    }

    async fn update(&self, id: PlaylistId, update: PlaylistUpdate) -> Result<Playlist> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }

        let mut inner = self.inner.write().await;
        let playlist = inner
            .playlists
            .get_mut(&id)
            .ok_or(EncoreError::PlaylistNotFound(id))?;

        if let Some(title) = update.title {
            playlist.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            playlist.description = description;
        }
        if let Some(cover_url) = update.cover_url {
            playlist.cover_url = cover_url;
        }
        Ok(playlist.clone())
    }

    async fn delete(&self, id: PlaylistId) -> Result<()> {
        self.inner
            .write()
            .await
            .playlists
            .remove(&id)
            .map(|_| ())
            .ok_or(EncoreError::PlaylistNotFound(id))
    }

    async fn add_track(&self, id: PlaylistId, track_id: TrackId) -> Result<Playlist> {
        let mut inner = self.inner.write().await;
        let playlist = inner
            .playlists
            .get_mut(&id)
            .ok_or(EncoreError::PlaylistNotFound(id))?;

        playlist.track_ids.push(track_id);
        Ok(playlist.clone())
    }

    async fn remove_track(&self, id: PlaylistId, track_id: TrackId) -> Result<Playlist> {
        let mut inner = self.inner.write().await;
        let playlist = inner
            .playlists
            .get_mut(&id)
            .ok_or(EncoreError::PlaylistNotFound(id))?;

        playlist.track_ids.retain(|t| *t != track_id);
        Ok(playlist.clone())
    }

    async fn list(&self) -> Result<Vec<Playlist>> {
        Ok(self.inner.read().await.playlists.values().cloned().collect())
    }
}
