//! Catalog dataset loading

use encore_core::{Album, EncoreError, Playlist, Result, Track};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const DEMO_CATALOG: &str = include_str!("../data/demo_catalog.json");

/// Static dataset backing a [`MemoryCatalog`](crate::MemoryCatalog)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub tracks: Vec<Track>,

    #[serde(default)]
    pub albums: Vec<Album>,

    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

impl CatalogData {
    /// Parse a dataset from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Load a dataset from a JSON file
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let data = Self::from_json(&json)?;

        info!(
            path = %path.display(),
            tracks = data.tracks.len(),
            albums = data.albums.len(),
            playlists = data.playlists.len(),
            "Loaded catalog"
        );
        Ok(data)
    }

    /// Built-in sample catalog
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_CATALOG)
    }

    /// Reject datasets with repeated track IDs
    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for track in &self.tracks {
            if !seen.insert(track.id) {
                return Err(EncoreError::Duplicate(format!("track {}", track.id)));
            }
        }
        Ok(())
    }
}
