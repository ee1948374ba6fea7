//! Encore - Catalog
//!
//! In-memory implementations of the Encore collaborator traits:
//! - [`MemoryCatalog`]: tracks, albums, and playlists from a JSON dataset
//! - [`MemoryPlaylistStore`]: user playlists
//! - [`StaticLyricsProvider`]: timed lyrics from a fixed table
//! - [`MemoryHistoryStore`]: recently-played log, optionally file-backed
//!
//! # Example
//!
//! ```rust
//! use encore_catalog::MemoryCatalog;
//! use encore_core::CatalogProvider;
//!
//! # async fn run() -> encore_core::Result<()> {
//! let catalog = MemoryCatalog::demo()?;
//! let results = catalog.search("weeknd").await?;
//! assert!(!results.tracks.is_empty());
//! # Ok(())
//! # }
//! ```

mod catalog;
mod data;
mod history;
mod lyrics;
mod playlists;

pub use catalog::MemoryCatalog;
pub use data::CatalogData;
pub use history::MemoryHistoryStore;
pub use lyrics::StaticLyricsProvider;
pub use playlists::MemoryPlaylistStore;
