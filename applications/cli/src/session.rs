/// Simulated listening session
use crate::config::CliConfig;
use crate::display;
use crate::error::{CliError, Result};
use encore_catalog::{CatalogData, MemoryCatalog, MemoryHistoryStore, StaticLyricsProvider};
use encore_core::{AlbumId, CatalogProvider, HistoryPersistence, PlaylistId, Track, TrackId};
use encore_playback::{
    spawn_player, Collaborators, Notification, PlaybackEngine, PlayerSnapshot,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// What to start playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A single track
    Track(TrackId),

    /// An album from its first track
    Album(AlbumId),

    /// A catalog playlist from its first track
    Playlist(PlaylistId),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub selection: Selection,
    pub authenticated: bool,
    /// Transport intervals to run before stopping
    pub ticks: u32,
    pub shuffle: bool,
    pub lyrics: bool,
}

/// Load the configured catalog, or the demo dataset
pub async fn load_catalog(config: &CliConfig) -> Result<MemoryCatalog> {
    let data = match &config.catalog_path {
        Some(path) => CatalogData::from_path(path).await?,
        None => CatalogData::demo()?,
    };
    Ok(MemoryCatalog::new(data))
}

/// Open the configured history file, or a volatile store
pub async fn open_history(config: &CliConfig) -> Result<MemoryHistoryStore> {
    let capacity = config.player.history_capacity;
    match &config.history_path {
        Some(path) => Ok(MemoryHistoryStore::open(path, capacity).await?),
        None => Ok(MemoryHistoryStore::new(capacity)),
    }
}

/// Resolve a selection to a play context and start index
pub async fn resolve_selection(
    catalog: &MemoryCatalog,
    selection: Selection,
) -> Result<(Vec<Track>, usize)> {
    let context = match selection {
        Selection::Track(id) => vec![catalog.get_track(id).await?],
        Selection::Album(id) => catalog.album_tracks(id).await?,
        Selection::Playlist(id) => catalog.playlist_tracks(id).await?,
    };

    if context.is_empty() {
        return Err(CliError::EmptySelection(format!("{:?}", selection)));
    }
    Ok((context, 0))
}

/// Wall-clock time for `ticks` intervals, saturating on overflow
pub fn session_budget(interval: Duration, ticks: u32) -> Duration {
    interval.checked_mul(ticks).unwrap_or(Duration::MAX)
}

/// Play a selection for a number of transport intervals
///
/// Prints progress, lyrics, and notifications as they happen and returns the
/// final snapshot.
pub async fn run_session(config: &CliConfig, options: SessionOptions) -> Result<PlayerSnapshot> {
    let catalog = load_catalog(config).await?;
    let history = Arc::new(open_history(config).await?);

    let mut engine = PlaybackEngine::new(config.player.clone());
    match history.load_recent(config.player.history_capacity).await {
        Ok(entries) => engine.restore_history(entries),
        Err(e) => warn!(error = %e, "Could not restore history"),
    }

    let collaborators = Collaborators {
        notifications: Arc::new(|notification: &Notification| {
            println!("{}", display::notification_line(notification));
        }),
        lyrics: Some(Arc::new(StaticLyricsProvider::demo())),
        history: Some(history),
    };
    let (player, task) = spawn_player(engine, collaborators);

    let (context, index) = resolve_selection(&catalog, options.selection).await?;
    info!(tracks = context.len(), authenticated = options.authenticated, "Starting session");

    if options.shuffle {
        player.toggle_shuffle()?;
    }
    if options.lyrics {
        player.set_lyrics_panel_open(true)?;
    }

    let mut updates = player.subscribe();
    player
        .play(context[index].clone(), context, index, options.authenticated)
        .await?;

    let deadline = tokio::time::sleep(session_budget(config.player.tick_interval(), options.ticks));
    tokio::pin!(deadline);

    let mut last_progress = String::new();
    let mut last_lyric = String::new();
    loop {
        tokio::select! {
            () = &mut deadline => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();

                if let Some(line) = display::progress_line(&snapshot) {
                    if line != last_progress {
                        println!("{}", line);
                        last_progress = line;
                    }
                }
                if let Some(lyric) = display::current_lyric(&snapshot) {
                    if lyric != last_lyric {
                        println!("    ♪ {}", lyric);
                        last_lyric = lyric.to_string();
                    }
                }

                if snapshot.current_track.is_some() && !snapshot.is_playing {
                    break;
                }
            }
        }
    }

    let snapshot = player.snapshot_now().await?;
    player.shutdown()?;
    if let Err(e) = task.await {
        warn!(error = %e, "Player task ended abnormally");
    }

    Ok(snapshot)
}
