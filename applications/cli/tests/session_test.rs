//! End-to-end tests for CLI sessions

use encore_catalog::MemoryHistoryStore;
use encore_cli::config::CliConfig;
use encore_cli::session::{run_session, Selection, SessionOptions};
use encore_core::{AlbumId, HistoryPersistence, TrackId};
use encore_playback::PlayerConfig;

fn fast_config(tick_interval_ms: u64) -> CliConfig {
    CliConfig {
        player: PlayerConfig {
            tick_interval_ms,
            ..PlayerConfig::default()
        },
        ..CliConfig::default()
    }
}

#[tokio::test]
async fn anonymous_session_stops_after_preview() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history.json");
    let config = CliConfig {
        history_path: Some(history_path.clone()),
        // Slow enough for the demo lyrics (500ms) to arrive within the preview
        ..fast_config(20)
    };

    let snapshot = run_session(
        &config,
        SessionOptions {
            selection: Selection::Track(TrackId::new(1)),
            authenticated: false,
            ticks: 400,
            shuffle: false,
            lyrics: true,
        },
    )
    .await
    .unwrap();

    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.elapsed, 50);
    assert_eq!(snapshot.effective_duration, 50);
    assert_eq!(snapshot.lyrics.as_ref().map(|l| l.track_id), Some(TrackId::new(1)));

    let store = MemoryHistoryStore::open(&history_path, 50).await.unwrap();
    let recent = store.load_recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].track.id, TrackId::new(1));
}

#[tokio::test]
async fn session_stops_at_tick_budget() {
    let snapshot = run_session(
        &fast_config(5),
        SessionOptions {
            selection: Selection::Album(AlbumId::new(1)),
            authenticated: true,
            ticks: 3,
            shuffle: false,
            lyrics: false,
        },
    )
    .await
    .unwrap();

    assert!(snapshot.is_playing);
    assert!(snapshot.elapsed <= 3);
    assert_eq!(snapshot.queue.len(), 3);
    assert_eq!(
        snapshot.current_track.map(|t| t.id),
        Some(TrackId::new(1))
    );
    assert!(snapshot.lyrics.is_none());
}
