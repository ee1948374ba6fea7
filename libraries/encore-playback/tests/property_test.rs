//! Property-based tests for the playback engine
//!
//! Uses proptest to verify invariants across many random inputs.

use encore_core::{Track, TrackId};
use encore_playback::{
    History, Notification, PlaybackEngine, PlayerConfig, RepeatMode, TickOutcome,
    HISTORY_CAPACITY, PREVIEW_LIMIT_SECS,
};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        1i64..40,           // id (small range so duplicates occur)
        "[A-Za-z ]{1,30}",  // title
        "[A-Za-z ]{1,20}",  // artist
        1u32..600,          // duration (1-600 seconds)
    )
        .prop_map(|(id, title, artist, duration)| {
            Track::new(TrackId::new(id), title, artist, duration)
        })
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..30)
}

#[derive(Debug, Clone)]
enum Op {
    Tick(u8),
    TogglePlayPause,
    Next,
    Previous,
    Seek(i64),
    AddToQueue(Track),
    Remove(usize),
    ToggleShuffle,
    ToggleRepeat,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u8..120).prop_map(Op::Tick),
        Just(Op::TogglePlayPause),
        Just(Op::Next),
        Just(Op::Previous),
        (-100i64..1000).prop_map(Op::Seek),
        arbitrary_track().prop_map(Op::AddToQueue),
        (0usize..40).prop_map(Op::Remove),
        Just(Op::ToggleShuffle),
        Just(Op::ToggleRepeat),
    ]
}

fn apply(engine: &mut PlaybackEngine, op: Op) {
    match op {
        Op::Tick(n) => {
            for _ in 0..n {
                engine.tick();
            }
        }
        Op::TogglePlayPause => engine.toggle_play_pause(),
        Op::Next => engine.next(),
        Op::Previous => engine.previous(),
        Op::Seek(t) => engine.seek(t),
        Op::AddToQueue(track) => {
            engine.add_to_queue(track);
        }
        Op::Remove(index) => {
            engine.remove_from_queue(index).ok();
        }
        Op::ToggleShuffle => {
            engine.toggle_shuffle();
        }
        Op::ToggleRepeat => {
            engine.toggle_repeat();
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: Effective duration is the full length only for authenticated sessions
    #[test]
    fn effective_duration_respects_access_tier(track in arbitrary_track(), authenticated in any::<bool>()) {
        let engine = PlaybackEngine::default();
        let effective = engine.effective_duration_for(&track, authenticated);

        if authenticated {
            prop_assert_eq!(effective, track.duration);
        } else {
            prop_assert_eq!(effective, track.duration.min(PREVIEW_LIMIT_SECS));
        }
    }

    /// Property: Elapsed time never exceeds the effective duration
    #[test]
    fn elapsed_within_effective_duration(
        tracks in arbitrary_tracks(),
        authenticated in any::<bool>(),
        ops in prop::collection::vec(arbitrary_op(), 1..40),
        seed in any::<u64>(),
    ) {
        let mut engine = PlaybackEngine::default().with_rng_seed(seed);
        engine.play(tracks[0].clone(), tracks, 0, authenticated).unwrap();

        for op in ops {
            apply(&mut engine, op);
            prop_assert!(engine.elapsed() <= engine.effective_duration());
            if let Some(position) = engine.queue_position() {
                prop_assert!(position < engine.queue().len());
            } else {
                prop_assert!(engine.queue().is_empty());
            }
        }
    }

    /// Property: Previous past the restart threshold restarts in place
    #[test]
    fn previous_after_threshold_restarts(
        tracks in arbitrary_tracks(),
        start in any::<prop::sample::Index>(),
        seek in 4i64..600,
    ) {
        let index = start.index(tracks.len());
        let mut engine = PlaybackEngine::default();
        engine.play(tracks[index].clone(), tracks, index, true).unwrap();
        engine.seek(seek);
        prop_assume!(engine.elapsed() > 3);

        let current = engine.current_track().map(|t| t.id);
        engine.previous();

        prop_assert_eq!(engine.elapsed(), 0);
        prop_assert_eq!(engine.queue_position(), Some(index));
        prop_assert_eq!(engine.current_track().map(|t| t.id), current);
    }

    /// Property: Adding the same track twice grows the queue once
    #[test]
    fn add_to_queue_is_idempotent(tracks in arbitrary_tracks(), extra in arbitrary_track()) {
        let mut engine = PlaybackEngine::default();
        engine.play(tracks[0].clone(), tracks, 0, true).unwrap();

        engine.add_to_queue(extra.clone());
        let after_first = engine.queue().len();
        engine.add_to_queue(extra);
        prop_assert_eq!(engine.queue().len(), after_first);

        let ids: HashSet<_> = engine.queue().iter().map(|t| t.id).collect();
        prop_assert!(ids.len() <= engine.queue().len());
    }

    /// Property: History stays bounded and unique
    #[test]
    fn history_bounded_and_unique(tracks in prop::collection::vec(arbitrary_track(), 1..200)) {
        let mut history = History::default();
        for track in tracks {
            let id = track.id;
            history.record(track, chrono::Utc::now());
            prop_assert_eq!(history.latest().map(|e| e.track.id), Some(id));
        }

        let entries = history.list(usize::MAX);
        prop_assert!(entries.len() <= HISTORY_CAPACITY);

        let ids: HashSet<_> = entries.iter().map(|e| e.track.id).collect();
        prop_assert_eq!(ids.len(), entries.len());
    }

    /// Property: Repeat-one restarts the same track on completion
    #[test]
    fn repeat_track_keeps_current(tracks in arbitrary_tracks()) {
        let mut engine = PlaybackEngine::new(PlayerConfig {
            repeat: RepeatMode::Track,
            ..PlayerConfig::default()
        });
        let first = tracks[0].clone();
        engine.play(first.clone(), tracks, 0, true).unwrap();

        for _ in 0..engine.effective_duration() {
            engine.tick();
        }

        prop_assert_eq!(engine.elapsed(), 0);
        prop_assert!(engine.is_playing());
        prop_assert_eq!(engine.current_track().map(|t| t.id), Some(first.id));
    }

    /// Property: Last track with repeat off stops and holds at the end
    #[test]
    fn last_track_stops_at_effective_duration(
        tracks in arbitrary_tracks(),
        authenticated in any::<bool>(),
    ) {
        let last = tracks.len() - 1;
        let mut engine = PlaybackEngine::default();
        engine.play(tracks[last].clone(), tracks, last, authenticated).unwrap();

        let mut outcome = TickOutcome::Advanced;
        for _ in 0..engine.effective_duration() {
            outcome = engine.tick();
        }

        prop_assert!(matches!(outcome, TickOutcome::QueueFinished | TickOutcome::PreviewEnded));
        prop_assert!(!engine.is_playing());
        prop_assert_eq!(engine.elapsed(), engine.effective_duration());
    }

    /// Property: A preview never plays past the limit and ends exactly once
    #[test]
    fn preview_ends_once(duration in 50u32..600, extra_ticks in 0u32..100) {
        let mut engine = PlaybackEngine::default();
        let track = Track::new(TrackId::new(1), "Song", "Artist", duration);
        engine.play(track, Vec::new(), 0, false).unwrap();

        for _ in 0..(PREVIEW_LIMIT_SECS + extra_ticks) {
            engine.tick();
            prop_assert!(engine.elapsed() <= PREVIEW_LIMIT_SECS);
        }

        let ended = engine
            .drain_notifications()
            .iter()
            .filter(|n| matches!(n, Notification::PreviewEnded { .. }))
            .count();
        prop_assert_eq!(ended, 1);
        prop_assert!(!engine.is_playing());
    }
}
