//! Playback engine - core orchestration
//!
//! Coordinates the queue, history, volume, transport clock, and lyrics state.
//! Every method runs to completion synchronously; the engine never awaits.
//! Work that needs I/O (history persistence, lyrics fetches) is queued in
//! outboxes that the platform drains and performs on its own schedule.

use crate::{
    clock::{ClockSignal, SimulatedClock, TransportClock},
    error::Result,
    events::Notification,
    history::History,
    lyrics::active_line,
    queue::{AddOutcome, NextResolution, PreviousResolution, Queue},
    types::{EngineStatus, PlayerConfig, PlayerSnapshot, RepeatMode},
    volume::Volume,
};
use chrono::Utc;
use encore_core::{HistoryEntry, LyricsDocument, Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Pending lyrics fetch for the current track
///
/// Handed out by the engine and handed back with the fetched document. The
/// generation ties the result to the playback it was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsRequest {
    /// Track the lyrics are for
    pub track: Track,

    generation: u64,
}

impl LyricsRequest {
    /// ID of the requested track
    pub fn track_id(&self) -> TrackId {
        self.track.id
    }
}

/// What a clock interval did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was playing
    Idle,

    /// Elapsed time advanced
    Advanced,

    /// Repeat-one restarted the track
    Repeated,

    /// Moved on to the track at this queue index
    AdvancedToNext(usize),

    /// Reached the end of the queue and stopped
    QueueFinished,

    /// Anonymous preview hit its limit and stopped
    PreviewEnded,
}

/// Central playback engine
///
/// Owns all playback state. Single writer: callers issue commands, UI reads
/// `snapshot()` copies.
pub struct PlaybackEngine {
    config: PlayerConfig,

    // State
    current_track: Option<Track>,
    is_playing: bool,
    elapsed: u32,
    effective_duration: u32,
    is_authenticated: bool,

    // Queue and history
    queue: Queue,
    history: History,

    // Settings
    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,

    clock: Box<dyn TransportClock>,
    rng: StdRng,

    // Lyrics
    lyrics: Option<LyricsDocument>,
    lyrics_panel_open: bool,
    lyrics_generation: u64,

    // Outboxes drained by the platform
    pending_notifications: Vec<Notification>,
    pending_history_writes: Vec<HistoryEntry>,
    pending_lyrics_requests: Vec<LyricsRequest>,
}

impl PlaybackEngine {
    /// Create new engine with the simulated clock
    pub fn new(config: PlayerConfig) -> Self {
        Self::with_clock(config, Box::new(SimulatedClock::new()))
    }

    /// Create new engine driven by a custom clock
    pub fn with_clock(config: PlayerConfig, clock: Box<dyn TransportClock>) -> Self {
        Self {
            current_track: None,
            is_playing: false,
            elapsed: 0,
            effective_duration: 0,
            is_authenticated: false,
            queue: Queue::new(),
            history: History::new(config.history_capacity),
            volume: Volume::new(config.initial_volume),
            shuffle: config.shuffle,
            repeat: config.repeat,
            clock,
            rng: StdRng::from_entropy(),
            lyrics: None,
            lyrics_panel_open: false,
            lyrics_generation: 0,
            pending_notifications: Vec::new(),
            pending_history_writes: Vec::new(),
            pending_lyrics_requests: Vec::new(),
            config,
        }
    }

    /// Use a seeded random source for shuffle (deterministic tests)
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Playable length of `track` for the given access tier
    pub fn effective_duration_for(&self, track: &Track, is_authenticated: bool) -> u32 {
        if is_authenticated {
            track.duration
        } else {
            track.duration.min(self.config.preview_limit_secs)
        }
    }

    // ===== Playback Control =====

    /// Play `track` within `context`
    ///
    /// An empty context plays the track on its own. `index` is the track's
    /// position in `context`; an out-of-range index is rejected and nothing
    /// changes.
    pub fn play(
        &mut self,
        track: Track,
        context: Vec<Track>,
        index: usize,
        is_authenticated: bool,
    ) -> Result<()> {
        let (context, index) = if context.is_empty() {
            (vec![track.clone()], 0)
        } else {
            (context, index)
        };

        self.queue.set_queue(context, index)?;
        self.start_track(track, is_authenticated);
        Ok(())
    }

    /// Toggle between playing and paused
    ///
    /// Without a current track this is a no-op. Resuming keeps the elapsed
    /// time and effective duration; a track held at its end starts over.
    pub fn toggle_play_pause(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        if self.is_playing {
            self.is_playing = false;
            self.clock.stop();
            debug!(elapsed = self.elapsed, "Paused");
        } else {
            if self.elapsed >= self.effective_duration {
                self.elapsed = 0;
            }
            self.is_playing = true;
            self.clock.start(self.effective_duration);
            debug!(elapsed = self.elapsed, "Resumed");
        }
    }

    /// Skip to next track
    ///
    /// At the end of the queue without repeat, playback stops and holds at
    /// the end of the current track.
    pub fn next(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        match self.queue.next(&mut self.rng, self.shuffle, self.repeat) {
            NextResolution::Index(index) => self.start_queue_index(index),
            NextResolution::QueueExhausted => self.hold_at_end(),
        }
    }

    /// Go to previous track
    ///
    /// If more than the restart threshold into the current track, restarts
    /// it instead.
    pub fn previous(&mut self) {
        let resolution = self.queue.previous(
            &mut self.rng,
            self.elapsed,
            self.config.restart_threshold_secs,
            self.shuffle,
            self.repeat,
        );

        match resolution {
            Some(PreviousResolution::RestartCurrent) => {
                debug!("Restarting current track");
                self.elapsed = 0;
            }
            Some(PreviousResolution::Index(index)) => self.start_queue_index(index),
            None => {}
        }
    }

    /// Play the queued track at `index`
    pub fn play_queue_index(&mut self, index: usize) -> Result<()> {
        let track = self.queue.jump_to(index)?.clone();
        self.start_track(track, self.is_authenticated);
        Ok(())
    }

    /// Seek within the current track
    ///
    /// Clamps to `[0, effective_duration]`. Does not touch the play state or
    /// the clock cadence.
    pub fn seek(&mut self, time: i64) {
        if self.current_track.is_none() {
            return;
        }
        self.elapsed = time.clamp(0, i64::from(self.effective_duration)) as u32;
    }

    /// Audio source for the current track failed to load
    ///
    /// Stops playback; the track is not retried.
    pub fn report_audio_failure(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        self.clock.stop();
        self.is_playing = false;

        let track_id = self.current_track.as_ref().map(|t| t.id);
        warn!(?track_id, reason = %reason, "Playback failed");
        self.emit(Notification::PlaybackFailed { track_id, reason });
    }

    // ===== Clock =====

    /// Handle one transport clock interval
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Idle;
        }

        match self.clock.advance(self.elapsed) {
            None => TickOutcome::Idle,
            Some(ClockSignal::Tick(elapsed)) => {
                self.elapsed = elapsed.min(self.effective_duration);
                TickOutcome::Advanced
            }
            Some(ClockSignal::Completed(elapsed)) => {
                self.elapsed = elapsed.min(self.effective_duration);
                self.handle_track_finished(elapsed)
            }
        }
    }

    fn handle_track_finished(&mut self, reached: u32) -> TickOutcome {
        if !self.is_authenticated && reached >= self.config.preview_limit_secs {
            self.clock.stop();
            self.is_playing = false;
            self.elapsed = self.config.preview_limit_secs.min(self.effective_duration);

            if let Some(track_id) = self.current_track.as_ref().map(|t| t.id) {
                info!(track_id = %track_id, "Preview ended");
                self.emit(Notification::PreviewEnded { track_id });
            }
            return TickOutcome::PreviewEnded;
        }

        if self.repeat == RepeatMode::Track {
            self.elapsed = 0;
            self.clock.start(self.effective_duration);
            return TickOutcome::Repeated;
        }

        match self.queue.next(&mut self.rng, self.shuffle, self.repeat) {
            NextResolution::Index(index) => {
                self.start_queue_index(index);
                TickOutcome::AdvancedToNext(index)
            }
            NextResolution::QueueExhausted => {
                self.hold_at_end();
                TickOutcome::QueueFinished
            }
        }
    }

    /// Move the queue to `index` and play it with the session's access tier
    fn start_queue_index(&mut self, index: usize) {
        let Ok(track) = self.queue.jump_to(index).map(Track::clone) else {
            return;
        };
        self.start_track(track, self.is_authenticated);
    }

    /// Start `track` from zero
    ///
    /// Shared by play, next/previous, and auto-advance.
    fn start_track(&mut self, track: Track, is_authenticated: bool) {
        self.clock.stop();

        self.effective_duration = self.effective_duration_for(&track, is_authenticated);
        self.is_authenticated = is_authenticated;
        self.elapsed = 0;
        self.is_playing = true;
        self.clock.start(self.effective_duration);

        // Any lyrics in flight belong to the previous track
        self.lyrics = None;
        self.lyrics_generation += 1;
        if self.lyrics_panel_open {
            self.pending_lyrics_requests.push(LyricsRequest {
                track: track.clone(),
                generation: self.lyrics_generation,
            });
        }

        let entry = self.history.record(track.clone(), Utc::now());
        self.pending_history_writes.push(entry);

        info!(
            track_id = %track.id,
            title = %track.title,
            effective_duration = self.effective_duration,
            authenticated = is_authenticated,
            "Starting track"
        );

        let notification = if is_authenticated {
            Notification::NowPlaying {
                track_id: track.id,
                title: track.title.clone(),
            }
        } else {
            Notification::PreviewStarted {
                track_id: track.id,
                title: track.title.clone(),
                limit_secs: self.config.preview_limit_secs,
            }
        };
        self.current_track = Some(track);
        self.emit(notification);
    }

    /// Stop at the end of the current track
    fn hold_at_end(&mut self) {
        self.clock.stop();
        self.is_playing = false;
        self.elapsed = self.effective_duration;
        debug!("Queue finished");
    }

    // ===== Volume =====

    /// Set volume, clamped to 0-100
    pub fn set_volume(&mut self, level: i32) {
        self.volume.set_level(level);
    }

    /// Get current volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    // ===== Queue Management =====

    /// Append a track to the queue
    ///
    /// Duplicates are reported through a notification, not an error.
    pub fn add_to_queue(&mut self, track: Track) -> AddOutcome {
        let track_id = track.id;
        let title = track.title.clone();

        let outcome = self.queue.add(track);
        match outcome {
            AddOutcome::Added => self.emit(Notification::AddedToQueue { track_id, title }),
            AddOutcome::AlreadyQueued => {
                self.emit(Notification::AlreadyQueued { track_id, title });
            }
        }
        outcome
    }

    /// Remove track from queue by index
    pub fn remove_from_queue(&mut self, index: usize) -> Result<Track> {
        let removed = self.queue.remove(index)?;
        self.emit(Notification::RemovedFromQueue {
            track_id: removed.id,
            title: removed.title.clone(),
        });
        Ok(removed)
    }

    /// Get all tracks in queue
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Current queue position
    pub fn queue_position(&self) -> Option<usize> {
        self.queue.position()
    }

    // ===== Shuffle & Repeat =====

    /// Flip the shuffle flag
    ///
    /// The stored queue order is never changed.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.emit(Notification::ShuffleToggled {
            enabled: self.shuffle,
        });
        self.shuffle
    }

    /// Cycle repeat mode: Off → Queue → Track → Off
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.emit(Notification::RepeatToggled { mode: self.repeat });
        self.repeat
    }

    /// Get shuffle flag
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Get current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    // ===== Lyrics =====

    /// Ask for lyrics of the current track
    ///
    /// Returns the fetch to perform, or `None` when `track_id` is not the
    /// current track. Any earlier request becomes stale.
    pub fn request_lyrics(&mut self, track_id: TrackId) -> Option<LyricsRequest> {
        let track = self.current_track.as_ref().filter(|t| t.id == track_id)?.clone();

        self.lyrics_generation += 1;
        Some(LyricsRequest {
            track,
            generation: self.lyrics_generation,
        })
    }

    /// Deliver a fetched lyrics document
    ///
    /// Results for a superseded request are discarded. Returns whether the
    /// document was kept.
    pub fn apply_lyrics(&mut self, request: &LyricsRequest, mut document: LyricsDocument) -> bool {
        let current = self.current_track.as_ref().map(|t| t.id);
        if request.generation != self.lyrics_generation || current != Some(request.track_id()) {
            debug!(track_id = %request.track_id(), "Discarding stale lyrics");
            return false;
        }

        document.sort_lines();
        let track_id = request.track_id();
        self.emit(if document.available {
            Notification::LyricsLoaded { track_id }
        } else {
            Notification::LyricsUnavailable { track_id }
        });
        self.lyrics = Some(document);
        true
    }

    /// Open or close the lyrics panel
    ///
    /// While open, every track change queues a lyrics request. Opening it
    /// queues one for the current track if nothing is loaded.
    pub fn set_lyrics_panel_open(&mut self, open: bool) {
        self.lyrics_panel_open = open;
        if !open || self.lyrics.is_some() {
            return;
        }
        if let Some(track_id) = self.current_track.as_ref().map(|t| t.id) {
            if let Some(request) = self.request_lyrics(track_id) {
                self.pending_lyrics_requests.push(request);
            }
        }
    }

    /// Lyrics for the current track, if loaded
    pub fn lyrics(&self) -> Option<&LyricsDocument> {
        self.lyrics.as_ref()
    }

    /// Line to highlight at the current elapsed time
    pub fn active_lyric_line(&self) -> Option<usize> {
        self.lyrics
            .as_ref()
            .map(|document| active_line(document, self.elapsed))
    }

    // ===== History =====

    /// Most recent history entries (most recent first)
    pub fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.history.list(limit)
    }

    /// History listing with the configured default limit
    pub fn recent_history(&self) -> Vec<HistoryEntry> {
        self.history.list(self.config.history_list_default)
    }

    /// Seed history from persisted entries
    pub fn restore_history(&mut self, entries: Vec<HistoryEntry>) {
        self.history.restore(entries);
    }

    // ===== State Queries =====

    /// Get current engine status
    pub fn state(&self) -> EngineStatus {
        match (&self.current_track, self.is_playing) {
            (None, _) => EngineStatus::Idle,
            (Some(_), true) => EngineStatus::Playing,
            (Some(_), false) => EngineStatus::Paused,
        }
    }

    /// Get currently playing track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Elapsed seconds in the current track
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Playable length of the current track
    pub fn effective_duration(&self) -> u32 {
        self.effective_duration
    }

    /// Whether the session has full access
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Whether the transport clock has an active run
    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Identifier of the transport clock's current run
    pub fn clock_generation(&self) -> u64 {
        self.clock.generation()
    }

    /// Engine configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Copy of the full state for readers
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            status: self.state(),
            current_track: self.current_track.clone(),
            is_playing: self.is_playing,
            elapsed: self.elapsed,
            effective_duration: self.effective_duration,
            is_authenticated: self.is_authenticated,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            queue: self.queue.tracks().to_vec(),
            queue_position: self.queue.position(),
            history: self.recent_history(),
            lyrics: self.lyrics.clone(),
            active_lyric_line: self.active_lyric_line(),
        }
    }

    // ===== Outboxes =====

    /// Drain all pending notifications
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending_notifications)
    }

    /// Drain history entries waiting to be persisted
    pub fn take_history_writes(&mut self) -> Vec<HistoryEntry> {
        std::mem::take(&mut self.pending_history_writes)
    }

    /// Drain lyrics fetches queued by track changes or the lyrics panel
    pub fn take_lyrics_requests(&mut self) -> Vec<LyricsRequest> {
        std::mem::take(&mut self.pending_lyrics_requests)
    }

    fn emit(&mut self, notification: Notification) {
        self.pending_notifications.push(notification);
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybackError;
    use encore_core::LyricLine;

    fn track(id: i64, duration: u32) -> Track {
        Track::new(TrackId::new(id), format!("Track {}", id), "Artist", duration)
    }

    fn engine() -> PlaybackEngine {
        PlaybackEngine::default().with_rng_seed(11)
    }

    fn run_ticks(engine: &mut PlaybackEngine, n: u32) -> Vec<TickOutcome> {
        (0..n).map(|_| engine.tick()).collect()
    }

    #[test]
    fn new_engine_is_idle() {
        let engine = engine();
        assert_eq!(engine.state(), EngineStatus::Idle);
        assert_eq!(engine.volume(), 80);
        assert!(engine.queue().is_empty());
        assert!(!engine.clock_running());
    }

    #[test]
    fn play_single_track_builds_one_element_queue() {
        let mut engine = engine();
        engine.play(track(1, 200), Vec::new(), 5, true).unwrap();

        assert_eq!(engine.queue().len(), 1);
        assert_eq!(engine.queue_position(), Some(0));
        assert_eq!(engine.state(), EngineStatus::Playing);
        assert_eq!(engine.effective_duration(), 200);
        assert!(engine.clock_running());
    }

    #[test]
    fn play_rejects_bad_index_and_keeps_state() {
        let mut engine = engine();
        engine.play(track(1, 200), Vec::new(), 0, true).unwrap();

        let err = engine
            .play(track(2, 100), vec![track(2, 100)], 3, true)
            .unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidIndex { index: 3, len: 1 }));
        assert_eq!(engine.current_track().unwrap().id, TrackId::new(1));
    }

    #[test]
    fn play_emits_now_playing_or_preview() {
        let mut engine = engine();
        engine.play(track(1, 200), Vec::new(), 0, true).unwrap();
        engine.play(track(2, 200), Vec::new(), 0, false).unwrap();

        let notifications = engine.drain_notifications();
        assert!(matches!(notifications[0], Notification::NowPlaying { .. }));
        assert!(matches!(
            notifications[1],
            Notification::PreviewStarted { limit_secs: 50, .. }
        ));
        assert!(engine.drain_notifications().is_empty());
    }

    #[test]
    fn play_records_history_and_queues_write() {
        let mut engine = engine();
        engine.play(track(1, 200), Vec::new(), 0, true).unwrap();
        engine.play(track(2, 200), Vec::new(), 0, true).unwrap();

        let history = engine.history(10);
        assert_eq!(history[0].track.id, TrackId::new(2));
        assert_eq!(history[1].track.id, TrackId::new(1));
        assert_eq!(engine.take_history_writes().len(), 2);
        assert!(engine.take_history_writes().is_empty());
    }

    #[test]
    fn toggle_play_pause_without_track_is_noop() {
        let mut engine = engine();
        engine.toggle_play_pause();
        assert_eq!(engine.state(), EngineStatus::Idle);
        assert!(!engine.is_playing());
    }

    #[test]
    fn pause_keeps_elapsed_and_resume_continues() {
        let mut engine = engine();
        engine.play(track(1, 200), Vec::new(), 0, true).unwrap();
        run_ticks(&mut engine, 10);

        engine.toggle_play_pause();
        assert_eq!(engine.state(), EngineStatus::Paused);
        assert!(!engine.clock_running());
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.elapsed(), 10);

        engine.toggle_play_pause();
        assert!(engine.is_playing());
        engine.tick();
        assert_eq!(engine.elapsed(), 11);
        assert_eq!(engine.effective_duration(), 200);
    }

    #[test]
    fn seek_clamps_without_changing_play_state() {
        let mut engine = engine();
        engine.play(track(1, 200), Vec::new(), 0, true).unwrap();

        engine.seek(9999);
        assert_eq!(engine.elapsed(), 200);
        engine.seek(-5);
        assert_eq!(engine.elapsed(), 0);
        engine.seek(42);
        assert_eq!(engine.elapsed(), 42);
        assert!(engine.is_playing());

        engine.tick();
        assert_eq!(engine.elapsed(), 43);
    }

    #[test]
    fn seek_in_preview_clamps_to_limit() {
        let mut engine = engine();
        engine.play(track(1, 300), Vec::new(), 0, false).unwrap();
        engine.seek(120);
        assert_eq!(engine.elapsed(), 50);
    }

    #[test]
    fn volume_clamps() {
        let mut engine = engine();
        engine.set_volume(250);
        assert_eq!(engine.volume(), 100);
        engine.set_volume(-1);
        assert_eq!(engine.volume(), 0);
    }

    #[test]
    fn next_at_end_holds_at_effective_duration() {
        let mut engine = engine();
        let tracks = vec![track(1, 100), track(2, 120)];
        engine.play(tracks[1].clone(), tracks, 1, true).unwrap();
        engine.seek(30);

        engine.next();
        assert!(!engine.is_playing());
        assert_eq!(engine.elapsed(), 120);
        assert_eq!(engine.current_track().unwrap().id, TrackId::new(2));
        assert_eq!(engine.state(), EngineStatus::Paused);
    }

    #[test]
    fn previous_restarts_after_three_seconds() {
        let mut engine = engine();
        let tracks = vec![track(1, 100), track(2, 120)];
        engine.play(tracks[1].clone(), tracks, 1, true).unwrap();
        run_ticks(&mut engine, 4);

        engine.previous();
        assert_eq!(engine.elapsed(), 0);
        assert_eq!(engine.current_track().unwrap().id, TrackId::new(2));
        assert_eq!(engine.queue_position(), Some(1));
    }

    #[test]
    fn previous_early_moves_back() {
        let mut engine = engine();
        let tracks = vec![track(1, 100), track(2, 120)];
        engine.play(tracks[1].clone(), tracks, 1, true).unwrap();
        run_ticks(&mut engine, 2);

        engine.previous();
        assert_eq!(engine.current_track().unwrap().id, TrackId::new(1));
        assert_eq!(engine.queue_position(), Some(0));
        assert_eq!(engine.elapsed(), 0);
    }

    #[test]
    fn next_keeps_access_tier() {
        let mut engine = engine();
        let tracks = vec![track(1, 300), track(2, 300)];
        engine.play(tracks[0].clone(), tracks, 0, false).unwrap();

        engine.next();
        assert!(!engine.is_authenticated());
        assert_eq!(engine.effective_duration(), 50);
    }

    #[test]
    fn repeat_track_replays_same_track() {
        let mut engine = engine();
        engine.toggle_repeat();
        engine.toggle_repeat();
        assert_eq!(engine.repeat(), RepeatMode::Track);

        let tracks = vec![track(1, 5), track(2, 5)];
        engine.play(tracks[0].clone(), tracks, 0, true).unwrap();

        let outcomes = run_ticks(&mut engine, 5);
        assert_eq!(outcomes[4], TickOutcome::Repeated);
        assert_eq!(engine.elapsed(), 0);
        assert!(engine.is_playing());
        assert_eq!(engine.current_track().unwrap().id, TrackId::new(1));
    }

    #[test]
    fn auto_advance_wraps_with_repeat_queue() {
        let mut engine = engine();
        engine.toggle_repeat();

        let tracks = vec![track(1, 3), track(2, 3)];
        engine.play(tracks[1].clone(), tracks, 1, true).unwrap();

        let outcomes = run_ticks(&mut engine, 3);
        assert_eq!(outcomes[2], TickOutcome::AdvancedToNext(0));
        assert_eq!(engine.current_track().unwrap().id, TrackId::new(1));
        assert_eq!(engine.elapsed(), 0);
        assert!(engine.is_playing());
    }

    #[test]
    fn preview_ends_once_at_limit() {
        let mut engine = engine();
        engine.play(track(1, 300), vec![track(1, 300), track(2, 300)], 0, false).unwrap();
        engine.drain_notifications();

        let outcomes = run_ticks(&mut engine, 60);
        assert_eq!(outcomes[49], TickOutcome::PreviewEnded);
        assert!(outcomes[50..].iter().all(|o| *o == TickOutcome::Idle));
        assert!(!engine.is_playing());
        assert_eq!(engine.elapsed(), 50);
        assert_eq!(engine.current_track().unwrap().id, TrackId::new(1));

        let ended = engine
            .drain_notifications()
            .into_iter()
            .filter(|n| matches!(n, Notification::PreviewEnded { .. }))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn short_track_in_preview_advances_normally() {
        let mut engine = engine();
        let tracks = vec![track(1, 20), track(2, 300)];
        engine.play(tracks[0].clone(), tracks, 0, false).unwrap();

        let outcomes = run_ticks(&mut engine, 20);
        assert_eq!(outcomes[19], TickOutcome::AdvancedToNext(1));
        assert_eq!(engine.effective_duration(), 50);
    }

    #[test]
    fn audio_failure_stops_playback() {
        let mut engine = engine();
        engine.play(track(1, 200), Vec::new(), 0, true).unwrap();
        engine.drain_notifications();

        engine.report_audio_failure("decoder error");
        assert!(!engine.is_playing());
        assert!(!engine.clock_running());
        assert!(matches!(
            engine.drain_notifications().as_slice(),
            [Notification::PlaybackFailed { .. }]
        ));
    }

    #[test]
    fn add_to_queue_reports_duplicates() {
        let mut engine = engine();
        engine.play(track(1, 200), Vec::new(), 0, true).unwrap();
        engine.drain_notifications();

        assert_eq!(engine.add_to_queue(track(2, 100)), AddOutcome::Added);
        assert_eq!(engine.add_to_queue(track(2, 100)), AddOutcome::AlreadyQueued);
        assert_eq!(engine.queue().len(), 2);

        let notifications = engine.drain_notifications();
        assert!(matches!(notifications[0], Notification::AddedToQueue { .. }));
        assert!(matches!(notifications[1], Notification::AlreadyQueued { .. }));
    }

    #[test]
    fn shuffle_does_not_reorder_queue() {
        let mut engine = engine();
        let tracks = vec![track(1, 100), track(2, 100), track(3, 100)];
        engine.play(tracks[0].clone(), tracks, 0, true).unwrap();

        assert!(engine.toggle_shuffle());
        let ids: Vec<_> = engine.queue().iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!engine.toggle_shuffle());
    }

    #[test]
    fn stale_lyrics_are_discarded() {
        let mut engine = engine();
        let tracks = vec![track(1, 100), track(2, 100)];
        engine.play(tracks[0].clone(), tracks, 0, true).unwrap();

        let request = engine.request_lyrics(TrackId::new(1)).unwrap();
        engine.next();

        let doc = LyricsDocument::new(TrackId::new(1), "Track 1", "Artist", Vec::new());
        assert!(!engine.apply_lyrics(&request, doc));
        assert!(engine.lyrics().is_none());
    }

    #[test]
    fn lyrics_for_other_track_not_requested() {
        let mut engine = engine();
        engine.play(track(1, 100), Vec::new(), 0, true).unwrap();
        assert!(engine.request_lyrics(TrackId::new(99)).is_none());
    }

    #[test]
    fn lyrics_apply_and_track_active_line() {
        let mut engine = engine();
        engine.play(track(1, 100), Vec::new(), 0, true).unwrap();
        engine.drain_notifications();

        let request = engine.request_lyrics(TrackId::new(1)).unwrap();
        let doc = LyricsDocument::new(
            TrackId::new(1),
            "Track 1",
            "Artist",
            vec![LyricLine::new(0, "one"), LyricLine::new(5, "two")],
        );
        assert!(engine.apply_lyrics(&request, doc));
        assert_eq!(engine.active_lyric_line(), Some(0));

        engine.seek(7);
        assert_eq!(engine.active_lyric_line(), Some(1));
        assert!(matches!(
            engine.drain_notifications().as_slice(),
            [Notification::LyricsLoaded { .. }]
        ));
    }

    #[test]
    fn unsorted_lyrics_resolve_by_timestamp() {
        let mut engine = engine();
        engine.play(track(1, 100), Vec::new(), 0, true).unwrap();

        let request = engine.request_lyrics(TrackId::new(1)).unwrap();
        let doc = LyricsDocument {
            track_id: TrackId::new(1),
            title: "Track 1".to_string(),
            artist: "Artist".to_string(),
            lines: vec![
                LyricLine::new(0, "one"),
                LyricLine::new(10, "three"),
                LyricLine::new(5, "two"),
            ],
            available: true,
        };
        assert!(engine.apply_lyrics(&request, doc));

        engine.seek(6);
        let index = engine.active_lyric_line().unwrap();
        assert_eq!(engine.lyrics().unwrap().lines[index].text, "two");

        engine.seek(12);
        let index = engine.active_lyric_line().unwrap();
        assert_eq!(engine.lyrics().unwrap().lines[index].text, "three");
    }

    #[test]
    fn open_lyrics_panel_requests_on_track_change() {
        let mut engine = engine();
        engine.play(track(1, 100), vec![track(1, 100), track(2, 100)], 0, true).unwrap();

        engine.set_lyrics_panel_open(true);
        let first = engine.take_lyrics_requests();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].track_id(), TrackId::new(1));

        engine.next();
        let second = engine.take_lyrics_requests();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].track_id(), TrackId::new(2));

        // The earlier request is superseded
        let doc = LyricsDocument::new(TrackId::new(1), "Track 1", "Artist", Vec::new());
        assert!(!engine.apply_lyrics(&first[0], doc));
    }

    #[test]
    fn remove_from_queue_validates_index() {
        let mut engine = engine();
        engine.play(track(1, 100), vec![track(1, 100), track(2, 100)], 0, true).unwrap();

        assert!(engine.remove_from_queue(5).is_err());
        let removed = engine.remove_from_queue(1).unwrap();
        assert_eq!(removed.id, TrackId::new(2));
        assert_eq!(engine.queue().len(), 1);
    }

    #[test]
    fn play_queue_index_jumps() {
        let mut engine = engine();
        let tracks = vec![track(1, 100), track(2, 100), track(3, 100)];
        engine.play(tracks[0].clone(), tracks, 0, true).unwrap();

        engine.play_queue_index(2).unwrap();
        assert_eq!(engine.current_track().unwrap().id, TrackId::new(3));
        assert!(engine.play_queue_index(3).is_err());
    }

    #[test]
    fn resume_after_end_restarts_track() {
        let mut engine = engine();
        engine.play(track(1, 3), Vec::new(), 0, true).unwrap();
        run_ticks(&mut engine, 3);
        assert_eq!(engine.elapsed(), 3);
        assert!(!engine.is_playing());

        engine.toggle_play_pause();
        assert_eq!(engine.elapsed(), 0);
        assert!(engine.is_playing());
    }
}
