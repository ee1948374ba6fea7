//! Async player driver
//!
//! Runs a [`PlaybackEngine`] on a tokio task. Commands arrive over a channel
//! and are applied one at a time, so the engine has a single writer. The
//! driver owns the transport interval and performs the I/O the engine queues
//! up: notifications, history persistence, and lyrics fetches.

use crate::{
    engine::{LyricsRequest, PlaybackEngine},
    error::{PlaybackError, Result},
    events::{NotificationSink, TracingSink},
    lyrics::LyricsSynchronizer,
    queue::AddOutcome,
    types::{PlayerSnapshot, RepeatMode},
};
use encore_core::{HistoryPersistence, LyricsDocument, LyricsProvider, Track, TrackId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// External services the driver talks to
#[derive(Clone)]
pub struct Collaborators {
    /// Receives user-facing notifications
    pub notifications: Arc<dyn NotificationSink>,

    /// Lyrics source; without one every request resolves to the placeholder
    pub lyrics: Option<Arc<dyn LyricsProvider>>,

    /// Durable history store; without one history lives in memory only
    pub history: Option<Arc<dyn HistoryPersistence>>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            notifications: Arc::new(TracingSink),
            lyrics: None,
            history: None,
        }
    }
}

/// Commands accepted by the player task
#[derive(Debug)]
pub enum PlayerCommand {
    Play {
        track: Track,
        context: Vec<Track>,
        index: usize,
        authenticated: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    TogglePlayPause,
    Next,
    Previous,
    Seek(i64),
    SetVolume(i32),
    ToggleMute,
    AddToQueue {
        track: Track,
        reply: oneshot::Sender<AddOutcome>,
    },
    RemoveFromQueue {
        index: usize,
        reply: oneshot::Sender<Result<Track>>,
    },
    PlayQueueIndex {
        index: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    ToggleShuffle,
    ToggleRepeat,
    SetLyricsPanelOpen(bool),
    RequestLyrics(TrackId),
    AudioFailed(String),
    Snapshot(oneshot::Sender<PlayerSnapshot>),
    Shutdown,
}

/// Cloneable handle to a running player
#[derive(Clone)]
pub struct PlayerHandle {
    commands: mpsc::UnboundedSender<PlayerCommand>,
    snapshot: watch::Receiver<PlayerSnapshot>,
}

impl PlayerHandle {
    /// Play `track` within `context` at `index`
    pub async fn play(
        &self,
        track: Track,
        context: Vec<Track>,
        index: usize,
        authenticated: bool,
    ) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(PlayerCommand::Play {
            track,
            context,
            index,
            authenticated,
            reply,
        })?;
        rx.await.map_err(|_| PlaybackError::PlayerClosed)?
    }

    /// Toggle between playing and paused
    pub fn toggle_play_pause(&self) -> Result<()> {
        self.send(PlayerCommand::TogglePlayPause)
    }

    /// Skip to next track
    pub fn next(&self) -> Result<()> {
        self.send(PlayerCommand::Next)
    }

    /// Go to previous track (or restart current)
    pub fn previous(&self) -> Result<()> {
        self.send(PlayerCommand::Previous)
    }

    /// Seek to `seconds` into the current track
    pub fn seek(&self, seconds: i64) -> Result<()> {
        self.send(PlayerCommand::Seek(seconds))
    }

    /// Set volume (clamped to 0-100)
    pub fn set_volume(&self, level: i32) -> Result<()> {
        self.send(PlayerCommand::SetVolume(level))
    }

    /// Toggle mute
    pub fn toggle_mute(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleMute)
    }

    /// Append a track to the queue
    pub async fn add_to_queue(&self, track: Track) -> Result<AddOutcome> {
        let (reply, rx) = oneshot::channel();
        self.send(PlayerCommand::AddToQueue { track, reply })?;
        rx.await.map_err(|_| PlaybackError::PlayerClosed)
    }

    /// Remove the queued track at `index`
    pub async fn remove_from_queue(&self, index: usize) -> Result<Track> {
        let (reply, rx) = oneshot::channel();
        self.send(PlayerCommand::RemoveFromQueue { index, reply })?;
        rx.await.map_err(|_| PlaybackError::PlayerClosed)?
    }

    /// Play the queued track at `index`
    pub async fn play_queue_index(&self, index: usize) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(PlayerCommand::PlayQueueIndex { index, reply })?;
        rx.await.map_err(|_| PlaybackError::PlayerClosed)?
    }

    /// Flip shuffle
    pub fn toggle_shuffle(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleShuffle)
    }

    /// Cycle repeat mode
    pub fn toggle_repeat(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleRepeat)
    }

    /// Open or close the lyrics panel
    pub fn set_lyrics_panel_open(&self, open: bool) -> Result<()> {
        self.send(PlayerCommand::SetLyricsPanelOpen(open))
    }

    /// Fetch lyrics for `track_id` if it is the current track
    pub fn request_lyrics(&self, track_id: TrackId) -> Result<()> {
        self.send(PlayerCommand::RequestLyrics(track_id))
    }

    /// Report that the audio source failed to load
    pub fn report_audio_failure(&self, reason: impl Into<String>) -> Result<()> {
        self.send(PlayerCommand::AudioFailed(reason.into()))
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Snapshot taken after every command sent so far has been applied
    pub async fn snapshot_now(&self) -> Result<PlayerSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(PlayerCommand::Snapshot(reply))?;
        rx.await.map_err(|_| PlaybackError::PlayerClosed)
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshot.clone()
    }

    /// Stop the player task
    pub fn shutdown(&self) -> Result<()> {
        self.send(PlayerCommand::Shutdown)
    }

    fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| PlaybackError::PlayerClosed)
    }
}

/// Spawn the player task on the current tokio runtime
///
/// The task runs until [`PlayerHandle::shutdown`] is called or every handle
/// is dropped.
pub fn spawn_player(
    engine: PlaybackEngine,
    collaborators: Collaborators,
) -> (PlayerHandle, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (lyrics_tx, lyrics_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

    let actor = PlayerActor {
        period: engine.config().tick_interval(),
        lyrics: collaborators.lyrics.clone().map(LyricsSynchronizer::new),
        engine,
        collaborators,
        snapshot_tx,
        lyrics_tx,
    };

    let task = tokio::spawn(actor.run(command_rx, lyrics_rx));

    let handle = PlayerHandle {
        commands: command_tx,
        snapshot: snapshot_rx,
    };
    (handle, task)
}

type LyricsResult = (LyricsRequest, LyricsDocument);

struct PlayerActor {
    engine: PlaybackEngine,
    collaborators: Collaborators,
    lyrics: Option<LyricsSynchronizer>,
    snapshot_tx: watch::Sender<PlayerSnapshot>,
    lyrics_tx: mpsc::UnboundedSender<LyricsResult>,
    period: Duration,
}

impl PlayerActor {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<PlayerCommand>,
        mut lyrics_results: mpsc::UnboundedReceiver<LyricsResult>,
    ) {
        info!("Player started");

        // Interval tagged with the clock generation it was armed for
        let mut ticker: Option<(u64, Interval)> = None;

        loop {
            self.sync_ticker(&mut ticker);

            tokio::select! {
                command = commands.recv() => match command {
                    Some(PlayerCommand::Shutdown) | None => break,
                    Some(command) => self.handle(command),
                },
                Some((request, document)) = lyrics_results.recv() => {
                    self.engine.apply_lyrics(&request, document);
                }
                () = next_tick(&mut ticker) => {
                    let outcome = self.engine.tick();
                    debug!(?outcome, elapsed = self.engine.elapsed(), "Tick");
                }
            }

            self.flush();
        }

        info!("Player stopped");
    }

    fn handle(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Play {
                track,
                context,
                index,
                authenticated,
                reply,
            } => {
                let result = self.engine.play(track, context, index, authenticated);
                let _ = reply.send(result);
            }
            PlayerCommand::TogglePlayPause => self.engine.toggle_play_pause(),
            PlayerCommand::Next => self.engine.next(),
            PlayerCommand::Previous => self.engine.previous(),
            PlayerCommand::Seek(seconds) => self.engine.seek(seconds),
            PlayerCommand::SetVolume(level) => self.engine.set_volume(level),
            PlayerCommand::ToggleMute => self.engine.toggle_mute(),
            PlayerCommand::AddToQueue { track, reply } => {
                let _ = reply.send(self.engine.add_to_queue(track));
            }
            PlayerCommand::RemoveFromQueue { index, reply } => {
                let _ = reply.send(self.engine.remove_from_queue(index));
            }
            PlayerCommand::PlayQueueIndex { index, reply } => {
                let _ = reply.send(self.engine.play_queue_index(index));
            }
            PlayerCommand::ToggleShuffle => {
                self.engine.toggle_shuffle();
            }
            PlayerCommand::ToggleRepeat => {
                let mode: RepeatMode = self.engine.toggle_repeat();
                debug!(%mode, "Repeat mode changed");
            }
            PlayerCommand::SetLyricsPanelOpen(open) => self.engine.set_lyrics_panel_open(open),
            PlayerCommand::RequestLyrics(track_id) => {
                if let Some(request) = self.engine.request_lyrics(track_id) {
                    self.dispatch_lyrics(request);
                }
            }
            PlayerCommand::AudioFailed(reason) => self.engine.report_audio_failure(reason),
            PlayerCommand::Snapshot(reply) => {
                self.flush();
                let _ = reply.send(self.engine.snapshot());
            }
            PlayerCommand::Shutdown => {}
        }
    }

    /// Keep the interval in step with the transport clock
    fn sync_ticker(&self, ticker: &mut Option<(u64, Interval)>) {
        if !self.engine.clock_running() {
            *ticker = None;
            return;
        }

        let generation = self.engine.clock_generation();
        if ticker.as_ref().map(|(armed, _)| *armed) != Some(generation) {
            let mut interval = interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some((generation, interval));
        }
    }

    /// Perform the work the engine queued and publish a fresh snapshot
    fn flush(&mut self) {
        for request in self.engine.take_lyrics_requests() {
            self.dispatch_lyrics(request);
        }

        for entry in self.engine.take_history_writes() {
            let Some(store) = self.collaborators.history.clone() else {
                break;
            };
            tokio::spawn(async move {
                if let Err(e) = store.persist(&entry).await {
                    warn!(track_id = %entry.track.id, error = %e, "Failed to persist history entry");
                }
            });
        }

        for notification in self.engine.drain_notifications() {
            self.collaborators.notifications.notify(&notification);
        }

        self.snapshot_tx.send_replace(self.engine.snapshot());
    }

    fn dispatch_lyrics(&mut self, request: LyricsRequest) {
        let Some(lyrics) = self.lyrics.clone() else {
            let track = &request.track;
            let placeholder = LyricsDocument::unavailable(track.id, &track.title, &track.artist);
            self.engine.apply_lyrics(&request, placeholder);
            return;
        };

        let results = self.lyrics_tx.clone();
        tokio::spawn(async move {
            let document = lyrics.load(&request.track).await;
            let _ = results.send((request, document));
        });
    }
}

async fn next_tick(ticker: &mut Option<(u64, Interval)>) {
    match ticker {
        Some((_, interval)) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
