//! Play queue
//!
//! Ordered list of tracks plus the current position. The queue is replaced
//! wholesale by every "play this context" command and appended to by
//! "add to queue". Shuffle and repeat are resolved here for next/previous;
//! repeat-one is handled by the engine and never reaches the queue.

use crate::error::{PlaybackError, Result};
use crate::shuffle::random_index;
use crate::types::RepeatMode;
use encore_core::{Track, TrackId};
use rand::Rng;

/// Outcome of resolving the next index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextResolution {
    /// Play the track at this index
    Index(usize),

    /// Past the end with repeat off: playback should stop
    QueueExhausted,
}

/// Outcome of resolving the previous index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousResolution {
    /// Far enough into the track: restart it instead of moving
    RestartCurrent,

    /// Play the track at this index
    Index(usize),
}

/// Outcome of appending a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Track appended at the end
    Added,

    /// A track with the same ID is already queued; queue unchanged
    AlreadyQueued,
}

/// Play queue with a current position
///
/// Structure:
/// ```text
///   0: Track A
///   1: Track B   <- position
///   2: Track C
/// ```
///
/// Invariant: `position` is `Some(i)` with `i < tracks.len()` whenever the
/// queue is non-empty, and `None` when it is empty.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    position: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue and position
    ///
    /// Rejects `start_index` outside the new list, leaving the queue untouched.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        if start_index >= tracks.len() {
            return Err(PlaybackError::InvalidIndex {
                index: start_index,
                len: tracks.len(),
            });
        }

        self.tracks = tracks;
        self.position = Some(start_index);
        Ok(())
    }

    /// Resolve the next index
    ///
    /// Shuffle picks uniformly over the whole queue. Otherwise moves forward
    /// by one, wrapping to 0 with repeat-queue.
    pub fn next<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        shuffle: bool,
        repeat: RepeatMode,
    ) -> NextResolution {
        if shuffle {
            return random_index(rng, self.tracks.len())
                .map_or(NextResolution::QueueExhausted, NextResolution::Index);
        }

        let Some(position) = self.position else {
            return NextResolution::QueueExhausted;
        };

        let next = position + 1;
        if next < self.tracks.len() {
            NextResolution::Index(next)
        } else if repeat == RepeatMode::Queue {
            NextResolution::Index(0)
        } else {
            NextResolution::QueueExhausted
        }
    }

    /// Resolve the previous index
    ///
    /// More than `restart_threshold` seconds into the track restarts it.
    /// Otherwise moves back by one, wrapping to the last index with
    /// repeat-queue and staying at the first index without it.
    ///
    /// Returns `None` for an empty queue.
    pub fn previous<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        elapsed: u32,
        restart_threshold: u32,
        shuffle: bool,
        repeat: RepeatMode,
    ) -> Option<PreviousResolution> {
        if self.tracks.is_empty() {
            return None;
        }

        if elapsed > restart_threshold {
            return Some(PreviousResolution::RestartCurrent);
        }

        if shuffle {
            return random_index(rng, self.tracks.len()).map(PreviousResolution::Index);
        }

        let position = self.position.unwrap_or(0);
        let index = match position.checked_sub(1) {
            Some(prev) => prev,
            None if repeat == RepeatMode::Queue => self.tracks.len() - 1,
            None => 0,
        };
        Some(PreviousResolution::Index(index))
    }

    /// Append a track unless one with the same ID is already queued
    pub fn add(&mut self, track: Track) -> AddOutcome {
        if self.contains(track.id) {
            return AddOutcome::AlreadyQueued;
        }

        self.tracks.push(track);
        if self.position.is_none() {
            self.position = Some(0);
        }
        AddOutcome::Added
    }

    /// Remove the track at `index`
    ///
    /// Entries before the position shift it down by one. Removing the entry
    /// at the position keeps the index (clamped), so it then points at the
    /// track that followed.
    pub fn remove(&mut self, index: usize) -> Result<Track> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::InvalidIndex {
                index,
                len: self.tracks.len(),
            });
        }

        let removed = self.tracks.remove(index);

        self.position = match self.position {
            _ if self.tracks.is_empty() => None,
            Some(pos) if index < pos => Some(pos - 1),
            Some(pos) => Some(pos.min(self.tracks.len() - 1)),
            None => Some(0),
        };

        Ok(removed)
    }

    /// Move the position to `index`
    pub fn jump_to(&mut self, index: usize) -> Result<&Track> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::InvalidIndex {
                index,
                len: self.tracks.len(),
            });
        }

        self.position = Some(index);
        Ok(&self.tracks[index])
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.position = None;
    }

    /// Check whether a track ID is queued
    pub fn contains(&self, track_id: TrackId) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Track at the current position
    pub fn current(&self) -> Option<&Track> {
        self.position.and_then(|pos| self.tracks.get(pos))
    }

    /// Current position
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// All queued tracks in storage order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Get queue length
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
