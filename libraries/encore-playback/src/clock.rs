//! Transport clock abstraction
//!
//! The clock is the only thing that moves playback time forward. The engine
//! asks it to advance once per interval; a real audio backend can implement
//! the same trait and report its own progress instead.

/// Signal produced by one clock interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Elapsed time advanced to the contained value
    Tick(u32),

    /// Elapsed time reached the effective duration; the clock has stopped
    Completed(u32),
}

/// Platform-agnostic transport clock
///
/// Implementors keep at most one run active: `start` cancels the previous
/// run and bumps the generation so a scheduler can drop any interval that
/// was armed for the old run.
pub trait TransportClock: Send {
    /// Arm the clock for a track of `effective_duration` seconds
    fn start(&mut self, effective_duration: u32);

    /// Halt ticking (idempotent)
    fn stop(&mut self);

    /// Whether a run is active
    fn is_running(&self) -> bool;

    /// Identifier of the current run, changes on every `start`
    fn generation(&self) -> u64;

    /// Advance one interval from `elapsed`
    ///
    /// # Returns
    /// * `None` - Clock is stopped, nothing happened
    /// * `Some(Tick(t))` - New elapsed time
    /// * `Some(Completed(t))` - Effective duration reached, clock stopped itself
    fn advance(&mut self, elapsed: u32) -> Option<ClockSignal>;
}

/// Simulated one-second ticker
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    running: bool,
    effective_duration: u32,
    generation: u64,
}

impl SimulatedClock {
    /// Create a stopped clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration the current run was armed with
    pub fn effective_duration(&self) -> u32 {
        self.effective_duration
    }
}

impl TransportClock for SimulatedClock {
    fn start(&mut self, effective_duration: u32) {
        self.generation = self.generation.wrapping_add(1);
        self.effective_duration = effective_duration;
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn advance(&mut self, elapsed: u32) -> Option<ClockSignal> {
        if !self.running {
            return None;
        }

        let next = elapsed.saturating_add(1);
        if next >= self.effective_duration {
            self.running = false;
            Some(ClockSignal::Completed(next))
        } else {
            Some(ClockSignal::Tick(next))
        }
    }
}
