//! Fixed-rate tick pacing against the wall clock.

use std::time::{Duration, Instant};

/// Decides when the next gravity step is due and how much game time it covers.
///
/// The game clock is advanced by the real time that passed, not by the
/// nominal tick, so render and input latency never stretch timed states.
/// Sub-millisecond remainders carry over to the next tick.
#[derive(Debug, Clone)]
pub struct TickPacer {
    tick: Duration,
    last: Instant,
}

impl TickPacer {
    pub fn new(tick_ms: u32, now: Instant) -> Self {
        Self {
            tick: Duration::from_millis(tick_ms.max(1) as u64),
            last: now,
        }
    }

    /// Restart pacing from `now` (e.g. after a new game starts).
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    /// How long input polling may block before the next tick is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.tick
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    /// If a tick is due at `now`, return the whole milliseconds of game time it
    /// covers and start the next tick.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.tick {
            return None;
        }
        let ms = elapsed.as_millis() as u64;
        self.last += Duration::from_millis(ms);
        Some(ms)
    }
}
