//! Power module - the timed bonus state
//!
//! Power is active until a stored expiry time on the game clock. Activating
//! again replaces the expiry, so there is only ever one pending deactivation.

use crate::types::{POWER_DURATION_MS, POWER_SCORE_INTERVAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerState {
    expires_at_ms: Option<u64>,
}

impl PowerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)activate at `now_ms`; expiry becomes `now_ms + POWER_DURATION_MS`.
    pub fn activate(&mut self, now_ms: u64) {
        self.expires_at_ms = Some(now_ms.saturating_add(POWER_DURATION_MS));
    }

    /// Deactivate if the expiry has been reached. Returns true if this call
    /// turned power off.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.expires_at_ms {
            Some(at) if now_ms >= at => {
                self.expires_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.expires_at_ms.is_some()
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at_ms
    }

    /// Milliseconds left at `now_ms`, zero when inactive
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at_ms
            .map(|at| at.saturating_sub(now_ms))
            .unwrap_or(0)
    }
}

/// Whether a score reached after a row clear triggers power
pub fn triggers_power(score: u32) -> bool {
    score > 0 && score % POWER_SCORE_INTERVAL == 0
}
