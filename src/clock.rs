//! Deadline for the next timeout tick.
//!
//! Only ticks move the deadline. Events that do not tick (resizes, focus,
//! key releases) wait out the time that is left instead of a full delay.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TickDeadline {
    at: Instant,
}

impl TickDeadline {
    pub fn new(now: Instant, delay: Duration) -> Self {
        Self { at: now + delay }
    }

    /// Start a fresh delay after a tick.
    pub fn restart(&mut self, now: Instant, delay: Duration) {
        self.at = now + delay;
    }

    /// Time left to poll for; zero once the deadline has passed.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.at.saturating_duration_since(now)
    }
}
