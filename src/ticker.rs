use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Turns irregular event-loop ticks into whole elapsed seconds.
///
/// Sub-second remainders carry over to the next call, so the countdown
/// does not drift when ticks arrive late or early.
#[derive(Debug, Clone)]
pub struct SecondTicker {
    last: Instant,
    carry: Duration,
}

impl SecondTicker {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            carry: Duration::ZERO,
        }
    }

    /// Whole seconds elapsed since the previous call
    pub fn elapsed_seconds(&mut self, now: Instant) -> u64 {
        let total = self.carry + now.saturating_duration_since(self.last);
        self.last = now;

        let seconds = total.as_secs();
        self.carry = total - Duration::from_secs(seconds);
        seconds
    }

    /// Drop accumulated time, e.g. when the timer is (re)started
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
        self.carry = Duration::ZERO;
    }
}
