//! # Periodic Timer
//!
//! Polled, single-threaded repeating timer. The host polls it once per frame;
//! dropping it is cancelling it.
//!
//! ## Design
//!
//! - Fires at most once per poll
//! - A stalled host skips the missed periods instead of bursting to catch up
//! - No threads, no callbacks: the owner decides what a firing means

use std::time::{Duration, Instant};

/// Repeating timer driven by explicit `poll` calls.
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    /// Period between firings.
    interval: Duration,
    /// When the next firing is due; `None` once that lies beyond what
    /// `Instant` can represent.
    next_due: Option<Instant>,
    /// Total firings.
    fired: u64,
    /// Periods skipped because the host polled too late.
    skipped: u64,
}

impl PeriodicTimer {
    /// Creates a timer whose first firing is due at `first_due`.
    #[must_use]
    pub fn new(interval: Duration, first_due: Instant) -> Self {
        Self {
            interval,
            next_due: Some(first_due),
            fired: 0,
            skipped: 0,
        }
    }

    /// Returns true if the timer fired at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        self.fired += 1;
        self.next_due = due.checked_add(self.interval);

        if let Some(next) = self.next_due {
            if next <= now && !self.interval.is_zero() {
                // Fell more than one period behind: resync instead of bursting.
                let behind = now.duration_since(next);
                let periods = behind.as_nanos() / self.interval.as_nanos() + 1;
                self.skipped += u64::try_from(periods).unwrap_or(u64::MAX);
                self.next_due = now.checked_add(self.interval);
            }
        }
        if self.next_due.is_none() {
            tracing::warn!(interval = ?self.interval, "next firing is out of range, timer exhausted");
        }

        true
    }

    /// Time left until the next firing (zero if overdue, `Duration::MAX` if
    /// the timer will never fire again).
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due
            .map_or(Duration::MAX, |due| due.saturating_duration_since(now))
    }

    /// Returns how many times the timer has fired.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Returns how many periods were skipped.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }
}
