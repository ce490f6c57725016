//! The auto-cycling interval as a poll-driven handle.
//!
//! Nothing here spawns a thread or registers a callback. The ticker just
//! tracks "running or not" plus the next deadline; the driving loop calls
//! [`Ticker::poll`] with the current instant and performs a generation
//! step whenever it returns `true`. Tests drive it with hand-built
//! `Instant`s, production drives it from its event loop.

use std::time::{Duration, Instant};

/// Default auto-cycle interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

/// A start/stop interval timer, polled rather than callback-driven.
///
/// `start` and `stop` are idempotent: starting a running ticker or
/// stopping a stopped one changes nothing (in particular, starting twice
/// does not reset the pending deadline).
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    /// A stopped ticker with the default 2-second interval.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_interval(DEFAULT_INTERVAL)
    }

    /// A stopped ticker with a custom interval.
    #[must_use]
    pub const fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Whether the ticker is currently running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start ticking. The first tick is due one full interval from `now`.
    pub fn start(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Stop ticking and discard any pending deadline.
    pub const fn stop(&mut self) {
        self.deadline = None;
    }

    /// Check whether a tick is due at `now`.
    ///
    /// Returns `true` at most once per interval; the deadline advances by
    /// whole intervals from its previous value, so the ticks stay on a
    /// fixed cadence even when polling is late.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.deadline = Some(deadline + self.interval);
        true
    }

    /// Time until the next tick, if running.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
