//! Elapsed-time source for the state machine.
//!
//! The timer stores the instant it was last reset, expressed as a
//! [`Duration`] since boot as reported by a
//! [`ClockPort`](crate::app::ports::ClockPort).  Callers pass `now` in on
//! every query, so the timer itself never touches hardware and tests can
//! drive it with synthetic timestamps.

use core::time::Duration;

/// Monotonic stopwatch measuring time since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElapsedTimer {
    started_at: Duration,
}

impl ElapsedTimer {
    /// Start a timer whose reference instant is `now`.
    pub const fn started_at(now: Duration) -> Self {
        Self { started_at: now }
    }

    /// Rebase the reference instant to `now`.
    pub fn reset(&mut self, now: Duration) {
        self.started_at = now;
    }

    /// Time since the last reset.  A clock that reads earlier than the
    /// reference instant yields zero rather than wrapping.
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    /// Whole seconds since the last reset, rounded down.
    pub fn elapsed_secs(&self, now: Duration) -> u64 {
        self.elapsed(now).as_secs()
    }
}
