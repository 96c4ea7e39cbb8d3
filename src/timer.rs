//! The repeating timer driving model cycling.
//!
//! The timer does not own a thread or a callback: the host's frame loop asks
//! it whether it is due, which keeps everything on one thread and makes
//! cancellation a matter of dropping the value.

use std::time::Duration;
use web_time::Instant;

/// A repeating timer polled from the frame loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CycleTimer {
    period: Duration,
    next_due: Instant,
}

impl CycleTimer {
    /// Arms a timer first due one `period` after `now`.
    ///
    /// A zero period is bumped to one millisecond so the timer cannot fire on
    /// every poll.
    pub fn new(period: Duration, now: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        CycleTimer {
            period,
            next_due: now + period,
        }
    }

    /// The period between two firings.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the timer fires next.
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns `true`, at most once per call, when the timer is due at `now`.
    ///
    /// Missed periods are not replayed: after a long pause (a hidden tab, a
    /// slow frame) the timer fires once and is rescheduled one period after
    /// `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }

        true
    }
}
