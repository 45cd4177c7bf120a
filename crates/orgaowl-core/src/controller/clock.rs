//! Monotonic millisecond clock for stamping writes.

use std::sync::atomic::{AtomicI64, Ordering};

use jiff::Timestamp;

/// Hands out strictly increasing millisecond timestamps, never behind the wall
/// clock and never behind any timestamp it has been shown.
#[derive(Debug, Default)]
pub(crate) struct ModificationClock {
    last: AtomicI64,
}

impl ModificationClock {
    /// Next stamp, strictly greater than every previous one.
    pub(crate) fn tick(&self) -> Timestamp {
        let now = Timestamp::now().as_millisecond();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        to_timestamp(now.max(previous + 1))
    }

    /// Makes later ticks land after `seen`.
    pub(crate) fn observe(&self, seen: Timestamp) {
        self.last.fetch_max(seen.as_millisecond(), Ordering::SeqCst);
    }
}

fn to_timestamp(millis: i64) -> Timestamp {
    Timestamp::from_millisecond(millis).unwrap_or(Timestamp::MAX)
}
