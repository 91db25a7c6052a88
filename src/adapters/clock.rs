//! Clock adapters.

use std::sync::{Mutex, PoisonError};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock pinned to a settable instant, for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `days`. A move past the end of the
    /// calendar leaves the clock where it was.
    pub fn advance_days(&self, days: i64) {
        let mut guard = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = guard.add_days(days) {
            *guard = next;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
