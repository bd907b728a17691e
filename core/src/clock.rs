//! Time source abstraction
//!
//! Every time-dependent decision (token expiry, revocation staleness,
//! bucket refill) reads the current instant through [`Clock`] so tests can
//! drive time by hand.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Mutex, PoisonError};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Create a clock frozen at a whole-second Unix timestamp
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is outside the range chrono can represent.
    pub fn at_timestamp(seconds: i64) -> Self {
        match Utc.timestamp_opt(seconds, 0).single() {
            Some(start) => Self::new(start),
            None => panic!("timestamp {} is out of range for a manual clock", seconds),
        }
    }

    /// Move the clock forward (or backward with a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }

    /// Jump to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at_timestamp(1_700_000_000);
        assert_eq!(clock.now().timestamp(), 1_700_000_000);

        clock.advance(Duration::milliseconds(1500));
        assert_eq!(clock.now().timestamp_millis(), 1_700_000_001_500);

        clock.set(Utc.timestamp_opt(42, 0).unwrap());
        assert_eq!(clock.now().timestamp(), 42);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_manual_clock_rejects_out_of_range_timestamp() {
        ManualClock::at_timestamp(i64::MAX);
    }
}
