//! Interval-refill token bucket

use chrono::{DateTime, Duration, Utc};

/// A single bucket
///
/// Starts full. Once at least one whole `period` has elapsed since the last
/// refill the bucket is topped back up to `capacity`, and the refill instant
/// moves forward by whole periods so the schedule stays aligned to creation.
#[derive(Debug, Clone)]
pub(crate) struct TokenBucket {
    capacity: u32,
    period: Duration,
    available: u32,
    last_refill: DateTime<Utc>,
}

impl TokenBucket {
    pub(crate) fn new(capacity: u32, period: Duration, now: DateTime<Utc>) -> Self {
        Self {
            capacity,
            period,
            available: capacity,
            last_refill: now,
        }
    }

    fn refill(&mut self, now: DateTime<Utc>) {
        let elapsed = now - self.last_refill;
        if elapsed < self.period || elapsed < Duration::zero() {
            return;
        }

        self.available = self.capacity;
        if self.period > Duration::zero() {
            let step = self.period.num_milliseconds().max(1);
            let periods = elapsed.num_milliseconds() / step;
            self.last_refill += Duration::milliseconds(periods * step);
        } else {
            self.last_refill = now;
        }
    }

    /// Take one token if any is available
    pub(crate) fn try_consume(&mut self, now: DateTime<Utc>) -> bool {
        self.refill(now);
        if self.available > 0 {
            self.available -= 1;
            true
        } else {
            false
        }
    }

    /// Time until the next refill, zero if one is due
    ///
    /// A refill instant past the end of chrono's calendar saturates there.
    pub(crate) fn time_until_refill(&self, now: DateTime<Utc>) -> Duration {
        let next = self
            .last_refill
            .checked_add_signed(self.period)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if next > now {
            next - now
        } else {
            Duration::zero()
        }
    }

    pub(crate) fn available(&self) -> u32 {
        self.available
    }
}
