//! Keyed registry of token buckets

use chrono::Duration;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::warn;

use crate::clock::{Clock, SystemClock};

use super::bucket::TokenBucket;

/// Registry of independent token buckets keyed by caller-chosen strings
///
/// Buckets are created on first use with the capacity and period passed by
/// that call and keep that configuration for the life of the process.
/// Consumption happens under the bucket's shard lock, so a bucket never
/// hands out more tokens than it holds.
pub struct RateLimiter {
    buckets: DashMap<String, TokenBucket>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Create a limiter on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            buckets: DashMap::new(),
            clock,
        }
    }

    /// Try to take one token from the bucket for `key`
    ///
    /// Returns `false` when the bucket is empty. Never fails otherwise.
    pub fn try_consume(&self, key: &str, capacity: u32, period: Duration) -> bool {
        let now = self.clock.now();

        let allowed = match self.buckets.get_mut(key) {
            Some(mut bucket) => bucket.try_consume(now),
            None => self
                .buckets
                .entry(key.to_string())
                .or_insert_with(|| TokenBucket::new(capacity, period, now))
                .try_consume(now),
        };

        if !allowed {
            warn!(key = %key, "Rate limit exceeded");
        }
        allowed
    }

    /// Time until the bucket for `key` next refills, if the bucket exists
    pub fn time_until_refill(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.buckets
            .get(key)
            .map(|bucket| bucket.time_until_refill(now))
    }

    /// Drop every bucket
    pub fn clear_all(&self) {
        self.buckets.clear();
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
