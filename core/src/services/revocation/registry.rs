//! Concurrent registry of revoked tokens

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::clock::Clock;

/// Outcome of a sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Stale entries removed by this sweep
    pub removed: usize,
    /// Entries still held afterwards
    pub remaining: usize,
}

/// Map from raw token string to the instant its entry may be purged
///
/// An entry is live while its purge instant has not yet passed. Once the
/// instant passes the entry is stale, and it is dropped by the next lookup
/// or sweep that sees it.
pub struct RevocationRegistry {
    entries: DashMap<String, DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl RevocationRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Revoke `token` until `ttl` from now, overwriting any earlier entry
    pub fn revoke(&self, token: &str, ttl: Duration) {
        let purge_at = self.clock.now() + ttl;
        self.entries.insert(token.to_string(), purge_at);
        debug!(purge_at = %purge_at, "Token revoked");
    }

    /// Revoke `token` unless it already holds a live entry
    ///
    /// Returns `true` if this call performed the revocation. The check and the
    /// insert happen under one shard lock, so of several concurrent callers
    /// exactly one sees `true`.
    pub fn revoke_once(&self, token: &str, ttl: Duration) -> bool {
        let now = self.clock.now();
        match self.entries.entry(token.to_string()) {
            Entry::Occupied(mut entry) => {
                if now > *entry.get() {
                    entry.insert(now + ttl);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now + ttl);
                true
            }
        }
    }

    /// Whether `token` is currently revoked
    ///
    /// A stale entry found here is removed.
    pub fn is_revoked(&self, token: &str) -> bool {
        let now = self.clock.now();
        let purge_at = match self.entries.get(token) {
            Some(entry) => *entry.value(),
            None => return false,
        };

        if now > purge_at {
            // Another caller may have refreshed the entry since the read
            self.entries.remove_if(token, |_, purge_at| now > *purge_at);
            false
        } else {
            true
        }
    }

    /// Remove every stale entry
    pub fn sweep(&self) -> SweepReport {
        let now = self.clock.now();
        let mut removed = 0;
        self.entries.retain(|_, purge_at| {
            let live = now <= *purge_at;
            if !live {
                removed += 1;
            }
            live
        });

        SweepReport {
            removed,
            remaining: self.entries.len(),
        }
    }

    /// Number of entries held, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
