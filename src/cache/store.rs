// Single-slot response cache.
// Holds the last assembled payload with its fingerprint, TTL checking, and atomic replacement.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::github::RateLimitSnapshot;

/// How long an assembled payload is served before refetching: 1 hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// The last successfully assembled payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// When the payload was assembled.
    pub cached_at: DateTime<Utc>,
    /// Serialized JSON body, served byte-for-byte on a hit.
    pub payload: String,
    /// Weak ETag derived from `payload`.
    pub fingerprint: String,
    /// Rate limit state reported by the listing call that produced this payload.
    pub rate_limit: Option<RateLimitSnapshot>,
}

impl CacheEntry {
    pub fn new(
        payload: String,
        rate_limit: Option<RateLimitSnapshot>,
        cached_at: DateTime<Utc>,
    ) -> Self {
        Self {
            cached_at,
            fingerprint: build_fingerprint(&payload),
            payload,
            rate_limit,
        }
    }

    /// Check if this entry is younger than `ttl` at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match now.signed_duration_since(self.cached_at).to_std() {
            Ok(elapsed) => elapsed < ttl,
            // Stored in the future relative to `now`.
            Err(_) => true,
        }
    }
}

/// True iff an entry exists and is still within its TTL.
pub fn is_fresh(entry: Option<&CacheEntry>, now: DateTime<Utc>, ttl: Duration) -> bool {
    entry.is_some_and(|e| e.is_fresh(now, ttl))
}

/// Weak ETag built from payload length and its first/last characters.
///
/// This is a conditional-request tag, not an integrity check; collisions are
/// tolerated. Length and characters are counted in UTF-16 code units so tags
/// stay stable for clients that compute them the same way.
pub fn build_fingerprint(payload: &str) -> String {
    let units: Vec<u16> = payload.encode_utf16().collect();
    match (units.first(), units.last()) {
        (Some(first), Some(last)) => format!("W/\"{}-{:x}{:x}\"", units.len(), first, last),
        _ => "W/\"0-\"".to_string(),
    }
}

/// One cache slot per process. Reads hand out a shared reference to the
/// current entry; writes swap the whole entry so readers never see a partial one.
#[derive(Debug)]
pub struct ResponseCache {
    slot: RwLock<Option<Arc<CacheEntry>>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// The current entry, fresh or not.
    pub fn current(&self) -> Option<Arc<CacheEntry>> {
        self.slot.read().clone()
    }

    /// The current entry if it is still fresh at `now`.
    pub fn fresh(&self, now: DateTime<Utc>) -> Option<Arc<CacheEntry>> {
        self.current().filter(|e| is_fresh(Some(e), now, self.ttl))
    }

    /// Replace the slot with a new entry.
    pub fn store(&self, entry: CacheEntry) -> Arc<CacheEntry> {
        let entry = Arc::new(entry);
        *self.slot.write() = Some(Arc::clone(&entry));
        entry
    }

    /// Empty the slot.
    pub fn reset(&self) {
        *self.slot.write() = None;
    }
}
