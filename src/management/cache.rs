use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::{
    management::clock::{Clock, SystemClock},
    types::{ArtistSummary, TopList, TrackSummary},
};

/// One complete snapshot of the aggregated top lists.
///
/// Both lists and the timestamp live in the same value, so they can only be
/// stored or dropped together.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub top_tracks: TopList<TrackSummary>,
    pub top_artists: TopList<ArtistSummary>,
    pub last_updated: DateTime<Utc>,
}

/// Process-wide slot holding the last successful top-list refresh.
///
/// The cache is either stale (no entry, or an entry at least `ttl` old) or
/// fresh. Expiry is only judged when the cache is read; entries are never
/// evicted in the background. Replacing the entry swaps the whole value under
/// a short write lock, and no lock is held while the caller talks to
/// Spotify, so concurrent misses may each trigger their own refresh.
pub struct AggregationCache {
    entry: RwLock<Option<CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl AggregationCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        AggregationCache {
            entry: RwLock::new(None),
            ttl,
            clock,
        }
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }

    /// Returns the current entry if it is still within its time-to-live.
    pub async fn fresh(&self) -> Option<CacheEntry> {
        let now = self.clock.now();
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| self.is_fresh_at(e, now))
            .cloned()
    }

    /// `true` if an entry exists and `now - last_updated < ttl`.
    pub async fn is_valid(&self) -> bool {
        let now = self.clock.now();
        let entry = self.entry.read().await;
        entry.as_ref().is_some_and(|e| self.is_fresh_at(e, now))
    }

    /// Timestamp of the stored entry, fresh or not.
    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.as_ref().map(|e| e.last_updated)
    }

    /// Stores a new snapshot stamped with the current time and returns it.
    pub async fn replace(
        &self,
        top_tracks: TopList<TrackSummary>,
        top_artists: TopList<ArtistSummary>,
    ) -> CacheEntry {
        let entry = CacheEntry {
            top_tracks,
            top_artists,
            last_updated: self.clock.now(),
        };
        *self.entry.write().await = Some(entry.clone());
        entry
    }

    fn is_fresh_at(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.last_updated < self.ttl
    }
}
