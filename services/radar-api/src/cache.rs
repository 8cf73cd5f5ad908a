//! Snapshot caching.
//!
//! A single process-wide slot holding the most recently produced
//! snapshot (live or generated) with its fetch time. The slot is
//! overwritten, never read-modified-written, so concurrent refreshes
//! during a stale window are harmless last-write-wins duplication.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use radar_common::Snapshot;

struct CachedSnapshot {
    snapshot: Snapshot,
    fetched_at: Instant,
}

/// TTL cache for the current snapshot.
pub struct SnapshotCache {
    slot: RwLock<Option<CachedSnapshot>>,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Get the cached snapshot if it is still fresh.
    pub async fn get(&self) -> Option<Snapshot> {
        let guard = self.slot.read().await;
        if let Some(cached) = guard.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                debug!(timestamp = cached.snapshot.timestamp(), "Snapshot cache hit");
                return Some(cached.snapshot.clone());
            }
            debug!("Snapshot cache expired");
        }
        None
    }

    /// Overwrite the slot with a freshly produced snapshot.
    pub async fn set(&self, snapshot: Snapshot) {
        let mut guard = self.slot.write().await;
        *guard = Some(CachedSnapshot {
            snapshot,
            fetched_at: Instant::now(),
        });
    }

    /// Age of whatever is in the slot, fresh or stale. `None` when the
    /// slot has never been filled.
    pub async fn age(&self) -> Option<Duration> {
        let guard = self.slot.read().await;
        guard.as_ref().map(|cached| cached.fetched_at.elapsed())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
