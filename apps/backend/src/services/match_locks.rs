//! Per-match mutual exclusion for move submission.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per match id.
///
/// Clones share the registry. Submissions to different matches never
/// contend; submissions to the same match run one at a time.
#[derive(Clone, Default)]
pub struct MatchLocks {
    inner: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl MatchLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `match_id`.
    pub async fn acquire(&self, match_id: i64) -> MatchGuard {
        let mutex = self.inner.entry(match_id).or_default().clone();
        let guard = mutex.lock_owned().await;
        MatchGuard {
            match_id,
            guard: Some(guard),
            locks: self.clone(),
        }
    }

    /// Number of matches with a live mutex.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn release_if_idle(&self, match_id: i64) {
        // The map's own handle is the only one left when nobody holds or waits.
        self.inner
            .remove_if(&match_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// Held for the duration of one serialized submission.
pub struct MatchGuard {
    match_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
    locks: MatchLocks,
}

impl Drop for MatchGuard {
    fn drop(&mut self) {
        // Drop the owned guard (and its Arc) before checking idleness.
        drop(self.guard.take());
        self.locks.release_if_idle(self.match_id);
    }
}
