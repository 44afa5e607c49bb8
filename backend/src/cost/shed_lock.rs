use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;

/// Registry of per-shed async locks.
///
/// The insert path holds a shed's lock across the most-recent-record read
/// and the subsequent write, so two concurrent allocations for the same
/// shed cannot both observe the same history and create overlapping
/// periods. Locks are created lazily and live for the process lifetime.
#[derive(Default)]
pub struct ShedLocks {
    locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl ShedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_for(&self, shed_id: i64) -> Arc<AsyncMutex<()>> {
        self.locks
            .lock()
            .entry(shed_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}
