//! Per-resident mutual exclusion.
//!
//! Every operation that reads a resident's balance and writes it back
//! (check-in, renewal, profile update) holds the resident's lock across the
//! whole sequence. One [`ResidentLocks`] is shared by all those services;
//! different residents proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Idle lock entries are pruned once the map grows past this size
const LOCK_PRUNE_THRESHOLD: usize = 1024;

#[derive(Default)]
pub struct ResidentLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ResidentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one resident's balance and activity
    pub async fn acquire(&self, reg_code: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if locks.len() > LOCK_PRUNE_THRESHOLD {
                // Only the map holds an idle entry
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks
                .entry(reg_code.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_locks_are_pruned_when_idle() {
        let locks = ResidentLocks::new();
        for i in 0..=LOCK_PRUNE_THRESHOLD {
            drop(locks.acquire(&format!("R{}", i)).await);
        }
        let held = locks.acquire("HELD").await;
        assert!(locks.locks.lock().unwrap().len() <= 2);
        drop(held);
    }

    #[tokio::test]
    async fn test_same_resident_waits_other_resident_does_not() {
        let locks = Arc::new(ResidentLocks::new());
        let held = locks.acquire("UG0001").await;

        let other = tokio::time::timeout(Duration::from_millis(50), locks.acquire("UG0002")).await;
        assert!(other.is_ok());

        let same = tokio::time::timeout(Duration::from_millis(50), locks.acquire("UG0001")).await;
        assert!(same.is_err());

        drop(held);
        let same = tokio::time::timeout(Duration::from_millis(50), locks.acquire("UG0001")).await;
        assert!(same.is_ok());
    }
}
