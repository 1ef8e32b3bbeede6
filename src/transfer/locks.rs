//! Per-account lock table
//!
//! Serializes transfers that touch the same account while letting
//! disjoint pairs run fully in parallel. Guards are acquired in
//! ascending account-id order so a transfer and its reverse cannot
//! deadlock each other.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core_types::AccountId;

/// One async mutex per account id, created on first touch.
///
/// Entries are never evicted; the table grows with the number of
/// distinct accounts that ever transferred, at one mutex each.
pub struct AccountLocks {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, account_id: AccountId) -> Arc<Mutex<()>> {
        self.locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquire both account locks, ascending by id.
    ///
    /// The caller must already have rejected `a == b`.
    pub async fn lock_pair(
        &self,
        a: AccountId,
        b: AccountId,
    ) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        debug_assert_ne!(a, b, "self-transfer must be rejected before locking");

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let low_guard = self.lock_for(low).lock_owned().await;
        let high_guard = self.lock_for(high).lock_owned().await;
        (low_guard, high_guard)
    }
}

impl Default for AccountLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_pair_serializes() {
        let locks = Arc::new(AccountLocks::new());

        let held = locks.lock_pair(1, 2).await;

        // A contender on the same pair must not get through while held
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guards = locks.lock_pair(2, 1).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_disjoint_pairs_do_not_block() {
        let locks = AccountLocks::new();

        let _held = locks.lock_pair(1, 2).await;

        // Disjoint pair acquires immediately
        tokio::time::timeout(Duration::from_millis(100), locks.lock_pair(3, 4))
            .await
            .expect("disjoint pair must not block");
    }

    #[tokio::test]
    async fn test_reverse_pairs_cannot_deadlock() {
        let locks = Arc::new(AccountLocks::new());

        // Hammer a pair and its reverse concurrently; ordered acquisition
        // means this always drains.
        let mut tasks = Vec::new();
        for i in 0..100u64 {
            let locks = locks.clone();
            tasks.push(tokio::spawn(async move {
                let (a, b) = if i % 2 == 0 { (5, 6) } else { (6, 5) };
                let _guards = locks.lock_pair(a, b).await;
            }));
        }

        for task in tasks {
            tokio::time::timeout(Duration::from_secs(5), task)
                .await
                .expect("no deadlock")
                .unwrap();
        }
    }
}
