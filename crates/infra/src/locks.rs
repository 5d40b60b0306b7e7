use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use studio_booking_domain::ID;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of async mutexes keyed by resource. Every operation that touches
/// the inventory, the bookings or the waitlist of an `Event` holds the lock of
/// that event, and promo code redemptions hold the lock of the promo code.
/// Operations on different keys never wait for each other.
#[derive(Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

/// Releases the lock when dropped
pub struct KeyedLockGuard {
    _guard: OwnedMutexGuard<()>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: String) -> KeyedLockGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries only referenced by the registry are neither held nor awaited
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry(key)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        KeyedLockGuard {
            _guard: lock.lock_owned().await,
        }
    }

    pub async fn lock_event(&self, event_id: &ID) -> KeyedLockGuard {
        self.lock(format!("event:{}", event_id)).await
    }

    pub async fn lock_promo_code(&self, promo_code_id: &ID) -> KeyedLockGuard {
        self.lock(format!("promo_code:{}", promo_code_id)).await
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn serializes_same_key() {
        let locks = KeyedLocks::new();
        let event_id = ID::new();

        let guard = locks.lock_event(&event_id).await;
        let blocked =
            tokio::time::timeout(Duration::from_millis(50), locks.lock_event(&event_id)).await;
        assert!(blocked.is_err());

        drop(guard);
        let acquired =
            tokio::time::timeout(Duration::from_millis(50), locks.lock_event(&event_id)).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let locks = KeyedLocks::new();
        let _first = locks.lock_event(&ID::new()).await;
        let second =
            tokio::time::timeout(Duration::from_millis(50), locks.lock_event(&ID::new())).await;
        assert!(second.is_ok());
        let promo =
            tokio::time::timeout(Duration::from_millis(50), locks.lock_promo_code(&ID::new()))
                .await;
        assert!(promo.is_ok());
    }

    #[tokio::test]
    async fn forgets_released_keys() {
        let locks = KeyedLocks::new();
        for _ in 0..10 {
            let _guard = locks.lock_event(&ID::new()).await;
        }
        let _guard = locks.lock_event(&ID::new()).await;
        assert_eq!(locks.tracked_keys(), 1);
    }
}
