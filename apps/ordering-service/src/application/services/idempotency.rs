//! Idempotency cache for order placement.
//!
//! A client that times out and resubmits with the same `Idempotency-Key`
//! gets the original placement back instead of a second order. The key is
//! reserved before the first attempt runs, so a resubmit that arrives while
//! the first is still in flight waits for it rather than racing it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tokio::time::Instant;

/// Window-bounded map from idempotency key to a previous result.
#[derive(Debug)]
pub struct IdempotencyCache<V> {
    window: Duration,
    entries: Mutex<HashMap<String, (Instant, Arc<OnceCell<V>>)>>,
}

impl<V: Clone> IdempotencyCache<V> {
    /// Create a cache that remembers results for `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Result for `key`, running `init` only if no caller has produced one.
    ///
    /// Concurrent callers with the same key wait on a single `init`. A failed
    /// `init` caches nothing and the next waiter runs its own. The flag is
    /// `true` when this call's `init` produced the value.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: &str,
        init: F,
    ) -> Result<(V, bool), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut entries = self.entries.lock();
            let now = Instant::now();
            entries.retain(|_, (reserved_at, _)| now.duration_since(*reserved_at) < self.window);
            Arc::clone(
                &entries
                    .entry(key.to_string())
                    .or_insert_with(|| (now, Arc::new(OnceCell::new())))
                    .1,
            )
        };

        let mut ran = false;
        let value = cell
            .get_or_try_init(|| {
                ran = true;
                init()
            })
            .await?;
        Ok((value.clone(), ran))
    }

    /// Previous result for `key`, if one completed inside the window.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock();
        let now = Instant::now();
        entries.retain(|_, (reserved_at, _)| now.duration_since(*reserved_at) < self.window);
        entries.get(key).and_then(|(_, cell)| cell.get().cloned())
    }

    /// Number of live keys, including ones still in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn ok(value: u32) -> Result<u32, String> {
        Ok(value)
    }

    #[tokio::test(start_paused = true)]
    async fn returns_value_inside_window() {
        let cache = IdempotencyCache::new(Duration::from_secs(60));
        assert_eq!(cache.get_or_try_insert_with("key-1", || ok(7)).await, Ok((7, true)));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get_or_try_insert_with("key-1", || ok(8)).await, Ok((7, false)));
        assert_eq!(cache.get("key-1"), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn forgets_value_after_window() {
        let cache = IdempotencyCache::new(Duration::from_secs(60));
        cache.get_or_try_insert_with("key-1", || ok(7)).await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get("key-1"), None);
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_try_insert_with("key-1", || ok(8)).await, Ok((8, true)));
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let cache = IdempotencyCache::new(Duration::from_secs(60));
        cache.get_or_try_insert_with("a", || ok(1)).await.unwrap();
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_key_is_shared_by_concurrent_callers() {
        let cache = IdempotencyCache::new(Duration::from_secs(60));
        let runs = AtomicU32::new(0);
        let slow = |value: u32| {
            let runs = &runs;
            move || async move {
                runs.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, String>(value)
            }
        };

        let (first, second) = tokio::join!(
            cache.get_or_try_insert_with("retry", slow(1)),
            cache.get_or_try_insert_with("retry", slow(2)),
        );

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(first, Ok((1, true)));
        assert_eq!(second, Ok((1, false)));
    }

    #[tokio::test]
    async fn failed_attempt_is_not_cached() {
        let cache = IdempotencyCache::new(Duration::from_secs(60));
        let failed = cache
            .get_or_try_insert_with("key-1", || async { Err::<u32, _>("store down".to_string()) })
            .await;
        assert_eq!(failed, Err("store down".to_string()));
        assert_eq!(cache.get("key-1"), None);

        assert_eq!(cache.get_or_try_insert_with("key-1", || ok(3)).await, Ok((3, true)));
    }
}
