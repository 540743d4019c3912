//! Time-bounded order store decorator.
//!
//! Wraps any [`OrderStore`] so a stalled backend surfaces as
//! [`StoreError::Timeout`] instead of hanging the request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ordering::{Order, OrderError, OrderPatch, OrderStore, StatusFilter, StoreError};
use crate::domain::shared::OrderId;

/// Applies a per-call deadline to an inner store.
#[derive(Debug)]
pub struct TimeoutOrderStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: OrderStore> TimeoutOrderStore<S> {
    /// Wrap `inner`, failing any call that takes longer than `timeout`.
    pub const fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Get the wrapped store.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T: Send>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, OrderError>> + Send,
    ) -> Result<T, OrderError> {
        tokio::time::timeout(self.timeout, fut).await.unwrap_or_else(|_| {
            let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::error!(operation, timeout_ms, "Order store call timed out");
            Err(StoreError::Timeout {
                operation,
                timeout_ms,
            }
            .into())
        })
    }
}

#[async_trait]
impl<S: OrderStore> OrderStore for TimeoutOrderStore<S> {
    async fn create(&self, order: &Order) -> Result<(), OrderError> {
        self.bounded("create", self.inner.create(order)).await
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.bounded("get_by_id", self.inner.get_by_id(id)).await
    }

    async fn list_by_status(&self, filter: StatusFilter) -> Result<Vec<Order>, OrderError> {
        self.bounded("list_by_status", self.inner.list_by_status(filter))
            .await
    }

    async fn update_partial(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, OrderError> {
        self.bounded("update_partial", self.inner.update_partial(id, patch))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ordering::fixtures::order;
    use crate::infrastructure::persistence::InMemoryOrderStore;

    struct StalledStore;

    #[async_trait]
    impl OrderStore for StalledStore {
        async fn create(&self, _order: &Order) -> Result<(), OrderError> {
            std::future::pending().await
        }

        async fn get_by_id(&self, _id: &OrderId) -> Result<Order, OrderError> {
            std::future::pending().await
        }

        async fn list_by_status(&self, _filter: StatusFilter) -> Result<Vec<Order>, OrderError> {
            std::future::pending().await
        }

        async fn update_partial(
            &self,
            _id: &OrderId,
            _patch: OrderPatch,
        ) -> Result<Order, OrderError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_call_times_out() {
        let store = TimeoutOrderStore::new(StalledStore, Duration::from_millis(500));

        let err = store.create(&order()).await.unwrap_err();
        assert_eq!(
            err,
            OrderError::Store(StoreError::Timeout {
                operation: "create",
                timeout_ms: 500,
            })
        );
    }

    #[tokio::test]
    async fn fast_calls_pass_through() {
        let store = TimeoutOrderStore::new(InMemoryOrderStore::new(), Duration::from_secs(1));
        let order = order();

        store.create(&order).await.unwrap();
        let found = store.get_by_id(order.id()).await.unwrap();
        assert_eq!(found.id(), order.id());
        assert_eq!(store.inner().len(), 1);
    }

    #[tokio::test]
    async fn inner_errors_are_preserved() {
        let store = TimeoutOrderStore::new(InMemoryOrderStore::new(), Duration::from_secs(1));
        let err = store.get_by_id(&OrderId::new("ghost")).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound { .. }));
    }
}
