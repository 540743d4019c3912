//! In-memory order store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ordering::{Order, OrderError, OrderPatch, OrderStore, StatusFilter};
use crate::domain::shared::OrderId;

#[derive(Debug)]
struct Stored {
    seq: u64,
    order: Order,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    orders: HashMap<String, Stored>,
}

/// In-memory implementation of [`OrderStore`].
///
/// Orders placed in the same instant keep their insertion order, so
/// listings stay stable between polls.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<Inner>,
}

impl InMemoryOrderStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().orders.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().orders.is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: &Order) -> Result<(), OrderError> {
        let mut inner = self.inner.write();
        if inner.orders.contains_key(order.id().as_str()) {
            return Err(OrderError::DuplicateOrderId {
                order_id: order.id().to_string(),
            });
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.orders.insert(
            order.id().to_string(),
            Stored {
                seq,
                order: order.clone(),
            },
        );
        Ok(())
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.inner
            .read()
            .orders
            .get(id.as_str())
            .map(|stored| stored.order.clone())
            .ok_or_else(|| OrderError::not_found(id))
    }

    async fn list_by_status(&self, filter: StatusFilter) -> Result<Vec<Order>, OrderError> {
        let inner = self.inner.read();
        let mut matching: Vec<&Stored> = inner
            .orders
            .values()
            .filter(|stored| filter.matches(stored.order.status()))
            .collect();

        matching.sort_by(|a, b| {
            b.order
                .created_at()
                .cmp(&a.order.created_at())
                .then(b.seq.cmp(&a.seq))
        });

        Ok(matching.into_iter().map(|s| s.order.clone()).collect())
    }

    async fn update_partial(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, OrderError> {
        let mut inner = self.inner.write();
        let stored = inner
            .orders
            .get_mut(id.as_str())
            .ok_or_else(|| OrderError::not_found(id))?;

        patch.check_expected(stored.order.status())?;
        stored.order.apply_patch(&patch);
        Ok(stored.order.clone())
    }
}
