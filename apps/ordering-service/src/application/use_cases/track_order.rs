//! Track Order Use Case

use std::sync::Arc;

use crate::application::dto::OrderDto;
use crate::domain::ordering::{OrderError, OrderStore};
use crate::domain::shared::OrderId;

/// Public read of a single order by id.
///
/// Holding the order id is the only credential a customer has.
pub struct TrackOrderUseCase<S>
where
    S: OrderStore,
{
    store: Arc<S>,
}

impl<S> TrackOrderUseCase<S>
where
    S: OrderStore,
{
    /// Create a new `TrackOrderUseCase`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetch the current order document.
    pub async fn execute(&self, order_id: &str) -> Result<OrderDto, OrderError> {
        let order_id = order_id.trim();
        if order_id.is_empty() {
            return Err(OrderError::not_found(order_id));
        }

        let order = self.store.get_by_id(&OrderId::new(order_id)).await?;
        Ok(OrderDto::from_order(&order))
    }
}
