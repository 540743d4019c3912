//! Publishes order events as structured log records.

use async_trait::async_trait;

use crate::application::ports::{EventPublishError, EventPublisherPort};
use crate::domain::ordering::OrderEvent;

/// Writes each event to the `order_events` tracing target as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    /// Create a new publisher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisherPort for TracingEventPublisher {
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        for event in &events {
            let payload =
                serde_json::to_string(event).map_err(|e| EventPublishError::SerializationError {
                    message: e.to_string(),
                })?;
            tracing::info!(
                target: "order_events",
                event = event.name(),
                order_id = %event.order_id(),
                payload = %payload,
                "Order event"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ordering::{EstimatedTimeChanged, OrderStatus, OrderStatusChanged};
    use crate::domain::shared::{OrderId, Timestamp};

    #[tokio::test]
    async fn publishes_every_event() {
        let publisher = TracingEventPublisher::new();
        let events = vec![
            OrderEvent::StatusChanged(OrderStatusChanged {
                order_id: OrderId::new("order-1"),
                from: OrderStatus::Pending,
                to: OrderStatus::Confirmed,
                occurred_at: Timestamp::now(),
            }),
            OrderEvent::EstimatedTimeChanged(EstimatedTimeChanged {
                order_id: OrderId::new("order-1"),
                minutes: 30,
                occurred_at: Timestamp::now(),
            }),
        ];

        assert!(publisher.publish_order_events(events).await.is_ok());
    }

    #[tokio::test]
    async fn empty_batch_is_fine() {
        assert!(
            TracingEventPublisher::new()
                .publish_order_events(vec![])
                .await
                .is_ok()
        );
    }
}
