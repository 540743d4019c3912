//! Place Order Use Case

use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::{PlaceOrderDto, PlacedOrderDto};
use crate::application::ports::EventPublisherPort;
use crate::application::services::IdempotencyCache;
use crate::domain::ordering::{
    EstimatePolicy, Order, OrderError, OrderNumberGenerator, OrderStore,
};
use crate::domain::shared::Timestamp;

/// Use case for turning a checkout submission into a stored order.
pub struct PlaceOrderUseCase<S, E>
where
    S: OrderStore,
    E: EventPublisherPort,
{
    store: Arc<S>,
    event_publisher: Arc<E>,
    estimates: EstimatePolicy,
    idempotency: IdempotencyCache<PlacedOrderDto>,
}

impl<S, E> PlaceOrderUseCase<S, E>
where
    S: OrderStore,
    E: EventPublisherPort,
{
    /// Create a new `PlaceOrderUseCase`.
    ///
    /// Retries carrying the same idempotency key within `idempotency_window`
    /// return the first result.
    pub fn new(
        store: Arc<S>,
        event_publisher: Arc<E>,
        estimates: EstimatePolicy,
        idempotency_window: Duration,
    ) -> Self {
        Self {
            store,
            event_publisher,
            estimates,
            idempotency: IdempotencyCache::new(idempotency_window),
        }
    }

    /// Place an order.
    pub async fn execute(
        &self,
        dto: PlaceOrderDto,
        idempotency_key: Option<&str>,
    ) -> Result<PlacedOrderDto, OrderError> {
        self.execute_at(dto, idempotency_key, Timestamp::now()).await
    }

    /// [`Self::execute`] with an explicit clock.
    pub async fn execute_at(
        &self,
        dto: PlaceOrderDto,
        idempotency_key: Option<&str>,
        now: Timestamp,
    ) -> Result<PlacedOrderDto, OrderError> {
        let Some(key) = idempotency_key else {
            return self.place(dto, now).await;
        };

        // Replay (or wait for) any placement already made under this key
        let (placed, fresh) = self
            .idempotency
            .get_or_try_insert_with(key, || self.place(dto, now))
            .await?;
        if !fresh {
            tracing::info!(order_id = %placed.order_id, "Replaying previous placement");
        }
        Ok(placed)
    }

    async fn place(
        &self,
        dto: PlaceOrderDto,
        now: Timestamp,
    ) -> Result<PlacedOrderDto, OrderError> {
        // 1. Validate and price
        let client_totals = dto.client_totals();
        let command = dto.into_command()?;
        let estimated_time = self.estimates.minutes_for(command.order_type);
        let mut order = Order::place(
            command,
            OrderNumberGenerator::generate(now),
            estimated_time,
            now,
        )?;

        if let Some(client) = client_totals.filter(|c| *c != order.pricing()) {
            tracing::warn!(
                order_id = %order.id(),
                client_total = %client.total,
                server_total = %order.total(),
                "Client totals differ from server pricing; using server figures"
            );
        }

        // 2. Persist
        self.store.create(&order).await?;

        tracing::info!(
            order_id = %order.id(),
            order_number = %order.order_number(),
            order_type = %order.order_type(),
            total = %order.total(),
            "Order placed"
        );

        // 3. Publish events
        let events = order.drain_events();
        if let Err(e) = self.event_publisher.publish_order_events(events).await {
            tracing::error!("Failed to publish placement events: {}", e);
        }

        Ok(PlacedOrderDto::from_order(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{CustomerDto, LineItemDto};
    use crate::application::ports::{EventPublishError, MockEventPublisherPort, NoOpEventPublisher};
    use crate::domain::ordering::{OrderEvent, OrderPatch, OrderStatus, OrderType, StatusFilter};
    use crate::domain::shared::{Money, OrderId};
    use crate::infrastructure::persistence::InMemoryOrderStore;

    fn checkout(order_type: &str) -> PlaceOrderDto {
        PlaceOrderDto {
            items: vec![
                LineItemDto {
                    dish_id: "d1".to_string(),
                    name: "Kung Pao Chicken".to_string(),
                    price: Money::new(180),
                    quantity: 2,
                    image: None,
                    instructions: None,
                },
                LineItemDto {
                    dish_id: "d2".to_string(),
                    name: "Spring Rolls".to_string(),
                    price: Money::new(120),
                    quantity: 1,
                    image: None,
                    instructions: Some("no sauce".to_string()),
                },
            ],
            customer: CustomerDto {
                name: "Mei Lin".to_string(),
                phone: "9876543210".to_string(),
                address: Some("12 Lotus Road".to_string()),
            },
            order_type: order_type.to_string(),
            table_number: Some("4".to_string()),
            ..PlaceOrderDto::default()
        }
    }

    fn use_case(
        store: Arc<InMemoryOrderStore>,
    ) -> PlaceOrderUseCase<InMemoryOrderStore, NoOpEventPublisher> {
        PlaceOrderUseCase::new(
            store,
            Arc::new(NoOpEventPublisher),
            EstimatePolicy::default(),
            Duration::from_secs(600),
        )
    }

    #[tokio::test]
    async fn places_pending_order_with_server_totals() {
        let store = Arc::new(InMemoryOrderStore::new());
        let uc = use_case(store.clone());

        let mut dto = checkout("delivery");
        dto.subtotal = Some(Money::new(1));
        dto.tax = Some(Money::new(1));
        dto.total = Some(Money::new(2));

        let placed = uc.execute(dto, None).await.unwrap();
        assert_eq!(placed.status, OrderStatus::Pending);
        assert_eq!(placed.estimated_time, 45);
        assert!(placed.order_number.starts_with("RD-"));

        let stored = store
            .get_by_id(&OrderId::new(placed.order_id))
            .await
            .unwrap();
        assert_eq!(stored.subtotal(), Money::new(480));
        assert_eq!(stored.tax(), Money::new(24));
        assert_eq!(stored.total(), Money::new(504));
    }

    #[tokio::test]
    async fn dine_in_uses_shorter_estimate() {
        let uc = use_case(Arc::new(InMemoryOrderStore::new()));
        let placed = uc.execute(checkout("dine-in"), None).await.unwrap();
        assert_eq!(placed.estimated_time, 20);
    }

    #[tokio::test]
    async fn invalid_checkout_stores_nothing() {
        let store = Arc::new(InMemoryOrderStore::new());
        let uc = use_case(store.clone());

        let mut dto = checkout("delivery");
        dto.customer.address = None;

        let err = uc.execute(dto, None).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation { .. }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let uc = use_case(Arc::new(InMemoryOrderStore::new()));
        let mut dto = checkout("takeaway");
        dto.items.clear();

        let err = uc.execute(dto, None).await.unwrap_err();
        assert_eq!(err.to_string(), "empty cart");
    }

    #[tokio::test]
    async fn same_idempotency_key_replays_first_result() {
        let store = Arc::new(InMemoryOrderStore::new());
        let uc = use_case(store.clone());

        let first = uc
            .execute(checkout("takeaway"), Some("retry-1"))
            .await
            .unwrap();
        let second = uc
            .execute(checkout("takeaway"), Some("retry-1"))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    /// Store whose inserts take a while, like a slow database.
    struct SlowCreate(Arc<InMemoryOrderStore>);

    #[async_trait::async_trait]
    impl OrderStore for SlowCreate {
        async fn create(&self, order: &Order) -> Result<(), OrderError> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            self.0.create(order).await
        }

        async fn get_by_id(&self, id: &OrderId) -> Result<Order, OrderError> {
            self.0.get_by_id(id).await
        }

        async fn list_by_status(&self, filter: StatusFilter) -> Result<Vec<Order>, OrderError> {
            self.0.list_by_status(filter).await
        }

        async fn update_partial(
            &self,
            id: &OrderId,
            patch: OrderPatch,
        ) -> Result<Order, OrderError> {
            self.0.update_partial(id, patch).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resubmit_during_slow_create_waits_for_first_placement() {
        let store = Arc::new(InMemoryOrderStore::new());
        let uc = PlaceOrderUseCase::new(
            Arc::new(SlowCreate(store.clone())),
            Arc::new(NoOpEventPublisher),
            EstimatePolicy::default(),
            Duration::from_secs(600),
        );

        let (first, second) = tokio::join!(
            uc.execute(checkout("takeaway"), Some("k1")),
            uc.execute(checkout("takeaway"), Some("k1")),
        );

        assert_eq!(first.unwrap().order_id, second.unwrap().order_id);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn failed_placement_does_not_burn_the_key() {
        let store = Arc::new(InMemoryOrderStore::new());
        let uc = use_case(store.clone());

        let mut invalid = checkout("delivery");
        invalid.customer.address = None;
        assert!(uc.execute(invalid, Some("k2")).await.is_err());

        let placed = uc.execute(checkout("delivery"), Some("k2")).await.unwrap();
        assert_eq!(placed.status, OrderStatus::Pending);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_price_is_rejected() {
        let store = Arc::new(InMemoryOrderStore::new());
        let uc = use_case(store.clone());

        let mut dto = checkout("takeaway");
        dto.items[0].price = Money::new(i64::MAX / 2);
        dto.items[0].quantity = 3;

        let err = uc.execute(dto, None).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation { .. }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn without_key_each_submission_is_new() {
        let store = Arc::new(InMemoryOrderStore::new());
        let uc = use_case(store.clone());

        uc.execute(checkout("takeaway"), None).await.unwrap();
        uc.execute(checkout("takeaway"), None).await.unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn publishes_placed_event() {
        let mut publisher = MockEventPublisherPort::new();
        publisher
            .expect_publish_order_events()
            .withf(|events| {
                matches!(
                    events.as_slice(),
                    [OrderEvent::Placed(placed)]
                        if placed.order_type == OrderType::Takeaway && placed.total == Money::new(504)
                )
            })
            .times(1)
            .returning(|_| Ok(()));

        let uc = PlaceOrderUseCase::new(
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(publisher),
            EstimatePolicy::default(),
            Duration::from_secs(600),
        );
        uc.execute(checkout("takeaway"), None).await.unwrap();
    }

    #[tokio::test]
    async fn publish_failure_does_not_fail_placement() {
        let mut publisher = MockEventPublisherPort::new();
        publisher.expect_publish_order_events().returning(|_| {
            Err(EventPublishError::PublishFailed {
                message: "sink down".to_string(),
            })
        });

        let store = Arc::new(InMemoryOrderStore::new());
        let uc = PlaceOrderUseCase::new(
            store.clone(),
            Arc::new(publisher),
            EstimatePolicy::default(),
            Duration::from_secs(600),
        );

        assert!(uc.execute(checkout("takeaway"), None).await.is_ok());
        assert_eq!(store.len(), 1);
    }
}
