//! Manage Orders Use Case
//!
//! Admin console operations. Every method takes the [`Principal`] produced
//! by the auth gate, so callers cannot reach these without a verified
//! credential.

use std::sync::Arc;

use crate::application::dto::{OrderDto, OrderStatsDto, UpdateOrderDto};
use crate::application::ports::EventPublisherPort;
use crate::domain::identity::Principal;
use crate::domain::ordering::{
    Order, OrderError, OrderPatch, OrderStateMachine, OrderStatus, OrderStore, StatusFilter,
};
use crate::domain::shared::{Money, OrderId, Timestamp};

/// Use case for the admin order console.
pub struct ManageOrdersUseCase<S, E>
where
    S: OrderStore,
    E: EventPublisherPort,
{
    store: Arc<S>,
    event_publisher: Arc<E>,
}

impl<S, E> ManageOrdersUseCase<S, E>
where
    S: OrderStore,
    E: EventPublisherPort,
{
    /// Create a new `ManageOrdersUseCase`.
    pub const fn new(store: Arc<S>, event_publisher: Arc<E>) -> Self {
        Self {
            store,
            event_publisher,
        }
    }

    /// Orders passing `filter`, newest first.
    pub async fn list_orders(
        &self,
        principal: &Principal,
        filter: StatusFilter,
    ) -> Result<Vec<OrderDto>, OrderError> {
        let orders = self.store.list_by_status(filter).await?;
        tracing::debug!(
            admin_id = %principal.admin_id(),
            filter = %filter,
            count = orders.len(),
            "Listed orders"
        );
        Ok(orders.iter().map(OrderDto::from_order).collect())
    }

    /// Full order document.
    pub async fn get_order(
        &self,
        _principal: &Principal,
        order_id: &str,
    ) -> Result<OrderDto, OrderError> {
        let order = self.store.get_by_id(&OrderId::new(order_id)).await?;
        Ok(OrderDto::from_order(&order))
    }

    /// Apply a status change and/or estimate override.
    pub async fn update_order(
        &self,
        principal: &Principal,
        order_id: &str,
        dto: UpdateOrderDto,
    ) -> Result<OrderDto, OrderError> {
        self.update_order_at(principal, order_id, dto, Timestamp::now())
            .await
    }

    /// [`Self::update_order`] with an explicit clock.
    ///
    /// Either both changes apply or neither does.
    pub async fn update_order_at(
        &self,
        principal: &Principal,
        order_id: &str,
        dto: UpdateOrderDto,
        now: Timestamp,
    ) -> Result<OrderDto, OrderError> {
        if dto.status.is_none() && dto.estimated_time.is_none() {
            return Err(OrderError::validation("body", "Nothing to update"));
        }

        // 1. Parse before touching the store
        let requested = dto
            .status
            .as_deref()
            .map(|raw| OrderStateMachine::parse_status(raw.trim()))
            .transpose()?;

        // 2. Load
        let mut order = self.store.get_by_id(&OrderId::new(order_id)).await?;
        let loaded = order.status();

        // 3. Apply in memory; the estimate goes first so a closing
        //    transition in the same request does not lock it out
        if let Some(to) = requested {
            OrderStateMachine::validate_transition(order.status(), to)?;
        }
        let mut patch = OrderPatch::default();
        if let Some(minutes) = dto.estimated_time {
            patch = patch.merge(order.override_estimated_time(minutes, now)?);
        }
        if let Some(to) = requested {
            patch = patch.merge(order.transition_to(to, now)?);
        }

        // 4. Persist (only if nobody moved the order meanwhile) and publish
        self.persist(principal, &mut order, patch.expecting(loaded))
            .await
    }

    /// Move the order one step along the canonical chain.
    pub async fn advance_order(
        &self,
        principal: &Principal,
        order_id: &str,
    ) -> Result<OrderDto, OrderError> {
        self.advance_order_at(principal, order_id, Timestamp::now())
            .await
    }

    /// [`Self::advance_order`] with an explicit clock.
    pub async fn advance_order_at(
        &self,
        principal: &Principal,
        order_id: &str,
        now: Timestamp,
    ) -> Result<OrderDto, OrderError> {
        let mut order = self.store.get_by_id(&OrderId::new(order_id)).await?;

        let from = order.status();
        let to = OrderStateMachine::canonical_next(from).ok_or_else(|| {
            OrderError::IllegalTransition {
                from,
                to: from,
                reason: OrderStateMachine::transition_error_reason(from, from),
            }
        })?;

        let patch = order.transition_to(to, now)?.expecting(from);
        self.persist(principal, &mut order, patch).await
    }

    /// Dashboard counters for the UTC day containing `now`.
    pub async fn stats(
        &self,
        _principal: &Principal,
        now: Timestamp,
    ) -> Result<OrderStatsDto, OrderError> {
        let orders = self.store.list_by_status(StatusFilter::All).await?;
        let today = now.utc_date();

        let pending_orders = orders
            .iter()
            .filter(|o| o.status() == OrderStatus::Pending)
            .count();
        let active_orders = orders
            .iter()
            .filter(|o| o.status().is_in_progress())
            .count();
        let today_revenue: Money = orders
            .iter()
            .filter(|o| o.status() != OrderStatus::Cancelled)
            .filter(|o| o.created_at().utc_date() == today)
            .map(Order::total)
            .sum();

        Ok(OrderStatsDto {
            pending_orders,
            active_orders,
            today_revenue,
        })
    }

    async fn persist(
        &self,
        principal: &Principal,
        order: &mut Order,
        patch: OrderPatch,
    ) -> Result<OrderDto, OrderError> {
        let updated = match self.store.update_partial(order.id(), patch).await {
            Ok(updated) => updated,
            Err(e) => {
                tracing::error!(order_id = %order.id(), "Failed to update order: {}", e);
                return Err(e);
            }
        };

        tracing::info!(
            order_id = %updated.id(),
            admin_id = %principal.admin_id(),
            status = %updated.status(),
            estimated_time = updated.estimated_time(),
            "Order updated"
        );

        let events = order.drain_events();
        if !events.is_empty() {
            if let Err(e) = self.event_publisher.publish_order_events(events).await {
                tracing::error!("Failed to publish order update events: {}", e);
            }
        }

        Ok(OrderDto::from_order(&updated))
    }
}
