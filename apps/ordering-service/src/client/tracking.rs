//! Order Tracking View Model
//!
//! Follows one order from the customer's side. The order is fetched as soon
//! as tracking starts and again on every interval tick, on a background task,
//! so the caller never waits on the network. The latest state is published
//! on a `watch` channel.
//!
//! Polling ends when the order is not found, when it reaches a terminal
//! status, or when the view model is shut down or dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::dto::OrderDto;
use crate::application::use_cases::TrackOrderUseCase;
use crate::domain::ordering::{OrderError, OrderStatus, OrderStore};
use crate::domain::shared::Timestamp;

use super::api_client::{ApiClientError, StorefrontClient};

/// Default re-fetch interval.
pub const DEFAULT_TRACKING_INTERVAL: Duration = Duration::from_secs(30);

/// Shortest accepted polling interval; shorter values are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Clamp a caller-supplied polling interval to [`MIN_POLL_INTERVAL`].
pub(crate) fn poll_interval(requested: Duration) -> Duration {
    requested.max(MIN_POLL_INTERVAL)
}

/// Why an order could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The order does not exist.
    #[error("order not found")]
    NotFound,

    /// The caller is not allowed to read it.
    #[error("unauthorized")]
    Unauthorized,

    /// Anything else. Worth trying again later.
    #[error("{0}")]
    Transport(String),
}

impl From<ApiClientError> for FetchError {
    fn from(err: ApiClientError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else if err.is_unauthorized() {
            Self::Unauthorized
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Anything that can look up one order by id.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetch the current order document.
    async fn fetch_order(&self, order_id: &str) -> Result<OrderDto, FetchError>;
}

#[async_trait]
impl OrderSource for StorefrontClient {
    async fn fetch_order(&self, order_id: &str) -> Result<OrderDto, FetchError> {
        Ok(self.get_order(order_id).await?)
    }
}

#[async_trait]
impl<S: OrderStore> OrderSource for TrackOrderUseCase<S> {
    async fn fetch_order(&self, order_id: &str) -> Result<OrderDto, FetchError> {
        self.execute(order_id).await.map_err(|e| match e {
            OrderError::NotFound { .. } => FetchError::NotFound,
            other => FetchError::Transport(other.to_string()),
        })
    }
}

/// Latest successfully fetched order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSnapshot {
    /// The order as last fetched.
    pub order: OrderDto,
    /// When it was fetched.
    pub fetched_at: Timestamp,
    /// Error from the most recent poll, if it failed after this fetch.
    pub last_error: Option<String>,
}

impl TrackingSnapshot {
    /// Current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.order.status
    }

    /// Quoted minutes.
    #[must_use]
    pub const fn estimated_time(&self) -> u32 {
        self.order.estimated_time
    }

    /// Index into [`OrderStatus::TIMELINE`]. `None` for cancelled orders.
    #[must_use]
    pub const fn stage(&self) -> Option<usize> {
        self.order.status.timeline_position()
    }

    /// Each timeline stage paired with whether the order has reached it.
    #[must_use]
    pub fn timeline(&self) -> [(OrderStatus, bool); 5] {
        let reached = self.stage();
        let mut stages = OrderStatus::TIMELINE.map(|status| (status, false));
        for (index, stage) in stages.iter_mut().enumerate() {
            stage.1 = reached.is_some_and(|position| index <= position);
        }
        stages
    }

    /// Nothing can change after this.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.order.status.is_terminal()
    }
}

/// What the tracking screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingState {
    /// First fetch still in flight.
    Loading,
    /// The order, as last fetched.
    Tracking(TrackingSnapshot),
    /// The id matches no order. Polling has stopped.
    NotFound,
    /// No fetch has succeeded yet; the error of the last attempt.
    Failed(String),
}

/// Polling view model for one order.
pub struct TrackingViewModel {
    order_id: String,
    state: watch::Receiver<TrackingState>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TrackingViewModel {
    /// Start tracking `order_id` on a background task.
    ///
    /// Returns immediately with the state at [`TrackingState::Loading`].
    /// Intervals below [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn spawn<O>(source: Arc<O>, order_id: impl Into<String>, interval: Duration) -> Self
    where
        O: OrderSource + ?Sized + 'static,
    {
        let order_id = order_id.into();
        let (tx, rx) = watch::channel(TrackingState::Loading);
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(poll_order(
            source,
            order_id.clone(),
            poll_interval(interval),
            tx,
            Arc::clone(&refresh),
            cancel.clone(),
        ));

        Self {
            order_id,
            state: rx,
            refresh,
            cancel,
            handle: Some(handle),
        }
    }

    /// Tracked order id.
    #[must_use]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TrackingState {
        self.state.borrow().clone()
    }

    /// Receiver for state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TrackingState> {
        self.state.clone()
    }

    /// Fetch now instead of waiting for the next tick.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// True once polling has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop polling and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(order_id = %self.order_id, error = %e, "Tracking task ended abnormally");
            }
        }
    }
}

impl Drop for TrackingViewModel {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_order<O>(
    source: Arc<O>,
    order_id: String,
    interval: Duration,
    state: watch::Sender<TrackingState>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) where
    O: OrderSource + ?Sized,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            () = refresh.notified() => ticker.reset(),
        }

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = source.fetch_order(&order_id) => result,
        };

        match result {
            Ok(order) => {
                let finished = order.status.is_terminal();
                state.send_replace(TrackingState::Tracking(TrackingSnapshot {
                    order,
                    fetched_at: Timestamp::now(),
                    last_error: None,
                }));
                if finished {
                    tracing::debug!(order_id = %order_id, "Order reached a final status; tracking stopped");
                    break;
                }
            }
            Err(FetchError::NotFound) => {
                tracing::info!(order_id = %order_id, "Tracked order not found");
                state.send_replace(TrackingState::NotFound);
                break;
            }
            Err(e) => {
                tracing::warn!(order_id = %order_id, error = %e, "Order refresh failed");
                let message = e.to_string();
                state.send_modify(|current| match current {
                    TrackingState::Tracking(snapshot) => snapshot.last_error = Some(message),
                    other => *other = TrackingState::Failed(message),
                });
            }
        }
    }
}
