//! Admin order feed.
//!
//! Keeps the admin console's order list fresh: re-fetches the filtered list
//! on a fixed interval and whenever the filter changes, publishing the
//! latest list on a `watch` channel. A rejected credential ends polling.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::dto::OrderDto;
use crate::domain::ordering::StatusFilter;
use crate::domain::shared::Timestamp;

use super::api_client::StorefrontClient;
use super::tracking::{FetchError, MIN_POLL_INTERVAL, poll_interval};

/// Default re-fetch interval.
pub const DEFAULT_ADMIN_INTERVAL: Duration = Duration::from_secs(15);

/// Anything that can list orders for the admin console.
#[async_trait]
pub trait AdminOrderSource: Send + Sync {
    /// Orders passing `filter`, newest first.
    async fn fetch_orders(&self, filter: StatusFilter) -> Result<Vec<OrderDto>, FetchError>;
}

#[async_trait]
impl AdminOrderSource for StorefrontClient {
    async fn fetch_orders(&self, filter: StatusFilter) -> Result<Vec<OrderDto>, FetchError> {
        Ok(self.list_admin_orders(filter).await?)
    }
}

/// What the order list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminFeedState {
    /// Filter the list was fetched with.
    pub filter: StatusFilter,
    /// Latest list.
    pub orders: Vec<OrderDto>,
    /// When `orders` was fetched. `None` before the first success.
    pub fetched_at: Option<Timestamp>,
    /// Error from the most recent poll, if it failed.
    pub last_error: Option<String>,
    /// The credential was rejected; polling has stopped.
    pub unauthorized: bool,
}

/// Polling admin order list.
pub struct AdminOrderFeed {
    state: watch::Receiver<AdminFeedState>,
    filter: watch::Sender<StatusFilter>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl AdminOrderFeed {
    /// Start polling on a background task.
    ///
    /// Intervals below [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn spawn<O>(source: Arc<O>, filter: StatusFilter, interval: Duration) -> Self
    where
        O: AdminOrderSource + ?Sized + 'static,
    {
        let (state_tx, state_rx) = watch::channel(AdminFeedState {
            filter,
            ..AdminFeedState::default()
        });
        let (filter_tx, filter_rx) = watch::channel(filter);
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(poll_orders(
            source,
            poll_interval(interval),
            state_tx,
            filter_rx,
            Arc::clone(&refresh),
            cancel.clone(),
        ));

        Self {
            state: state_rx,
            filter: filter_tx,
            refresh,
            cancel,
            handle: Some(handle),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AdminFeedState {
        self.state.borrow().clone()
    }

    /// Receiver for state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AdminFeedState> {
        self.state.clone()
    }

    /// Switch filters. The list is re-fetched straight away.
    pub fn set_filter(&self, filter: StatusFilter) {
        self.filter.send_replace(filter);
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
                tracing::warn!(error = %e, "Admin feed task ended abnormally");
            }
        }
    }
}

impl Drop for AdminOrderFeed {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_orders<O>(
    source: Arc<O>,
    interval: Duration,
    state: watch::Sender<AdminFeedState>,
    mut filter: watch::Receiver<StatusFilter>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) where
    O: AdminOrderSource + ?Sized,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut filter_open = true;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = filter.changed(), if filter_open => {
                filter_open = changed.is_ok();
                ticker.reset();
            }
            _ = ticker.tick() => {}
            () = refresh.notified() => ticker.reset(),
        }

        let wanted = *filter.borrow_and_update();
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = source.fetch_orders(wanted) => result,
        };

        match result {
            Ok(orders) => {
                tracing::debug!(filter = %wanted, count = orders.len(), "Admin order list refreshed");
                state.send_replace(AdminFeedState {
                    filter: wanted,
                    orders,
                    fetched_at: Some(Timestamp::now()),
                    last_error: None,
                    unauthorized: false,
                });
            }
            Err(FetchError::Unauthorized) => {
                tracing::warn!("Admin credential rejected; order feed stopped");
                state.send_modify(|current| {
                    current.unauthorized = true;
                    current.last_error = Some(FetchError::Unauthorized.to_string());
                });
                break;
            }
            Err(e) => {
                tracing::warn!(filter = %wanted, error = %e, "Admin order refresh failed");
                state.send_modify(|current| current.last_error = Some(e.to_string()));
            }
        }
    }
}
