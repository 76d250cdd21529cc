//! Order-status polling after a successful payment redirect.
//!
//! The backend only marks an order paid once the provider webhook lands,
//! so the confirmation view polls `GET /orders/{id}` until the terminal
//! status appears. The loop is an explicit cancellable task: each cycle
//! awaits its fetch before sleeping the fixed interval, so fetches never
//! overlap, and the cancellation flag is checked before every cycle and
//! before every published update, so nothing reaches a torn-down view.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use vitrine_api::{ApiError, ShopClient};

/// Latest state of the polling loop, as seen by the confirmation view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollUpdate {
    /// First fetch is in flight.
    Checking,
    /// The order exists but is not paid yet; carries the raw status.
    Pending(String),
    /// A fetch failed; advisory only, polling continues.
    Error(String),
    /// The order id does not resolve; terminal.
    NotFound,
    /// The backend confirmed payment capture; terminal.
    Paid,
}

/// Why the polling loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Paid,
    NotFound,
    Cancelled,
}

/// Teardown flag for a polling task.
///
/// Cloneable; the view keeps one clone and calls [`PollHandle::cancel`]
/// on unmount. Cancellation is idempotent and checked monotonically — a
/// cancelled handle never un-cancels.
#[derive(Debug, Clone, Default)]
pub struct PollHandle {
    cancelled: Arc<AtomicBool>,
}

impl PollHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the loop at the next check and suppresses further updates.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Polls the order until it is paid, not found, or cancelled.
///
/// The first fetch fires immediately; afterwards the loop sleeps
/// `interval` between cycles. A fetch error publishes a persistent
/// advisory [`PollUpdate::Error`] but does not stop the timer — the
/// backend's asynchronous confirmation may still succeed on a later
/// cycle. Only the terminal status, a missing order, or cancellation
/// stop the loop.
pub async fn poll_order_status(
    client: &ShopClient,
    order_id: i64,
    interval: Duration,
    handle: &PollHandle,
    updates: &watch::Sender<PollUpdate>,
) -> PollOutcome {
    publish(handle, updates, PollUpdate::Checking);
    loop {
        if handle.is_cancelled() {
            return PollOutcome::Cancelled;
        }
        match client.get_order(order_id).await {
            Ok(order) if order.is_paid() => {
                publish(handle, updates, PollUpdate::Paid);
                return PollOutcome::Paid;
            }
            Ok(order) => {
                publish(handle, updates, PollUpdate::Pending(order.status));
            }
            Err(ApiError::NotFound(_)) => {
                tracing::warn!(order_id, "polled order does not exist");
                publish(handle, updates, PollUpdate::NotFound);
                return PollOutcome::NotFound;
            }
            Err(e) => {
                tracing::warn!(order_id, error = %e, "order status fetch failed; will retry");
                publish(handle, updates, PollUpdate::Error(e.to_string()));
            }
        }
        tokio::time::sleep(interval).await;
    }
}

/// Spawns [`poll_order_status`] on the runtime.
///
/// Returns the teardown handle, the update receiver for the view, and the
/// task's join handle.
#[must_use]
pub fn spawn_poller(
    client: ShopClient,
    order_id: i64,
    interval: Duration,
) -> (
    PollHandle,
    watch::Receiver<PollUpdate>,
    JoinHandle<PollOutcome>,
) {
    let handle = PollHandle::new();
    let (tx, rx) = watch::channel(PollUpdate::Checking);
    let task_handle = handle.clone();
    let task = tokio::spawn(async move {
        poll_order_status(&client, order_id, interval, &task_handle, &tx).await
    });
    (handle, rx, task)
}

/// Publishes `update` unless the view has been torn down.
fn publish(handle: &PollHandle, updates: &watch::Sender<PollUpdate>, update: PollUpdate) {
    if handle.is_cancelled() {
        return;
    }
    let _ = updates.send(update);
}
