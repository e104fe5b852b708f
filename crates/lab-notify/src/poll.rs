//! Fixed-interval re-fetch of the user's notifications.
//!
//! The poll runs whether or not the hub is connected; it is the backstop
//! for pushes lost while the hub was down.

use std::future::Future;
use std::time::Duration;

use lab_client::{ApiError, LabClient};
use lab_core::entities::Notification;
use lab_core::paging::{FIRST_PAGE, ListRequest};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::feed::FeedEvent;

/// How many of the newest notifications one poll fetches.
pub const POLL_PAGE_SIZE: u32 = 50;

/// Where polled notifications come from.
pub trait NotificationSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Notification>, ApiError>> + Send;
}

/// The backend's per-user notification list.
#[derive(Debug, Clone)]
pub struct UserNotifications {
    client: LabClient,
    user_id: String,
}

impl UserNotifications {
    #[must_use]
    pub fn new(client: LabClient, user_id: impl Into<String>) -> Self {
        Self {
            client,
            user_id: user_id.into(),
        }
    }
}

impl NotificationSource for UserNotifications {
    async fn fetch(&self) -> Result<Vec<Notification>, ApiError> {
        let request = ListRequest::page(FIRST_PAGE, POLL_PAGE_SIZE);
        self.client
            .list_notifications(&self.user_id, &request)
            .await
            .map(|page| page.data)
    }
}

/// Polls a [`NotificationSource`] every `every`, first poll immediately.
#[derive(Debug)]
pub struct Poller<S> {
    source: S,
    every: Duration,
}

impl<S: NotificationSource> Poller<S> {
    #[must_use]
    pub fn new(source: S, every: Duration) -> Self {
        Self {
            source,
            every: every.max(Duration::from_secs(1)),
        }
    }

    /// Poll until the receiving side of `tx` is dropped. A failed poll is
    /// logged and the next tick tries again.
    pub async fn run(self, tx: mpsc::Sender<FeedEvent>) {
        let mut ticks = tokio::time::interval(self.every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                () = tx.closed() => break,
                _ = ticks.tick() => {}
            }
            match self.source.fetch().await {
                Ok(notifications) => {
                    tracing::debug!(count = notifications.len(), "notifications polled");
                    if tx.send(FeedEvent::Polled(notifications)).await.is_err() {
                        break;
                    }
                }
                Err(error) => tracing::warn!(%error, "notification poll failed"),
            }
        }
        tracing::debug!("notification poller stopped");
    }
}
