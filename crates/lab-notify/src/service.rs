//! Runs both producers and applies their events to one feed.

use lab_client::LabClient;
use lab_core::entities::Notification;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::feed::{ConnectionState, FeedEvent, MarkRead, NotificationFeed};
use crate::hub::HubConnection;
use crate::poll::{NotificationSource, Poller};

const CHANNEL_CAPACITY: usize = 64;

/// What one applied event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedChange {
    /// Notifications the feed had not seen before, newest first.
    Arrived(Vec<Notification>),
    Connection(ConnectionState),
}

/// Owns the feed and the tasks that fill it.
///
/// Producers only send events; this value is the single consumer that
/// mutates the feed. Dropping it stops both producers.
#[derive(Debug)]
pub struct FeedService {
    feed: NotificationFeed,
    rx: mpsc::Receiver<FeedEvent>,
    client: LabClient,
    producers: Vec<JoinHandle<()>>,
}

impl FeedService {
    /// Start the poller and, when given, the hub connection.
    pub fn start<S: NotificationSource>(
        client: LabClient,
        poller: Poller<S>,
        hub: Option<HubConnection>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let mut producers = vec![tokio::spawn(poller.run(tx.clone()))];
        if let Some(hub) = hub {
            producers.push(tokio::spawn(hub.run(tx)));
        }
        Self {
            feed: NotificationFeed::new(),
            rx,
            client,
            producers,
        }
    }

    #[must_use]
    pub const fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    /// Wait for the next event that changes something. `None` once every
    /// producer has stopped.
    pub async fn next_change(&mut self) -> Option<FeedChange> {
        loop {
            let event = self.rx.recv().await?;
            if let FeedEvent::Connection(state) = event {
                if self.feed.set_connection(state) {
                    return Some(FeedChange::Connection(state));
                }
                continue;
            }
            let mut arrived = self.feed.apply(event);
            if !arrived.is_empty() {
                arrived.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                return Some(FeedChange::Arrived(arrived));
            }
        }
    }

    /// Mark a notification read: the feed flips at once, the backend is
    /// told in the background, and a failed call is only logged.
    pub fn mark_read(&mut self, id: &str) -> MarkRead {
        let result = self.feed.mark_read(id);
        if result == MarkRead::Marked {
            spawn_mark_read(self.client.clone(), id.to_string());
        }
        result
    }
}

impl Drop for FeedService {
    fn drop(&mut self) {
        for producer in &self.producers {
            producer.abort();
        }
    }
}

/// Fire-and-forget `mark-as-read` call. The local flag is not rolled back
/// on failure.
pub fn spawn_mark_read(client: LabClient, id: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(error) = client.mark_notification_read(&id).await {
            tracing::warn!(%id, %error, "failed to mark notification read");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lab_client::ApiError;
    use lab_config::ApiConfig;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct Fixed(Vec<Notification>);

    impl NotificationSource for Fixed {
        async fn fetch(&self) -> Result<Vec<Notification>, ApiError> {
            Ok(self.0.clone())
        }
    }

    fn notification(id: &str, day: u32) -> Notification {
        Notification {
            id: id.into(),
            user_id: "u1".into(),
            title: id.into(),
            content: String::new(),
            is_read: false,
            created_at: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    fn offline_client() -> LabClient {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..ApiConfig::default()
        };
        LabClient::new(&config, None).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_polls_only_report_new_items() {
        let poller = Poller::new(
            Fixed(vec![notification("n1", 1), notification("n2", 2)]),
            Duration::from_secs(30),
        );
        let mut service = FeedService::start(offline_client(), poller, None);

        let Some(FeedChange::Arrived(first)) = service.next_change().await else {
            panic!("first poll should deliver");
        };
        assert_eq!(first.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), ["n2", "n1"]);
        assert_eq!(service.feed().unread_count(), 2);

        // The next poll repeats the same list: nothing new, so the service
        // keeps waiting past it.
        let waited = tokio::time::timeout(Duration::from_secs(45), service.next_change()).await;
        assert!(waited.is_err());
        assert_eq!(service.feed().len(), 2);
    }

    #[tokio::test]
    async fn mark_read_is_optimistic_and_idempotent() {
        let poller = Poller::new(Fixed(vec![notification("n1", 1)]), Duration::from_secs(30));
        let mut service = FeedService::start(offline_client(), poller, None);
        service.next_change().await;

        // The backend is unreachable; the local flag still flips.
        assert_eq!(service.mark_read("n1"), MarkRead::Marked);
        assert!(service.feed().get("n1").unwrap().is_read);
        assert_eq!(service.mark_read("n1"), MarkRead::AlreadyRead);
        assert_eq!(service.feed().unread_count(), 0);
    }
}
