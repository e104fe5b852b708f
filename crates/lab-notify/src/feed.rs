//! In-memory notification feed.
//!
//! Two producers write into the feed: pushes from the hub and periodic
//! polls. Both may deliver the same notification, so everything is keyed by
//! id. Marking read is optimistic: the local flag flips at once and the
//! backend call that follows is fire-and-forget.

use std::collections::HashSet;
use std::fmt;

use lab_core::entities::Notification;

/// State of the push connection, shown next to the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something a producer observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Pushed(Notification),
    Polled(Vec<Notification>),
    Connection(ConnectionState),
}

/// Result of [`NotificationFeed::mark_read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkRead {
    /// Flag flipped locally; tell the backend.
    Marked,
    /// Already read; nothing to do.
    AlreadyRead,
    /// No such notification in the feed.
    Unknown,
}

/// Newest-first list of the user's notifications, unique by id.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    read_locally: HashSet<String>,
    connection: ConnectionState,
}

impl NotificationFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    #[must_use]
    pub const fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn set_connection(&mut self, state: ConnectionState) -> bool {
        let changed = self.connection != state;
        self.connection = state;
        changed
    }

    /// Apply one producer event. Returns the notifications that were not
    /// in the feed before.
    pub fn apply(&mut self, event: FeedEvent) -> Vec<Notification> {
        match event {
            FeedEvent::Pushed(notification) => {
                if self.upsert(notification.clone()) {
                    vec![notification]
                } else {
                    Vec::new()
                }
            }
            FeedEvent::Polled(notifications) => self.apply_polled(notifications),
            FeedEvent::Connection(state) => {
                self.set_connection(state);
                Vec::new()
            }
        }
    }

    /// Merge a pushed notification. Returns `true` when it is new.
    pub fn apply_pushed(&mut self, notification: Notification) -> bool {
        self.upsert(notification)
    }

    /// Merge a polled list. Returns the notifications that were new.
    pub fn apply_polled(&mut self, notifications: Vec<Notification>) -> Vec<Notification> {
        notifications
            .into_iter()
            .filter(|n| self.upsert(n.clone()))
            .collect()
    }

    /// Mark `id` read locally.
    ///
    /// Idempotent: a second call finds the flag already set and reports
    /// [`MarkRead::AlreadyRead`], so the caller sends at most one backend
    /// update per notification.
    pub fn mark_read(&mut self, id: &str) -> MarkRead {
        let Some(item) = self.items.iter_mut().find(|n| n.id == id) else {
            return MarkRead::Unknown;
        };
        if item.is_read {
            return MarkRead::AlreadyRead;
        }
        item.is_read = true;
        self.read_locally.insert(id.to_string());
        MarkRead::Marked
    }

    /// Insert or refresh by id. A notification read here stays read even
    /// if a stale copy still says otherwise, until the backend reports it
    /// read itself.
    fn upsert(&mut self, mut notification: Notification) -> bool {
        if notification.is_read {
            self.read_locally.remove(&notification.id);
        } else if self.read_locally.contains(&notification.id) {
            notification.is_read = true;
        }
        if let Some(existing) = self.items.iter_mut().find(|n| n.id == notification.id) {
            let keep_read = existing.is_read;
            *existing = notification;
            existing.is_read |= keep_read;
            return false;
        }
        let at = self
            .items
            .iter()
            .position(|n| n.created_at < notification.created_at)
            .unwrap_or(self.items.len());
        self.items.insert(at, notification);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn notification(id: &str, day: u32, is_read: bool) -> Notification {
        Notification {
            id: id.into(),
            user_id: "u1".into(),
            title: format!("title {id}"),
            content: String::new(),
            is_read,
            created_at: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    fn ids(feed: &NotificationFeed) -> Vec<&str> {
        feed.items().iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn push_and_poll_of_same_id_appear_once() {
        let mut feed = NotificationFeed::new();
        assert!(feed.apply_pushed(notification("n2", 2, false)));
        let new = feed.apply_polled(vec![
            notification("n1", 1, false),
            notification("n2", 2, false),
            notification("n3", 3, false),
        ]);
        assert_eq!(new.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(), ["n1", "n3"]);
        assert_eq!(ids(&feed), ["n3", "n2", "n1"]);
        assert!(!feed.apply_pushed(notification("n3", 3, false)));
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn mark_read_is_idempotent() {
        let mut feed = NotificationFeed::new();
        feed.apply_pushed(notification("n1", 1, false));
        assert_eq!(feed.unread_count(), 1);

        assert_eq!(feed.mark_read("n1"), MarkRead::Marked);
        assert_eq!(feed.mark_read("n1"), MarkRead::AlreadyRead);
        assert!(feed.get("n1").unwrap().is_read);
        assert_eq!(feed.unread_count(), 0);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.mark_read("missing"), MarkRead::Unknown);
    }

    #[test]
    fn locally_read_survives_stale_poll() {
        let mut feed = NotificationFeed::new();
        feed.apply_pushed(notification("n1", 1, false));
        feed.mark_read("n1");
        feed.apply_polled(vec![notification("n1", 1, false)]);
        assert!(feed.get("n1").unwrap().is_read);
    }

    #[test]
    fn local_read_is_forgotten_once_backend_confirms() {
        let mut feed = NotificationFeed::new();
        feed.apply_pushed(notification("n1", 1, false));
        feed.mark_read("n1");
        assert!(feed.read_locally.contains("n1"));

        feed.apply_polled(vec![notification("n1", 1, true)]);
        assert!(feed.read_locally.is_empty());
        assert!(feed.get("n1").unwrap().is_read);

        feed.apply_polled(vec![notification("n1", 1, false)]);
        assert!(feed.get("n1").unwrap().is_read);
    }

    #[test]
    fn server_read_flag_is_taken() {
        let mut feed = NotificationFeed::new();
        feed.apply_pushed(notification("n1", 1, false));
        feed.apply_polled(vec![notification("n1", 1, true)]);
        assert_eq!(feed.unread_count(), 0);
        assert_eq!(feed.mark_read("n1"), MarkRead::AlreadyRead);
    }

    #[test]
    fn connection_events_only_touch_state() {
        let mut feed = NotificationFeed::new();
        assert_eq!(feed.connection(), ConnectionState::Disconnected);
        assert!(feed.apply(FeedEvent::Connection(ConnectionState::Connected)).is_empty());
        assert_eq!(feed.connection().to_string(), "connected");
        assert!(feed.is_empty());
    }
}
