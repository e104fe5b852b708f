//! # lab-notify
//!
//! Notification feed of the signed-in user.
//!
//! Two independent producers feed one channel:
//! - [`HubConnection`] receives pushes from the backend's notification hub
//!   and reports its connection state
//! - [`Poller`] re-fetches the user's notification list on a fixed interval
//!
//! [`FeedService`] is the single consumer. It applies every event to a
//! [`NotificationFeed`], which keeps one entry per notification id no matter
//! how many times it was delivered.

pub mod feed;
pub mod hub;
pub mod poll;
pub mod protocol;
pub mod service;

mod error;

pub use error::NotifyError;
pub use feed::{ConnectionState, FeedEvent, MarkRead, NotificationFeed};
pub use hub::HubConnection;
pub use poll::{NotificationSource, Poller, UserNotifications};
pub use service::{FeedChange, FeedService, spawn_mark_read};
