//! Push connection to the notification hub.
//!
//! Connect sequence:
//! 1. `POST {hub}/negotiate?negotiateVersion=1` picks the connection token
//!    and confirms the Server-Sent Events transport is offered.
//! 2. `GET {hub}?id=..` with `Accept: text/event-stream` opens the
//!    server-to-client stream.
//! 3. `POST {hub}?id=..` sends the handshake; the first record on the
//!    stream is the server's answer.
//!
//! After that the client posts a ping every [`KEEP_ALIVE`] and treats
//! [`SERVER_TIMEOUT`] of silence as a dead connection. A dropped connection
//! is retried after each configured delay in turn; once the delays run out
//! the hub gives up and the poller carries on alone.

use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, StreamExt};
use lab_config::LabConfig;
use lab_core::entities::Notification;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{Instant, Sleep};

use crate::error::NotifyError;
use crate::feed::{ConnectionState, FeedEvent};
use crate::protocol::{
    self, HANDSHAKE_REQUEST, HubMessage, PING, RECEIVE_NOTIFICATION, RecordSplitter, SseDecoder,
};

/// Interval between client pings.
pub const KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Silence after which the connection is considered lost.
pub const SERVER_TIMEOUT: Duration = Duration::from_secs(30);

const SSE_TRANSPORT: &str = "ServerSentEvents";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Negotiation {
    #[serde(default)]
    connection_id: Option<String>,
    #[serde(default)]
    connection_token: Option<String>,
    #[serde(default)]
    available_transports: Vec<TransportOffer>,
    /// Redirect to another hub, e.g. a hosted relay.
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransportOffer {
    transport: String,
}

/// A negotiated connection: hub url, connection token, bearer token.
#[derive(Debug)]
struct Endpoint {
    url: String,
    id: String,
    token: Option<String>,
}

impl Endpoint {
    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.query(&[("id", self.id.as_str())]);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Where an established session ended.
#[derive(Debug)]
enum SessionEnd {
    /// The feed consumer is gone; stop for good.
    ConsumerGone,
    /// The server closed the connection.
    Closed { allow_reconnect: bool },
}

/// Hub client that forwards pushed notifications into a feed channel.
#[derive(Debug, Clone)]
pub struct HubConnection {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
    reconnect_delays: Vec<Duration>,
}

impl HubConnection {
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        token: Option<String>,
        reconnect_delays: Vec<Duration>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            reconnect_delays,
        }
    }

    #[must_use]
    pub fn from_config(config: &LabConfig, token: Option<String>) -> Self {
        let delays = config
            .hub
            .reconnect_delays_secs
            .iter()
            .map(|&secs| Duration::from_secs(secs))
            .collect();
        Self::new(config.hub_url(), token, delays)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Keep a connection up until the delays run out, the server refuses a
    /// reconnect, or the receiver of `tx` is dropped.
    pub async fn run(self, tx: mpsc::Sender<FeedEvent>) {
        let mut attempt = 0;
        loop {
            if !report(&tx, ConnectionState::Connecting).await {
                return;
            }
            let mut connected = false;
            let outcome = self.session(&tx, &mut connected).await;
            if !report(&tx, ConnectionState::Disconnected).await {
                return;
            }
            if connected {
                attempt = 0;
            }
            match outcome {
                Ok(SessionEnd::ConsumerGone) => return,
                Ok(SessionEnd::Closed {
                    allow_reconnect: false,
                }) => {
                    tracing::info!(url = %self.url, "hub closed the connection; not reconnecting");
                    return;
                }
                Ok(SessionEnd::Closed { .. }) => {
                    tracing::info!(url = %self.url, "hub closed the connection");
                }
                Err(error) => tracing::warn!(url = %self.url, %error, "hub connection lost"),
            }

            let Some(&delay) = self.reconnect_delays.get(attempt) else {
                tracing::warn!(url = %self.url, "giving up on the hub; polling continues");
                return;
            };
            attempt += 1;
            tracing::debug!(attempt, ?delay, "reconnecting to hub");
            tokio::select! {
                () = tx.closed() => return,
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    async fn negotiate(&self) -> Result<Endpoint, NotifyError> {
        let mut url = self.url.clone();
        let mut token = self.token.clone();
        // One redirect hop at most.
        for _ in 0..2 {
            let mut request = self
                .http
                .post(format!("{url}/negotiate"))
                .query(&[("negotiateVersion", "1")]);
            if let Some(token) = &token {
                request = request.bearer_auth(token);
            }
            let resp = request.send().await?.error_for_status()?;
            let negotiation: Negotiation = resp.json().await?;

            if let Some(error) = negotiation.error {
                return Err(NotifyError::Negotiate(error));
            }
            if let Some(redirect) = negotiation.url {
                url = redirect.trim_end_matches('/').to_string();
                token = negotiation.access_token.or(token);
                continue;
            }
            if !negotiation
                .available_transports
                .iter()
                .any(|t| t.transport == SSE_TRANSPORT)
            {
                return Err(NotifyError::Negotiate(
                    "server does not offer Server-Sent Events".into(),
                ));
            }
            let id = negotiation
                .connection_token
                .or(negotiation.connection_id)
                .ok_or_else(|| NotifyError::Negotiate("no connection id".into()))?;
            return Ok(Endpoint { url, id, token });
        }
        Err(NotifyError::Negotiate("too many redirects".into()))
    }

    async fn send(&self, endpoint: &Endpoint, record: &str) -> Result<(), NotifyError> {
        endpoint
            .with_auth(self.http.post(&endpoint.url))
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=UTF-8")
            .body(record.to_string())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn session(
        &self,
        tx: &mpsc::Sender<FeedEvent>,
        connected: &mut bool,
    ) -> Result<SessionEnd, NotifyError> {
        let endpoint = self.negotiate().await?;

        let stream = endpoint
            .with_auth(self.http.get(&endpoint.url))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?
            .bytes_stream();
        let mut stream = std::pin::pin!(stream);
        self.send(&endpoint, HANDSHAKE_REQUEST).await?;

        let mut sse = SseDecoder::default();
        let mut records = RecordSplitter::default();
        let mut handshake_done = false;
        let mut liveness = Liveness::new();

        loop {
            let chunk = match liveness.wait(&mut stream, tx, handshake_done).await? {
                Wake::ConsumerGone => return Ok(SessionEnd::ConsumerGone),
                Wake::Ping => {
                    if let Err(error) = self.send(&endpoint, PING).await {
                        tracing::debug!(%error, "hub ping failed");
                    }
                    continue;
                }
                Wake::Chunk(chunk) => chunk?,
            };

            for event in sse.feed(&chunk) {
                for record in records.push(&event) {
                    if !handshake_done {
                        protocol::check_handshake(&record)?;
                        handshake_done = true;
                        *connected = true;
                        tracing::info!(url = %endpoint.url, "hub connected");
                        if !report(tx, ConnectionState::Connected).await {
                            return Ok(SessionEnd::ConsumerGone);
                        }
                        continue;
                    }
                    match protocol::decode(&record)? {
                        HubMessage::Invocation { target, arguments } => {
                            if !deliver(tx, &target, arguments).await {
                                return Ok(SessionEnd::ConsumerGone);
                            }
                        }
                        HubMessage::Ping | HubMessage::Other(_) => {}
                        HubMessage::Close {
                            error: Some(error),
                            allow_reconnect: false,
                        } => return Err(NotifyError::Closed(Some(error))),
                        HubMessage::Close {
                            allow_reconnect, ..
                        } => return Ok(SessionEnd::Closed { allow_reconnect }),
                    }
                }
            }
        }
    }
}

/// Why [`Liveness::wait`] returned.
#[derive(Debug)]
enum Wake<T> {
    Chunk(T),
    Ping,
    ConsumerGone,
}

/// Client ping schedule plus the deadline for hearing from the server.
/// Only server chunks push the deadline out; our own pings do not.
struct Liveness {
    keep_alive: tokio::time::Interval,
    deadline: Pin<Box<Sleep>>,
}

impl Liveness {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            keep_alive: tokio::time::interval_at(now + KEEP_ALIVE, KEEP_ALIVE),
            deadline: Box::pin(tokio::time::sleep_until(now + SERVER_TIMEOUT)),
        }
    }

    /// Wait for the next server chunk. Ping ticks are reported only when
    /// `pinging`, i.e. after the handshake.
    async fn wait<S, T>(
        &mut self,
        stream: &mut S,
        tx: &mpsc::Sender<FeedEvent>,
        pinging: bool,
    ) -> Result<Wake<T>, NotifyError>
    where
        S: Stream<Item = T> + Unpin,
    {
        let next = tokio::select! {
            biased;
            () = tx.closed() => return Ok(Wake::ConsumerGone),
            () = &mut self.deadline => return Err(NotifyError::Silent(SERVER_TIMEOUT.as_secs())),
            _ = self.keep_alive.tick(), if pinging => return Ok(Wake::Ping),
            next = stream.next() => next,
        };
        let chunk = next.ok_or_else(|| NotifyError::Closed(None))?;
        self.deadline.as_mut().reset(Instant::now() + SERVER_TIMEOUT);
        Ok(Wake::Chunk(chunk))
    }
}

/// Forward a `ReceiveNotification` invocation. Returns `false` once the
/// consumer is gone.
async fn deliver(
    tx: &mpsc::Sender<FeedEvent>,
    target: &str,
    arguments: Vec<serde_json::Value>,
) -> bool {
    if !target.eq_ignore_ascii_case(RECEIVE_NOTIFICATION) {
        tracing::debug!(target, "ignoring hub invocation");
        return true;
    }
    let Some(argument) = arguments.into_iter().next() else {
        tracing::warn!("notification push without payload");
        return true;
    };
    match serde_json::from_value::<Notification>(argument) {
        Ok(notification) => {
            tracing::debug!(id = %notification.id, "notification pushed");
            tx.send(FeedEvent::Pushed(notification)).await.is_ok()
        }
        Err(error) => {
            tracing::warn!(%error, "unreadable notification push");
            true
        }
    }
}

async fn report(tx: &mpsc::Sender<FeedEvent>, state: ConnectionState) -> bool {
    tx.send(FeedEvent::Connection(state)).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn negotiation_prefers_connection_token() {
        let json = r#"{
            "negotiateVersion": 1,
            "connectionId": "abc",
            "connectionToken": "tok",
            "availableTransports": [
                {"transport": "WebSockets", "transferFormats": ["Text", "Binary"]},
                {"transport": "ServerSentEvents", "transferFormats": ["Text"]}
            ]
        }"#;
        let negotiation: Negotiation = serde_json::from_str(json).unwrap();
        assert_eq!(negotiation.connection_token.as_deref(), Some("tok"));
        assert!(
            negotiation
                .available_transports
                .iter()
                .any(|t| t.transport == SSE_TRANSPORT)
        );
    }

    #[test]
    fn url_is_trimmed_and_empty_token_dropped() {
        let hub = HubConnection::new(
            "http://lab.local/hubs/notifications/",
            Some(String::new()),
            vec![],
        );
        assert_eq!(hub.url(), "http://lab.local/hubs/notifications");
        assert!(hub.token.is_none());
    }

    #[tokio::test]
    async fn delivers_notification_invocations_only() {
        let (tx, mut rx) = mpsc::channel(4);
        let payload = serde_json::json!({
            "id": "n1", "userId": "u1", "title": "Task assigned", "content": "",
            "isRead": false, "createdAt": "2024-03-02T08:30:00"
        });
        assert!(deliver(&tx, "SomethingElse", vec![payload.clone()]).await);
        assert!(deliver(&tx, "receivenotification", vec![serde_json::json!({"bad": 1})]).await);
        assert!(deliver(&tx, RECEIVE_NOTIFICATION, vec![payload]).await);
        drop(tx);

        let Some(FeedEvent::Pushed(notification)) = rx.recv().await else {
            panic!("expected one pushed notification");
        };
        assert_eq!(notification.id, "n1");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn silent_server_times_out_even_while_client_pings() {
        let (tx, _rx) = mpsc::channel(1);
        let mut liveness = Liveness::new();
        let mut silent = futures::stream::pending::<u8>();
        let started = Instant::now();

        let mut pings = 0;
        let error = loop {
            match liveness.wait(&mut silent, &tx, true).await {
                Ok(Wake::Ping) => pings += 1,
                Ok(other) => panic!("unexpected wake: {other:?}"),
                Err(error) => break error,
            }
        };
        assert!(matches!(error, NotifyError::Silent(30)), "{error}");
        assert_eq!(started.elapsed(), SERVER_TIMEOUT);
        assert_eq!(pings, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn server_chunks_push_the_deadline_out() {
        let (tx, _rx) = mpsc::channel(1);
        let mut liveness = Liveness::new();
        let mut slow = Box::pin(futures::stream::unfold(0u8, |n| async move {
            tokio::time::sleep(Duration::from_secs(20)).await;
            Some((n, n + 1))
        }));
        let started = Instant::now();

        let mut chunks = Vec::new();
        while chunks.len() < 3 {
            match liveness.wait(&mut slow, &tx, false).await {
                Ok(Wake::Chunk(n)) => chunks.push(n),
                other => panic!("unexpected wake: {other:?}"),
            }
        }
        assert_eq!(chunks, [0, 1, 2]);
        assert_eq!(started.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn unreachable_hub_retries_each_delay_then_gives_up() {
        let hub = HubConnection::new(
            "http://127.0.0.1:9/hubs/notifications",
            None,
            vec![Duration::ZERO, Duration::from_millis(20)],
        );
        let (tx, mut rx) = mpsc::channel(16);
        let task = tokio::spawn(hub.run(tx));

        let mut states = Vec::new();
        while let Some(event) = rx.recv().await {
            if let FeedEvent::Connection(state) = event {
                states.push(state);
            }
        }
        task.await.unwrap();
        assert_eq!(
            states,
            [
                ConnectionState::Connecting,
                ConnectionState::Disconnected,
                ConnectionState::Connecting,
                ConnectionState::Disconnected,
                ConnectionState::Connecting,
                ConnectionState::Disconnected,
            ]
        );
    }
}
