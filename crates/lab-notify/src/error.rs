use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("hub transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("hub negotiation failed: {0}")]
    Negotiate(String),

    #[error("hub handshake failed: {0}")]
    Handshake(String),

    #[error("hub protocol error: {0}")]
    Protocol(String),

    #[error("hub went silent for {0} seconds")]
    Silent(u64),

    #[error("hub closed the connection: {}", .0.as_deref().unwrap_or("no reason given"))]
    Closed(Option<String>),
}
