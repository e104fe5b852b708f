//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the lab backend.
///
/// The variants mirror how the console reacts: a `Rejected` call shows the
/// server's own message, everything else shows a generic failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (connection refused, TLS, DNS, ...).
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The call ran past its fixed timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend refused the request (4xx). `message` is the server's
    /// text, verbatim.
    #[error("{message}")]
    Rejected {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message from the response body.
        message: String,
    },

    /// The backend failed (5xx or an unexpected status).
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body or status reason.
        message: String,
    },

    /// Failed to parse a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request could not be built (bad URL, bad multipart part).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Http(error)
        }
    }
}

impl ApiError {
    /// Whether the backend rejected the request with a message meant for
    /// the user.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The server's message for a rejection.
    #[must_use]
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}
