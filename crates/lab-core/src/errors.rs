//! Cross-cutting error types for the lab console.
//!
//! Transport errors live in `lab-client`, wizard errors in `lab-wizard`.
//! Command handlers in `lab-cli` fold everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any lab console crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// The backend sent a status code this client does not know.
    #[error("Unknown {kind} code: {code}")]
    UnknownCode { kind: &'static str, code: i32 },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
