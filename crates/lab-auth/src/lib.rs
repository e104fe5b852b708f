//! # lab-auth
//!
//! Bearer token plumbing for the orchid lab console.
//!
//! Issuing and verifying tokens is the backend's job. This crate only keeps
//! the token the user signed in with (OS keychain, env var, or a 0600 file)
//! and reads the claims the console needs (user id for the notification
//! feed, expiry for an early warning) without verifying the signature.

pub mod claims;
pub mod error;
pub mod token_store;

pub use claims::LabClaims;
pub use error::AuthError;

/// Seconds before expiry at which the console starts warning.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Resolve the stored token, falling back to `config_token` (the
/// `auth.token` config value) when no tier holds one.
#[must_use]
pub fn resolve_token(config_token: &str) -> Option<String> {
    token_store::load().or_else(|| {
        let token = config_token.trim();
        (!token.is_empty()).then(|| token.to_string())
    })
}

/// Resolve the token and decode its claims.
///
/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] if no token is available, or a
/// decode error if the token is not a well-formed JWT.
pub fn current_claims(config_token: &str) -> Result<LabClaims, AuthError> {
    let jwt = resolve_token(config_token).ok_or(AuthError::NotAuthenticated)?;
    let claims = claims::decode(&jwt)?;
    if claims.is_near_expiry(EXPIRY_BUFFER_SECS) {
        tracing::warn!(
            expires_at = ?claims.expires_at,
            "bearer token expires within {EXPIRY_BUFFER_SECS}s; sign in again and run `orchid auth set-token`",
        );
    }
    Ok(claims)
}
