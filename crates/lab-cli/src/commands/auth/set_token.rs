use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct SetTokenResponse {
    stored: bool,
    user_id: String,
    name: Option<String>,
    expires_at: Option<String>,
}

/// Decode first so a malformed token is never stored.
pub fn handle(token: &str, flags: &GlobalFlags) -> anyhow::Result<()> {
    let claims = lab_auth::claims::decode(token).context("refusing to store token")?;
    if claims.is_near_expiry(lab_auth::EXPIRY_BUFFER_SECS) {
        tracing::warn!("the token is expired or about to expire");
    }
    lab_auth::token_store::store(token.trim())?;
    output(
        &SetTokenResponse {
            stored: true,
            user_id: claims.user_id,
            name: claims.name,
            expires_at: claims.expires_at.map(|at| at.to_rfc3339()),
        },
        flags.format,
    )
}
