use lab_auth::token_store;
use lab_config::LabConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize, Default)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    name: Option<String>,
    role: Option<String>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub fn handle(flags: &GlobalFlags, config: &LabConfig) -> anyhow::Result<()> {
    let (token, source) = match token_store::load_with_source() {
        Some((token, source)) => (Some(token), Some(source.as_str())),
        None if config.auth.is_configured() => (Some(config.auth.token.clone()), Some("config")),
        None => (None, None),
    };

    let status = match token {
        None => AuthStatusResponse {
            note: Some(lab_auth::AuthError::NotAuthenticated.to_string()),
            ..AuthStatusResponse::default()
        },
        Some(token) => match lab_auth::claims::decode(&token) {
            Ok(claims) => AuthStatusResponse {
                authenticated: !claims.is_near_expiry(0),
                note: claims
                    .is_near_expiry(lab_auth::EXPIRY_BUFFER_SECS)
                    .then(|| "token is expired or about to expire".to_string()),
                user_id: Some(claims.user_id),
                name: claims.name,
                role: claims.role,
                expires_at: claims.expires_at.map(|at| at.to_rfc3339()),
                token_source: source,
            },
            Err(error) => AuthStatusResponse {
                token_source: source,
                note: Some(error.to_string()),
                ..AuthStatusResponse::default()
            },
        },
    };

    output(&status, flags.format)
}
