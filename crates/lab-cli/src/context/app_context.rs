use anyhow::Context;
use lab_auth::{AuthError, LabClaims};
use lab_client::LabClient;
use lab_config::LabConfig;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: LabConfig,
    pub client: LabClient,
    pub claims: Option<LabClaims>,
}

impl AppContext {
    /// Resolve the bearer token and build the backend client.
    ///
    /// A missing or undecodable token is not fatal here: the backend
    /// decides what an anonymous caller may see.
    pub fn init(config: LabConfig) -> anyhow::Result<Self> {
        let (token, claims) = resolve_auth(&config);
        let client = LabClient::new(&config.api, token)
            .context("failed to build the lab backend client")?;
        Ok(Self {
            config,
            client,
            claims,
        })
    }

    /// Id of the signed-in user, from the token claims.
    pub fn user_id(&self) -> anyhow::Result<&str> {
        self.claims
            .as_ref()
            .map(|claims| claims.user_id.as_str())
            .ok_or_else(|| anyhow::Error::from(AuthError::NotAuthenticated))
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.config.general.page_size
    }
}

fn resolve_auth(config: &LabConfig) -> (Option<String>, Option<LabClaims>) {
    match lab_auth::current_claims(&config.auth.token) {
        Ok(claims) => (Some(claims.raw_jwt.clone()), Some(claims)),
        Err(AuthError::NotAuthenticated) => {
            tracing::debug!("no bearer token found via keyring/env/file/config");
            (None, None)
        }
        Err(error) => {
            // Still send it; the backend has the final word.
            tracing::warn!(%error, "stored token could not be decoded");
            (lab_auth::resolve_token(&config.auth.token), None)
        }
    }
}
