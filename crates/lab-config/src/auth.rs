//! Bearer token fallback configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Last-resort bearer token, used when neither the keyring nor the
    /// credentials file holds one.
    #[serde(default)]
    pub token: String,
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }
}
