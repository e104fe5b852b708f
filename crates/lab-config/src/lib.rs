//! # lab-config
//!
//! Layered configuration loading for the orchid lab console using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ORCHID_*` prefix, `__` as separator)
//! 2. Project-level `.orchid/config.toml`
//! 3. User-level `~/.config/orchid/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ORCHID_API__BASE_URL` -> `api.base_url`,
//! `ORCHID_NOTIFICATIONS__POLL_INTERVAL_SECS` -> `notifications.poll_interval_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lab_config::LabConfig;
//!
//! let config = LabConfig::load_with_dotenv(None).expect("config");
//! println!("backend: {}", config.api.base_url);
//! ```

mod api;
mod auth;
mod error;
mod general;
mod hub;
mod notifications;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::{GeneralConfig, Theme};
pub use hub::{DEFAULT_HUB_PATH, HubConfig};
pub use notifications::NotificationsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding project-local configuration.
pub const PROJECT_DIR: &str = ".orchid";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LabConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub hub: HubConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl LabConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// `project_root` is the directory whose `.orchid/config.toml` is merged;
    /// `None` means the current directory.
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the project root (or the
    /// current directory).
    pub fn load_with_dotenv(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = project_root.map_or_else(|| PathBuf::from(".env"), |root| root.join(".env"));
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        } else {
            let _ = dotenvy::dotenv();
        }
        Self::load(project_root)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or stack extra providers.
    pub fn figment(project_root: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = project_root
            .map_or_else(|| PathBuf::from(PROJECT_DIR), |root| root.join(PROJECT_DIR))
            .join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ORCHID_").split("__"))
    }

    /// Hub URL resolved against the API base URL.
    pub fn hub_url(&self) -> String {
        self.hub.resolved_url(self.api.trimmed_base_url())
    }

    /// Reject values that would make the console misbehave later on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.api.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("expected an http(s) URL, got '{base}'"),
            });
        }
        if self.general.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.notifications.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notifications.poll_interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("orchid").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LabConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.auth.is_configured());
        assert_eq!(config.hub_url(), "http://localhost:5000/hubs/notifications");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = LabConfig::default();
        config.api.base_url = "localhost:5000".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn rejects_zero_page_size() {
        let mut config = LabConfig::default();
        config.general.page_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "general.page_size"
        ));
    }
}
