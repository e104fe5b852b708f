//! Notification hub (push channel) configuration.

use serde::{Deserialize, Serialize};

/// Hub path appended to the API base URL when no explicit URL is set.
pub const DEFAULT_HUB_PATH: &str = "/hubs/notifications";

fn default_reconnect_delays_secs() -> Vec<u64> {
    vec![0, 2, 10, 30]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HubConfig {
    /// Full hub URL. Empty means `{api.base_url}/hubs/notifications`.
    #[serde(default)]
    pub url: String,

    /// Delay before each reconnect attempt after the connection drops. Once
    /// the list is exhausted the last delay repeats.
    #[serde(default = "default_reconnect_delays_secs")]
    pub reconnect_delays_secs: Vec<u64>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            reconnect_delays_secs: default_reconnect_delays_secs(),
        }
    }
}

impl HubConfig {
    /// Resolve the hub URL against the API base URL.
    pub fn resolved_url(&self, api_base_url: &str) -> String {
        if self.url.is_empty() {
            format!("{}{DEFAULT_HUB_PATH}", api_base_url.trim_end_matches('/'))
        } else {
            self.url.clone()
        }
    }
}
