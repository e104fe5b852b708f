//! Backend REST API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// The one list path with a fixed timeout.
const fn default_list_timeout_secs() -> u64 {
    30
}

const fn default_analysis_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend root URL, without a trailing `/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to every request. Unset means no timeout, which is
    /// what option loaders run with.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Timeout for paginated list views.
    #[serde(default = "default_list_timeout_secs")]
    pub list_timeout_secs: u64,

    /// Timeout for the disease-analysis image upload.
    #[serde(default = "default_analysis_timeout_secs")]
    pub analysis_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            list_timeout_secs: default_list_timeout_secs(),
            analysis_timeout_secs: default_analysis_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Base URL with any trailing slash removed.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
