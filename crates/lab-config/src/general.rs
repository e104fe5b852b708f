//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for list views.
const fn default_page_size() -> u32 {
    10
}

/// Console color theme. The only UI preference that is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default page size for list commands.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub theme: Theme,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            theme: Theme::default(),
        }
    }
}
