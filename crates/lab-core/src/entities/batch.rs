use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Selectable;

/// A tissue-culture batch: one cultivation lot an experiment log runs on.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lab_name: Option<String>,
}

impl Selectable for Batch {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
