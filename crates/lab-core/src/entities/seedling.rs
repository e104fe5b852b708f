use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Selectable;

/// A seedling produced by the pipeline. Seedlings are also the parents
/// new experiment logs and seedlings reference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seedling {
    pub id: String,
    pub local_name: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDateTime>,
}

impl Selectable for Seedling {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.local_name.clone()
    }
}
