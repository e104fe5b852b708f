use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Selectable;

/// A measurable reference element. The backend keeps the measurement unit
/// in `description`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Selectable for Element {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
