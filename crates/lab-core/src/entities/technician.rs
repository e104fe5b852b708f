use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Selectable;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Selectable for Technician {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
