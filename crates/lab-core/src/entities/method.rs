use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Selectable;
use crate::enums::MethodType;

/// A breeding or cultivation method researchers plan experiment logs against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub method_type: MethodType,
}

impl Selectable for Method {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
