use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Element;

/// A measured attribute of a task, or a characteristic of a seedling.
///
/// Owned by exactly one parent draft. `display_name` and `unit` are derived
/// from the referenced element and are read-only to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub reference_element_id: String,
    pub display_name: String,
    pub unit: String,
    pub numeric_value: String,
    pub description: String,
}

impl Attribute {
    /// A characteristic that is named directly instead of through an element.
    #[must_use]
    pub fn named(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            display_name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Point this attribute at `element`, copying its name and unit.
    pub fn select_element(&mut self, element: &Element) {
        self.reference_element_id = element.id.to_string();
        self.display_name.clone_from(&element.name);
        self.unit.clone_from(&element.description);
    }

    /// Edit the measured value. Derived fields stay as they are.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.numeric_value = value.into();
    }
}
