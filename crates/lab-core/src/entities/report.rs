use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ReportStatus;

/// A technician-filed record of observations for a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub technician_name: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Result of the backend's disease classifier for one image.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseAnalysis {
    pub stage: String,
    pub disease: Disease,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    /// Label the classifier settled on.
    pub predict: String,
    /// Probability per label.
    #[serde(default)]
    pub probability: BTreeMap<String, f64>,
}

impl Disease {
    /// Probability assigned to the predicted label, if the model reported one.
    #[must_use]
    pub fn confidence(&self) -> Option<f64> {
        self.probability.get(&self.predict).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_reads_predicted_label() {
        let disease = Disease {
            predict: "black_rot".into(),
            probability: BTreeMap::from([("black_rot".into(), 0.91), ("healthy".into(), 0.09)]),
        };
        assert_eq!(disease.confidence(), Some(0.91));
    }

    #[test]
    fn confidence_missing_when_label_absent() {
        let disease = Disease {
            predict: "healthy".into(),
            probability: BTreeMap::new(),
        };
        assert_eq!(disease.confidence(), None);
    }
}
