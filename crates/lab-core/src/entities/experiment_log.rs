use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Selectable;
use crate::enums::ExperimentLogStatus;

/// One planned or executed breeding run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentLog {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub method_name: Option<String>,
    pub tissue_culture_batch_id: i64,
    #[serde(default)]
    pub tissue_culture_batch_name: Option<String>,
    pub status: ExperimentLogStatus,
    #[serde(default)]
    pub number_of_sample: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
}

impl Selectable for ExperimentLog {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// One phase of an experiment log's method.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub step: u32,
}

impl Selectable for Stage {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        format!("{}. {}", self.step, self.name)
    }
}

/// A physical sample produced within an experiment log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: String,
    pub name: String,
}

impl Selectable for Sample {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
