//! Seedlings.

use chrono::NaiveDate;
use lab_core::entities::Seedling;
use lab_core::paging::{ListRequest, Page};
use serde::Serialize;

use crate::{ApiError, Created, LabClient, segment};

pub const PATH: &str = "/api/seedlings";

/// Reference to the attribute a characteristic describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedlingAttributeRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

/// One characteristic on a seedling payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCharacteristic {
    pub seedling_attribute: SeedlingAttributeRef,
    pub value: Option<f64>,
    pub description: String,
}

/// Create payload for a seedling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeedling {
    pub local_name: String,
    pub scientific_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_id: Option<String>,
    pub description: String,
    pub date_of_birth: NaiveDate,
    pub characteristics: Vec<NewCharacteristic>,
}

impl LabClient {
    /// List seedlings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_seedlings(&self, request: &ListRequest) -> Result<Page<Seedling>, ApiError> {
        self.list(PATH, request).await
    }

    /// Fetch one seedling by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn get_seedling(&self, id: &str) -> Result<Seedling, ApiError> {
        self.get(&format!("{PATH}/{}", segment(id))).await
    }

    /// Create a seedling.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the payload.
    pub async fn create_seedling(&self, payload: &NewSeedling) -> Result<Created, ApiError> {
        self.create(PATH, payload).await
    }
}
