//! Technician reports.

use lab_core::entities::Report;
use lab_core::paging::{ListRequest, Page};
use serde::Serialize;

use crate::tasks::NewAttribute;
use crate::{ApiError, Created, LabClient, segment};

pub const PATH: &str = "/api/reports";

/// Disease analysis result attached to a report, one per analysed image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub file_name: String,
    pub stage: String,
    pub disease: String,
    pub probability: Option<f64>,
}

/// Create payload for a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub name: String,
    pub content: String,
    pub task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    pub attributes: Vec<NewAttribute>,
    pub analyses: Vec<ImageAnalysis>,
}

impl LabClient {
    /// List reports.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_reports(&self, request: &ListRequest) -> Result<Page<Report>, ApiError> {
        self.list(PATH, request).await
    }

    /// Fetch one report by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn get_report(&self, id: &str) -> Result<Report, ApiError> {
        self.get(&format!("{PATH}/{}", segment(id))).await
    }

    /// File a report.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the payload.
    pub async fn create_report(&self, payload: &NewReport) -> Result<Created, ApiError> {
        self.create(PATH, payload).await
    }
}
