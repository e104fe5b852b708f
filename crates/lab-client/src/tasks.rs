//! Technician tasks.

use chrono::NaiveDate;
use lab_core::entities::Task;
use lab_core::paging::{ListRequest, Page};
use serde::Serialize;

use crate::{ApiError, Created, LabClient, segment};

pub const PATH: &str = "/api/tasks";

/// One measured attribute on a task or report payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttribute {
    pub element_id: i64,
    pub value: f64,
    pub description: String,
}

/// Create payload for a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub experiment_log_id: String,
    pub stage_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_daily: bool,
    pub attributes: Vec<NewAttribute>,
    pub technician_ids: Vec<String>,
}

impl LabClient {
    /// List tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_tasks(&self, request: &ListRequest) -> Result<Page<Task>, ApiError> {
        self.list(PATH, request).await
    }

    /// Fetch one task by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn get_task(&self, id: &str) -> Result<Task, ApiError> {
        self.get(&format!("{PATH}/{}", segment(id))).await
    }

    /// Create a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the payload.
    pub async fn create_task(&self, payload: &NewTask) -> Result<Created, ApiError> {
        self.create(PATH, payload).await
    }
}
