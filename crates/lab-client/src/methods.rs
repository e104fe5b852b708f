//! Breeding methods.

use lab_core::entities::Method;
use lab_core::paging::{ListRequest, Page};

use crate::{ApiError, LabClient, segment};

pub const PATH: &str = "/api/methods";

impl LabClient {
    /// List breeding methods.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_methods(&self, request: &ListRequest) -> Result<Page<Method>, ApiError> {
        self.list(PATH, request).await
    }

    /// Fetch one method by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn get_method(&self, id: &str) -> Result<Method, ApiError> {
        self.get(&format!("{PATH}/{}", segment(id))).await
    }
}
