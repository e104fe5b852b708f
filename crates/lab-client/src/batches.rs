//! Tissue-culture batches.

use lab_core::entities::Batch;
use lab_core::paging::{ListRequest, Page};

use crate::{ApiError, LabClient};

pub const PATH: &str = "/api/tissue-culture-batches";

impl LabClient {
    /// List tissue-culture batches.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_batches(&self, request: &ListRequest) -> Result<Page<Batch>, ApiError> {
        self.list(PATH, request).await
    }
}
