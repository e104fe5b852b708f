//! Measurable reference elements used by task attributes.

use lab_core::entities::Element;
use lab_core::paging::{ListRequest, Page};

use crate::{ApiError, LabClient};

pub const PATH: &str = "/api/elements";

impl LabClient {
    /// List reference elements.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_elements(&self, request: &ListRequest) -> Result<Page<Element>, ApiError> {
        self.list(PATH, request).await
    }
}
