//! Technician accounts tasks and experiment logs are assigned to.

use lab_core::entities::Technician;
use lab_core::paging::{ListRequest, Page};

use crate::{ApiError, LabClient};

pub const PATH: &str = "/api/users/technicians";

impl LabClient {
    /// List technicians.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_technicians(
        &self,
        request: &ListRequest,
    ) -> Result<Page<Technician>, ApiError> {
        self.list(PATH, request).await
    }
}
