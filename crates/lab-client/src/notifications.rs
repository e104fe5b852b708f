//! Notifications of the signed-in user.

use lab_core::entities::Notification;
use lab_core::paging::{ListRequest, Page};

use crate::{ApiError, LabClient, segment};

pub const PATH: &str = "/api/notifications";

impl LabClient {
    /// List the notifications addressed to `user_id`, read and unread.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_notifications(
        &self,
        user_id: &str,
        request: &ListRequest,
    ) -> Result<Page<Notification>, ApiError> {
        self.list(&format!("{PATH}/user/{}", segment(user_id)), request)
            .await
    }

    /// Flag one notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or error status.
    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ApiError> {
        self.put_empty(&format!("{PATH}/{}/mark-as-read", segment(id)))
            .await
    }
}
