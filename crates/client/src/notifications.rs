//! Notification endpoints.
//!
//! Every mutation returns the full updated notification list so the
//! caller can replace its snapshot wholesale instead of patching
//! individual entries.

use utezone_core::notifications::Notification;
use utezone_core::types::EntityId;

use crate::http::{ApiClient, Envelope};
use crate::models::ListData;
use crate::ClientError;

pub struct NotificationApi;

impl NotificationApi {
    /// The full notification list for the signed-in admin
    /// (`isPaged=0` disables server-side paging).
    pub async fn list(api: &ApiClient) -> Result<Envelope<ListData<Notification>>, ClientError> {
        api.get(
            "/v1/notification/list",
            &[("isPaged".to_string(), "0".to_string())],
        )
        .await
    }

    pub async fn mark_read(
        api: &ApiClient,
        id: &EntityId,
    ) -> Result<Envelope<Vec<Notification>>, ClientError> {
        api.put_empty(&format!("/v1/notification/read/{id}")).await
    }

    pub async fn mark_all_read(
        api: &ApiClient,
    ) -> Result<Envelope<Vec<Notification>>, ClientError> {
        api.put_empty("/v1/notification/read-all").await
    }

    pub async fn delete(
        api: &ApiClient,
        id: &EntityId,
    ) -> Result<Envelope<Vec<Notification>>, ClientError> {
        api.delete(&format!("/v1/notification/delete/{id}")).await
    }

    pub async fn delete_all(api: &ApiClient) -> Result<Envelope<Vec<Notification>>, ClientError> {
        api.delete("/v1/notification/delete-all").await
    }
}
