//! Moderation-settings endpoints.
//!
//! `list` returns `data` as a bare array rather than a paged wrapper;
//! per-entity updates take the same two flags as the global settings.

use serde_json::json;

use utezone_core::moderation::{ModerationFlags, ModerationSetting};
use utezone_core::types::EntityId;

use crate::entities::EntityKind;
use crate::http::{ApiClient, Envelope};
use crate::ClientError;

pub struct ModerationApi;

impl ModerationApi {
    pub async fn global(api: &ApiClient) -> Result<Envelope<ModerationFlags>, ClientError> {
        api.get("/v1/moderation-settings/global", &[]).await
    }

    pub async fn set_global(
        api: &ApiClient,
        flags: ModerationFlags,
    ) -> Result<Envelope<ModerationFlags>, ClientError> {
        api.put("/v1/moderation-settings/global", &flags).await
    }

    /// Every per-entity setting for the given kind. Only groups and
    /// pages carry settings.
    pub async fn list(
        api: &ApiClient,
        kind: EntityKind,
    ) -> Result<Envelope<Vec<ModerationSetting>>, ClientError> {
        let kind = match kind {
            EntityKind::Group => "group",
            EntityKind::Page => "page",
            other => {
                return Ok(Envelope::failure(format!(
                    "{other:?} entities have no moderation settings"
                )))
            }
        };
        api.get(
            "/v1/moderation-settings/list",
            &[("kind".to_string(), kind.to_string())],
        )
        .await
    }

    pub async fn set_for_group(
        api: &ApiClient,
        group_id: &EntityId,
        flags: ModerationFlags,
    ) -> Result<Envelope<ModerationSetting>, ClientError> {
        api.put(&format!("/v1/moderation-settings/group/{group_id}"), &flags)
            .await
    }

    /// Apply the same flags to several groups at once.
    pub async fn set_for_groups(
        api: &ApiClient,
        group_ids: &[EntityId],
        flags: ModerationFlags,
    ) -> Result<Envelope<Vec<ModerationSetting>>, ClientError> {
        api.put(
            "/v1/moderation-settings/groups",
            &json!({
                "groupIds": group_ids,
                "isAutoModerationEnabled": flags.is_auto_moderation_enabled,
                "isModerationRequired": flags.is_moderation_required,
            }),
        )
        .await
    }

    pub async fn set_for_page(
        api: &ApiClient,
        page_id: &EntityId,
        flags: ModerationFlags,
    ) -> Result<Envelope<ModerationSetting>, ClientError> {
        api.put(&format!("/v1/moderation-settings/page/{page_id}"), &flags)
            .await
    }
}
