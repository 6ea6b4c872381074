//! Chatbot administration endpoints: quick-reply suggestions and the
//! knowledge-document index.
//!
//! Suggestions speak the standard envelope; the documents resource is
//! served by a different backend and returns bare JSON bodies, hence the
//! `get_plain`/`delete_plain` calls.

use reqwest::multipart;

use utezone_core::chatbot::{DocumentUpload, SuggestionInput};
use utezone_core::types::EntityId;

use crate::http::{ApiClient, Envelope};
use crate::models::{ChatbotDocument, ListData, Suggestion};
use crate::ClientError;

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

pub struct SuggestionApi;

impl SuggestionApi {
    pub async fn list(api: &ApiClient) -> Result<Envelope<Vec<Suggestion>>, ClientError> {
        api.get("/v1/chatbot/suggestions", &[]).await
    }

    pub async fn create(
        api: &ApiClient,
        input: &SuggestionInput,
    ) -> Result<Envelope<Suggestion>, ClientError> {
        api.post("/v1/chatbot/suggestions", input).await
    }

    pub async fn update(
        api: &ApiClient,
        id: &EntityId,
        input: &SuggestionInput,
    ) -> Result<Envelope<Suggestion>, ClientError> {
        api.put(&format!("/v1/chatbot/suggestions/{id}"), input).await
    }

    pub async fn delete(
        api: &ApiClient,
        id: &EntityId,
    ) -> Result<Envelope<serde_json::Value>, ClientError> {
        api.delete(&format!("/v1/chatbot/suggestions/{id}")).await
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

pub struct DocumentApi;

impl DocumentApi {
    /// One page of the document index. Bare body: `{content, totalPages}`.
    pub async fn list(
        api: &ApiClient,
        page: u32,
        size: u32,
    ) -> Result<ListData<ChatbotDocument>, ClientError> {
        api.get_plain(
            "/v1/chatbot/documents",
            &[
                ("page".to_string(), page.to_string()),
                ("size".to_string(), size.to_string()),
            ],
        )
        .await
    }

    /// Upload a document for indexing as a multipart form.
    pub async fn upload(
        api: &ApiClient,
        upload: DocumentUpload,
    ) -> Result<Envelope<serde_json::Value>, ClientError> {
        let part = multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
        let form = multipart::Form::new()
            .part("file", part)
            .text("title", upload.title);
        api.post_multipart("/v1/chatbot/documents", form).await
    }

    pub async fn delete(api: &ApiClient, id: &EntityId) -> Result<(), ClientError> {
        api.delete_plain(&format!("/v1/chatbot/documents/{id}")).await
    }

    /// Usage statistics for the dashboard. Shape varies by deployment,
    /// so it stays a raw value.
    pub async fn stats(api: &ApiClient) -> Result<Envelope<serde_json::Value>, ClientError> {
        api.get("/v1/chatbot/stats", &[]).await
    }
}
