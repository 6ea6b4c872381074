//! Entity mutation flows: confirm, run, toast, refresh.
//!
//! Mutations are gated behind [`ConfirmationGate`]: the screen raises a
//! prompt and stores the pending action; only an explicit confirm runs
//! it. The gate is dismissed once the operation settles, on success and
//! failure alike, and the backing list is refreshed from page 0 only on
//! success.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use utezone_client::chatbot::{DocumentApi, SuggestionApi};
use utezone_client::entities::{EntityApi, EntityKind};
use utezone_client::{ApiClient, ClientError, Envelope, GENERIC_FAILURE_MESSAGE};
use utezone_core::chatbot::{
    default_title_from_filename, validate_document_upload, validate_suggestion_input,
    DocumentUpload, SuggestionInput,
};
use utezone_core::entities::validate_status;
use utezone_core::types::EntityId;

use crate::controller::ListController;
use crate::dialog::{ConfirmationGate, ConfirmationRequest, LoadingOverlays};
use crate::toast::ToastSink;

/// `Ok` carries the success message to toast, `Err` the failure message.
pub type MutationResult = Result<String, String>;

/// Collapse an envelope-returning call into a [`MutationResult`].
fn settle<T>(
    outcome: Result<Envelope<T>, ClientError>,
    success_fallback: &str,
) -> MutationResult {
    match outcome {
        Ok(envelope) if envelope.result => Ok(envelope
            .message
            .unwrap_or_else(|| success_fallback.to_string())),
        Ok(envelope) => Err(envelope.surface_message().to_string()),
        Err(err) => {
            error!(%err, "mutation request failed");
            Err(GENERIC_FAILURE_MESSAGE.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Entity mutations
// ---------------------------------------------------------------------------

/// Runs delete / change-state against whatever backs the list.
#[async_trait]
pub trait EntityMutator: Send + Sync {
    async fn delete(&self, id: &EntityId) -> MutationResult;
    async fn change_state(&self, id: &EntityId, status: i32) -> MutationResult;
}

/// Mutator backed by the entity endpoints.
pub struct ApiEntityMutator {
    api: Arc<ApiClient>,
    kind: EntityKind,
}

impl ApiEntityMutator {
    pub fn new(api: Arc<ApiClient>, kind: EntityKind) -> Self {
        Self { api, kind }
    }
}

#[async_trait]
impl EntityMutator for ApiEntityMutator {
    async fn delete(&self, id: &EntityId) -> MutationResult {
        settle(
            EntityApi::delete(&self.api, self.kind, id).await,
            "Deleted successfully",
        )
    }

    async fn change_state(&self, id: &EntityId, status: i32) -> MutationResult {
        settle(
            EntityApi::change_state(&self.api, self.kind, id, status).await,
            "Status updated",
        )
    }
}

/// The confirmed-but-not-yet-run action.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingAction {
    Delete { id: EntityId },
    ChangeState { id: EntityId, status: i32 },
}

/// Mutation driver for one entity list screen.
pub struct EntityActions<T> {
    pub controller: ListController<T>,
    pub gate: ConfirmationGate,
    pub overlays: LoadingOverlays,
    mutator: Arc<dyn EntityMutator>,
    toast: Arc<dyn ToastSink>,
    pending: Option<PendingAction>,
}

impl<T> EntityActions<T> {
    pub fn new(
        controller: ListController<T>,
        mutator: Arc<dyn EntityMutator>,
        toast: Arc<dyn ToastSink>,
    ) -> Self {
        Self {
            controller,
            gate: ConfirmationGate::default(),
            overlays: LoadingOverlays::default(),
            mutator,
            toast,
            pending: None,
        }
    }

    /// Raise the confirmation prompt for a delete.
    pub fn request_delete(&mut self, id: EntityId, prompt: ConfirmationRequest) {
        self.gate.show(prompt);
        self.pending = Some(PendingAction::Delete { id });
    }

    /// Raise the confirmation prompt for a status change. An unknown
    /// target status is rejected locally without showing the prompt.
    pub fn request_change_state(
        &mut self,
        id: EntityId,
        status: i32,
        prompt: ConfirmationRequest,
    ) {
        if let Err(err) = validate_status(status) {
            self.toast.error(&err.to_string());
            return;
        }
        self.gate.show(prompt);
        self.pending = Some(PendingAction::ChangeState { id, status });
    }

    /// Dismiss the prompt without running anything.
    pub fn cancel(&mut self) {
        self.gate.hide();
        self.pending = None;
    }

    /// Run the pending action. The gate is hidden once the call
    /// settles regardless of outcome; the list refreshes from page 0
    /// only on success. A confirm with nothing pending is a no-op.
    pub async fn confirm(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };

        self.overlays.begin("mutation");
        let result = match &action {
            PendingAction::Delete { id } => self.mutator.delete(id).await,
            PendingAction::ChangeState { id, status } => {
                self.mutator.change_state(id, *status).await
            }
        };
        self.gate.hide();
        self.overlays.end("mutation");

        match result {
            Ok(message) => {
                self.toast.success(&message);
                self.controller.refresh_from_start().await;
            }
            Err(message) => self.toast.error(&message),
        }
    }
}

// ---------------------------------------------------------------------------
// Chatbot suggestion mutations
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn create(&self, input: &SuggestionInput) -> MutationResult;
    async fn update(&self, id: &EntityId, input: &SuggestionInput) -> MutationResult;
    async fn delete(&self, id: &EntityId) -> MutationResult;
}

pub struct ApiSuggestionStore {
    api: Arc<ApiClient>,
}

impl ApiSuggestionStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SuggestionStore for ApiSuggestionStore {
    async fn create(&self, input: &SuggestionInput) -> MutationResult {
        settle(
            SuggestionApi::create(&self.api, input).await,
            "Suggestion created",
        )
    }

    async fn update(&self, id: &EntityId, input: &SuggestionInput) -> MutationResult {
        settle(
            SuggestionApi::update(&self.api, id, input).await,
            "Suggestion updated",
        )
    }

    async fn delete(&self, id: &EntityId) -> MutationResult {
        settle(
            SuggestionApi::delete(&self.api, id).await,
            "Suggestion deleted",
        )
    }
}

/// Suggestion form driver. `save` returns whether the editing modal
/// should close: invalid input and failed calls keep it open.
pub struct SuggestionActions {
    store: Arc<dyn SuggestionStore>,
    toast: Arc<dyn ToastSink>,
}

impl SuggestionActions {
    pub fn new(store: Arc<dyn SuggestionStore>, toast: Arc<dyn ToastSink>) -> Self {
        Self { store, toast }
    }

    /// Create (no id) or update (with id) a suggestion.
    ///
    /// Validation runs locally first; an invalid form never reaches the
    /// network.
    pub async fn save(&self, id: Option<&EntityId>, input: &SuggestionInput) -> bool {
        if let Err(err) = validate_suggestion_input(input) {
            self.toast.error(&err.to_string());
            return false;
        }
        let result = match id {
            Some(id) => self.store.update(id, input).await,
            None => self.store.create(input).await,
        };
        match result {
            Ok(message) => {
                self.toast.success(&message);
                true
            }
            Err(message) => {
                self.toast.error(&message);
                false
            }
        }
    }

    pub async fn delete(&self, id: &EntityId) -> bool {
        match self.store.delete(id).await {
            Ok(message) => {
                self.toast.success(&message);
                true
            }
            Err(message) => {
                self.toast.error(&message);
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Chatbot document mutations
// ---------------------------------------------------------------------------

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn upload(&self, upload: DocumentUpload) -> MutationResult;
    async fn delete(&self, id: &EntityId) -> MutationResult;
}

pub struct ApiDocumentStore {
    api: Arc<ApiClient>,
}

impl ApiDocumentStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DocumentStore for ApiDocumentStore {
    async fn upload(&self, upload: DocumentUpload) -> MutationResult {
        settle(
            DocumentApi::upload(&self.api, upload).await,
            "Document uploaded",
        )
    }

    async fn delete(&self, id: &EntityId) -> MutationResult {
        match DocumentApi::delete(&self.api, id).await {
            Ok(()) => Ok("Document deleted".to_string()),
            Err(err) => {
                error!(%err, "document delete failed");
                Err(GENERIC_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

/// Document upload driver; same close-the-modal contract as
/// [`SuggestionActions::save`].
pub struct DocumentActions {
    store: Arc<dyn DocumentStore>,
    toast: Arc<dyn ToastSink>,
}

impl DocumentActions {
    pub fn new(store: Arc<dyn DocumentStore>, toast: Arc<dyn ToastSink>) -> Self {
        Self { store, toast }
    }

    /// Upload a document. A blank title falls back to the file name
    /// without its extension before validation.
    pub async fn upload(&self, mut upload: DocumentUpload) -> bool {
        if upload.title.trim().is_empty() {
            upload.title = default_title_from_filename(&upload.file_name);
        }
        if let Err(err) = validate_document_upload(&upload) {
            self.toast.error(&err.to_string());
            return false;
        }
        match self.store.upload(upload).await {
            Ok(message) => {
                self.toast.success(&message);
                true
            }
            Err(message) => {
                self.toast.error(&message);
                false
            }
        }
    }

    pub async fn delete(&self, id: &EntityId) -> bool {
        match self.store.delete(id).await {
            Ok(message) => {
                self.toast.success(&message);
                true
            }
            Err(message) => {
                self.toast.error(&message);
                false
            }
        }
    }
}
