//! List controllers: drive a [`ListState`] through its fetch lifecycle.
//!
//! The controller owns the state machine and a [`ListFetcher`]; every
//! user action issues a request, awaits it, and feeds the outcome back
//! through the generation guard. Fetching sits behind a trait so the
//! lifecycle can be tested without a server.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::error;

use utezone_client::entities::{EntityApi, EntityKind};
use utezone_client::{ApiClient, GENERIC_FAILURE_MESSAGE};
use utezone_core::pagination::{FetchRequest, ListState, Phase};

// ---------------------------------------------------------------------------
// Fetcher seam
// ---------------------------------------------------------------------------

/// One successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
}

/// Supplies pages for a [`ListController`].
///
/// `Err` carries the message to surface to the user; transport errors
/// are already collapsed to a generic message by the implementation.
#[async_trait]
pub trait ListFetcher<T>: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage<T>, String>;
}

// ---------------------------------------------------------------------------
// ListController
// ---------------------------------------------------------------------------

pub struct ListController<T> {
    state: ListState<T>,
    fetcher: Arc<dyn ListFetcher<T>>,
}

impl<T> ListController<T> {
    pub fn new(page_size: u32, fetcher: Arc<dyn ListFetcher<T>>) -> Self {
        Self {
            state: ListState::new(page_size),
            fetcher,
        }
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn content(&self) -> &[T] {
        self.state.content()
    }

    /// Initial load or manual reload of the current page.
    pub async fn refresh(&mut self) {
        let request = self.state.refresh();
        self.resolve(request).await;
    }

    /// Reload from page 0; used after a mutation changed the collection.
    pub async fn refresh_from_start(&mut self) {
        let request = self.state.refresh_from_start();
        self.resolve(request).await;
    }

    /// Merge filter updates and reload from page 0.
    pub async fn set_filters<I, K, V>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, V)> + Send,
        K: Into<String>,
        V: Into<String>,
    {
        let request = self.state.set_filters(partial);
        self.resolve(request).await;
    }

    /// Clear every filter and reload from page 0.
    pub async fn clear_filters(&mut self) {
        let request = self.state.clear_filters();
        self.resolve(request).await;
    }

    /// Move to page `n`. Out-of-range values are ignored.
    pub async fn set_page(&mut self, n: u32) {
        if let Some(request) = self.state.set_page(n) {
            self.resolve(request).await;
        }
    }

    async fn resolve(&mut self, request: FetchRequest) {
        match self.fetcher.fetch(&request).await {
            Ok(page) => {
                self.state
                    .apply_success(request.generation, page.content, page.total_pages);
            }
            Err(message) => {
                self.state.apply_failure(request.generation, message);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// EntityListFetcher
// ---------------------------------------------------------------------------

/// Fetcher backed by the entity listing endpoints.
pub struct EntityListFetcher<T> {
    api: Arc<ApiClient>,
    kind: EntityKind,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityListFetcher<T> {
    pub fn new(api: Arc<ApiClient>, kind: EntityKind) -> Self {
        Self {
            api,
            kind,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + Sync> ListFetcher<T> for EntityListFetcher<T> {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedPage<T>, String> {
        let envelope = match EntityApi::list::<T>(&self.api, self.kind, request).await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!(kind = ?self.kind, %err, "entity list request failed");
                return Err(GENERIC_FAILURE_MESSAGE.to_string());
            }
        };
        if !envelope.result {
            return Err(envelope.surface_message().to_string());
        }
        let data = envelope.data.ok_or(GENERIC_FAILURE_MESSAGE)?;
        Ok(FetchedPage {
            content: data.content,
            total_pages: data.total_pages,
        })
    }
}
