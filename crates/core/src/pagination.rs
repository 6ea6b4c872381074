//! Paginated list state machine shared by every entity screen.
//!
//! Each screen owns one [`ListState`] holding the current page, page size,
//! filter fields, and the last fetched page of rows. State transitions
//! (`Idle → Loading → Loaded | Errored`) produce a [`FetchRequest`] that the
//! caller turns into an HTTP call; the response is fed back through
//! [`ListState::apply_success`] / [`ListState::apply_failure`].
//!
//! Every issued request carries a generation number. Responses for a
//! generation older than the most recently issued one are discarded, so a
//! slow response can never clobber state produced by a newer request
//! (rapid filter changes, page flips while a fetch is in flight).

use std::collections::BTreeMap;

/// Page size used by most entity screens.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// The active search filters for one list screen.
///
/// Fields with empty values are treated as absent and omitted from the
/// outgoing query. The whole set is cleared as a unit by
/// [`FilterState::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    fields: BTreeMap<String, String>,
}

impl FilterState {
    /// Set one filter field. An empty value removes the field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if value.is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, value);
        }
    }

    /// Merge a partial set of field updates into the current filters.
    pub fn merge<I, K, V>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (field, value) in partial {
            self.set(field, value);
        }
    }

    /// Remove every filter field.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The filter fields as query parameters. Absent fields are omitted.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ListState
// ---------------------------------------------------------------------------

/// Lifecycle phase of a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing fetched yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded and `content` reflects it.
    Loaded,
    /// The last fetch failed; `content` still holds the previous rows.
    Errored,
}

/// A fetch the caller must issue against the list endpoint.
///
/// `query` already contains `page`, `size`, and the active filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Staleness guard; echo back into `apply_success` / `apply_failure`.
    pub generation: u64,
    pub page: u32,
    pub size: u32,
    pub query: Vec<(String, String)>,
}

/// Client-side state holder for one paginated, filterable collection view.
#[derive(Debug)]
pub struct ListState<T> {
    phase: Phase,
    filters: FilterState,
    page: u32,
    page_size: u32,
    content: Vec<T>,
    total_pages: u32,
    /// Generation of the most recently issued request.
    generation: u64,
    last_error: Option<String>,
}

impl<T> ListState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            phase: Phase::Idle,
            filters: FilterState::default(),
            page: 0,
            page_size,
            content: Vec::new(),
            total_pages: 0,
            generation: 0,
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Merge filter updates, reset to page 0, and issue a fetch.
    ///
    /// The page reset happens before the request is built, so a filter
    /// change can never request a page that only existed under the old
    /// filters.
    pub fn set_filters<I, K, V>(&mut self, partial: I) -> FetchRequest
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.filters.merge(partial);
        self.page = 0;
        self.issue()
    }

    /// Clear every filter as a unit, reset to page 0, and issue a fetch.
    pub fn clear_filters(&mut self) -> FetchRequest {
        self.filters.clear();
        self.page = 0;
        self.issue()
    }

    /// Move to page `n` and issue a fetch with unchanged filters.
    ///
    /// Out-of-range requests (`n >= total_pages`) issue nothing.
    pub fn set_page(&mut self, n: u32) -> Option<FetchRequest> {
        if n >= self.total_pages {
            return None;
        }
        self.page = n;
        Some(self.issue())
    }

    /// Re-issue the current request (page and filters unchanged).
    pub fn refresh(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Reset to page 0 and re-issue; used after mutations so the refreshed
    /// list starts from the beginning.
    pub fn refresh_from_start(&mut self) -> FetchRequest {
        self.page = 0;
        self.issue()
    }

    /// Apply a successful response for `generation`.
    ///
    /// `content` and `total_pages` replace the prior values atomically.
    /// Returns `false` (and changes nothing) when the response is stale.
    pub fn apply_success(&mut self, generation: u64, content: Vec<T>, total_pages: u32) -> bool {
        if generation != self.generation {
            return false;
        }
        self.content = content;
        self.total_pages = total_pages;
        self.phase = Phase::Loaded;
        self.last_error = None;
        true
    }

    /// Apply a failed response for `generation`.
    ///
    /// The last-known `content` and `total_pages` are retained; the caller
    /// surfaces `message` to the user. Returns `false` when stale.
    pub fn apply_failure(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.phase = Phase::Errored;
        self.last_error = Some(message.into());
        true
    }

    /// Bump the generation, enter `Loading`, and build the request.
    fn issue(&mut self) -> FetchRequest {
        self.generation += 1;
        self.phase = Phase::Loading;

        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.page_size.to_string()),
        ];
        query.extend(self.filters.to_query());

        FetchRequest {
            generation: self.generation,
            page: self.page,
            size: self.page_size,
            query,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
