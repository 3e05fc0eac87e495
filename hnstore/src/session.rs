//! Search session: the application shell around the result store.
//!
//! Holds the text being edited, the loading and error flags and the sort
//! state, and drives one provider request at a time. Every method takes
//! `&mut self`, so a session never has two fetches in flight.

use std::collections::HashMap;

use crate::interface::{
    MergeOutcome, ProviderError, ResultItem, SearchProvider, StoreError,
};
use crate::sort::{SortKey, SortState};
use crate::store::SearchResultsStore;

/// How a submit was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The query was fetched from the provider
    Fetched(MergeOutcome),
    /// The query was already cached; no request was made
    Cached,
}

pub struct SearchSession<P: SearchProvider> {
    provider: P,
    store: SearchResultsStore,
    search_term: String,
    is_loading: bool,
    error: Option<ProviderError>,
    sort: SortState,
    /// Per query: whether the last fetched page said more pages follow
    more_available: HashMap<String, bool>,
}

impl<P: SearchProvider> SearchSession<P> {
    pub fn new(provider: P, initial_term: impl Into<String>) -> Self {
        Self {
            provider,
            store: SearchResultsStore::new(),
            search_term: initial_term.into(),
            is_loading: false,
            error: None,
            sort: SortState::default(),
            more_available: HashMap::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &SearchResultsStore {
        &self.store
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn active_query(&self) -> Option<&str> {
        self.store.active_query()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&ProviderError> {
        self.error.as_ref()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Last merged page of the active query, 0 when nothing is cached
    pub fn page(&self) -> u32 {
        self.store.active_view().map(|view| view.page).unwrap_or(0)
    }

    /// Whether `more` can fetch anything new for the active query. True until
    /// the active query has been fetched at least once.
    pub fn has_more(&self) -> bool {
        let query = self.store.active_query().unwrap_or(self.search_term.as_str());
        self.more_available.get(query).copied().unwrap_or(true)
    }

    /// Active query's hits in display order
    pub fn view(&self) -> Vec<&ResultItem> {
        match self.store.active_view() {
            Some(view) => self.sort.apply(&view.hits),
            None => Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Show the initial search term and fetch its first page
    pub async fn start(&mut self) -> Result<MergeOutcome, ProviderError> {
        let query = self.search_term.clone();
        self.store.set_active_query(query.clone());
        self.fetch(&query, 0).await
    }

    /// Make the search term the active query, fetching only if it has never
    /// been searched in this session
    pub async fn submit(&mut self) -> Result<SubmitOutcome, ProviderError> {
        let query = self.search_term.clone();
        self.store.set_active_query(query.clone());
        if !self.store.needs_search(&query) {
            tracing::debug!(query = %query, "serving cached results");
            return Ok(SubmitOutcome::Cached);
        }
        self.fetch(&query, 0).await.map(SubmitOutcome::Fetched)
    }

    /// Fetch the page after the active query's last merged page
    pub async fn more(&mut self) -> Result<MergeOutcome, ProviderError> {
        let query = self
            .store
            .active_query()
            .unwrap_or(self.search_term.as_str())
            .to_string();
        let next_page = match self.store.current_view(&query) {
            Some(view) => match view.page.checked_add(1) {
                Some(next) => next,
                None => {
                    tracing::warn!(query = %query, page = view.page, "no page after the last page index");
                    let outcome = MergeOutcome {
                        page: view.page,
                        hits_added: 0,
                        total_hits: view.hits.len(),
                        is_loading: false,
                    };
                    self.more_available.insert(query, false);
                    return Ok(outcome);
                }
            },
            None => 0,
        };
        self.fetch(&query, next_page).await
    }

    /// Request one page and merge it under `query`.
    ///
    /// `is_loading` stays set if the returned future is dropped before it
    /// completes, until a later fetch settles.
    pub async fn fetch(&mut self, query: &str, page: u32) -> Result<MergeOutcome, ProviderError> {
        self.is_loading = true;
        tracing::debug!(query, page, "fetching result page");

        match self.provider.fetch_page(query, page).await {
            Ok(payload) => {
                self.more_available.insert(query.to_string(), payload.has_more());
                let outcome = self.store.merge_page(query, payload.page, payload.hits);
                self.is_loading = outcome.is_loading;
                self.error = None;
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(query, page, error = %e, "search request failed");
                self.is_loading = false;
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn dismiss(&mut self, object_id: &str) -> Result<usize, StoreError> {
        self.store.dismiss_active(object_id)
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.toggle(key);
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }
}
