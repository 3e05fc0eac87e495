//! Result cache and pagination merge
//!
//! Keeps one `QueryPage` per exact query string for the lifetime of a session.
//! Entries are created by the first merge for a key, rewritten by later merges
//! and dismissals, and never evicted.
//!
//! Merge contract:
//! - page 0 (or an unseen key) starts from an empty hit list
//! - any other page appends after the hits already cached for that key
//! - `page` is overwritten with the merged page index
//!
//! Merges are applied in call order. Two in-flight fetches for the same key
//! land in whatever order they complete, and a late page-0 response truncates
//! whatever was accumulated before it.

use std::collections::HashMap;

use crate::interface::{MergeOutcome, QueryPage, ResultItem, StoreError};

/// Per-query cache of accumulated result pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultCache {
    entries: HashMap<String, QueryPage>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page for `query`, appending to earlier pages of the
    /// same query unless `page` is 0.
    pub fn merge_page(&mut self, query: &str, page: u32, items: Vec<ResultItem>) -> MergeOutcome {
        let hits_added = items.len();

        let entry = self.entries.entry(query.to_string()).or_default();
        if page == 0 {
            entry.hits.clear();
        }
        entry.hits.extend(items);
        entry.page = page;

        tracing::debug!(
            query,
            page,
            hits_added,
            total_hits = entry.hits.len(),
            "merged result page"
        );

        MergeOutcome {
            page,
            hits_added,
            total_hits: entry.hits.len(),
            is_loading: false,
        }
    }

    /// Remove every hit with `object_id` from the entry for `active_query`.
    /// Returns how many hits were removed.
    pub fn dismiss(&mut self, active_query: &str, object_id: &str) -> Result<usize, StoreError> {
        let entry = self
            .entries
            .get_mut(active_query)
            .ok_or_else(|| StoreError::NotFound(active_query.to_string()))?;

        let before = entry.hits.len();
        entry.hits.retain(|item| item.object_id != object_id);
        let removed = before - entry.hits.len();

        tracing::debug!(query = active_query, object_id, removed, "dismissed hit");
        Ok(removed)
    }

    /// Cached results for `query`, if it has ever been merged
    pub fn current_view(&self, query: &str) -> Option<&QueryPage> {
        self.entries.get(query)
    }

    /// True when nothing has been merged for `query` yet
    pub fn needs_search(&self, query: &str) -> bool {
        !self.entries.contains_key(query)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// The result cache together with the query currently on display
#[derive(Debug, Clone, Default)]
pub struct SearchResultsStore {
    cache: ResultCache,
    active_query: Option<String>,
}

impl SearchResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    /// Switch the displayed query. Does not touch the cache.
    pub fn set_active_query(&mut self, query: impl Into<String>) {
        self.active_query = Some(query.into());
    }

    /// Merge a page under `query`, which need not be the active query
    pub fn merge_page(&mut self, query: &str, page: u32, items: Vec<ResultItem>) -> MergeOutcome {
        self.cache.merge_page(query, page, items)
    }

    pub fn dismiss(&mut self, active_query: &str, object_id: &str) -> Result<usize, StoreError> {
        self.cache.dismiss(active_query, object_id)
    }

    /// Dismiss from the active query's entry
    pub fn dismiss_active(&mut self, object_id: &str) -> Result<usize, StoreError> {
        let query = self.active_query.as_deref().unwrap_or_default();
        self.cache.dismiss(query, object_id)
    }

    pub fn current_view(&self, query: &str) -> Option<&QueryPage> {
        self.cache.current_view(query)
    }

    pub fn active_view(&self) -> Option<&QueryPage> {
        self.active_query
            .as_deref()
            .and_then(|query| self.cache.current_view(query))
    }

    pub fn needs_search(&self, query: &str) -> bool {
        self.cache.needs_search(query)
    }
}
