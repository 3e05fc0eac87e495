//! hnstore Interface Definition
//!
//! Public records, error types and the search-provider contract shared by the
//! store, the session shell and any front end that drives them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SearchPayload;

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// A single search hit as returned by the search API.
///
/// Immutable once received; the store only ever moves or drops whole items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Opaque identifier, stable across pages of the same query
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub num_comments: u64,
    pub points: u64,
    /// Submission time, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ResultItem {
    /// Build an item with the six display fields and no timestamp
    pub fn new(
        object_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
        num_comments: u64,
        points: u64,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            title: title.into(),
            author: author.into(),
            url: url.into(),
            num_comments,
            points,
            created_at: None,
        }
    }
}

/// Accumulated results for one query.
///
/// `hits` is in arrival order across every merged page. `page` is the index of
/// the most recently merged page, not a count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryPage {
    pub hits: Vec<ResultItem>,
    pub page: u32,
}

/// What a merge did to the cache.
///
/// `is_loading` is always `false`: a completed merge means the request that
/// produced it is no longer pending, and the shell copies the flag as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub page: u32,
    pub hits_added: usize,
    pub total_hits: usize,
    pub is_loading: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Error type for store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No cached results for query {0:?}")]
    NotFound(String),
}

/// Failure reported by a search provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Search API error ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("Malformed search payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Decode(e.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of paginated search results.
///
/// Implementations perform one request per call and never retry.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch page `page` (zero-based) of the results for `query`.
    async fn fetch_page(&self, query: &str, page: u32) -> Result<SearchPayload, ProviderError>;
}

#[async_trait::async_trait]
impl<P: SearchProvider + ?Sized> SearchProvider for std::sync::Arc<P> {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<SearchPayload, ProviderError> {
        (**self).fetch_page(query, page).await
    }
}
