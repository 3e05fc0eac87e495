//! In-memory search provider
//!
//! Serves canned pages keyed by `(query, page)` and logs every request it
//! receives. Backs the offline `--fixture` mode of the CLI and the tests.
//!
//! Fixture files are a JSON array of `{"query": .., "response": ..}` objects
//! where `response` is a search API response body as returned by the API.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;
use serde::Deserialize;
use thiserror::Error;

use crate::interface::{ProviderError, SearchProvider};
use crate::models::{RawSearchResponse, SearchPayload};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Fixture has more than one response for {query:?} page {page}")]
    DuplicatePage { query: String, page: u32 },
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    query: String,
    response: RawSearchResponse,
}

type PageKey = (String, u32);

#[derive(Debug, Default)]
pub struct StaticProvider {
    pages: HashMap<PageKey, Result<SearchPayload, ProviderError>>,
    requests: Mutex<Vec<PageKey>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` for `query` at `payload.page`, replacing any page
    /// already canned there
    pub fn with_page(mut self, query: &str, payload: SearchPayload) -> Self {
        let page = payload.page;
        if self.pages.insert((query.to_string(), page), Ok(payload)).is_some() {
            tracing::warn!(query, page, "replacing canned page");
        }
        self
    }

    /// Fail requests for `(query, page)` with `error`
    pub fn with_failure(mut self, query: &str, page: u32, error: ProviderError) -> Self {
        self.pages.insert((query.to_string(), page), Err(error));
        self
    }

    /// Entries are keyed by the response's own `page` (0 when absent); two
    /// entries landing on the same key are rejected.
    pub fn from_fixture_str(json: &str) -> Result<Self, FixtureError> {
        let entries: Vec<FixtureEntry> = serde_json::from_str(json)?;
        let mut provider = Self::new();
        for entry in entries {
            let payload = SearchPayload::from(entry.response);
            let key = (entry.query, payload.page);
            if provider.pages.contains_key(&key) {
                let (query, page) = key;
                return Err(FixtureError::DuplicatePage { query, page });
            }
            provider.pages.insert(key, Ok(payload));
        }
        Ok(provider)
    }

    pub fn from_fixture_file<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_fixture_str(&json)
    }

    /// Every `(query, page)` requested so far, in request order
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().clone()
    }
}

#[async_trait::async_trait]
impl SearchProvider for StaticProvider {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<SearchPayload, ProviderError> {
        let key = (query.to_string(), page);
        self.requests.lock().push(key.clone());
        match self.pages.get(&key) {
            Some(result) => result.clone(),
            None => Ok(SearchPayload::new(Vec::new(), page)),
        }
    }
}
