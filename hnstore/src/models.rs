//! Search API payload models
//!
//! The raw types mirror the Algolia HN search response. Fields the API may
//! send as `null` (comments have no title or url, polls have no comment
//! count) are optional here and collapse to empty values on conversion.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::interface::{ProviderError, ResultItem};

// ─────────────────────────────────────────────────────────────────────────────
// WIRE TYPES (as sent by the search API)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawHit {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub story_title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub num_comments: Option<u64>,
    #[serde(default)]
    pub points: Option<u64>,
    #[serde(default)]
    pub created_at_i: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchResponse {
    pub hits: Vec<RawHit>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub nb_pages: Option<u32>,
    #[serde(default)]
    pub nb_hits: Option<u64>,
    #[serde(default)]
    pub hits_per_page: Option<u32>,
    #[serde(default)]
    pub query: Option<String>,
}

impl From<RawHit> for ResultItem {
    fn from(raw: RawHit) -> Self {
        let created_at = raw
            .created_at_i
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        Self {
            object_id: raw.object_id,
            title: raw.title.or(raw.story_title).unwrap_or_default(),
            author: raw.author.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            num_comments: raw.num_comments.unwrap_or(0),
            points: raw.points.unwrap_or(0),
            created_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DECODED PAYLOAD
// ─────────────────────────────────────────────────────────────────────────────

/// One page of results as handed to the store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPayload {
    pub hits: Vec<ResultItem>,
    pub page: u32,
    /// Total page count when the API reports it
    pub nb_pages: Option<u32>,
}

impl SearchPayload {
    pub fn new(hits: Vec<ResultItem>, page: u32) -> Self {
        Self { hits, page, nb_pages: None }
    }

    /// Decode a search API response body
    pub fn from_json(body: &str) -> Result<Self, ProviderError> {
        let raw: RawSearchResponse = serde_json::from_str(body)?;
        Ok(raw.into())
    }

    /// Whether the API says more pages exist after this one
    pub fn has_more(&self) -> bool {
        match self.nb_pages {
            Some(total) => self.page.saturating_add(1) < total,
            None => !self.hits.is_empty() && self.page < u32::MAX,
        }
    }
}

impl From<RawSearchResponse> for SearchPayload {
    fn from(raw: RawSearchResponse) -> Self {
        Self {
            hits: raw.hits.into_iter().map(ResultItem::from).collect(),
            page: raw.page,
            nb_pages: raw.nb_pages,
        }
    }
}
