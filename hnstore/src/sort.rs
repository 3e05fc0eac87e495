//! Column sorting for a materialized hit list.
//!
//! Text columns sort ascending, count columns sort descending (stable ascending
//! sort, then reversed). The reverse flag flips the whole result on top of that.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::interface::ResultItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Arrival order
    #[default]
    None,
    Title,
    Author,
    Comments,
    Points,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::Title,
        SortKey::Author,
        SortKey::Comments,
        SortKey::Points,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Comments => "comments",
            SortKey::Points => "points",
        }
    }

    /// Sort `hits` by this key, without the reverse toggle
    pub fn sort<'a>(self, hits: &'a [ResultItem]) -> Vec<&'a ResultItem> {
        let mut sorted: Vec<&ResultItem> = hits.iter().collect();
        match self {
            SortKey::None => {}
            SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
            SortKey::Author => sorted.sort_by(|a, b| a.author.cmp(&b.author)),
            SortKey::Comments => {
                sorted.sort_by_key(|item| item.num_comments);
                sorted.reverse();
            }
            SortKey::Points => {
                sorted.sort_by_key(|item| item.points);
                sorted.reverse();
            }
        }
        sorted
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort key {0:?} (expected none, title, author, comments or points)")]
pub struct SortKeyError(pub String);

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.name() == lower)
            .ok_or_else(|| SortKeyError(s.to_string()))
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub reverse: bool,
}

impl SortState {
    pub fn new(key: SortKey, reverse: bool) -> Self {
        Self { key, reverse }
    }

    /// Select `key`. Selecting the active key again flips the direction;
    /// a different key starts unreversed.
    pub fn toggle(&mut self, key: SortKey) {
        self.reverse = self.key == key && !self.reverse;
        self.key = key;
    }

    pub fn apply<'a>(&self, hits: &'a [ResultItem]) -> Vec<&'a ResultItem> {
        let mut sorted = self.key.sort(hits);
        if self.reverse {
            sorted.reverse();
        }
        sorted
    }
}
