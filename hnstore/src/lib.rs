//! hnstore - search results cache for Hacker News search front ends
//!
//! The core is `ResultCache`: one accumulated `QueryPage` per query string,
//! grown page by page as results arrive and trimmed by local dismissals.
//! `SearchSession` wires it to a `SearchProvider` the way an interactive
//! front end would; rendering is left to the caller.

pub mod config;
pub mod interface;
pub mod models;
pub mod provider;
pub mod session;
pub mod sort;
mod store;

pub use interface::*;
pub use models::SearchPayload;
pub use session::{SearchSession, SubmitOutcome};
pub use sort::{SortKey, SortState};
pub use store::{ResultCache, SearchResultsStore};
