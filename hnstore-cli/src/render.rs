//! Plain-text and JSON output of the active result list

use chrono::{DateTime, Utc};
use hnstore::{ResultItem, SortKey, SortState};
use serde_json::json;

const TITLE_WIDTH: usize = 48;
const AUTHOR_WIDTH: usize = 16;

/// Truncate to `width` characters, marking the cut with "…"
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn format_age(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created_at) = created_at else {
        return "-".to_string();
    };
    let age = now.signed_duration_since(created_at);
    if age.num_days() >= 365 {
        format!("{}y", age.num_days() / 365)
    } else if age.num_days() >= 1 {
        format!("{}d", age.num_days())
    } else if age.num_hours() >= 1 {
        format!("{}h", age.num_hours())
    } else {
        format!("{}m", age.num_minutes().max(0))
    }
}

fn column_label(label: &str, key: SortKey, sort: SortState) -> String {
    if sort.key != key {
        return label.to_string();
    }
    let arrow = if sort.reverse { '▲' } else { '▼' };
    format!("{}{}", label, arrow)
}

pub fn render_table(
    query: &str,
    page: u32,
    hits: &[&ResultItem],
    sort: SortState,
    now: DateTime<Utc>,
) -> String {
    let mut out = format!("{:?}: {} hits, page {}\n", query, hits.len(), page);
    out.push_str(&format!(
        "{:<title$}  {:<author$}  {:>9}  {:>7}  {:>4}  {}\n",
        column_label("Title", SortKey::Title, sort),
        column_label("Author", SortKey::Author, sort),
        column_label("Comments", SortKey::Comments, sort),
        column_label("Points", SortKey::Points, sort),
        "Age",
        "ID",
        title = TITLE_WIDTH,
        author = AUTHOR_WIDTH,
    ));
    for item in hits {
        out.push_str(&format!(
            "{:<title$}  {:<author$}  {:>9}  {:>7}  {:>4}  {}\n",
            fit(&item.title, TITLE_WIDTH),
            fit(&item.author, AUTHOR_WIDTH),
            item.num_comments,
            item.points,
            format_age(item.created_at, now),
            item.object_id,
            title = TITLE_WIDTH,
            author = AUTHOR_WIDTH,
        ));
    }
    out
}

pub fn render_json(query: &str, page: u32, hits: &[&ResultItem]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "query": query,
        "page": page,
        "hits": hits,
    }))
}
