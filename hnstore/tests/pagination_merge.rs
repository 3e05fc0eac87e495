//! End-to-end pagination behavior through the public API
//! Scenario: "Redux" search, one more page, dismiss, then revisit

use hnstore::{ResultCache, ResultItem, StoreError};

fn item(id: &str, title: &str) -> ResultItem {
    ResultItem::new(id, title, "author", "https://example.com", 0, 0)
}

fn ids(cache: &ResultCache, query: &str) -> Vec<String> {
    cache
        .current_view(query)
        .map(|view| view.hits.iter().map(|h| h.object_id.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_redux_walkthrough() {
    let mut cache = ResultCache::new();

    cache.merge_page("Redux", 0, vec![item("1", "React")]);
    let view = cache.current_view("Redux").unwrap();
    assert_eq!(view.hits, vec![item("1", "React")]);
    assert_eq!(view.page, 0);

    cache.merge_page("Redux", 1, vec![item("2", "Redux")]);
    let view = cache.current_view("Redux").unwrap();
    assert_eq!(view.hits, vec![item("1", "React"), item("2", "Redux")]);
    assert_eq!(view.page, 1);

    cache.dismiss("Redux", "1").unwrap();
    let view = cache.current_view("Redux").unwrap();
    assert_eq!(view.hits, vec![item("2", "Redux")]);
    assert_eq!(view.page, 1);
}

#[test]
fn test_duplicate_first_page_truncates() {
    let mut cache = ResultCache::new();
    cache.merge_page("Redux", 0, vec![item("1", "a")]);
    cache.merge_page("Redux", 1, vec![item("2", "b")]);
    cache.merge_page("Redux", 2, vec![item("3", "c")]);

    // A second page-0 response (e.g. a raced resubmit) replaces everything
    cache.merge_page("Redux", 0, vec![item("4", "d")]);
    assert_eq!(ids(&cache, "Redux"), vec!["4"]);
    assert_eq!(cache.current_view("Redux").unwrap().page, 0);
}

#[test]
fn test_first_page_ignores_prior_state() {
    let prior_states: Vec<Vec<(u32, Vec<ResultItem>)>> = vec![
        vec![],
        vec![(0, vec![item("x", "x")])],
        vec![(0, vec![item("x", "x")]), (1, vec![item("y", "y"), item("z", "z")])],
        vec![(4, vec![item("w", "w")])],
    ];
    let first = vec![item("1", "a"), item("2", "b")];

    for prior in prior_states {
        let mut cache = ResultCache::new();
        for (page, items) in prior {
            cache.merge_page("q", page, items);
        }
        cache.merge_page("q", 0, first.clone());
        let view = cache.current_view("q").unwrap();
        assert_eq!(view.hits, first);
        assert_eq!(view.page, 0);
    }
}

#[test]
fn test_queries_are_isolated() {
    let mut cache = ResultCache::new();
    cache.merge_page("Redux", 0, vec![item("1", "a")]);
    cache.merge_page("React", 0, vec![item("2", "b")]);
    cache.merge_page("React", 1, vec![item("3", "c")]);
    cache.dismiss("React", "2").unwrap();

    assert_eq!(ids(&cache, "Redux"), vec!["1"]);
    assert_eq!(ids(&cache, "React"), vec!["3"]);

    let mut queries: Vec<&str> = cache.queries().collect();
    queries.sort();
    assert_eq!(queries, vec!["React", "Redux"]);
}

#[test]
fn test_dismiss_uncached_query() {
    let mut cache = ResultCache::new();
    assert_eq!(
        cache.dismiss("Redux", "1"),
        Err(StoreError::NotFound("Redux".to_string()))
    );
    assert!(cache.is_empty());
}
