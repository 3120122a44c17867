//! Keyword search over manifest titles and cached page content.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::{MAX_SEARCH_RESULTS, MIN_QUERY_LEN};
use crate::source::Manifest;
use crate::store::PageStore;

/// A page matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub page: u32,
    pub title: String,
}

/// Search view over a manifest and the page cache.
///
/// Results come in discovery order: manifest title hits in manifest order,
/// then cached content hits in ascending page order. A page appears at most
/// once, and a manifest hit wins over a content hit for the same page.
#[derive(Debug, Clone, Copy)]
pub struct SearchIndex<'a> {
    manifest: &'a Manifest,
    store: &'a PageStore,
    max_results: usize,
    min_query_len: usize,
}

impl<'a> SearchIndex<'a> {
    pub fn new(manifest: &'a Manifest, store: &'a PageStore) -> Self {
        Self {
            manifest,
            store,
            max_results: MAX_SEARCH_RESULTS,
            min_query_len: MIN_QUERY_LEN,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    /// Case-insensitive substring search.
    ///
    /// Queries shorter than the minimum length return nothing without scanning.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.chars().count() < self.min_query_len {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        let title_hits = self
            .manifest
            .pages
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .map(|p| (p.page, p.title.as_str()));

        let content_hits = self
            .store
            .loaded()
            .filter(|(_, c)| c.content.to_lowercase().contains(&needle))
            .map(|(page, c)| (page, c.title.as_str()));

        for (page, title) in title_hits.chain(content_hits) {
            if results.len() >= self.max_results {
                break;
            }
            if seen.insert(page) {
                results.push(SearchResult {
                    page,
                    title: title.to_string(),
                });
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::PageContent;
    use proptest::prelude::*;

    fn heap_manifest() -> Manifest {
        Manifest::new(1313)
            .with_page(150, "Sorting and Order Statistics")
            .with_page(151, "Heapsort")
            .with_page(505, "Fibonacci Heaps")
    }

    fn cache(pages: &[(u32, &str, &str)]) -> PageStore {
        let mut store = PageStore::new();
        for &(page, title, body) in pages {
            store.complete(page, Ok(PageContent::new(title, body)));
        }
        store
    }

    fn pages(results: &[SearchResult]) -> Vec<u32> {
        results.iter().map(|r| r.page).collect()
    }

    #[test]
    fn test_manifest_hits_in_manifest_order() {
        let manifest = heap_manifest();
        let store = PageStore::new();
        let results = SearchIndex::new(&manifest, &store).search("heap");
        assert_eq!(
            results,
            vec![
                SearchResult { page: 151, title: "Heapsort".into() },
                SearchResult { page: 505, title: "Fibonacci Heaps".into() },
            ]
        );
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let manifest = heap_manifest();
        let store = cache(&[(10, "Ten", "h h h")]);
        assert!(SearchIndex::new(&manifest, &store).search("h").is_empty());
        assert!(SearchIndex::new(&manifest, &store).search("").is_empty());
    }

    #[test]
    fn test_content_hits_follow_manifest_hits() {
        let manifest = heap_manifest();
        let store = cache(&[
            (300, "Red-Black Trees", "<p>unlike a binary heap</p>"),
            (160, "Priority queues", "<p>a max-HEAP supports</p>"),
            (151, "Heapsort page", "<p>heap</p>"),
        ]);
        let results = SearchIndex::new(&manifest, &store).search("Heap");
        assert_eq!(pages(&results), vec![151, 505, 160, 300]);
        assert_eq!(results[0].title, "Heapsort");
        assert_eq!(results[2].title, "Priority queues");
    }

    #[test]
    fn test_unavailable_pages_are_skipped() {
        let manifest = Manifest::new(10);
        let mut store = cache(&[(2, "Two", "<p>graph</p>")]);
        store.complete(3, Err(Error::NotFound("page-0003.json".into())));
        let results = SearchIndex::new(&manifest, &store).search("graph");
        assert_eq!(pages(&results), vec![2]);
    }

    #[test]
    fn test_results_are_capped() {
        let mut manifest = Manifest::new(100);
        for page in 1..=20 {
            manifest = manifest.with_page(page, format!("Tree walk {page}"));
        }
        let store = PageStore::new();
        let index = SearchIndex::new(&manifest, &store);
        assert_eq!(pages(&index.search("tree")), vec![1, 2, 3, 4, 5]);
        assert_eq!(index.with_max_results(2).search("tree").len(), 2);
    }

    #[test]
    fn test_duplicate_manifest_pages_collapse() {
        let manifest = Manifest::new(10)
            .with_page(4, "Graph basics")
            .with_page(4, "Graph basics, continued");
        let store = PageStore::new();
        let results = SearchIndex::new(&manifest, &store).search("graph");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Graph basics");
    }

    proptest! {
        #[test]
        fn prop_single_char_query_is_empty(c in any::<char>()) {
            let manifest = heap_manifest();
            let store = PageStore::new();
            let query = c.to_string();
            prop_assert!(SearchIndex::new(&manifest, &store).search(&query).is_empty());
        }
    }
}
