//! Session cache of page content.
//!
//! Records are keyed by page number and never evicted. A failed fetch is
//! cached as [`PageRecord::Unavailable`] and is not retried.
//!
//! A page counts as in flight only while its [`PageLoad`] ticket is alive;
//! dropping the ticket without completing it lets the page be requested again.

use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::error::Result;
use crate::source::{PageContent, PageSource};

/// Text shown in place of a page whose content could not be loaded.
pub const UNAVAILABLE_TEXT: &str = "Full transcription and analysis for this page is available \
in the image view. Use the menu or press V to switch views.";

/// Cached outcome of fetching one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRecord {
    Loaded(PageContent),
    Unavailable,
}

impl PageRecord {
    pub fn content(&self) -> Option<&PageContent> {
        match self {
            PageRecord::Loaded(content) => Some(content),
            PageRecord::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PageRecord::Loaded(_))
    }
}

/// A fetch the caller must perform and report back through
/// [`PageStore::complete`].
///
/// The page stays in flight while this ticket is alive. Dropping it abandons
/// the load.
#[derive(Debug)]
#[must_use = "dropping a load abandons it"]
pub struct PageLoad {
    page: u32,
    _live: Rc<()>,
}

impl PageLoad {
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Page cache with in-flight tracking.
#[derive(Debug, Default)]
pub struct PageStore {
    records: BTreeMap<u32, PageRecord>,
    in_flight: BTreeMap<u32, Weak<()>>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached record for `page`, if its fetch has completed.
    pub fn get_page(&self, page: u32) -> Option<&PageRecord> {
        self.records.get(&page)
    }

    pub fn contains(&self, page: u32) -> bool {
        self.records.contains_key(&page)
    }

    /// Whether a live [`PageLoad`] for `page` is outstanding.
    pub fn is_loading(&self, page: u32) -> bool {
        self.in_flight
            .get(&page)
            .is_some_and(|live| live.strong_count() > 0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All cached records in ascending page order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &PageRecord)> {
        self.records.iter().map(|(&page, record)| (page, record))
    }

    /// Successfully loaded pages in ascending page order.
    pub fn loaded(&self) -> impl Iterator<Item = (u32, &PageContent)> {
        self.iter()
            .filter_map(|(page, record)| record.content().map(|c| (page, c)))
    }

    /// Mark `page` as in flight.
    ///
    /// Returns `None` when the page is already cached or already being fetched.
    pub fn begin_load(&mut self, page: u32) -> Option<PageLoad> {
        if self.records.contains_key(&page) || self.is_loading(page) {
            return None;
        }
        if self.in_flight.remove(&page).is_some() {
            debug!(page, "abandoned page load requested again");
        }
        let live = Rc::new(());
        self.in_flight.insert(page, Rc::downgrade(&live));
        Some(PageLoad { page, _live: live })
    }

    /// Store the outcome of a fetch for `page`.
    ///
    /// The result is always filed under `page`, whatever is currently shown.
    pub fn complete(&mut self, page: u32, result: Result<PageContent>) -> &PageRecord {
        self.in_flight.remove(&page);
        let record = match result {
            Ok(content) => {
                debug!(page, title = %content.title, "page loaded");
                PageRecord::Loaded(content)
            }
            Err(e) => {
                debug!(page, error = %e, "page unavailable");
                PageRecord::Unavailable
            }
        };
        self.records.entry(page).or_insert(record)
    }

    /// Fetch `page` from `source` unless it is already cached.
    ///
    /// Returns `None` only when a fetch begun elsewhere is still outstanding.
    pub async fn ensure_loaded<S: PageSource>(&mut self, page: u32, source: &S) -> Option<&PageRecord> {
        if self.records.contains_key(&page) {
            return self.records.get(&page);
        }
        let load = self.begin_load(page)?;
        let result = source.fetch_page(load.page()).await;
        Some(self.complete(load.page(), result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::MemorySource;

    fn content(title: &str) -> PageContent {
        PageContent::new(title, format!("<p>{title}</p>"))
    }

    #[test]
    fn test_begin_load_is_exclusive() {
        let mut store = PageStore::new();
        let load = store.begin_load(3).unwrap();
        assert!(store.is_loading(3));
        assert!(store.begin_load(3).is_none());

        store.complete(load.page(), Ok(content("Three")));
        assert!(!store.is_loading(3));
        assert!(store.begin_load(3).is_none());
    }

    #[test]
    fn test_failed_fetch_is_cached_as_unavailable() {
        let mut store = PageStore::new();
        let load = store.begin_load(42).unwrap();
        let record = store.complete(load.page(), Err(Error::NotFound("page-0042.json".into())));
        assert_eq!(*record, PageRecord::Unavailable);
        assert_eq!(store.get_page(42), Some(&PageRecord::Unavailable));
        assert!(store.begin_load(42).is_none());
    }

    #[test]
    fn test_iteration_is_ascending() {
        let mut store = PageStore::new();
        for page in [9, 2, 5] {
            let load = store.begin_load(page).unwrap();
            store.complete(load.page(), Ok(content(&page.to_string())));
        }
        let load = store.begin_load(4).unwrap();
        store.complete(load.page(), Err(Error::NotFound("x".into())));

        let pages: Vec<u32> = store.iter().map(|(p, _)| p).collect();
        assert_eq!(pages, vec![2, 4, 5, 9]);
        let loaded: Vec<u32> = store.loaded().map(|(p, _)| p).collect();
        assert_eq!(loaded, vec![2, 5, 9]);
    }

    #[test]
    fn test_first_completion_wins() {
        let mut store = PageStore::new();
        store.complete(1, Ok(content("First")));
        store.complete(1, Ok(content("Second")));
        assert_eq!(store.get_page(1).and_then(PageRecord::content).unwrap().title, "First");
    }

    #[tokio::test]
    async fn test_ensure_loaded_fetches_once() {
        let source = MemorySource::new().with_page(7, content("Seven"));
        let mut store = PageStore::new();

        let record = store.ensure_loaded(7, &source).await.unwrap();
        assert!(record.is_available());
        store.ensure_loaded(7, &source).await.unwrap();
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_ensure_loaded_does_not_retry_failures() {
        let source = MemorySource::new();
        let mut store = PageStore::new();

        let record = store.ensure_loaded(42, &source).await.unwrap();
        assert_eq!(*record, PageRecord::Unavailable);
        store.ensure_loaded(42, &source).await.unwrap();
        assert_eq!(source.fetch_count(), 1);
    }

    #[test]
    fn test_dropped_load_releases_page() {
        let mut store = PageStore::new();
        let load = store.begin_load(5).unwrap();
        drop(load);

        assert!(!store.is_loading(5));
        let again = store.begin_load(5).unwrap();
        assert_eq!(again.page(), 5);
        assert!(store.is_loading(5));
    }

    #[tokio::test]
    async fn test_ensure_loaded_after_abandoned_load() {
        let source = MemorySource::new().with_page(5, content("Five"));
        let mut store = PageStore::new();
        let _ = store.begin_load(5);

        let record = store.ensure_loaded(5, &source).await.unwrap();
        assert!(record.is_available());
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_ensure_loaded_defers_to_outstanding_load() {
        let source = MemorySource::new().with_page(8, content("Eight"));
        let mut store = PageStore::new();
        let _load = store.begin_load(8).unwrap();

        assert!(store.ensure_loaded(8, &source).await.is_none());
        assert_eq!(source.fetch_count(), 0);
    }
}
