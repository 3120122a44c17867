//! A reading session.
//!
//! [`Reader`] owns the view state, page cache, table of contents, manifest
//! and preferences for one session, and implements every state transition.
//! Transitions that move to a page return the [`PageLoad`] the caller has to
//! perform (if the page is neither cached nor already being fetched); report
//! the outcome with [`Reader::finish_load`] or let [`Reader::fetch`] do both.
//! Dropping the load instead leaves the page to a later
//! [`Reader::ensure_current_loaded`].

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::ReaderConfig;
use crate::error::Result;
use crate::keymap::Command;
use crate::notify::Subscription;
use crate::prefs::{MemoryPreferences, PreferenceStore, VIEW_KEY, ZOOM_KEY};
use crate::search::{SearchIndex, SearchResult};
use crate::source::{Manifest, ManifestSource, PageContent, PageSource, page_image_path};
use crate::state::{Field, Value, ViewMode, ViewState};
use crate::store::{PageLoad, PageRecord, PageStore, UNAVAILABLE_TEXT};
use crate::toc::{TocEntry, TocIndex};
use crate::zoom::Zoom;

/// Fetch status of the page on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    NotRequested,
    Loading,
    Loaded,
    Unavailable,
}

/// Everything a renderer needs to draw the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub current_page: u32,
    pub total_pages: u32,
    /// Reading progress in percent.
    pub progress: f64,
    /// Title of the current page, or `Page N` until its content is known.
    pub page_title: String,
    pub page_status: PageStatus,
    /// Body for the text view: page markup, or placeholder text.
    pub text: String,
    pub image_path: PathBuf,
    pub view: ViewMode,
    pub zoom: Zoom,
    pub menu_open: bool,
    pub toc_open: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub current_toc_entry: Option<TocEntry>,
}

/// State and behaviour of one reading session.
#[derive(Debug)]
pub struct Reader<P: PreferenceStore = MemoryPreferences> {
    config: ReaderConfig,
    state: ViewState,
    store: PageStore,
    toc: TocIndex,
    manifest: Manifest,
    prefs: P,
    toc_highlight: Option<usize>,
}

impl<P: PreferenceStore> Reader<P> {
    /// Start a session on page 1.
    ///
    /// Without a manifest (or with one reporting zero pages) the configured
    /// default page count is used. View and zoom come from `prefs`.
    pub fn new(manifest: Option<Manifest>, prefs: P, config: ReaderConfig) -> Self {
        let manifest = manifest.unwrap_or_default();
        let total_pages = if manifest.total_pages > 0 {
            manifest.total_pages
        } else {
            config.default_total_pages
        };

        let state = ViewState::new(total_pages)
            .with_preferences(prefs.view(), prefs.zoom_or(config.default_zoom));

        let mut reader = Self {
            config,
            state,
            store: PageStore::new(),
            toc: TocIndex::builtin(),
            manifest,
            prefs,
            toc_highlight: None,
        };
        reader.refresh_toc_highlight();
        reader
    }

    /// Load the manifest from `source` and start a session.
    ///
    /// A manifest that cannot be loaded is logged and replaced by defaults.
    pub async fn open<M: ManifestSource>(source: &M, prefs: P, config: ReaderConfig) -> Self {
        let manifest = match source.load_manifest().await {
            Ok(manifest) => {
                info!(
                    total_pages = manifest.total_pages,
                    titles = manifest.pages.len(),
                    "manifest loaded"
                );
                Some(manifest)
            }
            Err(e) => {
                warn!(error = %e, "could not load manifest, using defaults");
                None
            }
        };
        Self::new(manifest, prefs, config)
    }

    /// Replace the table of contents.
    pub fn with_toc(mut self, toc: TocIndex) -> Self {
        self.set_toc(toc);
        self
    }

    pub fn set_toc(&mut self, toc: TocIndex) {
        self.toc = toc;
        self.refresh_toc_highlight();
    }

    /// Serve page images from `root`.
    pub fn set_image_root(&mut self, root: impl Into<PathBuf>) {
        self.config.image_root = root.into();
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn toc(&self) -> &TocIndex {
        &self.toc
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    pub fn current_page(&self) -> u32 {
        self.state.current_page()
    }

    /// Listen for changes to `field`.
    pub fn subscribe(&self, field: Field, callback: impl Fn(&Value) + 'static) -> Subscription {
        self.state.subscribe(field, callback)
    }

    // --- Navigation ---

    /// Move to `page`. Pages outside `1..=total_pages` are ignored.
    ///
    /// Returns the load to perform, if the page still has to be fetched.
    pub fn go_to_page(&mut self, page: u32) -> Option<PageLoad> {
        if let Err(e) = self.state.set(Value::CurrentPage(page)) {
            trace!(page, error = %e, "navigation ignored");
            return None;
        }
        self.refresh_toc_highlight();
        self.store.begin_load(page)
    }

    /// Move by `delta` pages; targets out of range are ignored, not clamped.
    pub fn navigate(&mut self, delta: i32) -> Option<PageLoad> {
        let requested = i64::from(self.state.current_page()) + i64::from(delta);
        match u32::try_from(requested) {
            Ok(page) => self.go_to_page(page),
            Err(_) => {
                trace!(requested, "navigation ignored");
                None
            }
        }
    }

    pub fn first_page(&mut self) -> Option<PageLoad> {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> Option<PageLoad> {
        self.go_to_page(self.state.total_pages())
    }

    /// Jump to a TOC entry's page and close the TOC.
    pub fn select_toc_entry(&mut self, page: u32) -> Option<PageLoad> {
        let load = self.go_to_page(page);
        self.close_toc();
        load
    }

    /// Jump to a search hit and close the menu.
    pub fn select_search_result(&mut self, page: u32) -> Option<PageLoad> {
        let load = self.go_to_page(page);
        self.close_menu();
        load
    }

    /// Begin loading the current page, e.g. right after opening.
    pub fn load_current(&mut self) -> Option<PageLoad> {
        self.store.begin_load(self.state.current_page())
    }

    // --- Page loading ---

    /// Record the outcome of a fetch for `page`.
    ///
    /// The result is cached under `page`. Listeners of
    /// [`Field::CurrentPage`] are notified only when `page` is still on
    /// screen, so a late response never redraws a different page. Pages
    /// outside `1..=total_pages` are ignored.
    pub fn finish_load(&mut self, page: u32, result: Result<PageContent>) {
        if !self.state.contains(page) {
            trace!(page, total = self.state.total_pages(), "completion ignored");
            return;
        }
        self.store.complete(page, result);
        if page == self.state.current_page() {
            self.update(Value::CurrentPage(page));
        } else {
            debug!(page, current = self.state.current_page(), "late page load cached");
        }
    }

    /// Perform `load` against `source` and record the outcome.
    pub async fn fetch<S: PageSource>(&mut self, load: PageLoad, source: &S) {
        let result = source.fetch_page(load.page()).await;
        self.finish_load(load.page(), result);
    }

    /// Fetch the current page from `source` unless cached or in flight.
    pub async fn ensure_current_loaded<S: PageSource>(&mut self, source: &S) {
        if let Some(load) = self.load_current() {
            self.fetch(load, source).await;
        }
    }

    /// Cached record for `page`.
    pub fn page(&self, page: u32) -> Option<&PageRecord> {
        self.store.get_page(page)
    }

    // --- View & zoom ---

    /// Switch view mode, remember it, and close the menu.
    pub fn set_view(&mut self, view: ViewMode) {
        self.update(Value::View(view));
        self.persist(VIEW_KEY, view.as_str());
        self.close_menu();
    }

    pub fn toggle_view(&mut self) {
        self.set_view(self.state.view().toggled());
    }

    /// Set and remember the zoom level.
    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.update(Value::Zoom(zoom));
        self.persist(ZOOM_KEY, &zoom.percent().to_string());
    }

    /// Set the zoom from a percentage; only permitted levels are accepted.
    pub fn set_zoom_percent(&mut self, percent: u16) -> Result<()> {
        self.set_zoom(Zoom::new(percent)?);
        Ok(())
    }

    /// Step one level up; returns false at the top.
    pub fn zoom_in(&mut self) -> bool {
        match self.state.zoom().step_in() {
            Some(zoom) => {
                self.set_zoom(zoom);
                true
            }
            None => false,
        }
    }

    /// Step one level down; returns false at the bottom.
    pub fn zoom_out(&mut self) -> bool {
        match self.state.zoom().step_out() {
            Some(zoom) => {
                self.set_zoom(zoom);
                true
            }
            None => false,
        }
    }

    /// Path of the current page image, for opening it full size. Closes the menu.
    pub fn fullscreen_image(&mut self) -> PathBuf {
        self.close_menu();
        self.image_path(self.state.current_page())
    }

    pub fn image_path(&self, page: u32) -> PathBuf {
        page_image_path(&self.config.image_root, page)
    }

    // --- Menu & TOC ---

    pub fn toggle_menu(&mut self) {
        self.update(Value::MenuOpen(!self.state.menu_open()));
    }

    pub fn close_menu(&mut self) {
        self.update(Value::MenuOpen(false));
    }

    /// Flip the TOC panel; opening it refreshes the highlighted entry.
    pub fn toggle_toc(&mut self) {
        let open = !self.state.toc_open();
        self.update(Value::TocOpen(open));
        if open {
            self.refresh_toc_highlight();
        }
    }

    pub fn close_toc(&mut self) {
        self.update(Value::TocOpen(false));
    }

    /// The TOC entry containing the current page.
    pub fn toc_highlight(&self) -> Option<&TocEntry> {
        self.toc_highlight.map(|i| &self.toc.entries()[i])
    }

    /// Position of [`toc_highlight`](Reader::toc_highlight) in the full TOC.
    pub fn toc_highlight_index(&self) -> Option<usize> {
        self.toc_highlight
    }

    pub fn filter_toc(&self, query: &str) -> Vec<&TocEntry> {
        self.toc.filter(query)
    }

    // --- Search ---

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        SearchIndex::new(&self.manifest, &self.store)
            .with_max_results(self.config.max_search_results)
            .with_min_query_len(self.config.min_query_len)
            .search(query)
    }

    // --- Keyboard ---

    /// Run a keyboard command.
    pub fn apply(&mut self, command: Command) -> Option<PageLoad> {
        match command {
            Command::Navigate(delta) => return self.navigate(delta),
            Command::FirstPage => return self.first_page(),
            Command::LastPage => return self.last_page(),
            Command::ToggleView => self.toggle_view(),
            Command::ToggleMenu | Command::GoTo => self.toggle_menu(),
            Command::ToggleToc => self.toggle_toc(),
            Command::CloseAll => {
                self.close_menu();
                self.close_toc();
            }
            Command::ZoomIn => {
                self.zoom_in();
            }
            Command::ZoomOut => {
                self.zoom_out();
            }
            Command::SetZoom(zoom) => self.set_zoom(zoom),
        }
        None
    }

    // --- Presentation ---

    pub fn snapshot(&self) -> Snapshot {
        let page = self.state.current_page();
        let total = self.state.total_pages();
        let record = self.store.get_page(page);

        let page_status = match record {
            Some(PageRecord::Loaded(_)) => PageStatus::Loaded,
            Some(PageRecord::Unavailable) => PageStatus::Unavailable,
            None if self.store.is_loading(page) => PageStatus::Loading,
            None => PageStatus::NotRequested,
        };
        let (page_title, text) = match record.and_then(PageRecord::content) {
            Some(content) => (content.title.clone(), content.content.clone()),
            None => (format!("Page {page}"), UNAVAILABLE_TEXT.to_string()),
        };

        Snapshot {
            current_page: page,
            total_pages: total,
            progress: f64::from(page) / f64::from(total) * 100.0,
            page_title,
            page_status,
            text,
            image_path: self.image_path(page),
            view: self.state.view(),
            zoom: self.state.zoom(),
            menu_open: self.state.menu_open(),
            toc_open: self.state.toc_open(),
            can_go_back: page > 1,
            can_go_forward: page < total,
            current_toc_entry: self.toc_highlight().cloned(),
        }
    }

    // --- Internals ---

    fn refresh_toc_highlight(&mut self) {
        self.toc_highlight = self.toc.current_index_for(self.state.current_page());
    }

    fn update(&mut self, value: Value) {
        if let Err(e) = self.state.set(value) {
            warn!(error = %e, "state update rejected");
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.prefs.set_item(key, value) {
            warn!(key, error = %e, "could not save preference");
        }
    }
}
