//! WASM bindings for browser-based reading.
//!
//! A [`WasmReader`] is the session object handed to JavaScript. Methods that
//! move to a page return the page number the page still has to be fetched
//! for (or `undefined`); the caller fetches `pages/page-NNNN.json` and
//! reports back with [`WasmReader::page_loaded`] or [`WasmReader::page_failed`].
//! Structured results cross the boundary as JSON strings.

use std::collections::HashMap;

use js_sys::{Function, Reflect};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::keymap::Command;
use crate::notify::Subscription;
use crate::prefs::PreferenceStore;
use crate::reader::Reader;
use crate::source::{Manifest, PageContent};
use crate::state::{Field, Value, ViewMode};
use crate::store::PageLoad;
use crate::toc::TocIndex;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Preferences backed by any object with `getItem`/`setItem` methods,
/// such as `window.localStorage`.
pub struct JsPreferences {
    storage: JsValue,
}

impl JsPreferences {
    pub fn new(storage: JsValue) -> Self {
        Self { storage }
    }

    fn method(&self, name: &str) -> Option<Function> {
        if self.storage.is_undefined() || self.storage.is_null() {
            return None;
        }
        Reflect::get(&self.storage, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl PreferenceStore for JsPreferences {
    fn get_item(&self, key: &str) -> Option<String> {
        let get = self.method("getItem")?;
        get.call1(&self.storage, &JsValue::from_str(key))
            .ok()?
            .as_string()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let Some(set) = self.method("setItem") else {
            return Ok(());
        };
        set.call2(&self.storage, &JsValue::from_str(key), &JsValue::from_str(value))
            .map(drop)
            .map_err(|e| Error::Preferences(format!("{e:?}")))
    }
}

fn parse_field(name: &str) -> Option<Field> {
    Some(match name {
        "currentPage" => Field::CurrentPage,
        "view" => Field::View,
        "zoom" => Field::Zoom,
        "menuOpen" => Field::MenuOpen,
        "tocOpen" => Field::TocOpen,
        _ => return None,
    })
}

fn value_to_js(value: &Value) -> JsValue {
    match *value {
        Value::CurrentPage(page) => JsValue::from(page),
        Value::View(view) => JsValue::from_str(view.as_str()),
        Value::Zoom(zoom) => JsValue::from(zoom.percent()),
        Value::MenuOpen(open) | Value::TocOpen(open) => JsValue::from_bool(open),
    }
}

/// Hold `load` until JavaScript reports its outcome; returns the page to fetch.
fn track(pending: &mut HashMap<u32, PageLoad>, load: Option<PageLoad>) -> Option<u32> {
    let load = load?;
    let page = load.page();
    pending.insert(page, load);
    Some(page)
}

/// Handle returned by [`WasmReader::subscribe`]; call `free()` to unsubscribe.
#[wasm_bindgen]
pub struct WasmSubscription {
    _inner: Subscription,
}

/// A reading session driven from JavaScript.
///
/// Listeners run synchronously inside the call that changed the state and
/// must not call back into the same reader.
#[wasm_bindgen]
pub struct WasmReader {
    inner: Reader<JsPreferences>,
    pending: HashMap<u32, PageLoad>,
}

#[wasm_bindgen]
impl WasmReader {
    /// Start a session from the manifest JSON text (if it could be fetched)
    /// and a storage object for preferences.
    ///
    /// An unparsable manifest is logged and replaced by defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(manifest_json: Option<String>, storage: JsValue) -> WasmReader {
        let manifest = manifest_json.and_then(|json| match serde_json::from_str::<Manifest>(&json) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                warn!(error = %e, "could not parse manifest, using defaults");
                None
            }
        });
        WasmReader {
            inner: Reader::new(manifest, JsPreferences::new(storage), ReaderConfig::default()),
            pending: HashMap::new(),
        }
    }

    /// Replace the built-in table of contents with a JSON array of entries.
    #[wasm_bindgen(js_name = setToc)]
    pub fn set_toc(&mut self, toc_json: &str) -> std::result::Result<(), JsValue> {
        let toc = TocIndex::from_json(toc_json).map_err(to_js)?;
        self.inner.set_toc(toc);
        Ok(())
    }

    /// Set the directory page images are served from.
    #[wasm_bindgen(js_name = setImageRoot)]
    pub fn set_image_root(&mut self, root: &str) {
        self.inner.set_image_root(root);
    }

    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.inner.current_page()
    }

    #[wasm_bindgen(getter, js_name = totalPages)]
    pub fn total_pages(&self) -> u32 {
        self.inner.state().total_pages()
    }

    /// Listen for changes to `field` (`currentPage`, `view`, `zoom`,
    /// `menuOpen` or `tocOpen`).
    pub fn subscribe(
        &self,
        field: &str,
        callback: Function,
    ) -> std::result::Result<WasmSubscription, JsValue> {
        let field = parse_field(field).ok_or_else(|| to_js(format!("unknown field: {field}")))?;
        let inner = self.inner.subscribe(field, move |value| {
            if let Err(e) = callback.call1(&JsValue::NULL, &value_to_js(value)) {
                warn!(error = ?e, "listener threw");
            }
        });
        Ok(WasmSubscription { _inner: inner })
    }

    // --- Navigation ---

    #[wasm_bindgen(js_name = goToPage)]
    pub fn go_to_page(&mut self, page: u32) -> Option<u32> {
        track(&mut self.pending, self.inner.go_to_page(page))
    }

    pub fn navigate(&mut self, delta: i32) -> Option<u32> {
        track(&mut self.pending, self.inner.navigate(delta))
    }

    #[wasm_bindgen(js_name = firstPage)]
    pub fn first_page(&mut self) -> Option<u32> {
        track(&mut self.pending, self.inner.first_page())
    }

    #[wasm_bindgen(js_name = lastPage)]
    pub fn last_page(&mut self) -> Option<u32> {
        track(&mut self.pending, self.inner.last_page())
    }

    #[wasm_bindgen(js_name = selectTocEntry)]
    pub fn select_toc_entry(&mut self, page: u32) -> Option<u32> {
        track(&mut self.pending, self.inner.select_toc_entry(page))
    }

    #[wasm_bindgen(js_name = selectSearchResult)]
    pub fn select_search_result(&mut self, page: u32) -> Option<u32> {
        track(&mut self.pending, self.inner.select_search_result(page))
    }

    #[wasm_bindgen(js_name = loadCurrent)]
    pub fn load_current(&mut self) -> Option<u32> {
        track(&mut self.pending, self.inner.load_current())
    }

    // --- Page loading ---

    /// Report the fetched JSON for `page`. Unparsable JSON marks the page
    /// unavailable.
    #[wasm_bindgen(js_name = pageLoaded)]
    pub fn page_loaded(&mut self, page: u32, json: &str) {
        let result = serde_json::from_str::<PageContent>(json).map_err(Error::from);
        self.inner.finish_load(page, result);
        self.pending.remove(&page);
    }

    /// Report that fetching `page` failed.
    #[wasm_bindgen(js_name = pageFailed)]
    pub fn page_failed(&mut self, page: u32, reason: &str) {
        self.inner
            .finish_load(page, Err(Error::NotFound(reason.to_string())));
        self.pending.remove(&page);
    }

    // --- View & zoom ---

    #[wasm_bindgen(js_name = setView)]
    pub fn set_view(&mut self, view: &str) -> std::result::Result<(), JsValue> {
        let view: ViewMode = view.parse().map_err(to_js)?;
        self.inner.set_view(view);
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleView)]
    pub fn toggle_view(&mut self) {
        self.inner.toggle_view();
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, percent: u16) -> std::result::Result<(), JsValue> {
        self.inner.set_zoom_percent(percent).map_err(to_js)
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> bool {
        self.inner.zoom_in()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> bool {
        self.inner.zoom_out()
    }

    /// URL of the current page image for a full-size view. Closes the menu.
    #[wasm_bindgen(js_name = fullscreenImage)]
    pub fn fullscreen_image(&mut self) -> String {
        self.inner.fullscreen_image().to_string_lossy().into_owned()
    }

    #[wasm_bindgen(js_name = imagePath)]
    pub fn image_path(&self, page: u32) -> String {
        self.inner.image_path(page).to_string_lossy().into_owned()
    }

    // --- Menu & TOC ---

    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu(&mut self) {
        self.inner.toggle_menu();
    }

    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&mut self) {
        self.inner.close_menu();
    }

    #[wasm_bindgen(js_name = toggleToc)]
    pub fn toggle_toc(&mut self) {
        self.inner.toggle_toc();
    }

    #[wasm_bindgen(js_name = closeToc)]
    pub fn close_toc(&mut self) {
        self.inner.close_toc();
    }

    /// Position of the highlighted entry in the full TOC.
    #[wasm_bindgen(js_name = tocHighlight)]
    pub fn toc_highlight(&self) -> Option<usize> {
        self.inner.toc_highlight_index()
    }

    /// Filtered TOC entries as a JSON array.
    #[wasm_bindgen(js_name = filterToc)]
    pub fn filter_toc(&self, query: &str) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.inner.filter_toc(query)).map_err(to_js)
    }

    // --- Search, keys, snapshot ---

    /// Search hits as a JSON array of `{page, title}`.
    pub fn search(&self, query: &str) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.inner.search(query)).map_err(to_js)
    }

    /// Handle a `KeyboardEvent.key` value. Returns the page to fetch, if any.
    pub fn key(&mut self, key: &str) -> Option<u32> {
        let command = Command::from_key(key)?;
        track(&mut self.pending, self.inner.apply(command))
    }

    /// Whether `key` is bound, so the caller can `preventDefault()`.
    #[wasm_bindgen(js_name = isBound)]
    pub fn is_bound(key: &str) -> bool {
        Command::from_key(key).is_some()
    }

    pub fn snapshot(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot()).map_err(to_js)
    }
}
