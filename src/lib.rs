//! # folio
//!
//! The state core of a paginated book reader: which page is shown, in which
//! view and at which zoom, what has been fetched, where the page sits in the
//! table of contents, and what a keyword search finds.
//!
//! ## Features
//!
//! - Page navigation bounded to the document, with image and text views
//! - Fixed zoom levels with step in/out
//! - Lazily fetched, session-long page cache with placeholder fallback
//! - Part/chapter/section table of contents with filtering and highlight lookup
//! - Search over manifest titles and cached page text
//! - Change notification per state field, with unsubscribe on drop
//!
//! ## Quick Start
//!
//! ```
//! use folio::{MemoryPreferences, MemorySource, Manifest, PageContent, Reader, ReaderConfig};
//!
//! # tokio_test_block(async {
//! let source = MemorySource::new()
//!     .with_manifest(Manifest::new(1313).with_page(151, "Heapsort"))
//!     .with_page(151, PageContent::new("Heapsort", "<p>heaps</p>"));
//!
//! let mut reader = Reader::open(&source, MemoryPreferences::new(), ReaderConfig::default()).await;
//! if let Some(load) = reader.go_to_page(151) {
//!     reader.fetch(load, &source).await;
//! }
//!
//! assert_eq!(reader.snapshot().page_title, "Heapsort");
//! assert_eq!(reader.search("heap")[0].page, 151);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
//! # }
//! ```
//!
//! ## Working with State
//!
//! The [`Reader`] owns a [`ViewState`]; listeners subscribe per [`Field`] and
//! are called every time that field is set:
//!
//! ```
//! use folio::{Field, Reader, Value, ViewMode};
//!
//! let mut reader: Reader = Reader::new(None, Default::default(), Default::default());
//! let sub = reader.subscribe(Field::View, |value| {
//!     assert_eq!(*value, Value::View(ViewMode::Text));
//! });
//! reader.set_view(ViewMode::Text);
//! drop(sub);
//! ```

pub mod config;
pub mod error;
pub mod keymap;
pub mod notify;
pub mod prefs;
pub mod reader;
pub mod search;
pub mod source;
pub mod state;
pub mod store;
pub mod toc;
pub mod zoom;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use keymap::Command;
pub use notify::{Notifier, Subscription};
pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use reader::{PageStatus, Reader, Snapshot};
pub use search::{SearchIndex, SearchResult};
pub use source::{Manifest, ManifestPage, ManifestSource, MemorySource, PageContent, PageSource};
#[cfg(feature = "fs")]
pub use source::DirSource;
pub use state::{Field, Value, ViewMode, ViewState};
pub use store::{PageLoad, PageRecord, PageStore};
pub use toc::{TocEntry, TocIndex, TocKind};
pub use zoom::Zoom;
