//! Reader configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::zoom::Zoom;

/// Page count used when no manifest can be loaded.
pub const DEFAULT_TOTAL_PAGES: u32 = 1313;
/// Most search results returned for one query.
pub const MAX_SEARCH_RESULTS: usize = 5;
/// Shortest query that triggers a search.
pub const MIN_QUERY_LEN: usize = 2;

/// Tunables for a reading session. Every field has a default, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderConfig {
    pub default_total_pages: u32,
    pub default_zoom: Zoom,
    pub max_search_results: usize,
    pub min_query_len: usize,
    /// Directory holding the scanned page images.
    pub image_root: PathBuf,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            default_total_pages: DEFAULT_TOTAL_PAGES,
            default_zoom: Zoom::DEFAULT,
            max_search_results: MAX_SEARCH_RESULTS,
            min_query_len: MIN_QUERY_LEN,
            image_root: PathBuf::from("../clrs_pages"),
        }
    }
}

impl ReaderConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn with_image_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.image_root = root.into();
        self
    }
}
