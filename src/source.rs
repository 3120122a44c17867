//! Asset sources: the manifest, per-page JSON payloads and page images.
//!
//! A data root is laid out as:
//!
//! ```text
//! manifest.json
//! pages/page-0001.json
//! pages/page-0002.json
//! ...
//! ```
//!
//! Page images live under a separate root as `clrs-0001.png`, `clrs-0002.png`, ...

use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Summary document listing the page count and per-page titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    pub total_pages: u32,
    #[serde(default)]
    pub pages: Vec<ManifestPage>,
}

/// One page listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestPage {
    pub page: u32,
    pub title: String,
    #[serde(default)]
    pub has_content: bool,
}

impl Manifest {
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: u32, title: impl Into<String>) -> Self {
        self.pages.push(ManifestPage {
            page,
            title: title.into(),
            has_content: true,
        });
        self
    }

    /// Manifest title for `page`, if listed.
    pub fn title_of(&self, page: u32) -> Option<&str> {
        self.pages
            .iter()
            .find(|p| p.page == page)
            .map(|p| p.title.as_str())
    }
}

/// Structured content of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    /// Page body as HTML markup.
    pub content: String,
}

impl PageContent {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Delivers the manifest.
#[allow(async_fn_in_trait)]
pub trait ManifestSource {
    async fn load_manifest(&self) -> Result<Manifest>;
}

/// Delivers per-page content.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, page: u32) -> Result<PageContent>;
}

/// File name of a page payload, e.g. `page-0042.json`.
pub fn page_file_name(page: u32) -> String {
    format!("page-{page:04}.json")
}

/// File name of a page image, e.g. `clrs-0042.png`.
pub fn page_image_name(page: u32) -> String {
    format!("clrs-{page:04}.png")
}

/// Location of the image for `page` under `root`.
pub fn page_image_path(root: &Path, page: u32) -> PathBuf {
    root.join(page_image_name(page))
}

// --- Implementation: Directory ---

/// Reads assets from a data directory on disk.
#[cfg(feature = "fs")]
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

#[cfg(feature = "fs")]
impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("manifest.json")
    }

    pub fn page_path(&self, page: u32) -> PathBuf {
        self.root.join("pages").join(page_file_name(page))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(feature = "fs")]
impl ManifestSource for DirSource {
    async fn load_manifest(&self) -> Result<Manifest> {
        Self::read_json(&self.manifest_path()).await
    }
}

#[cfg(feature = "fs")]
impl PageSource for DirSource {
    async fn fetch_page(&self, page: u32) -> Result<PageContent> {
        Self::read_json(&self.page_path(page)).await
    }
}

// --- Implementation: In-Memory ---

/// An in-memory source; pages not inserted fail to fetch.
///
/// Counts fetch attempts so callers can observe caching behaviour.
#[derive(Debug, Default)]
pub struct MemorySource {
    manifest: Option<Manifest>,
    pages: HashMap<u32, PageContent>,
    fetches: Cell<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn with_page(mut self, page: u32, content: PageContent) -> Self {
        self.pages.insert(page, content);
        self
    }

    /// Number of `fetch_page` calls made so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl ManifestSource for MemorySource {
    async fn load_manifest(&self) -> Result<Manifest> {
        self.manifest
            .clone()
            .ok_or_else(|| Error::NotFound("manifest".to_string()))
    }
}

impl PageSource for MemorySource {
    async fn fetch_page(&self, page: u32) -> Result<PageContent> {
        self.fetches.set(self.fetches.get() + 1);
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| Error::NotFound(page_file_name(page)))
    }
}
