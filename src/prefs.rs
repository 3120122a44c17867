//! Persisted reader preferences.
//!
//! The reader remembers the view mode and zoom level between sessions through
//! a string key/value store shaped like browser local storage.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::state::ViewMode;
use crate::zoom::Zoom;

/// Key holding the view mode (`"image"` or `"text"`).
pub const VIEW_KEY: &str = "readerView";
/// Key holding the zoom percentage as a decimal string.
pub const ZOOM_KEY: &str = "readerZoom";

/// A string key/value store.
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Stored view mode, or the default when absent or unrecognised.
    fn view(&self) -> ViewMode {
        self.get_item(VIEW_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Stored zoom level, or `fallback` when absent or not a permitted level.
    fn zoom_or(&self, fallback: Zoom) -> Zoom {
        self.get_item(ZOOM_KEY)
            .and_then(|v| Zoom::parse(&v))
            .unwrap_or(fallback)
    }
}

/// Preferences held in memory for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    items: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a flat JSON object in a file.
///
/// The whole object is rewritten on every `set_item`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Open `path`. A missing file starts empty; an unreadable one is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, json)
            .map_err(|e| Error::Preferences(format!("{}: {e}", self.path.display())))
    }
}
