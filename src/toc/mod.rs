//! Table of contents: a flat, ordered list of parts, chapters and sections.
//!
//! Parts are headers without a page. Chapters and sections always carry a
//! page, and pages never decrease along the list.

mod builtin;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Level of a TOC entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocKind {
    Part,
    Chapter,
    Section,
}

/// A single TOC entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    #[serde(rename = "type")]
    pub kind: TocKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl TocEntry {
    pub fn part(title: impl Into<String>) -> Self {
        Self {
            kind: TocKind::Part,
            title: title.into(),
            page: None,
        }
    }

    pub fn chapter(title: impl Into<String>, page: u32) -> Self {
        Self {
            kind: TocKind::Chapter,
            title: title.into(),
            page: Some(page),
        }
    }

    pub fn section(title: impl Into<String>, page: u32) -> Self {
        Self {
            kind: TocKind::Section,
            title: title.into(),
            page: Some(page),
        }
    }

    /// Chapters and sections can be navigated to; parts cannot.
    pub fn is_navigable(&self) -> bool {
        self.kind != TocKind::Part
    }

    fn matches(&self, needle: &str) -> bool {
        self.is_navigable() && self.title.to_lowercase().contains(needle)
    }
}

/// The static table of contents with filtering and page lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocIndex {
    entries: Vec<TocEntry>,
}

impl TocIndex {
    /// Build an index, checking the ordering and page rules.
    pub fn from_entries(entries: Vec<TocEntry>) -> Result<Self> {
        let mut last_page = 0;
        for (i, entry) in entries.iter().enumerate() {
            match (entry.kind, entry.page) {
                (TocKind::Part, None) => {}
                (TocKind::Part, Some(_)) => {
                    return Err(Error::InvalidToc(format!(
                        "entry {i} ({:?}) is a part with a page",
                        entry.title
                    )));
                }
                (_, None) => {
                    return Err(Error::InvalidToc(format!(
                        "entry {i} ({:?}) has no page",
                        entry.title
                    )));
                }
                (_, Some(page)) => {
                    if page < last_page {
                        return Err(Error::InvalidToc(format!(
                            "entry {i} ({:?}) goes back to page {page} after page {last_page}",
                            entry.title
                        )));
                    }
                    last_page = page;
                }
            }
        }
        Ok(Self { entries })
    }

    /// Parse and validate a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_entries(serde_json::from_str(json)?)
    }

    /// The embedded table of contents of the 1313-page edition.
    pub fn builtin() -> Self {
        Self {
            entries: builtin::ENTRIES.iter().map(|e| e.to_entry()).collect(),
        }
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose title contains `query`, case-insensitively, in TOC order.
    ///
    /// Only chapters and sections are matched. Every part header that
    /// precedes at least one matching entry is kept. An empty query returns
    /// every entry.
    pub fn filter(&self, query: &str) -> Vec<&TocEntry> {
        if query.is_empty() {
            return self.entries.iter().collect();
        }

        let needle = query.to_lowercase();
        let Some(last_match) = self.entries.iter().rposition(|e| e.matches(&needle)) else {
            return Vec::new();
        };

        self.entries[..=last_match]
            .iter()
            .filter(|e| e.kind == TocKind::Part || e.matches(&needle))
            .collect()
    }

    /// Position of the entry containing `page`; see [`current_entry_for`].
    ///
    /// [`current_entry_for`]: TocIndex::current_entry_for
    pub fn current_index_for(&self, page: u32) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|e| e.page.is_some_and(|p| p <= page))
    }

    /// The last chapter or section starting at or before `page`.
    pub fn current_entry_for(&self, page: u32) -> Option<&TocEntry> {
        self.current_index_for(page).map(|i| &self.entries[i])
    }
}

impl Default for TocIndex {
    fn default() -> Self {
        Self::builtin()
    }
}
