//! Error types for folio operations.

use thiserror::Error;

/// Errors that can occur while loading reader assets or changing reader state.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("page {page} is outside 1..={total}")]
    PageOutOfRange { page: u32, total: u32 },

    #[error("unsupported zoom level: {0}%")]
    UnknownZoom(u16),

    #[error("unknown view mode: {0}")]
    UnknownView(String),

    #[error("invalid table of contents: {0}")]
    InvalidToc(String),

    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("preference store error: {0}")]
    Preferences(String),
}

pub type Result<T> = std::result::Result<T, Error>;
