//! Directory source tests.
//!
//! Lay out a data directory on disk and read it through [`DirSource`],
//! alone and as the backing source of a session.

#![cfg(feature = "fs")]

use std::fs;
use std::path::Path;

use folio::{
    DirSource, Error, FilePreferences, ManifestSource, PageRecord, PageSource, PageStatus,
    PreferenceStore, Reader, ReaderConfig, ViewMode,
};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
    "title": "Introduction to Algorithms, Third Edition",
    "authors": "Cormen, Leiserson, Rivest, Stein",
    "totalPages": 12,
    "pages": [
        { "page": 3, "title": "Preface", "hasContent": true },
        { "page": 10, "title": "The Role of Algorithms in Computing", "hasContent": true }
    ]
}"#;

fn write_page(root: &Path, page: u32, title: &str, content: &str) {
    let json = serde_json::json!({ "page": page, "title": title, "content": content });
    fs::write(
        root.join("pages").join(format!("page-{page:04}.json")),
        json.to_string(),
    )
    .unwrap();
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(dir.path().join("manifest.json"), MANIFEST).unwrap();
    write_page(dir.path(), 1, "Cover", "<h1>Introduction to Algorithms</h1>");
    write_page(dir.path(), 3, "Preface", "<p>Before there were computers</p>");
    dir
}

// ============================================================================
// Source
// ============================================================================

#[tokio::test]
async fn test_load_manifest() {
    let dir = data_dir();
    let source = DirSource::new(dir.path());
    let manifest = source.load_manifest().await.unwrap();

    assert_eq!(manifest.total_pages, 12);
    assert_eq!(manifest.title_of(3), Some("Preface"));
    assert_eq!(source.manifest_path(), dir.path().join("manifest.json"));
}

#[tokio::test]
async fn test_fetch_page_and_missing_page() {
    let dir = data_dir();
    let source = DirSource::new(dir.path());

    let page = source.fetch_page(3).await.unwrap();
    assert_eq!(page.title, "Preface");
    assert!(page.content.contains("computers"));

    assert!(matches!(source.fetch_page(4).await, Err(Error::NotFound(_))));
    assert!(source.page_path(4).ends_with("pages/page-0004.json"));
}

#[tokio::test]
async fn test_malformed_page_is_a_json_error() {
    let dir = data_dir();
    fs::write(dir.path().join("pages/page-0005.json"), "{ not json").unwrap();
    let source = DirSource::new(dir.path());
    assert!(matches!(source.fetch_page(5).await, Err(Error::Json(_))));
}

// ============================================================================
// Session
// ============================================================================

#[tokio::test]
async fn test_session_over_directory() {
    let dir = data_dir();
    let source = DirSource::new(dir.path());
    let config = ReaderConfig::default().with_image_root("/srv/clrs_pages");
    let mut reader = Reader::open(&source, folio::MemoryPreferences::new(), config).await;

    assert_eq!(reader.state().total_pages(), 12);
    reader.ensure_current_loaded(&source).await;
    assert_eq!(reader.snapshot().page_title, "Cover");

    for _ in 0..2 {
        if let Some(load) = reader.navigate(1) {
            reader.fetch(load, &source).await;
        }
    }
    let snapshot = reader.snapshot();
    assert_eq!(snapshot.current_page, 3);
    assert_eq!(snapshot.page_status, PageStatus::Loaded);
    assert_eq!(snapshot.image_path, Path::new("/srv/clrs_pages/clrs-0003.png"));

    // Page 2 has no payload on disk
    assert_eq!(reader.page(2), Some(&PageRecord::Unavailable));
    let hits: Vec<u32> = reader.search("comput").iter().map(|r| r.page).collect();
    assert_eq!(hits, vec![10, 3]);
}

#[tokio::test]
async fn test_missing_manifest_falls_back() {
    let dir = TempDir::new().unwrap();
    let source = DirSource::new(dir.path());
    let reader = Reader::open(&source, folio::MemoryPreferences::new(), ReaderConfig::default()).await;
    assert_eq!(reader.state().total_pages(), 1313);
}

// ============================================================================
// Preferences & Config Files
// ============================================================================

#[test]
fn test_file_preferences_survive_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    {
        let prefs = FilePreferences::open(&path).unwrap();
        let mut reader = Reader::new(None, prefs, ReaderConfig::default());
        reader.set_view(ViewMode::Text);
        reader.zoom_out();
    }

    let prefs = FilePreferences::open(&path).unwrap();
    assert_eq!(prefs.get_item("readerView").as_deref(), Some("text"));
    let reader = Reader::new(None, prefs, ReaderConfig::default());
    assert_eq!(reader.state().view(), ViewMode::Text);
    assert_eq!(reader.state().zoom().percent(), 90);
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("folio.json");
    fs::write(
        &path,
        r#"{ "defaultTotalPages": 40, "defaultZoom": 120, "maxSearchResults": 2 }"#,
    )
    .unwrap();

    let config = ReaderConfig::from_json_file(&path).unwrap();
    assert_eq!(config.max_search_results, 2);
    assert_eq!(config.min_query_len, 2);

    let reader = Reader::new(None, folio::MemoryPreferences::new(), config);
    assert_eq!(reader.state().total_pages(), 40);
    assert_eq!(reader.state().zoom().percent(), 120);
}
