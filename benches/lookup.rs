//! Benchmarks for TOC lookup and search.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use folio::{Manifest, PageContent, PageStore, SearchIndex, TocIndex};

/// A manifest and a fully populated cache the size of the built-in book.
fn full_book() -> (Manifest, PageStore) {
    let mut manifest = Manifest::new(1313);
    let mut store = PageStore::new();
    for page in 1..=1313 {
        manifest = manifest.with_page(page, format!("Page {page} of the algorithms text"));
        let body = format!(
            "<p>Page {page}. The running time of the procedure depends on the input size; \
             for a binary heap of n elements it is O(lg n).</p>"
        );
        store.complete(page, Ok(PageContent::new(format!("Page {page}"), body)));
    }
    (manifest, store)
}

// ============================================================================
// TOC Benchmarks
// ============================================================================

fn bench_toc_filter(c: &mut Criterion) {
    let toc = TocIndex::builtin();

    c.bench_function("toc_filter_empty", |b| {
        b.iter(|| toc.filter(black_box("")).len());
    });

    c.bench_function("toc_filter_tree", |b| {
        b.iter(|| toc.filter(black_box("tree")).len());
    });
}

fn bench_toc_current_entry(c: &mut Criterion) {
    let toc = TocIndex::builtin();

    c.bench_function("toc_current_entry_all_pages", |b| {
        b.iter(|| {
            (1..=1313u32)
                .filter_map(|page| toc.current_index_for(black_box(page)))
                .sum::<usize>()
        });
    });
}

// ============================================================================
// Search Benchmarks
// ============================================================================

fn bench_search(c: &mut Criterion) {
    let (manifest, store) = full_book();
    let empty = PageStore::new();

    c.bench_function("search_manifest_only", |b| {
        let index = SearchIndex::new(&manifest, &empty);
        b.iter(|| index.search(black_box("algorithms")));
    });

    c.bench_function("search_full_cache_miss", |b| {
        let index = SearchIndex::new(&manifest, &store);
        b.iter(|| index.search(black_box("fibonacci")));
    });

    c.bench_function("search_full_cache_hit", |b| {
        let index = SearchIndex::new(&manifest, &store);
        b.iter(|| index.search(black_box("binary heap")));
    });
}

criterion_group!(benches, bench_toc_filter, bench_toc_current_entry, bench_search);
criterion_main!(benches);
