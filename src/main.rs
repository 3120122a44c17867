//! folio - terminal front end for a paginated book reader

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio::{
    Command, DirSource, FilePreferences, MemoryPreferences, PreferenceStore, Reader, ReaderConfig,
    Result, Snapshot, TocKind,
};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Paginated book reader", long_about = None)]
#[command(after_help = "EXAMPLES:
    folio --data reader/data info           Show manifest summary
    folio --data reader/data toc -f heap    Filter the table of contents
    folio --data reader/data search heap    Search titles and loaded pages
    folio --data reader/data show 151       Show page 151
    folio --data reader/data keys           Drive a session from stdin")]
struct Cli {
    /// Data directory holding manifest.json and pages/
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data: PathBuf,

    /// Directory holding page images (overrides the config)
    #[arg(long, value_name = "DIR")]
    images: Option<PathBuf>,

    /// Preferences file (view mode and zoom are kept in memory without it)
    #[arg(long, value_name = "FILE")]
    prefs: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Show manifest summary
    Info,
    /// Print the table of contents
    Toc {
        /// Only entries whose title contains this text
        #[arg(short, long)]
        filter: Option<String>,
        /// Mark the entry containing this page
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Search manifest titles and loaded page text
    Search {
        query: String,
        /// Load pages FIRST..=LAST before searching, e.g. 1-50
        #[arg(long, value_name = "FIRST-LAST", value_parser = parse_range)]
        preload: Option<(u32, u32)>,
    },
    /// Show one page
    Show {
        page: u32,
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read keys from stdin, one per line, and print the state after each.
    ///
    /// Besides key names (ArrowLeft, v, +, Escape, ...) lines may be
    /// `:N` to go to page N, `/TEXT` to search, `?TEXT` to filter the table
    /// of contents, `@N` to open TOC entry N, or `image` for the image path.
    Keys,
}

fn parse_range(s: &str) -> std::result::Result<(u32, u32), String> {
    let (first, last) = s
        .split_once('-')
        .ok_or_else(|| format!("expected FIRST-LAST, got {s:?}"))?;
    let first: u32 = first.trim().parse().map_err(|e| format!("{first:?}: {e}"))?;
    let last: u32 = last.trim().parse().map_err(|e| format!("{last:?}: {e}"))?;
    if first == 0 || last < first {
        return Err(format!("invalid range {first}-{last}"));
    }
    Ok((first, last))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "folio=debug",
        _ => "folio=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.prefs.clone() {
        Some(path) => match FilePreferences::open(&path) {
            Ok(prefs) => run(&cli, prefs).await,
            Err(e) => Err(e),
        },
        None => run(&cli, MemoryPreferences::new()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run<P: PreferenceStore>(cli: &Cli, prefs: P) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ReaderConfig::from_json_file(path)?,
        None => ReaderConfig::default(),
    };
    if let Some(images) = &cli.images {
        config = config.with_image_root(images);
    }

    let source = DirSource::new(&cli.data);
    let mut reader = Reader::open(&source, prefs, config).await;

    match &cli.command {
        Cmd::Info => show_info(&reader),
        Cmd::Toc { filter, page } => show_toc(&mut reader, filter.as_deref(), *page),
        Cmd::Search { query, preload } => {
            if let Some((first, last)) = *preload {
                preload_pages(&mut reader, &source, first, last).await;
            }
            show_search(&reader, query);
        }
        Cmd::Show { page, json } => {
            if reader.go_to_page(*page).is_none() && reader.current_page() != *page {
                return Err(folio::Error::PageOutOfRange {
                    page: *page,
                    total: reader.state().total_pages(),
                });
            }
            reader.ensure_current_loaded(&source).await;
            show_page(&reader.snapshot(), *json)?;
        }
        Cmd::Keys => run_keys(&mut reader, &source).await?,
    }
    Ok(())
}

fn show_info<P: PreferenceStore>(reader: &Reader<P>) {
    let manifest = reader.manifest();
    if !manifest.title.is_empty() {
        println!("Title: {}", manifest.title);
    }
    if !manifest.authors.is_empty() {
        println!("Authors: {}", manifest.authors);
    }
    println!("Pages: {}", reader.state().total_pages());
    println!("Titled pages: {}", manifest.pages.len());
    println!("TOC entries: {}", reader.toc().len());
    println!("View: {}", reader.state().view());
    println!("Zoom: {}", reader.state().zoom());
}

fn show_toc<P: PreferenceStore>(reader: &mut Reader<P>, filter: Option<&str>, page: Option<u32>) {
    if let Some(page) = page {
        let _ = reader.go_to_page(page);
    }
    let current = reader.toc_highlight().cloned();
    let entries = reader.filter_toc(filter.unwrap_or(""));
    if entries.is_empty() {
        println!("No entries");
        return;
    }

    for entry in entries {
        let marker = if page.is_some() && current.as_ref() == Some(entry) { ">" } else { " " };
        match (entry.kind, entry.page) {
            (TocKind::Part, _) => println!("{marker} {}", entry.title),
            (TocKind::Chapter, Some(p)) => println!("{marker}   {:<60} p.{p}", entry.title),
            (_, p) => println!("{marker}     {:<58} {}", entry.title, p.unwrap_or_default()),
        }
    }
}

async fn preload_pages<P: PreferenceStore>(
    reader: &mut Reader<P>,
    source: &DirSource,
    first: u32,
    last: u32,
) {
    let last = last.min(reader.state().total_pages());
    for page in first..=last {
        if let Some(load) = reader.go_to_page(page) {
            reader.fetch(load, source).await;
        }
    }
}

fn show_search<P: PreferenceStore>(reader: &Reader<P>, query: &str) {
    let results = reader.search(query);
    if results.is_empty() {
        println!("No results");
    }
    for result in results {
        println!("Page {:>4}  {}", result.page, result.title);
    }
}

fn show_page(snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }
    println!("{}", status_line(snapshot));
    if let Some(entry) = &snapshot.current_toc_entry {
        println!("Section: {}", entry.title);
    }
    match snapshot.view {
        folio::ViewMode::Image => println!("Image: {}", snapshot.image_path.display()),
        folio::ViewMode::Text => println!("{}", snapshot.text),
    }
    Ok(())
}

fn status_line(snapshot: &Snapshot) -> String {
    format!(
        "Page {} of {} ({:.1}%) | {} | {} | menu {} | toc {} | {}",
        snapshot.current_page,
        snapshot.total_pages,
        snapshot.progress,
        snapshot.view,
        snapshot.zoom,
        if snapshot.menu_open { "open" } else { "closed" },
        if snapshot.toc_open { "open" } else { "closed" },
        snapshot.page_title,
    )
}

async fn run_keys<P: PreferenceStore>(reader: &mut Reader<P>, source: &DirSource) -> Result<()> {
    reader.ensure_current_loaded(source).await;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", status_line(&reader.snapshot()))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let key = line.trim();
        if key.is_empty() {
            continue;
        }

        if let Some(query) = key.strip_prefix('/') {
            for result in reader.search(query) {
                writeln!(out, "  Page {:>4}  {}", result.page, result.title)?;
            }
            continue;
        }
        if let Some(query) = key.strip_prefix('?') {
            let entries = reader.toc().entries();
            for entry in reader.filter_toc(query) {
                let index = entries
                    .iter()
                    .position(|e| std::ptr::eq(e, entry))
                    .unwrap_or_default();
                writeln!(out, "  @{index:<4} {}", entry.title)?;
            }
            continue;
        }
        if key == "image" {
            writeln!(out, "  {}", reader.fullscreen_image().display())?;
            continue;
        }

        let load = if let Some(index) = key.strip_prefix('@') {
            let target = index
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|i| reader.toc().entries().get(i))
                .and_then(|e| e.page);
            match target {
                Some(page) => reader.select_toc_entry(page),
                None => {
                    writeln!(out, "  no TOC page at {index}")?;
                    continue;
                }
            }
        } else if let Some(page) = key.strip_prefix(':') {
            match page.trim().parse::<u32>() {
                Ok(page) => reader.select_search_result(page),
                Err(_) => {
                    writeln!(out, "  not a page number: {page}")?;
                    continue;
                }
            }
        } else {
            match Command::from_key(key) {
                Some(command) => reader.apply(command),
                None => {
                    writeln!(out, "  unbound key: {key}")?;
                    continue;
                }
            }
        };

        if let Some(load) = load {
            reader.fetch(load, source).await;
        }
        writeln!(out, "{}", status_line(&reader.snapshot()))?;
    }
    Ok(())
}
