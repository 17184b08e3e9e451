use std::cell::Cell;
use std::ffi::OsString;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use scour_core::{extra_root_index, ResourceLocation, ResourceScanner, SearchPath};
use tracing_subscriber::EnvFilter;

/// Find named resources across directories and archives.
#[derive(Parser)]
#[command(name = "scour", version)]
struct Args {
    /// Search roots, separated like a platform search path. Entries
    /// ending in .jar or .zip are archives; `outer.jar!/inner` roots an
    /// archive at a nested entry path; anything else is a directory.
    #[arg(short = 'c', long = "class-path", default_value = ".")]
    class_path: String,

    /// Scan the roots named by SCOUR_RESOURCE_PATH before the class path.
    #[arg(long)]
    extra_roots: bool,

    /// Glob path expressions, e.g. `services/**/*.conf`.
    #[arg(required = true)]
    patterns: Vec<String>,
}

fn parse_search_path(raw: &str) -> SearchPath {
    let mut search = SearchPath::new();
    for entry in std::env::split_paths(&OsString::from(raw)) {
        let text = entry.to_string_lossy();
        if text.is_empty() {
            continue;
        }
        if let Some((archive, prefix)) = text.split_once("!/") {
            search.push_nested_archive(PathBuf::from(archive), prefix);
        } else if is_archive(&text) {
            search.push_archive(entry);
        } else {
            search.push_dir(entry);
        }
    }
    search
}

fn is_archive(entry: &str) -> bool {
    let lower = entry.to_ascii_lowercase();
    lower.ends_with(".jar") || lower.ends_with(".zip")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let search = parse_search_path(&args.class_path);
    tracing::debug!("searching {} class path entries", search.len());

    let count = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&count);
    let mut scanner = ResourceScanner::builder(move |location: ResourceLocation, name: &str| {
        match extra_root_index() {
            Some(index) => println!("[extra:{}] {}\t{}", index, location, name),
            None => println!("{}\t{}", location, name),
        }
        counter.set(counter.get() + 1);
    })
    .lookup(search)
    .extra_roots(args.extra_roots)
    .build();

    let patterns: Vec<&str> = args.patterns.iter().map(String::as_str).collect();
    scanner.scan(&patterns);

    eprintln!("{} resource(s) found", count.get());
}
