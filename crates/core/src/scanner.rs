//! The resource scanner: compiles and merges path expressions, then
//! drives the directory and archive walkers over every resolved base
//! location, handing each accepted match to the caller's processor.
//!
//! `scan` never fails: every resolution or traversal failure is logged
//! as a warning and that location simply contributes no matches.

use std::path::PathBuf;

use indexmap::IndexSet;
use tracing::warn;

use crate::context::ExtraRootGuard;
use crate::location::{LookupLocation, ResourceLocation};
use crate::lookup::{LookupRoots, SearchPath};
use crate::pattern::{merge_roots, PathPattern};
use crate::walk::{archive::scan_archive, dir::scan_dir, MatchSink, NameFilter};

/// Environment variable naming extra filesystem roots to scan before
/// the lookup-based pass, separated like a platform search path.
pub const EXTRA_ROOTS_VAR: &str = "SCOUR_RESOURCE_PATH";

/// The configured extra roots, absolute, in configuration order. Blank
/// segments are discarded.
pub fn extra_resource_roots() -> Vec<PathBuf> {
    extra_roots_from(EXTRA_ROOTS_VAR)
}

fn extra_roots_from(var: &str) -> Vec<PathBuf> {
    let raw = match std::env::var_os(var) {
        Some(raw) => raw,
        None => return Vec::new(),
    };
    std::env::split_paths(&raw)
        .filter(|path| !path.as_os_str().is_empty())
        .map(|path| {
            if path.is_absolute() {
                path
            } else {
                match std::env::current_dir() {
                    Ok(cwd) => cwd.join(path),
                    Err(_) => path,
                }
            }
        })
        .collect()
}

pub struct ResourceScanner {
    processor: Box<dyn FnMut(ResourceLocation, &str)>,
    filter: Box<dyn Fn(&str, &str) -> bool>,
    lookup: Box<dyn LookupRoots>,
    extra_roots: bool,
    extra_roots_var: String,
}

impl ResourceScanner {
    /// Starts a builder around the processor that will receive every
    /// `(locator, resource name)` match.
    pub fn builder<P>(processor: P) -> ScannerBuilder
    where
        P: FnMut(ResourceLocation, &str) + 'static,
    {
        ScannerBuilder {
            processor: Box::new(processor),
            filter: None,
            lookup: None,
            extra_roots: false,
            extra_roots_var: EXTRA_ROOTS_VAR.to_string(),
        }
    }

    /// Finds every resource matching at least one expression across the
    /// extra roots (when enabled) and every resolved lookup location.
    ///
    /// Failures are logged and skipped per location; the processor sees
    /// whatever was found before and besides them. Callers cannot tell
    /// "nothing matched" from "a failure truncated the results" except
    /// via the log.
    pub fn scan(&mut self, expressions: &[&str]) {
        let patterns: IndexSet<PathPattern> = expressions
            .iter()
            .map(|expr| PathPattern::compile(expr))
            .collect();
        let merged = merge_roots(patterns.iter().map(|p| p.literal_root()));

        let custom = self.filter.as_ref();
        let accept = move |root: &str, name: &str| {
            patterns.iter().any(|p| p.matches(name)) && custom(root, name)
        };
        let sink: MatchSink<'_> = self.processor.as_mut();

        if self.extra_roots {
            scan_extra_roots(&self.extra_roots_var, &merged, &accept, &mut *sink);
        }

        for root in &merged {
            let path = root.trim_matches('/');
            for location in self.lookup.resolve(path) {
                scan_location(&location, path, &accept, &mut *sink);
            }
        }
    }
}

fn scan_extra_roots(
    var: &str,
    merged: &[String],
    filter: NameFilter<'_>,
    sink: MatchSink<'_>,
) {
    for (index, root) in extra_roots_from(var).into_iter().enumerate() {
        let _guard = ExtraRootGuard::enter(index);
        let root_id = format!("file:{}", root.display());
        for path in merged {
            let path = path.trim_matches('/');
            scan_dir(&root_id, path, filter, &root.join(path), &mut *sink);
        }
    }
}

/// Dispatches one resolved base location to the matching walker.
fn scan_location(
    location: &LookupLocation,
    path: &str,
    filter: NameFilter<'_>,
    sink: MatchSink<'_>,
) {
    let root_id = location.identifier();
    match location {
        LookupLocation::Directory { base } => {
            scan_dir(&root_id, path, filter, &base.join(path), sink);
        }
        LookupLocation::Archive {
            archive,
            entry_prefix,
        } => {
            if let Err(err) = scan_archive(&root_id, path, filter, archive, entry_prefix, sink) {
                warn!("resource search in {} failed: {}", archive.display(), err);
            }
        }
    }
}

pub struct ScannerBuilder {
    processor: Box<dyn FnMut(ResourceLocation, &str)>,
    filter: Option<Box<dyn Fn(&str, &str) -> bool>>,
    lookup: Option<Box<dyn LookupRoots>>,
    extra_roots: bool,
    extra_roots_var: String,
}

impl ScannerBuilder {
    /// Custom filter ANDed with the compiled pattern match; accept-all
    /// when omitted.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str, &str) -> bool + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// The lookup-root provider; an empty search path when omitted.
    pub fn lookup<L>(mut self, lookup: L) -> Self
    where
        L: LookupRoots + 'static,
    {
        self.lookup = Some(Box::new(lookup));
        self
    }

    /// Scan the configured extra filesystem roots before the primary
    /// lookup-based pass.
    pub fn extra_roots(mut self, enabled: bool) -> Self {
        self.extra_roots = enabled;
        self
    }

    /// Overrides the environment variable the extra roots are read from.
    pub fn extra_roots_var(mut self, var: impl Into<String>) -> Self {
        self.extra_roots_var = var.into();
        self
    }

    pub fn build(self) -> ResourceScanner {
        ResourceScanner {
            processor: self.processor,
            filter: self.filter.unwrap_or_else(|| Box::new(|_, _| true)),
            lookup: self.lookup.unwrap_or_else(|| Box::new(SearchPath::new())),
            extra_roots: self.extra_roots,
            extra_roots_var: self.extra_roots_var,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_roots_are_absent_when_the_variable_is_unset() {
        assert!(extra_roots_from("SCOUR_TEST_UNSET_VAR").is_empty());
    }

    #[test]
    fn blank_segments_are_discarded_and_paths_made_absolute() {
        std::env::set_var("SCOUR_TEST_ROOTS_PARSE", "/abs/one::relative");
        let roots = extra_roots_from("SCOUR_TEST_ROOTS_PARSE");
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0], PathBuf::from("/abs/one"));
        assert!(roots[1].is_absolute());
        assert!(roots[1].ends_with("relative"));
    }
}
