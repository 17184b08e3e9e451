//! Recursive directory traversal.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::{MatchSink, NameFilter};
use crate::location::ResourceLocation;

/// Walks `dir` depth-first, building each resource name by extending
/// `path` with the child names along the way. A missing or non-directory
/// target is a silent no-op. Children are visited in filesystem listing
/// order; callers must not depend on match order.
pub fn scan_dir(root_id: &str, path: &str, filter: NameFilter<'_>, dir: &Path, sink: MatchSink<'_>) {
    if !dir.is_dir() {
        return;
    }
    debug!("scanning dir [{}]: [{}]", dir.display(), path);
    descend(root_id, path, filter, dir, sink);
}

fn descend(root_id: &str, path: &str, filter: NameFilter<'_>, dir: &Path, sink: MatchSink<'_>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot list {}: {}", dir.display(), err);
            return;
        }
    };

    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        let resource_name = if path.is_empty() {
            name
        } else {
            format!("{}/{}", path, name)
        };

        let child = entry.path();
        if child.is_dir() {
            descend(root_id, &resource_name, filter, &child, sink);
        } else if filter(root_id, &resource_name) {
            sink(ResourceLocation::File(child), &resource_name);
        }
    }
}
