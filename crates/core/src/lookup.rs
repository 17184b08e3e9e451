//! The lookup-root provider seam.
//!
//! The scanner treats root resolution as an opaque collaborator: give
//! it a merged literal root, get back every base location that carries
//! resources under that root. [`SearchPath`] is the concrete provider,
//! an ordered list of directories and archives playing the role of the
//! platform search path.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::warn;
use zip::ZipArchive;

use crate::location::LookupLocation;

/// Maps a merged literal root to zero or more base locations.
pub trait LookupRoots {
    /// `root` is separator-trimmed (`a/b`, or empty for "everything").
    /// The same logical root may resolve to several physical locations
    /// when it appears in more than one search-path entry.
    fn resolve(&self, root: &str) -> Vec<LookupLocation>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SearchEntry {
    Dir(PathBuf),
    Archive {
        archive: PathBuf,
        entry_prefix: String,
    },
}

/// An ordered union of search roots: plain directories, packed archives
/// and archives whose logical root lives at a nested entry path.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    entries: Vec<SearchEntry>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.entries.push(SearchEntry::Dir(dir.into()));
        self
    }

    pub fn push_archive(&mut self, archive: impl Into<PathBuf>) -> &mut Self {
        self.entries.push(SearchEntry::Archive {
            archive: archive.into(),
            entry_prefix: String::new(),
        });
        self
    }

    /// An archive whose logical root starts at `entry_prefix` inside it
    /// (one level of archive-in-archive indirection).
    pub fn push_nested_archive(
        &mut self,
        archive: impl Into<PathBuf>,
        entry_prefix: impl Into<String>,
    ) -> &mut Self {
        self.entries.push(SearchEntry::Archive {
            archive: archive.into(),
            entry_prefix: entry_prefix.into().trim_matches('/').to_string(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl LookupRoots for SearchPath {
    fn resolve(&self, root: &str) -> Vec<LookupLocation> {
        let mut locations = Vec::new();
        for entry in &self.entries {
            match entry {
                SearchEntry::Dir(base) => {
                    let target = if root.is_empty() {
                        base.clone()
                    } else {
                        base.join(root)
                    };
                    if target.is_dir() {
                        locations.push(LookupLocation::Directory { base: base.clone() });
                    }
                }
                SearchEntry::Archive {
                    archive,
                    entry_prefix,
                } => match archive_contains(archive, entry_prefix, root) {
                    Ok(true) => locations.push(LookupLocation::Archive {
                        archive: archive.clone(),
                        entry_prefix: entry_prefix.clone(),
                    }),
                    Ok(false) => {}
                    Err(err) => {
                        warn!("cannot open archive {}: {}", archive.display(), err);
                    }
                },
            }
        }
        locations
    }
}

/// Containment check against the entry name table only; nothing is
/// decompressed.
fn archive_contains(
    archive: &Path,
    entry_prefix: &str,
    root: &str,
) -> crate::Result<bool> {
    let archive = ZipArchive::new(File::open(archive)?)?;
    let wanted = match (entry_prefix.is_empty(), root.is_empty()) {
        (true, true) => String::new(),
        (true, false) => format!("{}/", root),
        (false, true) => format!("{}/", entry_prefix),
        (false, false) => format!("{}/{}/", entry_prefix, root),
    };
    let contains = archive
        .file_names()
        .any(|name| name.starts_with(&wanted) && name.len() > wanted.len());
    Ok(contains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, entries: &[&str]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        for entry in entries {
            zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
            zip.write_all(b"data").unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn directory_entries_resolve_only_when_the_root_exists() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("services/app")).unwrap();

        let mut path = SearchPath::new();
        path.push_dir(dir.path());

        assert_eq!(
            path.resolve("services"),
            vec![LookupLocation::Directory {
                base: dir.path().to_path_buf()
            }]
        );
        assert!(path.resolve("absent").is_empty());
    }

    #[test]
    fn archive_entries_resolve_from_the_name_table() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("lib.jar");
        write_archive(&jar, &["services/db.conf"]);

        let mut path = SearchPath::new();
        path.push_archive(&jar);

        assert_eq!(path.resolve("services").len(), 1);
        assert!(path.resolve("servic").is_empty());
        assert!(path.resolve("other").is_empty());
    }

    #[test]
    fn nested_archive_roots_are_resolved_under_their_prefix() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("app.jar");
        write_archive(&jar, &["BOOT-INF/classes/services/db.conf"]);

        let mut path = SearchPath::new();
        path.push_nested_archive(&jar, "BOOT-INF/classes");

        let locations = path.resolve("services");
        assert_eq!(
            locations,
            vec![LookupLocation::Archive {
                archive: jar.clone(),
                entry_prefix: "BOOT-INF/classes".to_string(),
            }]
        );
        assert!(path.resolve("BOOT-INF").is_empty());
    }

    #[test]
    fn unreadable_archives_contribute_nothing() {
        let mut path = SearchPath::new();
        path.push_archive("/definitely/absent.jar");
        assert!(path.resolve("services").is_empty());
    }

    #[test]
    fn one_root_may_resolve_to_many_locations() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("services")).unwrap();
        let jar = dir.path().join("lib.jar");
        write_archive(&jar, &["services/db.conf"]);

        let mut path = SearchPath::new();
        path.push_dir(dir.path());
        path.push_archive(&jar);

        assert_eq!(path.resolve("services").len(), 2);
    }
}
