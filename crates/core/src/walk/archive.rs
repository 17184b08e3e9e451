//! Single-pass archive entry enumeration.

use std::fs::File;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use super::{MatchSink, NameFilter};
use crate::error::Result;
use crate::location::ResourceLocation;

/// Reads the archive's entry table once, end to end, emitting a match
/// for every file entry under `path`.
///
/// When `entry_prefix` is non-empty the logical root lives at that path
/// inside the archive: entries outside the prefix are skipped and the
/// prefix (plus separator) is stripped before matching, while the
/// emitted locator keeps the original entry name so it stays resolvable
/// against the physical archive.
pub fn scan_archive(
    root_id: &str,
    path: &str,
    filter: NameFilter<'_>,
    archive_path: &Path,
    entry_prefix: &str,
    sink: MatchSink<'_>,
) -> Result<()> {
    debug!("scanning archive [{}]: [{}]", archive_path.display(), path);
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;

    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let entry_name = entry.name().to_string();

        let candidate = if entry_prefix.is_empty() {
            entry_name.as_str()
        } else {
            match entry_name
                .strip_prefix(entry_prefix)
                .and_then(|rest| rest.strip_prefix('/'))
            {
                Some(rest) => rest,
                None => continue,
            }
        };

        if candidate.starts_with(path) && filter(root_id, candidate) {
            sink(
                ResourceLocation::ArchiveEntry {
                    archive: archive_path.to_path_buf(),
                    entry: entry_name.clone(),
                },
                candidate,
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, entries: &[&str]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for entry in entries {
            if entry.ends_with('/') {
                zip.add_directory(entry.trim_end_matches('/'), options)
                    .unwrap();
            } else {
                zip.start_file(*entry, options).unwrap();
                zip.write_all(b"data").unwrap();
            }
        }
        zip.finish().unwrap();
    }

    fn collect(
        archive: &Path,
        path: &str,
        entry_prefix: &str,
    ) -> Vec<(ResourceLocation, String)> {
        let mut found = Vec::new();
        let mut sink = |loc: ResourceLocation, name: &str| found.push((loc, name.to_string()));
        scan_archive("jar:test", path, &|_, _| true, archive, entry_prefix, &mut sink).unwrap();
        found
    }

    #[test]
    fn directory_markers_are_skipped() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("a.jar");
        write_archive(&jar, &["services/", "services/db.conf"]);

        let found = collect(&jar, "services", "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, "services/db.conf");
    }

    #[test]
    fn entries_outside_the_path_are_skipped() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("a.jar");
        write_archive(&jar, &["services/db.conf", "other/x.conf"]);

        let found = collect(&jar, "services", "");
        let names: Vec<&str> = found.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, vec!["services/db.conf"]);
    }

    #[test]
    fn nested_prefix_is_stripped_from_the_name_but_not_the_locator() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("outer.jar");
        write_archive(&jar, &["inner/data/z.txt", "elsewhere/q.txt", "innerX/nope.txt"]);

        let found = collect(&jar, "data", "inner");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, "data/z.txt");
        assert_eq!(
            found[0].0,
            ResourceLocation::ArchiveEntry {
                archive: jar.clone(),
                entry: "inner/data/z.txt".to_string(),
            }
        );
    }

    #[test]
    fn missing_archive_is_an_error_for_the_caller_to_log() {
        let mut sink = |_: ResourceLocation, _: &str| unreachable!("no matches expected");
        let result = scan_archive(
            "jar:test",
            "services",
            &|_, _| true,
            &PathBuf::from("/definitely/absent.jar"),
            "",
            &mut sink,
        );
        assert!(result.is_err());
    }

    #[test]
    fn custom_filter_is_applied_to_the_stripped_name() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("outer.jar");
        write_archive(&jar, &["lib/conf/a.conf", "lib/conf/b.log"]);

        let mut found = Vec::new();
        let mut sink = |_: ResourceLocation, name: &str| found.push(name.to_string());
        scan_archive(
            "jar:test",
            "conf",
            &|_, name| name.ends_with(".conf"),
            &jar,
            "lib",
            &mut sink,
        )
        .unwrap();
        assert_eq!(found, vec!["conf/a.conf"]);
    }
}
