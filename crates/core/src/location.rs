//! Location model: where a merged root lives, and where a match was found.

use std::fmt;
use std::path::PathBuf;

/// A base location a lookup-root provider maps a merged root to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupLocation {
    /// A plain directory tree; merged roots resolve below `base`.
    Directory { base: PathBuf },
    /// A packed archive. `entry_prefix` is non-empty only when the
    /// logical root itself lives inside the archive, one level deep
    /// (e.g. an application archive repackaging its libraries).
    Archive {
        archive: PathBuf,
        entry_prefix: String,
    },
}

impl LookupLocation {
    /// The root identifier handed to filters and processors for every
    /// match found under this location.
    pub fn identifier(&self) -> String {
        match self {
            LookupLocation::Directory { base } => format!("file:{}", base.display()),
            LookupLocation::Archive {
                archive,
                entry_prefix,
            } => {
                if entry_prefix.is_empty() {
                    format!("jar:file:{}!", archive.display())
                } else {
                    format!("jar:file:{}!/{}!", archive.display(), entry_prefix)
                }
            }
        }
    }
}

/// The locator of one discovered resource. For archive entries this
/// keeps the original, unstripped entry name so the locator stays
/// resolvable against the physical archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    File(PathBuf),
    ArchiveEntry { archive: PathBuf, entry: String },
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::File(path) => write!(f, "file:{}", path.display()),
            ResourceLocation::ArchiveEntry { archive, entry } => {
                write!(f, "jar:file:{}!/{}", archive.display(), entry)
            }
        }
    }
}
