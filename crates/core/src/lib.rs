//! Resource discovery over a union of search roots.
//!
//! Given a set of glob-style path expressions (`*` matches one path
//! segment, `**` matches any depth), the scanner locates every matching
//! resource across plain directories, packed archives and a configurable
//! list of extra filesystem roots, and hands each match to a
//! caller-supplied processor.

pub mod context;
pub mod error;
pub mod location;
pub mod lookup;
pub mod pattern;
pub mod scanner;
pub mod singleton;
pub mod walk;

pub use context::{extra_root_index, is_extra_root};
pub use error::{Result, ScanError};
pub use location::{LookupLocation, ResourceLocation};
pub use lookup::{LookupRoots, SearchPath};
pub use pattern::PathPattern;
pub use scanner::{extra_resource_roots, ResourceScanner, ScannerBuilder, EXTRA_ROOTS_VAR};
pub use singleton::Singleton;
