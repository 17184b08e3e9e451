//! The two traversal strategies: directory recursion and single-pass
//! archive entry enumeration.

pub mod archive;
pub mod dir;

use crate::location::ResourceLocation;

/// Accepts or rejects a candidate `(root identifier, resource name)`.
pub type NameFilter<'a> = &'a dyn Fn(&str, &str) -> bool;

/// Receives every accepted match as `(locator, resource name)`.
pub type MatchSink<'a> = &'a mut dyn FnMut(ResourceLocation, &str);
