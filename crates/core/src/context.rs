//! Scan-scoped extra-root context.
//!
//! While the scanner iterates a configured extra root, the root's
//! 0-based position is published here so a processor invoked during
//! that iteration can tell which configured root produced the match.
//! The index is thread-local: concurrent scans on other threads never
//! observe each other's context.

use std::cell::Cell;

thread_local! {
    static EXTRA_ROOT_INDEX: Cell<Option<usize>> = Cell::new(None);
}

/// True while the calling thread is inside an extra-root iteration.
pub fn is_extra_root() -> bool {
    extra_root_index().is_some()
}

/// The 0-based index of the extra root currently being walked on this
/// thread, or `None` during the primary lookup-based scan.
pub fn extra_root_index() -> Option<usize> {
    EXTRA_ROOT_INDEX.with(Cell::get)
}

/// Publishes the index for the lifetime of the guard; cleared on drop,
/// so every exit path of an extra-root iteration resets the context.
pub(crate) struct ExtraRootGuard(());

impl ExtraRootGuard {
    pub(crate) fn enter(index: usize) -> Self {
        EXTRA_ROOT_INDEX.with(|cell| cell.set(Some(index)));
        ExtraRootGuard(())
    }
}

impl Drop for ExtraRootGuard {
    fn drop(&mut self) {
        EXTRA_ROOT_INDEX.with(|cell| cell.set(None));
    }
}
