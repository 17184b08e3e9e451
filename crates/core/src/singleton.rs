//! At-most-once lazy initialization.

use std::fmt;

use once_cell::sync::OnceCell;

/// A memoized value: the factory runs at most once across the cell's
/// lifetime, no matter how many threads race on the first access, and
/// every caller observes the same value. Reads after initialization
/// take no lock.
///
/// A factory that panics leaves the cell unset, so the next `get()`
/// retries it.
pub struct Singleton<T> {
    factory: Box<dyn Fn() -> T + Send + Sync>,
    cell: OnceCell<T>,
}

impl<T> Singleton<T> {
    pub fn with<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> &T {
        self.cell.get_or_init(|| (self.factory)())
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for Singleton<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Singleton")
            .field("value", &self.cell.get())
            .finish()
    }
}
