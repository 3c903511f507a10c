use std::sync::{Arc, RwLock};

use crate::catalog::Catalog;

/// Source of the catalog in effect when an utterance is interpreted.
///
/// Reads must not block on a refresh; a provider that has nothing yet returns
/// an empty catalog.
pub trait CatalogProvider {
    fn current(&self) -> Arc<Catalog>;
}

impl CatalogProvider for Arc<Catalog> {
    fn current(&self) -> Arc<Catalog> {
        Arc::clone(self)
    }
}

/// Catalog that can be swapped while the session runs (e.g. after a fetch
/// completes). Starts empty.
#[derive(Debug, Default, Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Install a freshly loaded catalog.
    pub fn replace(&self, catalog: Catalog) {
        let mut guard = match self.inner.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(catalog);
    }
}

impl CatalogProvider for SharedCatalog {
    fn current(&self) -> Arc<Catalog> {
        match self.inner.read() {
            Ok(g) => Arc::clone(&g),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}
