use crate::Catalog;
use std::sync::{Arc, PoisonError, RwLock};

/// The active catalog. Readers take an `Arc` snapshot and query it without
/// holding the lock; reloads build a new catalog off to the side and swap it in.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `next` and returns the catalog it replaced.
    pub fn replace(&self, next: Catalog) -> Arc<Catalog> {
        let next = Arc::new(next);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
