//! Shared reference to the current index, swappable when documentation is rebuilt.

use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use super::index::SymbolIndex;

/// Cloneable handle to the live [`SymbolIndex`].
///
/// The lock guards only the pointer; queries run against an `Arc` obtained
/// from [`IndexHandle::current`] and never hold the lock.
#[derive(Clone, Debug)]
pub struct IndexHandle {
    current: Arc<RwLock<Arc<SymbolIndex>>>,
}

impl IndexHandle {
    pub fn new(index: SymbolIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// Snapshot of the index visible right now
    pub fn current(&self) -> Arc<SymbolIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Install a freshly built index and return the one it replaced.
    ///
    /// Snapshots taken earlier stay valid until their holders drop them.
    pub fn replace(&self, index: SymbolIndex) -> Arc<SymbolIndex> {
        let next = Arc::new(index);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        info!("Swapping symbol index ({} -> {} symbols)", guard.len(), next.len());
        std::mem::replace(&mut *guard, next)
    }
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self::new(SymbolIndex::new())
    }
}
