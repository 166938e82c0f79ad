//! Explicit storage context.
//!
//! Replaces a process-global adapter slot with a context object constructed
//! at startup and handed to every store. Exactly one adapter is active per
//! context at a time; swapping is an atomic pointer replacement.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::adapter::StorageAdapter;
use crate::error::StorageError;

/// Holds the currently configured adapter plus the one-shot initialization
/// guard used by [`crate::init::initialize_storage`].
pub struct StorageContext {
    slot: RwLock<Option<Arc<dyn StorageAdapter>>>,
    initialized: AtomicBool,
}

impl StorageContext {
    /// An unconfigured context. Accessors fail fast until
    /// [`configure`](Self::configure) is called.
    pub fn new() -> Self {
        Self { slot: RwLock::new(None), initialized: AtomicBool::new(false) }
    }

    /// Install `adapter`, replacing any previous one unconditionally.
    pub fn configure(&self, adapter: Arc<dyn StorageAdapter>) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(adapter);
    }

    /// The active adapter, or [`StorageError::Unconfigured`] if none was ever
    /// installed.
    pub fn adapter(&self) -> Result<Arc<dyn StorageAdapter>, StorageError> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.clone().ok_or(StorageError::Unconfigured)
    }

    pub fn is_configured(&self) -> bool {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.is_some()
    }

    /// Flip the init guard; `false` means it was already set.
    pub(crate) fn mark_initialized(&self) -> bool {
        !self.initialized.swap(true, Ordering::SeqCst)
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Clear only the init guard, leaving the adapter slot untouched. A later
    /// [`crate::init::initialize_storage`] call reinitializes from scratch.
    pub(crate) fn clear_initialized(&self) {
        self.initialized.store(false, Ordering::SeqCst);
    }
}

impl Default for StorageContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StorageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageContext")
            .field("configured", &self.is_configured())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
