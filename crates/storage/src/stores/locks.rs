//! Per-key write serialization.
//!
//! Every domain mutation is a read-modify-write over a whole collection key,
//! so two concurrent callers racing on the same key could lose an update.
//! Stores take one of these locks for the duration of the cycle. In-process
//! only; cross-process coordination is out of scope.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::Mutex;

#[derive(Default)]
pub(crate) struct KeyLocks {
    inner: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `key`, created on first use and shared thereafter.
    pub(crate) fn for_key(&self, key: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(key.to_owned()).or_default())
    }
}
