//! Formatted-results store.
//!
//! One key per interest (`results/<interestId>.json`), each holding the full
//! result array for that interest, overwritten wholesale on save. Operations
//! on different interests never contend; writes for the same interest
//! serialize on a per-key lock.

use std::sync::Arc;

use interester_core::FormattedResult;

use crate::adapter::StorageAdapterExt;
use crate::context::StorageContext;
use crate::error::StorageError;
use crate::stores::locks::KeyLocks;

pub const RESULTS_PREFIX: &str = "results/";

pub struct ResultStore {
    ctx: Arc<StorageContext>,
    locks: KeyLocks,
}

fn result_key(interest_id: &str) -> String {
    format!("{RESULTS_PREFIX}{interest_id}.json")
}

impl ResultStore {
    pub fn new(ctx: Arc<StorageContext>) -> Self {
        Self { ctx, locks: KeyLocks::new() }
    }

    /// Results for one interest; empty when nothing was ever saved.
    pub async fn get_by_interest_id(
        &self,
        interest_id: &str,
    ) -> Result<Vec<FormattedResult>, StorageError> {
        let adapter = self.ctx.adapter()?;
        Ok(adapter.read_json(&result_key(interest_id)).await?.unwrap_or_default())
    }

    /// Overwrite the full result array for `interest_id`.
    pub async fn save(
        &self,
        interest_id: &str,
        results: &[FormattedResult],
    ) -> Result<(), StorageError> {
        let key = result_key(interest_id);
        let lock = self.locks.for_key(&key);
        let _guard = lock.lock().await;

        let adapter = self.ctx.adapter()?;
        adapter.write_json(&key, &results).await
    }

    /// Drop all results for `interest_id`. Deleting results that were never
    /// saved is not an error.
    pub async fn delete(&self, interest_id: &str) -> Result<(), StorageError> {
        let key = result_key(interest_id);
        let lock = self.locks.for_key(&key);
        let _guard = lock.lock().await;

        let adapter = self.ctx.adapter()?;
        adapter.delete(&key).await
    }

    /// Interest ids that have stored results.
    pub async fn list_all(&self) -> Result<Vec<String>, StorageError> {
        let adapter = self.ctx.adapter()?;
        let keys = adapter.list(Some(RESULTS_PREFIX)).await?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                key.strip_prefix(RESULTS_PREFIX).map(|k| k.trim_end_matches(".json").to_owned())
            })
            .collect())
    }
}
