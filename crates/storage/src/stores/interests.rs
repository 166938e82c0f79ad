//! Interest record store.
//!
//! Owns the `interests.json` key: the whole collection is one ordered array,
//! rewritten on every mutation. Mutations serialize on an internal mutex so
//! concurrent read-modify-write cycles cannot lose updates.

use std::sync::Arc;

use chrono::Utc;
use interester_core::{Interest, InterestCreateInput, InterestUpdateInput};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::adapter::StorageAdapterExt;
use crate::context::StorageContext;
use crate::error::StorageError;

pub const INTERESTS_KEY: &str = "interests.json";

pub struct InterestStore {
    ctx: Arc<StorageContext>,
    write_lock: Mutex<()>,
}

impl InterestStore {
    pub fn new(ctx: Arc<StorageContext>) -> Self {
        Self { ctx, write_lock: Mutex::new(()) }
    }

    /// Every interest. A collection that was never written is empty.
    pub async fn get_all(&self) -> Result<Vec<Interest>, StorageError> {
        let adapter = self.ctx.adapter()?;
        Ok(adapter.read_json(INTERESTS_KEY).await?.unwrap_or_default())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Interest>, StorageError> {
        let interests = self.get_all().await?;
        Ok(interests.into_iter().find(|i| i.id == id))
    }

    /// Replace the whole collection.
    pub async fn save(&self, interests: &[Interest]) -> Result<(), StorageError> {
        let adapter = self.ctx.adapter()?;
        adapter.write_json(INTERESTS_KEY, &interests).await
    }

    /// Create an interest: fresh id, `active: true`, both timestamps stamped
    /// to the same instant.
    pub async fn create(&self, input: InterestCreateInput) -> Result<Interest, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut interests = self.get_all().await?;

        let now = Utc::now();
        let interest = Interest {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            search_terms: input.search_terms,
            monitor_urls: input.monitor_urls,
            content_types: input.content_types,
            active: true,
            created_at: now,
            updated_at: now,
            schedule_frequency: None,
            schedule_time: None,
        };

        interests.push(interest.clone());
        self.save(&interests).await?;
        tracing::debug!(id = %interest.id, name = %interest.name, "created interest");
        Ok(interest)
    }

    /// Merge `updates` over the interest with `id`. Returns `None` without
    /// writing when the id is unknown. The id and creation timestamp survive
    /// any update; `updated_at` is refreshed.
    pub async fn update(
        &self,
        id: &str,
        updates: InterestUpdateInput,
    ) -> Result<Option<Interest>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut interests = self.get_all().await?;

        let Some(existing) = interests.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        if let Some(name) = updates.name {
            existing.name = name;
        }
        if let Some(description) = updates.description {
            existing.description = Some(description);
        }
        if let Some(search_terms) = updates.search_terms {
            existing.search_terms = search_terms;
        }
        if let Some(monitor_urls) = updates.monitor_urls {
            existing.monitor_urls = Some(monitor_urls);
        }
        if let Some(content_types) = updates.content_types {
            existing.content_types = content_types;
        }
        if let Some(active) = updates.active {
            existing.active = active;
        }
        existing.updated_at = Utc::now();

        let updated = existing.clone();
        self.save(&interests).await?;
        Ok(Some(updated))
    }

    /// Remove the interest with `id`. Returns `false` without writing when
    /// the id is unknown.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let interests = self.get_all().await?;

        let filtered: Vec<Interest> =
            interests.iter().filter(|i| i.id != id).cloned().collect();
        if filtered.len() == interests.len() {
            return Ok(false);
        }

        self.save(&filtered).await?;
        tracing::debug!(id, "deleted interest");
        Ok(true)
    }
}
