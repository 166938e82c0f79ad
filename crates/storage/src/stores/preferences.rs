//! User preferences store.
//!
//! Singleton record under `preferences.json`. A record that was never
//! written reads back as the installation defaults.

use std::sync::Arc;

use interester_core::{PreferencesUpdate, UserPreferences};
use tokio::sync::Mutex;

use crate::adapter::StorageAdapterExt;
use crate::context::StorageContext;
use crate::error::StorageError;

pub const PREFERENCES_KEY: &str = "preferences.json";

pub struct PreferencesStore {
    ctx: Arc<StorageContext>,
    write_lock: Mutex<()>,
}

impl PreferencesStore {
    pub fn new(ctx: Arc<StorageContext>) -> Self {
        Self { ctx, write_lock: Mutex::new(()) }
    }

    pub async fn get(&self) -> Result<UserPreferences, StorageError> {
        let adapter = self.ctx.adapter()?;
        Ok(adapter.read_json(PREFERENCES_KEY).await?.unwrap_or_default())
    }

    pub async fn save(&self, preferences: &UserPreferences) -> Result<(), StorageError> {
        let adapter = self.ctx.adapter()?;
        adapter.write_json(PREFERENCES_KEY, preferences).await
    }

    /// Merge `updates` over the stored record and persist the result.
    pub async fn update(&self, updates: PreferencesUpdate) -> Result<UserPreferences, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut current = self.get().await?;

        if let Some(email) = updates.notification_email {
            current.notification_email = Some(email);
        }
        if let Some(frequency) = updates.notification_frequency {
            current.notification_frequency = Some(frequency);
        }
        if let Some(content_types) = updates.default_content_types {
            current.default_content_types = content_types;
        }
        if let Some(max) = updates.max_results_per_search {
            current.max_results_per_search = max;
        }
        if let Some(enabled) = updates.enable_notifications {
            current.enable_notifications = enabled;
        }

        self.save(&current).await?;
        Ok(current)
    }

    /// Restore the fixed defaults, regardless of prior state.
    pub async fn reset(&self) -> Result<UserPreferences, StorageError> {
        let _guard = self.write_lock.lock().await;
        let defaults = UserPreferences::default();
        self.save(&defaults).await?;
        Ok(defaults)
    }
}
