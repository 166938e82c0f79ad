use serde::{Deserialize, Serialize};

use crate::ContentType;

/// How often result notifications are delivered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFrequency {
    Immediate,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Singleton per-installation settings, persisted under `preferences.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_frequency: Option<NotificationFrequency>,
    pub default_content_types: Vec<ContentType>,
    pub max_results_per_search: u32,
    pub enable_notifications: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            notification_email: None,
            notification_frequency: None,
            default_content_types: vec![ContentType::News, ContentType::Articles],
            max_results_per_search: 10,
            enable_notifications: false,
        }
    }
}

/// Partial update merged over the stored preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub notification_email: Option<String>,
    #[serde(default)]
    pub notification_frequency: Option<NotificationFrequency>,
    #[serde(default)]
    pub default_content_types: Option<Vec<ContentType>>,
    #[serde(default)]
    pub max_results_per_search: Option<u32>,
    #[serde(default)]
    pub enable_notifications: Option<bool>,
}
