use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribution for one source that fed a formatted result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSource {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A rendered summary produced from one search run over an interest.
///
/// Persisted as a full array per interest under `results/<interestId>.json`,
/// overwritten wholesale on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedResult {
    pub id: String,
    pub interest_id: String,
    pub search_id: String,
    pub formatted_html: String,
    pub formatted_text: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub sources: Vec<ResultSource>,
    pub generated_at: DateTime<Utc>,
}
