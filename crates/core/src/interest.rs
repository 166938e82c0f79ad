use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of content a search is expected to surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    News,
    Events,
    Articles,
    Discussions,
    General,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Events => "events",
            Self::Articles => "articles",
            Self::Discussions => "discussions",
            Self::General => "general",
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(Self::News),
            "events" => Ok(Self::Events),
            "articles" => Ok(Self::Articles),
            "discussions" => Ok(Self::Discussions),
            "general" => Ok(Self::General),
            _ => Err(ParseEnumError { kind: "content type", value: s.to_owned() }),
        }
    }
}

/// Error parsing one of the string-backed domain enums.
#[derive(Debug, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// How often an interest should be refreshed (reserved for scheduling).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleFrequency {
    Hourly,
    Daily,
    Weekly,
    Manual,
}

/// A tracked search topic.
///
/// The whole collection is persisted as one ordered array under the
/// `interests.json` key; every mutation rewrites the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub search_terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_urls: Option<Vec<String>>,
    pub content_types: Vec<ContentType>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_frequency: Option<ScheduleFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<String>,
}

/// Fields supplied when creating an interest. The store stamps id,
/// timestamps, and the active flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestCreateInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub search_terms: Vec<String>,
    #[serde(default)]
    pub monitor_urls: Option<Vec<String>>,
    #[serde(default)]
    pub content_types: Vec<ContentType>,
}

/// Partial update applied over an existing interest. Absent fields are
/// left untouched; the id can never be changed through an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestUpdateInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub search_terms: Option<Vec<String>>,
    #[serde(default)]
    pub monitor_urls: Option<Vec<String>>,
    #[serde(default)]
    pub content_types: Option<Vec<ContentType>>,
    #[serde(default)]
    pub active: Option<bool>,
}
