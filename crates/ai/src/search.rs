//! Web-search client.
//!
//! Thin wrapper over a Serper-style search endpoint. Server-side only: the
//! API key is a secret and must never reach a client bundle.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use interester_core::{Interest, SearchResult};

use crate::error::AiError;
use crate::REQUEST_TIMEOUT_SECS;

pub const DEFAULT_SEARCH_URL: &str = "https://google.serper.dev";

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
    gl: &'a str,
    hl: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicHit>,
}

#[derive(Deserialize)]
struct OrganicHit {
    title: String,
    link: String,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

pub struct WebSearchClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for WebSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl WebSearchClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, AiError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AiError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url })
    }

    /// Build a client from `SERPER_KEY`.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("SERPER_KEY").map_err(|_| AiError::MissingApiKey("SERPER_KEY"))?;
        Self::new(api_key, DEFAULT_SEARCH_URL.to_owned())
    }

    /// Run one search for `interest`, joining its search terms into a single
    /// query, and map the organic hits into [`SearchResult`]s.
    pub async fn search(
        &self,
        interest: &Interest,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, AiError> {
        let query = interest.search_terms.join(" ");
        let request =
            SearchRequest { q: &query, num: max_results.max(1), gl: "us", hl: "en" };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|source| {
            AiError::JsonParse { context: "search response".to_owned(), source }
        })?;

        let fetched_at = Utc::now();
        let results = parsed
            .organic
            .into_iter()
            .map(|hit| SearchResult {
                id: Uuid::new_v4().to_string(),
                interest_id: interest.id.clone(),
                source: host_of(&hit.link).unwrap_or_else(|| "web".to_owned()),
                url: hit.link,
                title: hit.title,
                snippet: hit.snippet.unwrap_or_default(),
                content: None,
                published_date: hit.date,
                fetched_at,
                relevance_score: None,
                content_type: None,
            })
            .collect();
        Ok(results)
    }
}

fn host_of(url: &str) -> Option<String> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = rest.split(['/', '?']).next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::host_of;

    #[test]
    fn host_extraction() {
        assert_eq!(host_of("https://example.com/a/b?c=1"), Some("example.com".to_owned()));
        assert_eq!(host_of("example.org/page"), Some("example.org".to_owned()));
        assert_eq!(host_of("https://"), None);
    }
}
