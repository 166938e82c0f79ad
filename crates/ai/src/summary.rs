//! LLM summarization client.
//!
//! Wraps a Gemini-style `generateContent` endpoint and turns a batch of
//! search hits into one [`FormattedResult`] per run. Transient failures are
//! retried with a short backoff; everything else surfaces immediately.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use interester_core::{FormattedResult, Interest, ResultSource, SearchResult};

use crate::error::AiError;
use crate::REQUEST_TIMEOUT_SECS;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_LLM_URL: &str = "https://generativelanguage.googleapis.com";

const MAX_RETRIES: usize = 3;
const RETRY_DELAYS_SECS: [u64; 4] = [0, 1, 2, 4];

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub struct SummaryClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for SummaryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl SummaryClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, AiError> {
        let model = std::env::var("INTERESTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AiError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url, model })
    }

    /// Build a client from `GEMINI_KEY`.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("GEMINI_KEY").map_err(|_| AiError::MissingApiKey("GEMINI_KEY"))?;
        Self::new(api_key, DEFAULT_LLM_URL.to_owned())
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Send one prompt and return the first candidate's text.
    pub async fn generate_text(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
            system_instruction: system.map(|text| Content { parts: vec![Part { text }] }),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let mut last_error: Option<AiError> = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay_secs = RETRY_DELAYS_SECS.get(attempt).copied().unwrap_or(4);
                tokio::time::sleep(std::time::Duration::from_secs(delay_secs)).await;
                tracing::warn!("LLM retry attempt {attempt}/{MAX_RETRIES}");
            }

            let response = match self.client.post(&url).json(&request).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AiError::HttpRequest(e));
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(AiError::HttpRequest(e));
                        continue;
                    }
                };

                let parsed: GenerateResponse =
                    serde_json::from_str(&body).map_err(|source| AiError::JsonParse {
                        context: "generateContent response".to_owned(),
                        source,
                    })?;

                let text: String = parsed
                    .candidates
                    .first()
                    .ok_or(AiError::EmptyResponse)?
                    .content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect();
                return Ok(text);
            }

            let body = response.text().await.unwrap_or_default();
            let err = AiError::HttpStatus { code: status.as_u16(), body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(AiError::RetriesExhausted(Box::new(last_error.unwrap_or(AiError::EmptyResponse))))
    }

    /// Summarize a batch of search hits for `interest` into a single
    /// formatted result keyed by `search_id`.
    pub async fn summarize(
        &self,
        interest: &Interest,
        search_id: &str,
        hits: &[SearchResult],
    ) -> Result<FormattedResult, AiError> {
        let hits_text: String = hits
            .iter()
            .map(|h| format!("- {} ({})\n  {}", h.title, h.url, h.snippet))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Summarize the following search results about \"{}\".\n\
             Write a short paragraph, then 3-5 key points, one per line, \
             each starting with \"- \".\n\nResults:\n{hits_text}",
            interest.name,
        );

        let text = self
            .generate_text(&prompt, Some("You are a concise research assistant."))
            .await?;

        let (summary, key_points) = split_summary(&text);
        let sources = hits
            .iter()
            .map(|h| ResultSource {
                title: h.title.clone(),
                url: h.url.clone(),
                date: h.published_date.clone(),
            })
            .collect();

        Ok(FormattedResult {
            id: Uuid::new_v4().to_string(),
            interest_id: interest.id.clone(),
            search_id: search_id.to_owned(),
            formatted_html: render_html(&summary, &key_points),
            formatted_text: text,
            summary,
            key_points,
            sources,
            generated_at: Utc::now(),
        })
    }
}

/// Split a model reply into the leading paragraph and any `- ` bullet lines.
fn split_summary(text: &str) -> (String, Vec<String>) {
    let mut summary_lines = Vec::new();
    let mut key_points = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(point) = trimmed.strip_prefix("- ") {
            key_points.push(point.to_owned());
        } else if !trimmed.is_empty() && key_points.is_empty() {
            summary_lines.push(trimmed);
        }
    }
    (summary_lines.join(" "), key_points)
}

fn render_html(summary: &str, key_points: &[String]) -> String {
    let mut html = format!("<p>{}</p>", escape_html(summary));
    if !key_points.is_empty() {
        html.push_str("<ul>");
        for point in key_points {
            html.push_str(&format!("<li>{}</li>", escape_html(point)));
        }
        html.push_str("</ul>");
    }
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::{render_html, split_summary};

    #[test]
    fn splits_paragraph_and_bullets() {
        let text = "Quantum news has been busy.\n\n- chip announced\n- error rates down";
        let (summary, points) = split_summary(text);
        assert_eq!(summary, "Quantum news has been busy.");
        assert_eq!(points, vec!["chip announced".to_owned(), "error rates down".to_owned()]);
    }

    #[test]
    fn bullets_only_reply_yields_empty_summary() {
        let (summary, points) = split_summary("- just one point");
        assert!(summary.is_empty());
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn html_escapes_markup() {
        let html = render_html("a <b> & c", &["x > y".to_owned()]);
        assert!(html.contains("a &lt;b&gt; &amp; c"));
        assert!(html.contains("<li>x &gt; y</li>"));
    }
}
