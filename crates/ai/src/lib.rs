//! AI collaborators for interester.
//!
//! Outbound HTTP wrappers only: a web-search client and an LLM summarization
//! client. Both read their secret keys from the environment; a missing key
//! degrades these features without affecting storage.

mod error;
mod search;
mod summary;
#[cfg(test)]
mod tests;

pub use error::AiError;
pub use search::{WebSearchClient, DEFAULT_SEARCH_URL};
pub use summary::{SummaryClient, DEFAULT_LLM_URL, DEFAULT_MODEL};

pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Log a startup warning for each missing secret key.
pub fn warn_missing_keys() {
    if std::env::var("GEMINI_KEY").is_err() {
        tracing::warn!("GEMINI_KEY is not set; summarization will fail until it is configured");
    }
    if std::env::var("SERPER_KEY").is_err() {
        tracing::warn!("SERPER_KEY is not set; web search will fail until it is configured");
    }
}
