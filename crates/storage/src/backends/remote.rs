//! Remote (HTTP-backed) adapter.
//!
//! Reads flow through `GET {base}/data/{key}` with an in-process read cache;
//! writes, deletes, and listings delegate to the companion persistence
//! endpoints under `{base}/api/storage/`, which mirror the filesystem
//! backend's semantics server-side.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::adapter::StorageAdapter;
use crate::cache::ReadCache;
use crate::error::StorageError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct RemoteJsonAdapter {
    client: reqwest::Client,
    base_url: String,
    cache: ReadCache,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    keys: Vec<String>,
}

impl RemoteJsonAdapter {
    /// Build an adapter against `base_url` (scheme + host, no trailing slash
    /// required).
    pub fn new(base_url: impl Into<String>) -> Result<Self, StorageError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(StorageError::Init("remote base URL is empty".to_owned()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StorageError::Init(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client, base_url, cache: ReadCache::new() })
    }

    /// Expire every cached read. See [`ReadCache`] for the staleness policy.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }

    fn data_url(&self, key: &str) -> String {
        format!("{}/data/{key}", self.base_url)
    }

    fn transport(key: &str, source: reqwest::Error) -> StorageError {
        StorageError::Transport { key: key.to_owned(), source }
    }
}

#[async_trait]
impl StorageAdapter for RemoteJsonAdapter {
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value));
        }

        let response = self
            .client
            .get(self.data_url(key))
            .send()
            .await
            .map_err(|e| Self::transport(key, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            tracing::warn!(key, status = %response.status(), "remote read failed");
            return Err(StorageError::Remote {
                key: key.to_owned(),
                status: response.status().as_u16(),
            });
        }

        let value: Value = response.json().await.map_err(|e| Self::transport(key, e))?;
        self.cache.put(key, value.clone());
        Ok(Some(value))
    }

    async fn write(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let response = self
            .client
            .post(format!("{}/api/storage/write", self.base_url))
            .json(&json!({ "key": key, "data": value }))
            .send()
            .await
            .map_err(|e| Self::transport(key, e))?;

        if !response.status().is_success() {
            tracing::error!(key, status = %response.status(), "remote write failed");
            return Err(StorageError::Remote {
                key: key.to_owned(),
                status: response.status().as_u16(),
            });
        }

        self.cache.put(key, value.clone());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.client.head(self.data_url(key)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::debug!(key, error = %e, "existence probe failed");
                Ok(false)
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .post(format!("{}/api/storage/delete", self.base_url))
            .json(&json!({ "key": key }))
            .send()
            .await
            .map_err(|e| Self::transport(key, e))?;

        // 404 from the endpoint means the key was already gone.
        if !response.status().is_success() && response.status() != StatusCode::NOT_FOUND {
            tracing::error!(key, status = %response.status(), "remote delete failed");
            return Err(StorageError::Remote {
                key: key.to_owned(),
                status: response.status().as_u16(),
            });
        }

        self.cache.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: Option<&str>) -> Result<Vec<String>, StorageError> {
        let mut url = format!("{}/api/storage/list", self.base_url);
        if let Some(p) = prefix {
            url.push_str("?prefix=");
            url.push_str(&urlencode(p));
        }
        let label = prefix.unwrap_or("");

        let response =
            self.client.get(url).send().await.map_err(|e| Self::transport(label, e))?;
        if !response.status().is_success() {
            return Err(StorageError::Remote {
                key: label.to_owned(),
                status: response.status().as_u16(),
            });
        }

        let body: ListResponse = response.json().await.map_err(|e| Self::transport(label, e))?;
        Ok(body.keys)
    }
}

/// Percent-encode a query value. Keys only contain path-ish characters, so
/// escaping the reserved few is enough.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(b as char);
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
