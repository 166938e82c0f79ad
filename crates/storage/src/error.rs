//! Typed error enum for the storage layer.
//!
//! Absent keys are never errors: adapters report them as `Ok(None)` /
//! `Ok(false)`. Every variant here is a real failure the caller can match on,
//! instead of a silent null that conflates "missing" with "broken".

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Context accessed before any adapter was installed.
    #[error("storage adapter not configured; call StorageContext::configure first")]
    Unconfigured,

    /// Filesystem failure for a key.
    #[error("i/o error for key {key}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Embedded key-value store failure.
    #[error("key-value store error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Transport failure talking to the remote persistence service.
    #[error("transport error for key {key}")]
    Transport {
        key: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote persistence service answered with a non-success status.
    #[error("remote endpoint returned status {status} for key {key}")]
    Remote { key: String, status: u16 },

    /// Stored bytes could not be decoded into the expected shape.
    #[error("data corruption at key {key}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key rejected before hitting any backend (empty, absolute, traversal).
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend could not be constructed.
    #[error("backend initialization failed: {0}")]
    Init(String),

    /// A lock guarding backend state was poisoned by a panicking thread.
    #[error("storage lock poisoned: {0}")]
    Poisoned(String),
}

impl StorageError {
    /// Whether the error indicates a misconfigured process rather than a
    /// failing backend. Callers should not retry these.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Unconfigured | Self::InvalidKey(_) | Self::Init(_))
    }
}
