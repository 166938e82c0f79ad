//! Storage initialization.
//!
//! Picks a backend from explicit runtime-capability flags and installs it
//! into the context, once per process. Priority: configured override, then
//! embedded key-value store, then remote service, then local filesystem.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::backends::{JsonFsAdapter, RemoteJsonAdapter, SqliteKvAdapter};
use crate::context::StorageContext;
use crate::error::StorageError;

/// Which backend implementation to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Embedded rusqlite key-value store.
    Kv,
    /// Remote persistence service over HTTP.
    Remote,
    /// Local JSON files.
    Fs,
}

impl FromStr for BackendKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kv" => Ok(Self::Kv),
            "remote" => Ok(Self::Remote),
            "fs" => Ok(Self::Fs),
            _ => Err(StorageError::Init(format!("unknown backend kind: {s}"))),
        }
    }
}

/// Runtime flags that drive backend selection.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Explicit override; skips detection entirely.
    pub backend: Option<BackendKind>,
    /// Base directory for the filesystem backend.
    pub data_dir: PathBuf,
    /// Base URL of the remote persistence service, when one is reachable.
    pub remote_base_url: Option<String>,
    /// Path of the embedded store, when a native store is available.
    pub kv_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: None, data_dir: PathBuf::from("data"), remote_base_url: None, kv_path: None }
    }
}

impl StorageConfig {
    /// Read flags from `INTERESTER_BACKEND`, `INTERESTER_DATA_DIR`,
    /// `INTERESTER_REMOTE_URL`, and `INTERESTER_KV_PATH`.
    pub fn from_env() -> Result<Self, StorageError> {
        let backend = match std::env::var("INTERESTER_BACKEND") {
            Ok(s) => Some(s.parse()?),
            Err(_) => None,
        };
        let data_dir = std::env::var("INTERESTER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let remote_base_url = std::env::var("INTERESTER_REMOTE_URL").ok();
        let kv_path = std::env::var("INTERESTER_KV_PATH").ok().map(PathBuf::from);
        Ok(Self { backend, data_dir, remote_base_url, kv_path })
    }
}

/// Resolve which backend `config` selects, without constructing it.
pub fn detect_backend(config: &StorageConfig) -> BackendKind {
    if let Some(kind) = config.backend {
        return kind;
    }
    if config.kv_path.is_some() {
        BackendKind::Kv
    } else if config.remote_base_url.is_some() {
        BackendKind::Remote
    } else {
        BackendKind::Fs
    }
}

/// Detect, construct, and install the backend for this process.
///
/// Idempotent: after the first successful call, later calls return without
/// touching the context. Construction failures surface immediately and leave
/// the guard clear so a corrected config can retry.
pub fn initialize_storage(
    ctx: &StorageContext,
    config: &StorageConfig,
) -> Result<BackendKind, StorageError> {
    let kind = detect_backend(config);
    if ctx.is_initialized() {
        return Ok(kind);
    }

    match kind {
        BackendKind::Kv => {
            let path = config
                .kv_path
                .clone()
                .ok_or_else(|| StorageError::Init("kv backend selected without a store path".to_owned()))?;
            tracing::info!(path = %path.display(), "initializing key-value store adapter");
            ctx.configure(Arc::new(SqliteKvAdapter::open(&path)?));
        }
        BackendKind::Remote => {
            let base_url = config
                .remote_base_url
                .clone()
                .ok_or_else(|| StorageError::Init("remote backend selected without a base URL".to_owned()))?;
            tracing::info!(base_url, "initializing remote JSON adapter");
            ctx.configure(Arc::new(RemoteJsonAdapter::new(base_url)?));
        }
        BackendKind::Fs => {
            tracing::info!(data_dir = %config.data_dir.display(), "initializing JSON filesystem adapter");
            ctx.configure(Arc::new(JsonFsAdapter::new(config.data_dir.clone())));
        }
    }

    ctx.mark_initialized();
    tracing::info!(?kind, "storage initialized");
    Ok(kind)
}

/// Clear the one-shot guard (not the adapter slot) so a later
/// [`initialize_storage`] call reinitializes from scratch. Test isolation
/// hook.
pub fn reset_initialization(ctx: &StorageContext) {
    ctx.clear_initialized();
}
