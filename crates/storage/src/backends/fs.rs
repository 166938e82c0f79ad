//! Filesystem backend.
//!
//! Direct local-disk JSON files rooted at a base directory; each key maps to
//! a relative file path. This is the only backend that manages a real file
//! tree, so it alone carries directory-creation responsibility on write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::adapter::{validate_key, StorageAdapter};
use crate::error::StorageError;

/// Extension every data file carries; `list` filters to it.
const DATA_EXT: &str = "json";

pub struct JsonFsAdapter {
    base_dir: PathBuf,
}

impl JsonFsAdapter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_dir.join(key))
    }

    fn io_err(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io { key: key.to_owned(), source }
    }

    /// Base-relative key for a file path, slash-separated.
    fn key_for(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.base_dir).ok()?;
        let parts: Vec<&str> = rel.iter().map(|c| c.to_str()).collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}

#[async_trait]
impl StorageAdapter for JsonFsAdapter {
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read data file");
                return Err(Self::io_err(key, e));
            }
        };

        let value = serde_json::from_slice(&bytes)
            .map_err(|source| StorageError::Corrupt { key: key.to_owned(), source })?;
        Ok(Some(value))
    }

    async fn write(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| Self::io_err(key, e))?;
        }

        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|source| StorageError::Corrupt { key: key.to_owned(), source })?;
        fs::write(&path, bytes).await.map_err(|e| {
            tracing::error!(key, error = %e, "failed to write data file");
            Self::io_err(key, e)
        })
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::io_err(key, e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone counts as deleted.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::error!(key, error = %e, "failed to delete data file");
                Err(Self::io_err(key, e))
            }
        }
    }

    async fn list(&self, prefix: Option<&str>) -> Result<Vec<String>, StorageError> {
        let root = match prefix {
            Some(p) => self.path_for(p)?,
            None => self.base_dir.clone(),
        };
        let label = prefix.unwrap_or("");

        let mut keys = Vec::new();
        let mut pending = vec![root];
        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                // A prefix nothing was ever written under is an empty listing.
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(Self::io_err(label, e)),
            };

            while let Some(entry) =
                entries.next_entry().await.map_err(|e| Self::io_err(label, e))?
            {
                let path = entry.path();
                let file_type = entry.file_type().await.map_err(|e| Self::io_err(label, e))?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == DATA_EXT) {
                    if let Some(key) = self.key_for(&path) {
                        keys.push(key);
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
