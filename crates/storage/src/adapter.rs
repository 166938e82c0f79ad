//! Storage adapter contract.
//!
//! Abstracts the underlying persistence mechanism (remote JSON service,
//! local JSON files, embedded key-value store). Backends move raw
//! `serde_json::Value`s so the trait stays object-safe; typed access goes
//! through [`StorageAdapterExt`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StorageError;

/// Capability set every backend implements.
///
/// Keys are relative slash-separated paths (`interests.json`,
/// `results/<id>.json`). An absent key is `Ok(None)` / `Ok(false)`, never an
/// error; errors are reserved for I/O, transport, and decode failures.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Read the value stored at `key`, or `None` if the key was never written.
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write `value` at `key`, overwriting any existing value. Durable (or
    /// an error) before this returns.
    async fn write(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Existence probe independent of `read`.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Remove `key`. Whether deleting an absent key errors is
    /// implementation-defined; the bundled backends all treat it as success.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// All keys sharing `prefix` (every key when `None`), sorted.
    async fn list(&self, prefix: Option<&str>) -> Result<Vec<String>, StorageError>;
}

/// Typed convenience layer over the raw-value contract.
#[async_trait]
pub trait StorageAdapterExt: StorageAdapter {
    /// Read and deserialize the value at `key`.
    async fn read_json<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned + Send,
    {
        match self.read(key).await? {
            Some(value) => {
                let data = serde_json::from_value(value)
                    .map_err(|source| StorageError::Corrupt { key: key.to_owned(), source })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Serialize and write `data` at `key`.
    async fn write_json<T>(&self, key: &str, data: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(data)
            .map_err(|source| StorageError::Corrupt { key: key.to_owned(), source })?;
        self.write(key, &value).await
    }
}

#[async_trait]
impl<A: StorageAdapter + ?Sized> StorageAdapterExt for A {}

/// Reject keys that would escape the backend's key space.
///
/// Shared by the filesystem backend and the persistence endpoints that
/// mirror it.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("empty key".to_owned()));
    }
    if key.starts_with('/') || key.split('/').any(|part| part == "..") {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_key;

    #[test]
    fn rejects_traversal_and_absolute_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("../secrets.json").is_err());
        assert!(validate_key("results/../../x.json").is_err());
        assert!(validate_key("interests.json").is_ok());
        assert!(validate_key("results/abc.json").is_ok());
    }
}
