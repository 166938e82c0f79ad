//! Embedded key-value backend.
//!
//! Wraps a rusqlite store with a single `kv(key, value)` table. The store is
//! opened and its schema created at construction; a missing or unusable
//! store file is a constructor-time error, never a deferred one. Mutations
//! run inside an explicit transaction whose commit is the durable-save step.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::adapter::StorageAdapter;
use crate::error::StorageError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";

pub struct SqliteKvAdapter {
    conn: Arc<Mutex<Connection>>,
}

fn lock_conn(mutex: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, StorageError> {
    mutex.lock().map_err(|e: PoisonError<_>| StorageError::Poisoned(e.to_string()))
}

impl SqliteKvAdapter {
    /// Open (or create) the store at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Init(format!(
                        "cannot create store directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| StorageError::Init(format!("cannot open store {}: {e}", path.display())))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StorageError::Init(format!("cannot create kv schema: {e}")))?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Init(format!("cannot open in-memory store: {e}")))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StorageError::Init(format!("cannot create kv schema: {e}")))?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }
}

#[async_trait]
impl StorageAdapter for SqliteKvAdapter {
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let conn = lock_conn(&self.conn)?;
        let raw: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;

        match raw {
            Some(text) => {
                let value = serde_json::from_str(&text)
                    .map_err(|source| StorageError::Corrupt { key: key.to_owned(), source })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn write(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)
            .map_err(|source| StorageError::Corrupt { key: key.to_owned(), source })?;

        let mut conn = lock_conn(&self.conn)?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, text],
        )?;
        tx.commit()?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let conn = lock_conn(&self.conn)?;
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = lock_conn(&self.conn)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        tx.commit()?;
        Ok(())
    }

    async fn list(&self, prefix: Option<&str>) -> Result<Vec<String>, StorageError> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        // The store has no native prefix query; filter client-side.
        let mut keys = Vec::new();
        for row in rows {
            let key = row?;
            if prefix.map_or(true, |p| key.starts_with(p)) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
