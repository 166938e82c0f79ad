//! Storage layer for interester.
//!
//! A uniform key-value persistence contract ([`StorageAdapter`]) with three
//! interchangeable backends — remote HTTP service, local JSON files, and an
//! embedded key-value store — plus the typed record stores (interests,
//! preferences, results) built on top of it.

mod adapter;
mod backends;
mod cache;
mod context;
mod error;
mod init;
mod stores;
#[cfg(test)]
mod tests;

pub use adapter::{StorageAdapter, StorageAdapterExt};
pub use backends::{JsonFsAdapter, RemoteJsonAdapter, SqliteKvAdapter};
pub use context::StorageContext;
pub use error::StorageError;
pub use init::{
    detect_backend, initialize_storage, reset_initialization, BackendKind, StorageConfig,
};
pub use stores::{
    InterestStore, PreferencesStore, ResultStore, INTERESTS_KEY, PREFERENCES_KEY, RESULTS_PREFIX,
};
