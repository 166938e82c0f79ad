//! Backend implementations of the [`crate::StorageAdapter`] contract.

mod fs;
mod kv;
mod remote;

pub use fs::JsonFsAdapter;
pub use kv::SqliteKvAdapter;
pub use remote::RemoteJsonAdapter;
