//! Contract suite run against every local backend.

use serde_json::json;
use tempfile::TempDir;

use crate::{JsonFsAdapter, SqliteKvAdapter, StorageAdapter, StorageError};

async fn contract_suite(adapter: &dyn StorageAdapter) {
    // Never-written keys read back as absent, not as errors.
    assert!(adapter.read("never-written.json").await.unwrap().is_none());
    assert!(!adapter.exists("never-written.json").await.unwrap());

    // Write then read round-trips the value.
    let value = json!({"name": "AI news", "terms": ["ai", "ml"], "count": 3});
    adapter.write("topics.json", &value).await.unwrap();
    assert_eq!(adapter.read("topics.json").await.unwrap(), Some(value));
    assert!(adapter.exists("topics.json").await.unwrap());

    // Last write wins on a single key.
    adapter.write("topics.json", &json!({"v": 1})).await.unwrap();
    adapter.write("topics.json", &json!({"v": 2})).await.unwrap();
    assert_eq!(adapter.read("topics.json").await.unwrap(), Some(json!({"v": 2})));

    // Delete makes the key absent again; deleting it twice is fine.
    adapter.delete("topics.json").await.unwrap();
    assert!(adapter.read("topics.json").await.unwrap().is_none());
    assert!(!adapter.exists("topics.json").await.unwrap());
    adapter.delete("topics.json").await.unwrap();
}

async fn list_suite(adapter: &dyn StorageAdapter) {
    // Written out of order; listing is by key, not by write order.
    adapter.write("results/b.json", &json!([2])).await.unwrap();
    adapter.write("results/a.json", &json!([1])).await.unwrap();
    adapter.write("interests.json", &json!([])).await.unwrap();

    let all = adapter.list(None).await.unwrap();
    assert!(all.contains(&"interests.json".to_owned()));
    assert!(all.contains(&"results/a.json".to_owned()));
    assert!(all.contains(&"results/b.json".to_owned()));

    let results = adapter.list(Some("results/")).await.unwrap();
    assert_eq!(results, vec!["results/a.json".to_owned(), "results/b.json".to_owned()]);

    // A prefix nothing was written under lists empty.
    let none = adapter.list(Some("executions/")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn fs_adapter_satisfies_contract() {
    let tmp = TempDir::new().unwrap();
    let adapter = JsonFsAdapter::new(tmp.path());
    contract_suite(&adapter).await;
    list_suite(&adapter).await;
}

#[tokio::test]
async fn kv_adapter_satisfies_contract() {
    let adapter = SqliteKvAdapter::open_in_memory().unwrap();
    contract_suite(&adapter).await;
    list_suite(&adapter).await;
}

#[tokio::test]
async fn fs_adapter_distinguishes_corrupt_from_missing() {
    let tmp = TempDir::new().unwrap();
    let adapter = JsonFsAdapter::new(tmp.path());

    std::fs::write(tmp.path().join("broken.json"), b"{not json").unwrap();

    match adapter.read("broken.json").await {
        Err(StorageError::Corrupt { key, .. }) => assert_eq!(key, "broken.json"),
        other => panic!("expected Corrupt error, got {other:?}"),
    }
    assert!(adapter.read("missing.json").await.unwrap().is_none());
}

#[tokio::test]
async fn fs_adapter_rejects_traversal_keys() {
    let tmp = TempDir::new().unwrap();
    let adapter = JsonFsAdapter::new(tmp.path());

    let err = adapter.write("../escape.json", &json!(1)).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey(_)));
    let err = adapter.read("/etc/passwd").await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey(_)));
}

#[tokio::test]
async fn fs_adapter_creates_parent_directories_on_write() {
    let tmp = TempDir::new().unwrap();
    let adapter = JsonFsAdapter::new(tmp.path());

    adapter.write("results/deep/nested.json", &json!({"ok": true})).await.unwrap();
    assert!(tmp.path().join("results/deep/nested.json").is_file());
}

#[tokio::test]
async fn kv_adapter_persists_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("store/interester.db");

    {
        let adapter = SqliteKvAdapter::open(&path).unwrap();
        adapter.write("interests.json", &json!([{"id": "a"}])).await.unwrap();
    }

    let reopened = SqliteKvAdapter::open(&path).unwrap();
    assert_eq!(
        reopened.read("interests.json").await.unwrap(),
        Some(json!([{"id": "a"}]))
    );
}

#[tokio::test]
async fn kv_adapter_list_filters_prefix_client_side() {
    let adapter = SqliteKvAdapter::open_in_memory().unwrap();
    adapter.write("results/x.json", &json!([])).await.unwrap();
    adapter.write("preferences.json", &json!({})).await.unwrap();

    let keys = adapter.list(Some("results/")).await.unwrap();
    assert_eq!(keys, vec!["results/x.json".to_owned()]);
}
