//! Remote adapter behavior against a mock persistence service.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{RemoteJsonAdapter, StorageAdapter, StorageError};

async fn adapter_for(server: &MockServer) -> RemoteJsonAdapter {
    RemoteJsonAdapter::new(server.uri()).unwrap()
}

#[tokio::test]
async fn read_maps_404_to_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    assert!(adapter.read("missing.json").await.unwrap().is_none());
}

#[tokio::test]
async fn read_error_status_is_an_error_not_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/interests.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    match adapter.read("interests.json").await {
        Err(StorageError::Remote { key, status }) => {
            assert_eq!(key, "interests.json");
            assert_eq!(status, 500);
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn second_read_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/interests.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "a"}])))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    let first = adapter.read("interests.json").await.unwrap();
    let second = adapter.read("interests.json").await.unwrap();
    assert_eq!(first, second);
    // expect(1) verifies on drop that only one request went out.
}

#[tokio::test]
async fn invalidate_cache_forces_a_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/interests.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    adapter.read("interests.json").await.unwrap();
    adapter.invalidate_cache();
    adapter.read("interests.json").await.unwrap();
}

#[tokio::test]
async fn write_delegates_to_the_endpoint_and_populates_the_cache() {
    let server = MockServer::start().await;
    let value = json!([{"id": "a", "name": "AI news"}]);
    Mock::given(method("POST"))
        .and(path("/api/storage/write"))
        .and(body_json(json!({"key": "interests.json", "data": value})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    adapter.write("interests.json", &value).await.unwrap();

    // No GET mock is mounted: a read can only succeed via the cache.
    assert_eq!(adapter.read("interests.json").await.unwrap(), Some(value));
}

#[tokio::test]
async fn failed_write_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/storage/write"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    let err = adapter.write("interests.json", &json!([])).await.unwrap_err();
    assert!(matches!(err, StorageError::Remote { status: 500, .. }));
}

#[tokio::test]
async fn delete_evicts_the_cache_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/storage/write"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/storage/delete"))
        .and(body_json(json!({"key": "interests.json"})))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/interests.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    adapter.write("interests.json", &json!([])).await.unwrap();
    adapter.delete("interests.json").await.unwrap();

    // The cached write is gone, so the read goes back to the server.
    assert!(adapter.read("interests.json").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_of_an_already_missing_key_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/storage/delete"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    adapter.delete("gone.json").await.unwrap();
}

#[tokio::test]
async fn exists_probes_without_reading() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/data/preferences.json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/data/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    assert!(adapter.exists("preferences.json").await.unwrap());
    assert!(!adapter.exists("missing.json").await.unwrap());
}

#[tokio::test]
async fn list_passes_the_prefix_and_unwraps_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/storage/list"))
        .and(query_param("prefix", "results/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "keys": ["results/a.json", "results/b.json"],
        })))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    let keys = adapter.list(Some("results/")).await.unwrap();
    assert_eq!(keys, vec!["results/a.json".to_owned(), "results/b.json".to_owned()]);
}

#[tokio::test]
async fn list_failure_propagates_instead_of_returning_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/storage/list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = adapter_for(&server).await;
    let err = adapter.list(Some("results/")).await.unwrap_err();
    assert!(matches!(err, StorageError::Remote { status: 500, .. }));
}
