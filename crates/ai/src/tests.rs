use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use interester_core::{ContentType, Interest};

use crate::{AiError, SummaryClient, WebSearchClient};

fn sample_interest() -> Interest {
    let now = Utc::now();
    Interest {
        id: "interest-1".to_owned(),
        name: "Quantum computing".to_owned(),
        description: None,
        search_terms: vec!["quantum".to_owned(), "computing".to_owned()],
        monitor_urls: None,
        content_types: vec![ContentType::News],
        active: true,
        created_at: now,
        updated_at: now,
        schedule_frequency: None,
        schedule_time: None,
    }
}

#[tokio::test]
async fn search_maps_organic_hits_to_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [
                {"title": "Qubit milestone", "link": "https://example.com/qubits", "snippet": "A new record", "date": "2026-08-01"},
                {"title": "Untitled", "link": "https://other.org/post"},
            ]
        })))
        .mount(&server)
        .await;

    let client = WebSearchClient::new("test-key".to_owned(), server.uri()).unwrap();
    let interest = sample_interest();
    let results = client.search(&interest, 10).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].interest_id, "interest-1");
    assert_eq!(results[0].title, "Qubit milestone");
    assert_eq!(results[0].source, "example.com");
    assert_eq!(results[0].published_date.as_deref(), Some("2026-08-01"));
    assert!(results[1].snippet.is_empty());
    assert!(!results[0].id.is_empty());
    assert_ne!(results[0].id, results[1].id);
}

#[tokio::test]
async fn search_error_status_surfaces_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = WebSearchClient::new("wrong".to_owned(), server.uri()).unwrap();
    let err = client.search(&sample_interest(), 5).await.unwrap_err();
    match err {
        AiError::HttpStatus { code, body } => {
            assert_eq!(code, 403);
            assert_eq!(body, "bad key");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn summarize_builds_a_formatted_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Busy week in quantum.\n- new chip\n- better error rates"}]}
            }]
        })))
        .mount(&server)
        .await;

    let client = SummaryClient::new("test-key".to_owned(), server.uri()).unwrap();
    let interest = sample_interest();
    let hits = vec![interester_core::SearchResult {
        id: "hit-1".to_owned(),
        interest_id: interest.id.clone(),
        url: "https://example.com/qubits".to_owned(),
        title: "Qubit milestone".to_owned(),
        snippet: "A new record".to_owned(),
        content: None,
        source: "example.com".to_owned(),
        published_date: None,
        fetched_at: Utc::now(),
        relevance_score: None,
        content_type: None,
    }];

    let result = client.summarize(&interest, "search-1", &hits).await.unwrap();
    assert_eq!(result.interest_id, "interest-1");
    assert_eq!(result.search_id, "search-1");
    assert_eq!(result.summary, "Busy week in quantum.");
    assert_eq!(result.key_points.len(), 2);
    assert_eq!(result.sources.len(), 1);
    assert!(result.formatted_html.starts_with("<p>"));
}

#[tokio::test]
async fn empty_candidates_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = SummaryClient::new("test-key".to_owned(), server.uri()).unwrap();
    let err = client.generate_text("hello", None).await.unwrap_err();
    assert!(matches!(err, AiError::EmptyResponse));
}
