//! Embedding client tests against a mock embedding service

use std::time::Duration;

use mantamatch::embeddings::EmbeddingClient;
use mantamatch::matching::score;
use mantamatch::MantaMatchError;
use serde_json::json;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

const DIM: usize = 8;

fn client_for(server: &MockServer) -> EmbeddingClient {
    EmbeddingClient::new(server.uri(), DIM, Duration::from_secs(5)).unwrap()
}

fn fake_vector() -> Vec<f32> {
    (0..DIM).map(|i| 0.1 + i as f32 * 0.05).collect()
}

#[tokio::test]
async fn compute_returns_vector_of_configured_dimension() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": fake_vector(),
            "dim": DIM,
            "normalized": true,
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let embedding = client.compute(b"fake-jpeg-bytes").await.unwrap();
    assert_eq!(embedding.len(), DIM);
}

#[tokio::test]
async fn request_carries_base64_image_payload() {
    let server = MockServer::start().await;
    // The service contract is { image_base64 }; "abc" encodes to "YWJj".
    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_partial_json(json!({ "image_base64": "YWJj" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": fake_vector(),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.compute(b"abc").await.unwrap();
}

#[tokio::test]
async fn wrong_length_vector_is_rejected_not_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": [0.1, 0.2, 0.3],
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.compute(b"fake").await.unwrap_err();
    assert!(matches!(
        err,
        MantaMatchError::InvalidEmbeddingShape {
            expected: DIM,
            actual: 3
        }
    ));
}

#[tokio::test]
async fn all_zero_vector_is_a_validation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": vec![0.0f32; DIM],
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.compute(b"fake").await.unwrap_err();
    assert!(matches!(err, MantaMatchError::AllZeroEmbedding(_)));
}

#[tokio::test]
async fn service_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.compute(b"fake").await.unwrap_err();
    match err {
        MantaMatchError::EmbeddingService { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_array_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": "not-an-array",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.compute(b"fake").await.unwrap_err();
    assert!(matches!(err, MantaMatchError::EmbeddingService { .. }));
}

#[tokio::test]
async fn same_image_twice_yields_identical_vector_hash_and_norm() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": fake_vector(),
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let v1 = client.compute(b"same-image").await.unwrap();
    let v2 = client.compute(b"same-image").await.unwrap();

    assert_eq!(v1.len(), v2.len());
    assert_eq!(score::hash_vector(&v1), score::hash_vector(&v2));
    assert!((score::l1_norm(&v1) - score::l1_norm(&v2)).abs() < 1e-2);
    assert!((score::cosine_similarity(&v1, &v2) - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn health_reports_model_and_dimension() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "has_model": true,
            "model": "resnet50",
            "dim": DIM,
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let health = client.health().await.unwrap();
    assert!(health.ok);
    assert_eq!(health.model.as_deref(), Some("resnet50"));
    assert_eq!(health.dim, DIM);
}

#[tokio::test]
async fn timeout_is_a_distinct_error_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "embedding": fake_vector() }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = EmbeddingClient::new(server.uri(), DIM, Duration::from_millis(50)).unwrap();
    let err = client.compute(b"fake").await.unwrap_err();
    assert!(matches!(err, MantaMatchError::Timeout(_)), "got {err}");
}
