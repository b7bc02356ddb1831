//! Image acquisition tests against a mock photo host

use std::time::Duration;

use mantamatch::imaging;
use mantamatch::imaging::ImageFetcher;
use mantamatch::MantaMatchError;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

#[tokio::test]
async fn fetch_returns_raw_bytes() {
    let server = MockServer::start().await;
    let jpeg_magic = vec![0xffu8, 0xd8, 0xff, 0xe0];
    Mock::given(method("GET"))
        .and(path("/photos/6085/6085.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(jpeg_magic.clone()))
        .mount(&server)
        .await;

    let fetcher = ImageFetcher::new(Duration::from_secs(5)).unwrap();
    let bytes = fetcher
        .fetch(&format!("{}/photos/6085/6085.jpg", server.uri()))
        .await
        .unwrap();
    assert_eq!(bytes, jpeg_magic);
    assert_eq!(imaging::sha256_hex(&bytes).len(), 64);
}

#[tokio::test]
async fn missing_photo_fails_with_fetch_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ImageFetcher::new(Duration::from_secs(5)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/photos/missing.jpg", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, MantaMatchError::FetchFailed(_)));
}

#[tokio::test]
async fn empty_body_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/empty.jpg"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let fetcher = ImageFetcher::new(Duration::from_secs(5)).unwrap();
    let err = fetcher
        .fetch(&format!("{}/photos/empty.jpg", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, MantaMatchError::FetchFailed(_)));
}
