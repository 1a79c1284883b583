//! Integration tests for `ShiftSourceClient` and directory loading.
//!
//! Each test stands up a local `wiremock` server, so no real network
//! traffic is made.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shiftscan_scraper::{
    load_locations, DirectoryError, Endpoints, ScraperError, ShiftSourceClient, RAW_CAPTURE_FILE,
};

fn endpoints(server: &MockServer) -> Endpoints {
    Endpoints {
        directory_url: format!("{}/map/", server.uri()),
        shift_api_url: format!("{}/wp-json/knd_rostify/v1/shifts", server.uri()),
        list_url: format!("{}/list", server.uri()),
    }
}

/// 5-second timeout, descriptive UA, no retries.
fn test_client(server: &MockServer) -> ShiftSourceClient {
    ShiftSourceClient::new(endpoints(server), 5, "shiftscan-test/0.1", 0, 0)
        .expect("failed to build test client")
}

async fn mount_shifts(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/wp-json/knd_rostify/v1/shifts/{id}")))
        .respond_with(response)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Shift API response shapes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn array_response_is_returned_element_by_element() {
    let server = MockServer::start().await;
    mount_shifts(
        &server,
        "44343",
        ResponseTemplate::new(200).set_body_json(json!([{"nice": {}}, {"attributes": {}}])),
    )
    .await;

    let items = test_client(&server)
        .fetch_shift_payloads("44343")
        .await
        .unwrap();
    assert_eq!(items, vec![json!({"nice": {}}), json!({"attributes": {}})]);
}

#[tokio::test]
async fn single_object_response_is_one_payload() {
    let server = MockServer::start().await;
    mount_shifts(
        &server,
        "1",
        ResponseTemplate::new(200).set_body_json(json!({"attributes": {"day": "Mon"}})),
    )
    .await;

    let items = test_client(&server).fetch_shift_payloads("1").await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn scalar_response_is_no_payloads() {
    let server = MockServer::start().await;
    mount_shifts(&server, "1", ResponseTemplate::new(200).set_body_json(json!("none"))).await;

    let items = test_client(&server).fetch_shift_payloads("1").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;
    mount_shifts(&server, "1", ResponseTemplate::new(200).set_body_string("<html>")).await;

    let err = test_client(&server).fetch_shift_payloads("1").await.unwrap_err();
    assert!(matches!(err, ScraperError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn missing_id_is_not_found() {
    let server = MockServer::start().await;
    mount_shifts(&server, "9", ResponseTemplate::new(404)).await;

    let err = test_client(&server).fetch_shift_payloads("9").await.unwrap_err();
    assert!(matches!(err, ScraperError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;
    mount_shifts(&server, "9", ResponseTemplate::new(503)).await;

    let err = test_client(&server).fetch_shift_payloads("9").await.unwrap_err();
    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 503, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_retried_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/knd_rostify/v1/shifts/5"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_shifts(&server, "5", ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let client = ShiftSourceClient::new(endpoints(&server), 5, "shiftscan-test/0.1", 2, 0)
        .expect("failed to build test client");
    let items = client.fetch_shift_payloads("5").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn rate_limit_without_retries_fails_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/knd_rostify/v1/shifts/5"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_shift_payloads("5").await.unwrap_err();
    assert!(
        matches!(err, ScraperError::RateLimited { retry_after_secs: 17, .. }),
        "got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// List pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_page_echoing_slug_means_no_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list/perth_cbd"))
        .respond_with(ResponseTemplate::new(200).set_body_string("perth_cbd\n"))
        .mount(&server)
        .await;

    let page = test_client(&server).fetch_list_page("perth_cbd").await.unwrap();
    assert_eq!(page, None);
}

#[tokio::test]
async fn list_page_body_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list/hobart_hall"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hall</html>"))
        .mount(&server)
        .await;

    let page = test_client(&server).fetch_list_page("hobart_hall").await.unwrap();
    assert_eq!(page.as_deref(), Some("<html>hall</html>"));
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn directory_is_fetched_and_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/map/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<script>var locations = [{name: 'Test Hall', city: 'Hobart', post_id: '1,2'}];</script>",
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let locations = load_locations(&test_client(&server), &dir.path().join(RAW_CAPTURE_FILE))
        .await
        .unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].source_ids, vec!["1", "2"]);
}

#[tokio::test]
async fn directory_fetch_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/map/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = load_locations(&test_client(&server), &dir.path().join(RAW_CAPTURE_FILE))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DirectoryError::Fetch(ScraperError::UnexpectedStatus { .. })),
        "got {err:?}"
    );
}

#[tokio::test]
async fn undecodable_directory_writes_side_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/map/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("var locations = [{name: nope()}];"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let side = dir.path().join(RAW_CAPTURE_FILE);
    let err = load_locations(&test_client(&server), &side).await.unwrap_err();

    assert!(matches!(err, DirectoryError::Decode { .. }), "got {err:?}");
    assert_eq!(std::fs::read_to_string(side).unwrap(), "[{name: nope()}]");
}
