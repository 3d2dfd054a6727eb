use httpmock::prelude::*;
use tunet_login::core::webdriver;
use tunet_login::LoginError;

#[tokio::test]
async fn test_status_probe_succeeds_against_running_endpoint() {
    let server = MockServer::start();
    let status_mock = server.mock(|when, then| {
        when.method(GET).path("/status");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"value": {"ready": true, "message": ""}}));
    });

    assert!(webdriver::status_ok(&server.base_url()).await);
    assert!(webdriver::ensure_reachable(&server.base_url()).await.is_ok());
    status_mock.assert_hits(2);
}

#[tokio::test]
async fn test_status_probe_fails_on_error_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/status");
        then.status(500);
    });

    assert!(!webdriver::status_ok(&server.base_url()).await);
}

#[tokio::test]
async fn test_unreachable_endpoint_maps_to_config_error() {
    // Nothing listens on this port.
    let result = webdriver::ensure_reachable("http://127.0.0.1:1").await;
    assert!(matches!(
        result,
        Err(LoginError::WebDriverUnreachable { .. })
    ));
}

#[tokio::test]
async fn test_trailing_slash_in_endpoint_is_tolerated() {
    let server = MockServer::start();
    let status_mock = server.mock(|when, then| {
        when.method(GET).path("/status");
        then.status(200);
    });

    let with_slash = format!("{}/", server.base_url());
    assert!(webdriver::status_ok(&with_slash).await);
    status_mock.assert();
}
