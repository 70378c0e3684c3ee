use super::*;
use mockito::Server;

#[test]
fn test_networking_manager_creation() {
    let manager = NetworkingManager::new(NetworkingConfig::default());
    assert!(manager.is_ok(), "Should create networking manager");
    assert_eq!(manager.unwrap().config().timeout_seconds, 30);
}

#[test]
fn test_zero_timeout_rejected() {
    let config = NetworkingConfig {
        timeout_seconds: 0,
        ..Default::default()
    };

    assert!(matches!(
        NetworkingManager::new(config),
        Err(NetworkingError::InvalidTimeout { seconds: 0 })
    ));
}

#[test]
fn test_blank_cookie_is_anonymous() {
    assert!(!SessionCredentials::new("   ").is_authenticated());
    assert!(SessionCredentials::new("abc").is_authenticated());
    assert!(!SessionCredentials::anonymous().is_authenticated());
}

#[test]
fn test_credentials_debug_is_redacted() {
    let credentials = SessionCredentials::new("secret-cookie").with_csrf_token("secret-token");
    let rendered = format!("{:?}", credentials);
    assert!(!rendered.contains("secret-cookie"));
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("<redacted>"));
}

#[tokio::test]
async fn test_get_bytes_attaches_credentials() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/ping")
        .match_header("cookie", ".ROBLOSECURITY=abc")
        .match_header("x-csrf-token", "tok")
        .with_status(200)
        .with_body("pong")
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let credentials = SessionCredentials::new("abc").with_csrf_token("tok");
    let body = manager
        .get_bytes(&format!("{}/v1/ping", server.url()), &credentials)
        .await
        .unwrap();

    assert_eq!(body, b"pong");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_bytes_non_success_status_is_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/broken")
        .with_status(503)
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let result = manager
        .get_bytes(
            &format!("{}/v1/broken", server.url()),
            &SessionCredentials::anonymous(),
        )
        .await;

    assert!(matches!(
        result,
        Err(NetworkingError::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_get_bytes_with_request_tracing() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/traced")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let manager = NetworkingManager::new(NetworkingConfig {
        trace_requests: true,
        ..NetworkingConfig::default()
    })
    .unwrap();
    let body = manager
        .get_bytes(
            &format!("{}/v1/traced", server.url()),
            &SessionCredentials::anonymous(),
        )
        .await
        .unwrap();

    assert_eq!(body, b"[]");
}
