//! Contract tests for the auth endpoints.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST | `/auth/login` | `login_*` |
//! | POST | `/auth/register` | `register_*` |

use cnr_gateway::{CnrClient, GatewayConfig, GatewayError, Role};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> CnrClient {
    let mut config = GatewayConfig::new(&server.uri()).unwrap();
    config.timeout_secs = 5;
    CnrClient::new(config).unwrap()
}

fn valid_login_body() -> serde_json::Value {
    serde_json::json!({
        "token": "jwt-abc",
        "user": {
            "id": 3,
            "name": "Analyste",
            "email": "analyste@cnr.dz",
            "role": "admin"
        }
    })
}

// ── POST /auth/login ─────────────────────────────────────────────────

#[tokio::test]
async fn login_builds_session_from_valid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "analyste@cnr.dz",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(valid_login_body()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let session = client.login("analyste@cnr.dz", "s3cret").await.unwrap();
    assert_eq!(session.token(), "jwt-abc");
    assert_eq!(session.user().name, "Analyste");
    assert_eq!(session.role(), Role::Admin);
}

#[tokio::test]
async fn login_surfaces_server_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": "invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.login("x@y.z", "wrong").await.unwrap_err();
    assert!(err.is_auth());
    assert_eq!(err.to_string(), "invalid credentials");
}

#[tokio::test]
async fn login_rejects_body_missing_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {"id": 1, "name": "x", "email": "x@y.z", "role": "user"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.login("x@y.z", "pw").await.unwrap_err();
    assert!(err.is_auth());
    assert_eq!(err.to_string(), "Invalid response format from server");
}

#[tokio::test]
async fn login_rejects_user_missing_role() {
    let server = MockServer::start().await;

    // A response missing `user.role` must fail with
    // "Invalid user data in response" and set no session state.
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "jwt-abc",
            "user": {"id": 1, "name": "x", "email": "x@y.z"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.login("x@y.z", "pw").await.unwrap_err();
    assert!(err.is_auth());
    assert_eq!(err.to_string(), "Invalid user data in response");
}

#[tokio::test]
async fn login_rejects_unknown_role() {
    let server = MockServer::start().await;

    let mut body = valid_login_body();
    body["user"]["role"] = serde_json::json!("superuser");
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.login("x@y.z", "pw").await.unwrap_err();
    assert!(err.is_auth());
    assert!(err.to_string().contains("superuser"));
}

#[tokio::test]
async fn login_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway error</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.login("x@y.z", "pw").await.unwrap_err();
    assert!(matches!(err, GatewayError::Data { .. }));
}

// ── POST /auth/register ──────────────────────────────────────────────

#[tokio::test]
async fn register_succeeds_on_2xx_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(serde_json::json!({
            "name": "Nouvel Analyste",
            "email": "new@cnr.dz",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .register("Nouvel Analyste", "new@cnr.dz", "pw")
        .await
        .unwrap();
}

#[tokio::test]
async fn register_maps_rejection_to_validation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({"error": "email already registered"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.register("x", "x@y.z", "pw").await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation { .. }));
    assert_eq!(err.to_string(), "email already registered");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Guaranteed-closed port.
    let mut config = GatewayConfig::new("http://127.0.0.1:1").unwrap();
    config.timeout_secs = 1;
    let client = CnrClient::new(config).unwrap();

    let err = client.login("x@y.z", "pw").await.unwrap_err();
    assert!(matches!(err, GatewayError::Network { .. }));
}
