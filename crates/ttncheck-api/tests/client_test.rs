#![allow(clippy::unwrap_used)]
//! Integration tests for `GatewayClient` against a wiremock Gateway
//! Server.

use secrecy::SecretString;
use serde_json::{Number, json};
use ttncheck_api::{ApiError, GatewayClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GATEWAY_ID: &str = "my-gateway";
const STATS_PATH: &str = "/api/v3/gs/gateways/my-gateway/connection/stats";

fn client_for(server: &MockServer) -> GatewayClient {
    GatewayClient::new(
        &server.uri(),
        GATEWAY_ID,
        &SecretString::from("NNSXS.SECRETKEY"),
    )
    .unwrap()
}

fn stats_body() -> serde_json::Value {
    json!({
        "connected_at": "2022-02-14T08:00:51.386121296Z",
        "protocol": "udp",
        "last_status": {
            "time": "2022-02-14T13:33:06.488545731Z",
            "boot_time": "2022-02-12T09:10:11Z",
            "versions": {
                "ttn-lw-gateway-server": "3.17.2",
                "fpga": "31",
                "hal": "5.0.1"
            },
            "metrics": {
                "ackr": 100.0,
                "rxin": 10,
                "rxok": 10,
                "rxfw": 10,
                "txin": 3,
                "txok": 3
            }
        },
        "uplink_count": "2863"
    })
}

#[tokio::test]
async fn test_fetches_connection_stats_with_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .and(header("accept", "application/json"))
        .and(header("authorization", "Bearer NNSXS.SECRETKEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .expect(1)
        .mount(&server)
        .await;

    let stats = client_for(&server).connection_stats().await.unwrap();

    assert_eq!(stats.protocol.as_deref(), Some("udp"));
    assert_eq!(stats.uplink_count, Some(2863));
    let status = stats.last_status.unwrap();
    assert_eq!(
        status.time.as_deref(),
        Some("2022-02-14T13:33:06.488545731Z")
    );
    assert_eq!(status.metrics.get("rxok").and_then(Number::as_i64), Some(10));
}

#[tokio::test]
async fn test_tolerates_a_trailing_slash_on_the_server_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(
        &format!("{}/", server.uri()),
        GATEWAY_ID,
        &SecretString::from("key"),
    )
    .unwrap();

    assert!(client.connection_stats().await.is_ok());
}

#[tokio::test]
async fn test_surfaces_structured_gateway_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 5,
            "message": "error:pkg/gatewayserver/registry:gateway_not_found (gateway not found)",
            "details": []
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).connection_stats().await;
    match result {
        Err(ApiError::Api {
            status,
            message,
            code,
        }) => {
            assert_eq!(status, 404);
            assert_eq!(code, Some(5));
            assert!(
                message.contains("gateway_not_found"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected ApiError::Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_falls_back_to_the_raw_body_for_unstructured_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway\n"))
        .mount(&server)
        .await;

    let result = client_for(&server).connection_stats().await;
    match result {
        Err(ApiError::Api {
            status,
            message,
            code,
        }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "bad gateway");
            assert_eq!(code, None);
        }
        other => panic!("expected ApiError::Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_carries_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 16,
            "message": "error:pkg/auth:token (invalid access token)"
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).connection_stats().await;
    match result {
        Err(ApiError::Api { status, message, .. }) => {
            assert_eq!(status, 401);
            assert!(
                message.contains("invalid access token"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected ApiError::Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).connection_stats().await;
    match result {
        Err(ApiError::Decode { message }) => {
            assert!(
                message.contains("body preview") && message.contains("<html>"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected ApiError::Decode, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    // Port 1 is privileged and unbound; connecting must fail fast.
    let client = GatewayClient::new(
        "http://127.0.0.1:1",
        GATEWAY_ID,
        &SecretString::from("key"),
    )
    .unwrap();

    let result = client.connection_stats().await;
    assert!(
        matches!(result, Err(ApiError::Transport(_))),
        "expected Transport, got: {result:?}"
    );
}

#[test]
fn test_control_characters_in_the_api_key_are_rejected_up_front() {
    let result = GatewayClient::new(
        "https://eu1.cloud.thethings.network",
        GATEWAY_ID,
        &SecretString::from("NNSXS.SECRET\nKEY"),
    );
    assert!(
        matches!(result, Err(ApiError::InvalidApiKey { .. })),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[test]
fn test_bad_server_address_is_rejected_up_front() {
    let result = GatewayClient::new("not a url", GATEWAY_ID, &SecretString::from("key"));
    assert!(
        matches!(result, Err(ApiError::InvalidUrl(_))),
        "expected InvalidUrl, got: {result:?}"
    );
}
