#![allow(clippy::unwrap_used)]
// Integration tests for `DeviceClient` using wiremock.

use std::time::Duration;

use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use keephome_api::{DeviceClient, Error, SettingCommand, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DeviceClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DeviceClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Telemetry ───────────────────────────────────────────────────────

#[tokio::test]
async fn telemetry_posts_to_post_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"time":"120","additional":"ok"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = client.telemetry().await.unwrap();
    assert_eq!(body, r#"{"time":"120","additional":"ok"}"#);
}

#[tokio::test]
async fn telemetry_returns_opaque_body_even_when_not_json() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    // Parsing is the coordinator's job; transport must not reject this.
    let body = client.telemetry().await.unwrap();
    assert_eq!(body, "not json at all");
}

// ── Settings commands ───────────────────────────────────────────────

#[tokio::test]
async fn get_all_sends_three_get_verbs() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/post"))
        .and(body_string_contains("SSID=get"))
        .and(body_string_contains("WiFiMode=get"))
        .and(body_string_contains("password=get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"SSID":"KeepHome","WiFiMode":"1","password":"12345678"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = client.send_commands(&SettingCommand::get_all()).await.unwrap();
    assert!(body.contains("KeepHome"));
}

#[tokio::test]
async fn set_ssid_sends_legacy_value_key() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/post"))
        .and(body_string_contains("SSID=set"))
        .and(body_string_contains("newWiFiSSID=Home2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    client
        .send_commands(&[SettingCommand::set_ssid("Home2")])
        .await
        .unwrap();
}

#[tokio::test]
async fn set_ap_mode_off_sends_zero() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/post"))
        .and(body_string_contains("WiFiMode=set"))
        .and(body_string_contains("newWiFimode=0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    client
        .send_commands(&[SettingCommand::set_ap_mode(false)])
        .await
        .unwrap();
}

// ── Restart ─────────────────────────────────────────────────────────

#[tokio::test]
async fn restart_posts_to_restart_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/restart"))
        .respond_with(ResponseTemplate::new(200).set_body_string("restarting"))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client.restart().await.unwrap();
    assert_eq!(ack, "restarting");
}

// ── Failure surfacing ───────────────────────────────────────────────

#[tokio::test]
async fn non_success_status_becomes_device_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(500).set_body_string("flash write failed"))
        .mount(&server)
        .await;

    let err = client.telemetry().await.unwrap_err();
    match err {
        Error::Device { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "flash write failed");
        }
        other => panic!("expected Device error, got: {other:?}"),
    }
}

#[tokio::test]
async fn slow_device_surfaces_timeout() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let client = DeviceClient::with_client(http, base_url);

    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = client.telemetry().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got: {err:?}");
}

#[tokio::test]
async fn unreachable_device_surfaces_connect_error() {
    // Nothing listens on this port.
    let config = TransportConfig {
        timeout: Duration::from_millis(500),
        port: 1,
    };
    let client = DeviceClient::new("127.0.0.1", &config).unwrap();

    let err = client.telemetry().await.unwrap_err();
    assert!(err.is_connect() || err.is_timeout(), "got: {err:?}");
}
