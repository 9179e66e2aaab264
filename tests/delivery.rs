//! Integration tests for the fire-and-forget delivery contract.

use std::time::{Duration, Instant};

use http::{HeaderMap, HeaderValue, Method};
use surfgeo::{build_payload, RequestMetadata, TrackerClient, TrackerSettings};

mod common;

const TEST_KEY: &str = "sk_test_key_123456789012345";

fn metadata(path: &str, user_agent: Option<&str>) -> RequestMetadata {
    let mut headers = HeaderMap::new();
    if let Some(agent) = user_agent {
        headers.insert("user-agent", HeaderValue::from_str(agent).unwrap());
    }
    RequestMetadata::new(path, Method::GET, headers).with_status(200)
}

#[tokio::test]
async fn track_adds_script_key_and_source() {
    let (addr, captured) = common::start_mock_collector().await;

    let client = TrackerClient::new(
        TrackerSettings::new(TEST_KEY).endpoint(format!("http://{addr}/api/track")),
    )
    .unwrap();

    client.track(build_payload(&metadata("/test", Some("test"))));

    let bodies = common::wait_for_bodies(&captured, 1).await;
    assert_eq!(bodies.len(), 1);

    let event: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(event["script_key"], TEST_KEY);
    assert_eq!(event["source"], "server");
}

#[tokio::test]
async fn track_blocking_delivers_the_same_shape() {
    let (addr, captured) = common::start_mock_collector().await;

    let client = TrackerClient::new(
        TrackerSettings::new(TEST_KEY).endpoint(format!("http://{addr}/api/track")),
    )
    .unwrap();

    client.track_blocking(build_payload(&metadata("/test", Some("test"))));

    let bodies = common::wait_for_bodies(&captured, 1).await;
    assert_eq!(bodies.len(), 1);

    let event: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(event["script_key"], TEST_KEY);
    assert_eq!(event["source"], "server");
    assert_eq!(event["path"], "/test");
}

#[tokio::test]
async fn dispatched_payload_matches_the_wire_contract() {
    let (addr, captured) = common::start_mock_collector().await;

    let client = TrackerClient::new(
        TrackerSettings::new("sk_abcdefghijklmnopqrst")
            .endpoint(format!("http://{addr}/api/track")),
    )
    .unwrap();

    let mut headers = HeaderMap::new();
    headers.insert("user-agent", HeaderValue::from_static("UA1"));
    let raw = RequestMetadata::new("/test?x=1", Method::from_bytes(b"get").unwrap(), headers)
        .with_status(200);
    client.track(build_payload(&raw));

    let bodies = common::wait_for_bodies(&captured, 1).await;
    let event: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();

    assert_eq!(event["path"], "/test");
    assert_eq!(event["method"], "GET");
    assert_eq!(event["user_agent"], "UA1");
    assert_eq!(event["status_code"], 200);
    assert_eq!(event["script_key"], "sk_abcdefghijklmnopqrst");
    assert_eq!(event["source"], "server");
    assert!(event["timestamp"].is_u64());
    assert!(event["request_id"].is_string());
    assert!(event.get("referrer").is_none());
}

#[tokio::test]
async fn track_returns_before_the_delivery_resolves() {
    // The collector stalls until well past the maximum timeout; dispatch
    // must still return immediately.
    let addr = common::start_stalled_collector().await;

    let client = TrackerClient::new(
        TrackerSettings::new(TEST_KEY)
            .endpoint(format!("http://{addr}/api/track"))
            .timeout(0.5), // clamped to the 0.1s maximum
    )
    .unwrap();

    let start = Instant::now();
    client.track(build_payload(&metadata("/test", Some("test"))));
    assert!(
        start.elapsed() < Duration::from_millis(20),
        "track blocked for {:?}",
        start.elapsed()
    );

    let start = Instant::now();
    client.track_blocking(build_payload(&metadata("/test", Some("test"))));
    assert!(
        start.elapsed() < Duration::from_millis(20),
        "track_blocking blocked for {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn disabled_client_never_touches_the_network() {
    let (addr, captured) = common::start_mock_collector().await;

    let client = TrackerClient::new(
        TrackerSettings::new(TEST_KEY)
            .endpoint(format!("http://{addr}/api/track"))
            .enabled(false),
    )
    .unwrap();

    client.track(build_payload(&metadata("/test", Some("test"))));
    client.track_blocking(build_payload(&metadata("/test", Some("test"))));

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transport_errors_are_swallowed() {
    // debug(true) exercises the diagnostic path; the subscriber makes the
    // dropped deliveries visible under RUST_LOG.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let endpoint = common::unreachable_endpoint().await;

    let client = TrackerClient::new(
        TrackerSettings::new(TEST_KEY).endpoint(endpoint).debug(true),
    )
    .unwrap();

    client.track(build_payload(&metadata("/test", Some("test"))));
    client.track_blocking(build_payload(&metadata("/test", Some("test"))));

    // Give the failing deliveries time to resolve; nothing may panic or
    // surface to this caller.
    tokio::time::sleep(Duration::from_millis(300)).await;
}

#[tokio::test]
async fn timed_out_delivery_is_dropped_silently() {
    let addr = common::start_stalled_collector().await;

    let client = TrackerClient::new(
        TrackerSettings::new(TEST_KEY)
            .endpoint(format!("http://{addr}/api/track"))
            .timeout(0.01)
            .debug(true),
    )
    .unwrap();

    client.track(build_payload(&metadata("/test", Some("test"))));

    tokio::time::sleep(Duration::from_millis(300)).await;
}
