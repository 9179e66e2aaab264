//! Payload construction from request metadata.
//!
//! Pure transformation except for two stamps taken at build time: the
//! wall-clock timestamp and a fresh UUID v4 request id.

use std::time::{SystemTime, UNIX_EPOCH};

use http::header::{HeaderMap, REFERER, USER_AGENT};
use uuid::Uuid;

use crate::payload::types::{RequestMetadata, TrackingPayload};

/// Reported when no user agent header is present.
const UNKNOWN_USER_AGENT: &str = "Unknown";

/// Build the canonical tracking payload for one observed request.
pub fn build_payload(metadata: &RequestMetadata) -> TrackingPayload {
    TrackingPayload {
        timestamp: unix_timestamp(),
        path: normalize_path(&metadata.path),
        method: metadata.method.as_str().to_uppercase(),
        status_code: metadata.status_code.unwrap_or(200),
        user_agent: extract_user_agent(&metadata.headers),
        referrer: extract_referrer(&metadata.headers),
        request_id: Uuid::new_v4().to_string(),
    }
}

/// Normalize a request path for reporting.
///
/// Strips the query string (and fragment), then a single trailing slash.
/// The root path `/` is preserved unchanged.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let mut normalized = &path[..end];

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized = &normalized[..normalized.len() - 1];
    }

    normalized.to_string()
}

/// First `User-Agent` value, or `"Unknown"` when the header is missing or
/// not valid UTF-8.
pub fn extract_user_agent(headers: &HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| UNKNOWN_USER_AGENT.to_string())
}

/// First referrer value, tolerating both the `Referer` spelling the HTTP
/// spec canonized and the correctly spelled `Referrer`.
pub fn extract_referrer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REFERER)
        .or_else(|| headers.get("referrer"))
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
