//! Request metadata and wire payload types.

use http::{HeaderMap, Method};
use serde::Serialize;

/// Metadata an adapter extracts from one request/response pair.
///
/// Owned transiently by the adapter: produced once per request after the
/// response status is known, consumed by [`build_payload`].
///
/// [`build_payload`]: crate::payload::build_payload
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Request path, possibly still carrying a query string.
    pub path: String,

    /// Request method as received from the framework.
    pub method: Method,

    /// Request headers. `HeaderMap` lookups are case-insensitive and a name
    /// may hold several values.
    pub headers: HeaderMap,

    /// Final response status, once the adapter has observed it.
    pub status_code: Option<u16>,
}

impl RequestMetadata {
    /// Metadata without a status yet; adapters attach it via
    /// [`with_status`](Self::with_status) once the response is finalized.
    pub fn new(path: impl Into<String>, method: Method, headers: HeaderMap) -> Self {
        Self {
            path: path.into(),
            method,
            headers,
            status_code: None,
        }
    }

    /// Attach the final response status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }
}

/// Canonical tracking event, one per observed request.
///
/// A value type: constructed fresh by the builder and never mutated
/// afterwards. Field names match the wire contract exactly. The script key
/// and `source` tag are absent on purpose; the delivery client attaches
/// them to its own outbound copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingPayload {
    /// Unix timestamp in whole seconds.
    pub timestamp: u64,

    /// Normalized request path (no query string, no trailing slash).
    pub path: String,

    /// Uppercased request method.
    pub method: String,

    /// Final response status, 200 when the adapter supplied none.
    pub status_code: u16,

    /// First `User-Agent` value, or `"Unknown"`.
    pub user_agent: String,

    /// First `Referer`/`Referrer` value; omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,

    /// Freshly generated per-event identifier (UUID v4).
    pub request_id: String,
}
