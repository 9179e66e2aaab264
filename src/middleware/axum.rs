//! Axum-native middleware function.
//!
//! For hosts that wire middleware with `axum::middleware::from_fn_with_state`
//! rather than a raw `tower` layer:
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{middleware, routing::get, Router};
//! use surfgeo::{middleware::track_requests, TrackerClient, TrackerSettings};
//!
//! # fn main() -> Result<(), surfgeo::ConfigError> {
//! let client = Arc::new(TrackerClient::new(
//!     TrackerSettings::new("sk_your_key_here_12345678"),
//! )?);
//!
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .layer(middleware::from_fn_with_state(client, track_requests));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::client::TrackerClient;
use crate::payload::{build_payload, RequestMetadata};

/// Track one request, then return the response untouched.
///
/// Runs after the rest of the stack has produced the response, so the final
/// status is already known; the dispatch is fire-and-forget and never
/// delays the return.
pub async fn track_requests(
    State(client): State<Arc<TrackerClient>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .to_string();
    let metadata =
        RequestMetadata::new(path, request.method().clone(), request.headers().clone());

    let response = next.run(request).await;

    let metadata = metadata.with_status(response.status().as_u16());
    client.track(build_payload(&metadata));

    response
}
