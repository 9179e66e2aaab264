//! SurfGEO server-side tracking SDK.
//!
//! Observes inbound HTTP requests inside a host application and reports a
//! normalized metadata payload to the SurfGEO collection endpoint — fire
//! and forget, bounded by a sub-100ms timeout, never blocking or breaking
//! the host's request cycle. A dropped event on error or timeout is an
//! accepted outcome; there are no retries and no queues.
//!
//! # Quick start
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use surfgeo::{TrackerClient, TrackerSettings, TrackingLayer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TrackerClient::new(TrackerSettings::new("sk_your_key_here_12345678"))?;
//!
//!     let app: Router = Router::new()
//!         .route("/", get(|| async { "Hello!" }))
//!         .layer(TrackingLayer::new(client));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! Synchronous hosts skip the middleware and call
//! [`TrackerClient::track_blocking`] from their own request hook; both
//! flavors share identical semantics.

// Core
pub mod client;
pub mod config;
pub mod payload;

// Framework glue
pub mod middleware;

pub use client::TrackerClient;
pub use config::{ConfigError, TrackerConfig, TrackerSettings};
pub use middleware::{track_requests, TrackingLayer};
pub use payload::{build_payload, RequestMetadata, TrackingPayload};
