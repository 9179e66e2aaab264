//! Framework adapters.
//!
//! Thin shims between a host framework and the core. Every adapter does the
//! same four things, per request:
//! 1. capture path, method and headers before handing the request on
//! 2. let the host produce the response
//! 3. assemble [`RequestMetadata`] once the status is known and build the
//!    payload
//! 4. hand the payload to [`TrackerClient::track`] and return the response
//!    untouched, without waiting for the dispatch
//!
//! The generic [`TrackingLayer`] works with any `tower`-based stack (axum,
//! hyper, tonic); [`track_requests`] is the axum-native flavor for apps
//! that prefer `middleware::from_fn_with_state`. Synchronous hosts without
//! an event loop call [`TrackerClient::track_blocking`] from their own glue
//! instead.
//!
//! [`RequestMetadata`]: crate::payload::RequestMetadata
//! [`TrackerClient::track`]: crate::client::TrackerClient::track
//! [`TrackerClient::track_blocking`]: crate::client::TrackerClient::track_blocking

pub mod axum;
pub mod tower;

pub use self::axum::track_requests;
pub use self::tower::{TrackingLayer, TrackingService};
