//! Payload construction subsystem.
//!
//! # Data Flow
//! ```text
//! adapter (tower layer, axum fn, custom glue)
//!     → RequestMetadata (path, method, headers, final status)
//!     → builder.rs (normalize, extract, stamp timestamp + request id)
//!     → TrackingPayload (canonical wire shape, minus credentials)
//!     → TrackerClient::track / track_blocking
//! ```
//!
//! # Design Decisions
//! - The builder knows nothing about the script key or the `source` tag;
//!   credential injection belongs to the delivery client
//! - `http::HeaderMap` is the header representation: case-insensitive and
//!   multi-valued, which is exactly the contract adapters must meet
//! - Payloads are value types, built fresh per request and never mutated

pub mod builder;
pub mod types;

pub use builder::{build_payload, extract_referrer, extract_user_agent, normalize_path};
pub use types::{RequestMetadata, TrackingPayload};
