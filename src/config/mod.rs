//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TrackerSettings (constructor / env / serde)
//!     → validation.rs (rule checks, endpoint default, timeout clamp)
//!     → TrackerConfig (validated, immutable)
//!     → owned by one TrackerClient for its whole lifetime
//! ```
//!
//! # Design Decisions
//! - Settings and validated config are separate types; nothing downstream
//!   ever sees an unvalidated value
//! - Validation is synchronous and side-effect-free; no network at
//!   construction time, endpoint reachability is never checked
//! - Checks run in order and stop at the first violation, so every failure
//!   names exactly one rule
//! - Out-of-range timeouts are clamped rather than rejected; only
//!   non-finite values fail

pub mod schema;
pub mod validation;

pub use schema::{TrackerConfig, TrackerSettings};
pub use validation::ConfigError;
