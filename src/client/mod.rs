//! Fire-and-forget delivery client.
//!
//! # Responsibilities
//! - Own the validated configuration for its whole lifetime
//! - Attach the script key and `source` tag to each outbound event
//! - Dispatch the POST off the caller's execution path, bounded by the
//!   configured timeout
//! - Swallow every delivery failure at exactly one boundary
//!
//! # Design Decisions
//! - Two flavors share one contract: `track` schedules a task on the
//!   ambient Tokio runtime, `track_blocking` spawns a detached thread
//! - Delivery is best-effort, at-most-once: no retries, no queue, no
//!   backpressure; a dropped event stays dropped
//! - The response is never inspected; initiating the request counts as sent
//! - In-flight deliveries are abandoned silently when the runtime or the
//!   process shuts down

use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, TrackerConfig, TrackerSettings};
use crate::payload::TrackingPayload;

/// User-Agent announced on every delivery.
const SDK_USER_AGENT: &str = concat!("surfgeo-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Source tag stamped on every server-side event.
const SOURCE: &str = "server";

/// Failure kinds caught at the dispatch boundary. Never exposed to callers.
#[derive(Debug, Error)]
enum DeliveryError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Payload as sent on the wire: the built event plus credentials.
///
/// The builder's payload is copied in, never mutated; each dispatch owns
/// its event outright.
#[derive(Debug, Serialize)]
struct OutboundEvent {
    #[serde(flatten)]
    payload: TrackingPayload,
    script_key: String,
    source: &'static str,
}

/// Core tracking client.
///
/// Cheap to clone: the configuration is small and the pooled HTTP client
/// is a shared handle.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    config: TrackerConfig,
    http: reqwest::Client,
}

impl TrackerClient {
    /// Validate settings and construct a client.
    ///
    /// Fails fast on the first violated configuration rule; no client
    /// exists in a partially-valid state.
    pub fn new(settings: TrackerSettings) -> Result<Self, ConfigError> {
        Ok(Self::from_config(settings.validate()?))
    }

    /// Construct a client from an already-validated configuration.
    pub fn from_config(config: TrackerConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(SDK_USER_AGENT)
            .build()
            .expect("failed to construct HTTP client");
        Self { config, http }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Fire-and-forget dispatch for asynchronous hosts.
    ///
    /// Schedules the POST as an independent task on the ambient Tokio
    /// runtime and returns without awaiting it. The task is abandoned
    /// silently if the runtime shuts down first. Returns in effectively
    /// constant time; never bounded by the delivery timeout, and never
    /// surfaces an error to the caller.
    pub fn track(&self, payload: TrackingPayload) {
        if !self.config.enabled() {
            return;
        }

        let event = self.outbound(payload);
        let client = self.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = client.post(&event).await {
                        client.trace_failure(&err);
                    }
                });
            }
            // No runtime to schedule on: the event is dropped, like any
            // other delivery failure.
            Err(_) => {
                if self.config.debug() {
                    tracing::warn!("no tokio runtime available, tracking event dropped");
                }
            }
        }
    }

    /// Fire-and-forget dispatch for synchronous hosts.
    ///
    /// Spawns a detached thread per event; the handle is dropped, never
    /// joined, so the thread cannot block the caller or keep the process
    /// alive past `main`. In-flight deliveries may be lost on shutdown.
    pub fn track_blocking(&self, payload: TrackingPayload) {
        if !self.config.enabled() {
            return;
        }

        let event = self.outbound(payload);
        let client = self.clone();

        std::thread::spawn(move || {
            if let Err(err) = client.post_blocking(&event) {
                client.trace_failure(&err);
            }
        });
    }

    fn outbound(&self, payload: TrackingPayload) -> OutboundEvent {
        OutboundEvent {
            payload,
            script_key: self.config.script_key().to_owned(),
            source: SOURCE,
        }
    }

    async fn post(&self, event: &OutboundEvent) -> Result<(), DeliveryError> {
        // Status and body are deliberately ignored.
        self.http
            .post(self.config.endpoint().clone())
            .json(event)
            .send()
            .await?;
        Ok(())
    }

    /// Ad hoc per-call client, mirroring the async flavor's timeout and
    /// User-Agent. Must only run on a thread without an async context.
    fn post_blocking(&self, event: &OutboundEvent) -> Result<(), DeliveryError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout())
            .user_agent(SDK_USER_AGENT)
            .build()?;
        http.post(self.config.endpoint().clone()).json(event).send()?;
        Ok(())
    }

    /// The single side channel for delivery failures.
    fn trace_failure(&self, err: &DeliveryError) {
        if !self.config.debug() {
            return;
        }
        match err {
            DeliveryError::Timeout => {
                tracing::warn!(endpoint = %self.config.endpoint(), "tracking request timed out");
            }
            DeliveryError::Transport(source) => {
                tracing::warn!(error = %source, "tracking request failed");
            }
        }
    }
}
