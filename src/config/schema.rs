//! Configuration schema definitions.
//!
//! `TrackerSettings` is the raw input shape: every field is optional or
//! defaulted so it can come from a constructor call, environment variables,
//! or a deserialized host config section. `TrackerConfig` is the validated
//! result handed to the client.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::validation::{self, ConfigError};

/// Default production collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.surfgeo.com/api/track";

/// Default delivery timeout in seconds (50ms).
pub const DEFAULT_TIMEOUT_SECS: f64 = 0.05;

/// Lower bound for the delivery timeout in seconds (10ms).
pub const MIN_TIMEOUT_SECS: f64 = 0.01;

/// Upper bound for the delivery timeout in seconds (100ms).
pub const MAX_TIMEOUT_SECS: f64 = 0.1;

/// Raw, unvalidated SDK settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Site credential embedded in every tracked event (`sk_...`).
    pub script_key: String,

    /// Collection endpoint override; the production default applies when unset.
    pub endpoint: Option<String>,

    /// Delivery timeout in seconds; clamped into the allowed window.
    pub timeout: f64,

    /// Emit a diagnostic trace when a delivery is dropped.
    pub debug: bool,

    /// Master switch; a disabled client never touches the network.
    pub enabled: bool,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            script_key: String::new(),
            endpoint: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            debug: false,
            enabled: true,
        }
    }
}

impl TrackerSettings {
    /// Settings with the given script key and defaults for everything else.
    pub fn new(script_key: impl Into<String>) -> Self {
        Self {
            script_key: script_key.into(),
            ..Self::default()
        }
    }

    /// Settings sourced from `SURFGEO_*` environment variables.
    ///
    /// Recognized: `SURFGEO_SCRIPT_KEY`, `SURFGEO_ENDPOINT`,
    /// `SURFGEO_TIMEOUT` (seconds), `SURFGEO_DEBUG`, `SURFGEO_ENABLED`.
    /// Unset or unparseable variables fall back to the defaults; chaining
    /// the setters afterwards gives explicit options precedence over the
    /// environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            script_key: env::var("SURFGEO_SCRIPT_KEY").unwrap_or_default(),
            endpoint: env::var("SURFGEO_ENDPOINT").ok(),
            timeout: env::var("SURFGEO_TIMEOUT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.timeout),
            debug: env_flag("SURFGEO_DEBUG").unwrap_or(defaults.debug),
            enabled: env_flag("SURFGEO_ENABLED").unwrap_or(defaults.enabled),
        }
    }

    /// Override the collection endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Override the delivery timeout in seconds.
    pub fn timeout(mut self, seconds: f64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Toggle diagnostic traces for dropped deliveries.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Toggle tracking entirely.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Validate into an immutable [`TrackerConfig`].
    pub fn validate(self) -> Result<TrackerConfig, ConfigError> {
        validation::validate(self)
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Validated SDK configuration.
///
/// Immutable after construction: fields are private and only readable
/// through the accessors, so a client can never observe a half-valid state.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub(crate) script_key: String,
    pub(crate) endpoint: Url,
    pub(crate) timeout: Duration,
    pub(crate) debug: bool,
    pub(crate) enabled: bool,
}

impl TrackerConfig {
    /// Validate raw settings into a config. Equivalent to
    /// [`TrackerSettings::validate`].
    pub fn from_settings(settings: TrackerSettings) -> Result<Self, ConfigError> {
        validation::validate(settings)
    }

    /// The site credential.
    pub fn script_key(&self) -> &str {
        &self.script_key
    }

    /// The collection endpoint deliveries are POSTed to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The per-delivery timeout, already clamped.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether dropped deliveries emit a diagnostic trace.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Whether tracking is active at all.
    pub fn enabled(&self) -> bool {
        self.enabled
    }
}
