//! Configuration validation.
//!
//! # Responsibilities
//! - Check the script key format (prefix, length, charset)
//! - Parse the endpoint URL, defaulting to production when unset
//! - Clamp the timeout into the allowed window
//!
//! # Design Decisions
//! - Checks run in declaration order and stop at the first violation
//! - Each [`ConfigError`] variant names exactly one rule
//! - No `TrackerConfig` exists until every check has passed

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::{
    TrackerConfig, TrackerSettings, DEFAULT_ENDPOINT, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};

/// Prefix every script key must carry.
const SCRIPT_KEY_PREFIX: &str = "sk_";

/// Inclusive bounds on the total script key length.
const SCRIPT_KEY_MIN_LEN: usize = 20;
const SCRIPT_KEY_MAX_LEN: usize = 50;

/// A configuration rule violation.
///
/// Construction is fail-fast: the first violated rule is reported and no
/// configuration is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No script key was supplied.
    #[error("script_key is required")]
    MissingScriptKey,

    /// The script key does not carry the `sk_` prefix.
    #[error("script_key must start with \"sk_\"")]
    ScriptKeyPrefix,

    /// The script key is shorter or longer than allowed.
    #[error("script_key must be between 20 and 50 characters")]
    ScriptKeyLength,

    /// The script key contains characters outside `[A-Za-z0-9_]` after the prefix.
    #[error("script_key must be alphanumeric (underscores allowed) after the \"sk_\" prefix")]
    ScriptKeyCharset,

    /// The endpoint override is not a syntactically valid URL.
    #[error("endpoint must be a valid URL with a scheme and host: {0}")]
    InvalidEndpoint(String),

    /// The timeout is not a finite number of seconds.
    #[error("timeout must be a finite number of seconds")]
    InvalidTimeout,
}

/// Validate raw settings into an immutable [`TrackerConfig`].
pub fn validate(settings: TrackerSettings) -> Result<TrackerConfig, ConfigError> {
    let key = &settings.script_key;

    if key.is_empty() {
        return Err(ConfigError::MissingScriptKey);
    }
    if !key.starts_with(SCRIPT_KEY_PREFIX) {
        return Err(ConfigError::ScriptKeyPrefix);
    }
    let length = key.chars().count();
    if !(SCRIPT_KEY_MIN_LEN..=SCRIPT_KEY_MAX_LEN).contains(&length) {
        return Err(ConfigError::ScriptKeyLength);
    }
    if !key[SCRIPT_KEY_PREFIX.len()..]
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::ScriptKeyCharset);
    }

    let endpoint = parse_endpoint(settings.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))?;

    if !settings.timeout.is_finite() {
        return Err(ConfigError::InvalidTimeout);
    }
    let timeout = settings.timeout.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);

    Ok(TrackerConfig {
        script_key: settings.script_key,
        endpoint,
        timeout: Duration::from_secs_f64(timeout),
        debug: settings.debug,
        enabled: settings.enabled,
    })
}

/// Syntactic URL check only; reachability is never probed here.
fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidEndpoint(raw.to_string()))?;
    if !url.has_host() {
        return Err(ConfigError::InvalidEndpoint(raw.to_string()));
    }
    Ok(url)
}
