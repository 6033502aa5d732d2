//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "PORTDESK_API_BASE_URL";
pub const STATE_DIR_VAR: &str = "PORTDESK_STATE_DIR";
pub const REQUEST_TIMEOUT_VAR: &str = "PORTDESK_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "PORTDESK_CONNECT_TIMEOUT_SECS";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    /// Whole-request timeout. `None` leaves requests unbounded.
    pub request_secs: Option<u64>,
    pub connect_secs: u64,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self { request_secs: None, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub state_dir: PathBuf,
    pub timeouts: ClientTimeouts,
}

impl ClientConfig {
    /// Build a config for `base_url` with default state dir and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for anything that is not an
    /// absolute `http(s)` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, state_dir: default_state_dir(), timeouts: ClientTimeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Required:
    /// - `PORTDESK_API_BASE_URL`
    ///
    /// Optional:
    /// - `PORTDESK_STATE_DIR`: default `$HOME/.portdesk`
    /// - `PORTDESK_REQUEST_TIMEOUT_SECS`: unbounded when unset
    /// - `PORTDESK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or malformed, or a
    /// timeout is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_base_url(None)
    }

    /// Like [`ClientConfig::from_env`], but an explicit `base_url` (a CLI
    /// flag) takes precedence over `PORTDESK_API_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_env_with_base_url(base_url: Option<&str>) -> Result<Self, ConfigError> {
        let raw = match base_url {
            Some(url) => url.to_owned(),
            None => std::env::var(BASE_URL_VAR).map_err(|_| ConfigError::MissingBaseUrl)?,
        };
        let base_url = normalize_base_url(&raw)?;
        let state_dir = std::env::var(STATE_DIR_VAR).map_or_else(|_| default_state_dir(), PathBuf::from);
        let timeouts = ClientTimeouts {
            request_secs: env_parse_u64(REQUEST_TIMEOUT_VAR)?,
            connect_secs: env_parse_u64(CONNECT_TIMEOUT_VAR)?.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { base_url, state_dir, timeouts })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed.strip_prefix("http://").or_else(|| trimmed.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}

fn env_parse_u64(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        _ => Ok(None),
    }
}

/// `$HOME/.portdesk`, or `./.portdesk` when `HOME` is unset.
#[must_use]
pub fn default_state_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(|| PathBuf::from(".portdesk"), |home| PathBuf::from(home).join(".portdesk"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
