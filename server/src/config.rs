//! Server configuration parsed from environment variables.
//!
//! Optional:
//! - `PAINTER_HOST`: bind address, default `127.0.0.1`
//! - `PORT`: listen port, default `17000`
//! - `PAINTER_COORDS`: `fraction` (default) or `absolute`
//! - `PAINTER_SHUTDOWN_TIMEOUT_SECS`: drain limit on shutdown, default 10
//!
//! The canvas size is fixed and not configurable.

use std::time::Duration;

use painter::{CoordinateMode, ParseConfig};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 17000;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub coords: CoordinateMode,
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    /// Build typed server config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("PAINTER_HOST")
            .map(|h| h.trim().to_owned())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::Invalid { var: "PORT", reason: e.to_string() })?,
            None => DEFAULT_PORT,
        };

        let coords = match lookup("PAINTER_COORDS") {
            Some(raw) => raw
                .parse::<CoordinateMode>()
                .map_err(|e| ConfigError::Invalid { var: "PAINTER_COORDS", reason: e.to_string() })?,
            None => CoordinateMode::default(),
        };

        let shutdown_secs = env_parse(lookup("PAINTER_SHUTDOWN_TIMEOUT_SECS"), DEFAULT_SHUTDOWN_TIMEOUT_SECS);

        Ok(Self { host, port, coords, shutdown_timeout: Duration::from_secs(shutdown_secs) })
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parser settings for incoming scripts.
    #[must_use]
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::with_coords(self.coords)
    }
}

/// Lenient parse: a missing or malformed value yields `default`.
fn env_parse<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            coords: CoordinateMode::default(),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
