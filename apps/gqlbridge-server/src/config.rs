//! Server configuration.

use std::env;
use std::net::SocketAddr;

use gqlbridge_http::service::DEFAULT_MAX_BODY_SIZE;

/// Default bind address.
const DEFAULT_LISTEN: &str = "0.0.0.0:4000";

/// Errors raised while reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?} in {key}")]
    InvalidListen {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// A size is not a positive integer.
    #[error("invalid size {value:?} in {key}")]
    InvalidSize {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// gqlbridge server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the server binds to.
    pub listen: SocketAddr,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Largest accepted POST body in bytes.
    pub max_body_size: usize,
}

impl ServerConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_raw = lookup("GQLBRIDGE_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_owned());
        let listen = listen_raw
            .parse()
            .map_err(|source| ConfigError::InvalidListen {
                key: "GQLBRIDGE_LISTEN",
                value: listen_raw.clone(),
                source,
            })?;

        let max_body_size = match lookup("GQLBRIDGE_MAX_BODY_SIZE") {
            Some(raw) => parse_size("GQLBRIDGE_MAX_BODY_SIZE", &raw)?,
            None => DEFAULT_MAX_BODY_SIZE,
        };

        Ok(Self {
            listen,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
            max_body_size,
        })
    }
}

fn parse_size(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidSize {
            key,
            value: raw.to_owned(),
        }),
    }
}
