//! Service Configuration
//!
//! Settings come from environment variables; a `.env` file in the working
//! directory is loaded first when present.

use std::env;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `COUPON_HOST`
    pub host: String,
    /// `COUPON_PORT`
    pub port: u16,
    /// `COUPON_LOG`; `RUST_LOG` still takes precedence at runtime
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("COUPON_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("COUPON_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "COUPON_PORT",
                reason: format!("{:?}: {}", raw, e),
            })?,
            None => DEFAULT_PORT,
        };

        let log_level = lookup("COUPON_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            host,
            port,
            log_level,
        })
    }

    /// Listening address; `COUPON_HOST` must be an IPv4 or IPv6 literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "COUPON_HOST",
                reason: format!("{:?}: {}", self.host, e),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
