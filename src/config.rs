//! Server configuration parsed from environment variables.
//!
//! Optional:
//! - `HOST`: bind address, default `0.0.0.0`
//! - `PORT`: listen port, default `3000`
//!
//! A `.env` file in the working directory is loaded first when present.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT `{0}`")]
    InvalidPort(String),
    #[error("invalid HOST `{0}`")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    /// Build typed server config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = parse_host(std::env::var("HOST").ok().as_deref())?;
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        Ok(Self { host, port })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidPort(v.to_owned())),
    }
}

fn parse_host(raw: Option<&str>) -> Result<IpAddr, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidHost(v.to_owned())),
    }
}
