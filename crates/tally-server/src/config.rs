use std::env;
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";
/// Environment variable overriding the full bind address.
pub const BIND_ENV: &str = "TALLY_BIND";

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Attach a permissive CORS layer.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            max_body_bytes: 16 * 1024,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Defaults with `TALLY_BIND` / `PORT` applied.
    pub fn from_env() -> ServerResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Read a TOML config file, then apply environment overrides.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)?.with_env_overrides()
    }

    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn with_env_overrides(self) -> ServerResult<Self> {
        self.apply_overrides(env::var(BIND_ENV).ok(), env::var(PORT_ENV).ok())
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }

    fn apply_overrides(
        mut self,
        bind: Option<String>,
        port: Option<String>,
    ) -> ServerResult<Self> {
        if let Some(bind) = bind.filter(|b| !b.trim().is_empty()) {
            self.bind_addr = bind
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("{BIND_ENV}={bind:?} is not a socket address")))?;
        }
        if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("{PORT_ENV}={port:?} is not a valid port")))?;
            self = self.with_port(port);
        }
        Ok(self)
    }
}
