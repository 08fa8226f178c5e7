//! Server configuration.

use rbl_core::{RblError, Result};
use rbl_engine::{EngineConfig, RblCatalog};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address (default: 0.0.0.0:8080).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Engine concurrency and deadlines.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Custom provider catalog (TOML); the built-in table when absent.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            engine: EngineConfig::default(),
            catalog: None,
        }
    }
}

impl ServerConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| RblError::Config(e.to_string()))?
        } else {
            Self::default()
        };
        config.engine.validate()?;
        Ok(config)
    }

    /// Build the provider catalog this config points at.
    pub fn build_catalog(&self) -> Result<RblCatalog> {
        self.catalog
            .as_deref()
            .map_or_else(|| Ok(RblCatalog::builtin()), RblCatalog::load)
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
