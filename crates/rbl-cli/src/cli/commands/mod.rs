//! Command implementations.

pub mod check;
pub mod providers;
pub mod serve;

use anyhow::Context as _;
use rbl_engine::{EngineConfig, RblCatalog, RblEngine};
use std::path::PathBuf;
use std::sync::Arc;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Verbose output
    pub verbose: bool,

    /// Custom provider catalog
    pub catalog: Option<PathBuf>,

    /// Engine settings from the user config
    pub engine: EngineConfig,

    /// Engine settings given on the command line
    pub overrides: EngineOverrides,
}

/// Engine settings that command-line flags may override.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOverrides {
    /// `--concurrency`
    pub concurrency: Option<usize>,
    /// `--timeout-ms`
    pub timeout_ms: Option<u64>,
}

impl EngineOverrides {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(self, mut config: EngineConfig) -> EngineConfig {
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.query_timeout_ms = timeout_ms;
        }
        config
    }
}

impl Context {
    /// Load the custom catalog, or the built-in one.
    pub fn catalog(&self) -> anyhow::Result<RblCatalog> {
        match &self.catalog {
            Some(path) => RblCatalog::load(path)
                .with_context(|| format!("loading catalog {}", path.display())),
            None => Ok(RblCatalog::builtin()),
        }
    }

    /// Create an engine on the system resolver.
    pub fn engine(&self) -> anyhow::Result<RblEngine> {
        let catalog = self.catalog()?;
        let config = self.overrides.apply(self.engine.clone());
        Ok(RblEngine::with_system_resolver(Arc::new(catalog), config)?)
    }
}
