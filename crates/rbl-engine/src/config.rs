//! Engine tuning knobs.

use rbl_core::{RblError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::limiter::{DEFAULT_CONCURRENCY, MAX_CONCURRENCY};

/// Concurrency and deadline settings for one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum provider queries in flight per check (default: 8).
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Deadline for each provider A lookup in milliseconds (default: 1000).
    #[serde(default = "default_query_timeout")]
    pub query_timeout_ms: u64,

    /// Deadline for the optional TXT reason lookup in milliseconds (default: 1000).
    #[serde(default = "default_txt_timeout")]
    pub txt_timeout_ms: u64,

    /// Deadline for resolving a domain target in milliseconds (default: 5000).
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            query_timeout_ms: default_query_timeout(),
            txt_timeout_ms: default_txt_timeout(),
            resolve_timeout_ms: default_resolve_timeout(),
        }
    }
}

impl EngineConfig {
    /// Reject settings the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CONCURRENCY).contains(&self.concurrency) {
            return Err(RblError::Config(format!(
                "concurrency must be between 1 and {MAX_CONCURRENCY}, got {}",
                self.concurrency
            )));
        }
        for (field, value) in [
            ("query_timeout_ms", self.query_timeout_ms),
            ("txt_timeout_ms", self.txt_timeout_ms),
            ("resolve_timeout_ms", self.resolve_timeout_ms),
        ] {
            if value == 0 {
                return Err(RblError::Config(format!("{field} must be greater than 0")));
            }
        }
        Ok(())
    }

    /// Provider A lookup deadline
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// TXT reason lookup deadline
    #[must_use]
    pub const fn txt_timeout(&self) -> Duration {
        Duration::from_millis(self.txt_timeout_ms)
    }

    /// Domain resolution deadline
    #[must_use]
    pub const fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }
}

// Default value functions for serde.
const fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

const fn default_query_timeout() -> u64 {
    1000
}

const fn default_txt_timeout() -> u64 {
    1000
}

const fn default_resolve_timeout() -> u64 {
    5000
}
