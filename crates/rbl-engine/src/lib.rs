//! Concurrent DNS blacklist (DNSBL/RBL) query engine.
//!
//! Given an IP address or a domain, the engine builds reverse-lookup query
//! names, fans them out across every applicable provider in the catalog
//! under a bounded concurrency limit, applies a deadline to each individual
//! query and folds every outcome (listed, clean, blocked, timed out) into
//! one [`rbl_core::AggregateResponse`].
//!
//! # Example
//!
//! ```rust,no_run
//! use rbl_engine::{EngineConfig, RblCatalog, RblEngine};
//! use std::sync::Arc;
//!
//! # async fn demo() -> rbl_core::Result<()> {
//! let engine = RblEngine::with_system_resolver(
//!     Arc::new(RblCatalog::builtin()),
//!     EngineConfig::default(),
//! )?;
//! let response = engine.check("192.0.2.1").await?;
//! println!("{} of {} lists report it", response.summary.listed_count, response.summary.total_checked);
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/rbl-engine/0.1.0")]

pub mod catalog;
pub mod classify;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod executor;
pub mod limiter;
pub mod lookup;
pub mod resolver;
pub mod timeout;

pub use catalog::RblCatalog;
pub use classify::classify;
pub use config::EngineConfig;
pub use encoding::{build_query_name, ip_query_name, reverse_ip, InvalidAddress};
pub use engine::RblEngine;
pub use executor::{RblQuery, RblQueryExecutor};
pub use limiter::ConcurrencyLimiter;
pub use lookup::{DnsLookup, HickoryLookup};
pub use resolver::DomainResolver;
pub use timeout::{with_timeout, TimedOut};
