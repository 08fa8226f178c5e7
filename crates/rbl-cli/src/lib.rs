//! # rbl-cli
//!
//! Command-line front end for the DNSBL engine.
//!
//! ## Features
//!
//! - **One-shot checks**: `rblcheck check 192.0.2.1` or `rblcheck check example.com`
//! - **Catalog listing**: which providers answer for which target kinds
//! - **HTTP API**: `rblcheck serve` runs the `rbl-srv` router
//! - **Educational mode**: `--explain` describes how DNSBL lookups work
//! - **Multiple output formats**: Pretty, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod output;

pub use cli::run;
