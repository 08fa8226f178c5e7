//! Core types and errors for DNS blacklist (DNSBL/RBL) checks.
//!
//! This crate holds the plain data that flows through a check:
//!
//! - **Types**: providers, targets, per-query results and the aggregate response
//! - **Errors**: the request-level [`RblError`] taxonomy and the closed
//!   [`LookupError`] set every resolver failure is mapped into
//!
//! # Example
//!
//! ```rust,ignore
//! use rbl_core::{AggregateResponse, Result};
//!
//! fn report(response: &AggregateResponse) -> Result<()> {
//!     println!("{}: {} listed", response.target, response.summary.listed_count);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/rbl-core/0.1.0")]

mod error;
pub mod types;

pub use error::{LookupError, Result, RblError};
pub use types::*;
