//! rbl-srv: HTTP API for DNS blacklist checks.
//!
//! Thin axum layer over [`rbl_engine::RblEngine`]:
//!
//! - `POST /api/rbl-check` - `{ "target": "..." }` -> aggregate response
//! - `GET /api/rbl-check/providers` - the provider catalog
//! - `GET /health` - liveness and catalog size
//!
//! Blank targets and malformed IP literals answer 400; domains that do not
//! resolve and unexpected failures answer 500, both as `{ "error": "..." }`.

pub mod config;
pub mod error;
pub mod server;

// Re-exports for convenience.
pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{router, run, AppState};
