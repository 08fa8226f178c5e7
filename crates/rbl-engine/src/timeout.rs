//! Per-operation deadlines.

use rbl_core::LookupError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// The guarded operation did not finish within its deadline.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("operation timed out after {}ms", .limit.as_millis())]
pub struct TimedOut {
    /// The deadline that was exceeded
    pub limit: Duration,
}

impl TimedOut {
    /// Resolver-style code for the timeout condition
    pub const CODE: &'static str = "ETIMEOUT";

    /// Resolver-style code for the timeout condition
    #[must_use]
    pub const fn code(&self) -> &'static str {
        Self::CODE
    }
}

impl From<TimedOut> for LookupError {
    fn from(_: TimedOut) -> Self {
        Self::Timeout
    }
}

/// Race `operation` against a `limit` timer.
///
/// When the timer wins, the operation future is dropped, so its eventual
/// result can never reach the caller.
pub async fn with_timeout<F>(operation: F, limit: Duration) -> Result<F::Output, TimedOut>
where
    F: Future,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| TimedOut { limit })
}

/// Guard a lookup and fold the deadline into the lookup error set.
pub async fn lookup_with_timeout<F, T>(operation: F, limit: Duration) -> Result<T, LookupError>
where
    F: Future<Output = Result<T, LookupError>>,
{
    with_timeout(operation, limit).await?
}
