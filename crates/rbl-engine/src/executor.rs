//! Single provider lookups.
//!
//! [`RblQueryExecutor::execute`] never fails: every outcome, including
//! timeouts and resolver errors, becomes a populated [`RblResult`]. That
//! is what lets the engine join all queries unconditionally.
//!
//! Classification of the A lookup, in order:
//!
//! 1. NXDOMAIN / NODATA -> clean
//! 2. deadline exceeded -> error `Query timeout (>1s)`
//! 3. any other failure -> error with the resolver message
//! 4. answer in `127.255.0.0/16`, or a TXT reason that reads like a
//!    resolver refusal -> error (provider blocked us, not a listing)
//! 5. anything else -> listed

use rbl_core::{LookupError, RblProvider, RblResult, TargetKind};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::encoding::{build_query_name, ip_query_name, InvalidAddress};
use crate::lookup::DnsLookup;
use crate::timeout::lookup_with_timeout;

/// Error reported when a provider refuses to answer us.
pub const BLOCKED_MESSAGE: &str = "RBL query blocked or unsupported";

/// TXT phrasing providers use when refusing public/open resolvers.
const BLOCKED_PHRASES: &[&str] = &[
    "open resolver",
    "public resolver",
    "query refused",
    "access denied",
    "blocked - see",
    "please use",
    "not supported",
];

/// One (target, provider) pair with its encoded query name.
#[derive(Debug, Clone)]
pub struct RblQuery<'a> {
    /// Label reported as `RblResult::rbl`
    pub label: String,
    /// The address or domain being checked
    pub target: String,
    /// Fully built DNS name to look up
    pub query_name: String,
    /// Provider answering the query
    pub provider: &'a RblProvider,
}

impl<'a> RblQuery<'a> {
    /// Encode a query for `target` of the given kind under `provider`.
    pub fn new(
        target: &str,
        kind: TargetKind,
        provider: &'a RblProvider,
    ) -> Result<Self, InvalidAddress> {
        Ok(Self {
            label: provider.name.clone(),
            target: target.to_string(),
            query_name: build_query_name(target, kind, &provider.zone)?,
            provider,
        })
    }

    /// Query for an already parsed address, labelled `<provider> (<ip>)`.
    #[must_use]
    pub fn for_ip(ip: &IpAddr, provider: &'a RblProvider) -> Self {
        let target = ip.to_string();
        Self {
            label: format!("{} ({target})", provider.name),
            query_name: ip_query_name(ip, &provider.zone),
            target,
            provider,
        }
    }
}

/// Result of inspecting a positive A answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Genuine listing
    Listed,
    /// Provider-side refusal, carrying the error to report
    Blocked(String),
}

/// Whether `addr` is in the `127.255.0.0/16` meta range.
#[must_use]
pub const fn is_meta_address(addr: Ipv4Addr) -> bool {
    let [a, b, _, _] = addr.octets();
    a == 127 && b == 255
}

/// Whether a TXT reason reads like a resolver refusal.
#[must_use]
pub fn is_blocked_reason(reason: &str) -> bool {
    let lowered = reason.to_lowercase();
    BLOCKED_PHRASES.iter().any(|p| lowered.contains(p))
}

/// Decide whether a positive answer is a listing or a refusal.
#[must_use]
pub fn judge_answer(addr: Ipv4Addr, reason: Option<&str>) -> Verdict {
    if is_meta_address(addr) || reason.is_some_and(is_blocked_reason) {
        Verdict::Blocked(reason.map_or_else(|| BLOCKED_MESSAGE.to_string(), str::to_string))
    } else {
        Verdict::Listed
    }
}

/// Human readable timeout message, e.g. `Query timeout (>1s)`.
#[must_use]
pub fn timeout_message(limit: Duration) -> String {
    if limit.subsec_millis() == 0 {
        format!("Query timeout (>{}s)", limit.as_secs())
    } else {
        format!("Query timeout (>{}ms)", limit.as_millis())
    }
}

/// Flatten TXT records into one reason string.
fn join_txt(records: &[Vec<String>]) -> Option<String> {
    let joined = records
        .iter()
        .map(|chunks| chunks.concat())
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    Some(joined).filter(|s| !s.is_empty())
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Runs single provider queries against a [`DnsLookup`].
#[derive(Clone)]
pub struct RblQueryExecutor {
    lookup: Arc<dyn DnsLookup>,
    query_timeout: Duration,
    txt_timeout: Duration,
}

impl RblQueryExecutor {
    /// Create an executor with separate deadlines for the A and TXT lookups
    #[must_use]
    pub fn new(lookup: Arc<dyn DnsLookup>, query_timeout: Duration, txt_timeout: Duration) -> Self {
        Self {
            lookup,
            query_timeout,
            txt_timeout,
        }
    }

    /// Best-effort TXT reason; any failure is swallowed.
    async fn fetch_reason(&self, name: &str) -> Option<String> {
        match lookup_with_timeout(self.lookup.resolve_txt(name), self.txt_timeout).await {
            Ok(records) => join_txt(&records),
            Err(e) => {
                debug!(name, error = %e, "no TXT reason");
                None
            }
        }
    }

    /// Look up one query and classify the outcome.
    pub async fn execute(&self, query: &RblQuery<'_>) -> RblResult {
        let start = Instant::now();
        let name = query.query_name.as_str();

        let answer = lookup_with_timeout(self.lookup.resolve_a(name), self.query_timeout).await;

        let addr = match answer {
            Ok(addrs) => match addrs.first() {
                Some(addr) => *addr,
                None => {
                    debug!(name, "empty A answer");
                    return RblResult::clean(&query.label, elapsed_ms(start));
                }
            },
            Err(LookupError::NotFound | LookupError::NoData) => {
                debug!(name, "not listed");
                return RblResult::clean(&query.label, elapsed_ms(start));
            }
            Err(LookupError::Timeout) => {
                warn!(name, provider = %query.provider.name, "RBL query timed out");
                return RblResult::failed(
                    &query.label,
                    elapsed_ms(start),
                    timeout_message(self.query_timeout),
                );
            }
            Err(LookupError::Other(msg)) => {
                warn!(name, provider = %query.provider.name, error = %msg, "RBL query failed");
                return RblResult::failed(&query.label, elapsed_ms(start), msg);
            }
        };

        let reason = self.fetch_reason(name).await;
        let elapsed = elapsed_ms(start);

        match judge_answer(addr, reason.as_deref()) {
            Verdict::Blocked(error) => {
                warn!(
                    name,
                    provider = %query.provider.name,
                    response = %addr,
                    "provider refused the query"
                );
                RblResult::failed(&query.label, elapsed, error)
            }
            Verdict::Listed => {
                debug!(name, response = %addr, "listed");
                RblResult::listed(&query.label, elapsed, addr.to_string(), reason)
                    .with_provider_info(query.provider)
            }
        }
    }
}
