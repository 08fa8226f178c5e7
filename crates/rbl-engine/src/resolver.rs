//! Domain to address resolution ahead of per-IP checks.

use futures_util::join;
use rbl_core::{LookupError, RblError, Result};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::lookup::DnsLookup;
use crate::timeout::lookup_with_timeout;

/// Resolves a domain to its IPv4 and IPv6 addresses.
#[derive(Clone)]
pub struct DomainResolver {
    lookup: Arc<dyn DnsLookup>,
    timeout: Duration,
}

impl DomainResolver {
    /// Create a resolver with a per-family deadline
    #[must_use]
    pub fn new(lookup: Arc<dyn DnsLookup>, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    /// Resolve A and AAAA independently and merge what succeeded.
    ///
    /// Fails only when neither family yields an address. The IPv4 failure
    /// decides the error message, falling back to the IPv6 one.
    pub async fn resolve(&self, domain: &str) -> Result<Vec<IpAddr>> {
        let (v4, v6) = join!(
            lookup_with_timeout(self.lookup.resolve_a(domain), self.timeout),
            lookup_with_timeout(self.lookup.resolve_aaaa(domain), self.timeout),
        );

        let mut ips: Vec<IpAddr> = Vec::new();
        let mut failure: Option<LookupError> = None;

        match v4 {
            Ok(addrs) => ips.extend(addrs.into_iter().map(IpAddr::V4)),
            Err(e) => {
                debug!(domain, error = %e, "A resolution failed");
                failure = Some(e);
            }
        }
        match v6 {
            Ok(addrs) => ips.extend(addrs.into_iter().map(IpAddr::V6)),
            Err(e) => {
                debug!(domain, error = %e, "AAAA resolution failed");
                failure.get_or_insert(e);
            }
        }

        let mut seen = std::collections::HashSet::new();
        ips.retain(|ip| seen.insert(*ip));

        if ips.is_empty() {
            return Err(RblError::domain_resolution(
                domain,
                failure.unwrap_or(LookupError::NoData),
            ));
        }

        info!(domain, addresses = ips.len(), "resolved domain");
        Ok(ips)
    }
}
