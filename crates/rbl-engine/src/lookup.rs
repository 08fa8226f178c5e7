//! DNS lookup seam.
//!
//! The engine only needs A, AAAA and TXT lookups. [`DnsLookup`] abstracts
//! them so the system resolver can be swapped for an in-memory fake, and
//! maps every resolver failure into the closed [`LookupError`] set.

use async_trait::async_trait;
use hickory_resolver::config::ResolverOpts;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, TokioResolver};
use rbl_core::{LookupError, RblError};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::trace;

/// Address and TXT lookups used by the engine.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// A records for `name`.
    async fn resolve_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupError>;

    /// AAAA records for `name`.
    async fn resolve_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, LookupError>;

    /// TXT records for `name`, one inner vector of character-strings per record.
    async fn resolve_txt(&self, name: &str) -> Result<Vec<Vec<String>>, LookupError>;
}

/// [`DnsLookup`] backed by hickory's tokio resolver.
pub struct HickoryLookup {
    resolver: TokioResolver,
}

impl HickoryLookup {
    /// Wrap an existing resolver
    #[must_use]
    pub const fn new(resolver: TokioResolver) -> Self {
        Self { resolver }
    }

    /// Create a resolver from the system configuration (`/etc/resolv.conf`).
    ///
    /// The in-process response cache is disabled so every check sees fresh
    /// provider answers; caching is left to the upstream resolver.
    pub fn from_system() -> rbl_core::Result<Self> {
        let mut builder = TokioResolver::builder_tokio()
            .map_err(|e| RblError::Resolver(format!("failed to create resolver: {e}")))?;
        disable_cache(builder.options_mut());
        Ok(Self::new(builder.build()))
    }
}

fn disable_cache(opts: &mut ResolverOpts) {
    opts.cache_size = 0;
}

/// Query names are always absolute; never let search domains apply.
fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Map a hickory error into the closed lookup error set.
fn map_resolve_error(err: &ResolveError) -> LookupError {
    let Some(proto) = err.proto() else {
        return LookupError::Other(err.to_string());
    };

    if proto.is_nx_domain() {
        LookupError::NotFound
    } else if proto.is_no_records_found() {
        LookupError::NoData
    } else if matches!(proto.kind(), ProtoErrorKind::Timeout) {
        LookupError::Timeout
    } else {
        LookupError::Other(err.to_string())
    }
}

#[async_trait]
impl DnsLookup for HickoryLookup {
    async fn resolve_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        trace!(name, "A lookup");
        let lookup = self
            .resolver
            .ipv4_lookup(fqdn(name))
            .await
            .map_err(|e| map_resolve_error(&e))?;
        Ok(lookup.iter().map(|a| a.0).collect())
    }

    async fn resolve_aaaa(&self, name: &str) -> Result<Vec<Ipv6Addr>, LookupError> {
        trace!(name, "AAAA lookup");
        let lookup = self
            .resolver
            .ipv6_lookup(fqdn(name))
            .await
            .map_err(|e| map_resolve_error(&e))?;
        Ok(lookup.iter().map(|aaaa| aaaa.0).collect())
    }

    async fn resolve_txt(&self, name: &str) -> Result<Vec<Vec<String>>, LookupError> {
        trace!(name, "TXT lookup");
        let lookup = self
            .resolver
            .txt_lookup(fqdn(name))
            .await
            .map_err(|e| map_resolve_error(&e))?;
        Ok(lookup
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|data| String::from_utf8_lossy(data).to_string())
                    .collect()
            })
            .collect())
    }
}
