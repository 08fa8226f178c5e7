//! Aggregation: classify, resolve, fan out, summarize.

use futures_util::future::join_all;
use rbl_core::{AggregateResponse, RblError, Result, TargetKind};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::catalog::RblCatalog;
use crate::classify::classify;
use crate::config::EngineConfig;
use crate::executor::{RblQuery, RblQueryExecutor};
use crate::limiter::ConcurrencyLimiter;
use crate::lookup::{DnsLookup, HickoryLookup};
use crate::resolver::DomainResolver;

/// Runs complete DNSBL checks against a shared, read-only catalog.
///
/// Every check gets its own [`ConcurrencyLimiter`]; nothing is cached
/// between checks.
#[derive(Clone)]
pub struct RblEngine {
    catalog: Arc<RblCatalog>,
    lookup: Arc<dyn DnsLookup>,
    config: EngineConfig,
}

impl RblEngine {
    /// Create an engine over any [`DnsLookup`]
    #[must_use]
    pub fn new(catalog: Arc<RblCatalog>, lookup: Arc<dyn DnsLookup>, config: EngineConfig) -> Self {
        Self {
            catalog,
            lookup,
            config,
        }
    }

    /// Create an engine using the system resolver
    pub fn with_system_resolver(catalog: Arc<RblCatalog>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let lookup = HickoryLookup::from_system()?;
        Ok(Self::new(catalog, Arc::new(lookup), config))
    }

    /// The provider catalog
    #[must_use]
    pub fn catalog(&self) -> &RblCatalog {
        &self.catalog
    }

    /// Engine settings
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Encode one query per provider eligible for a typed IP or domain.
    fn queries_for(&self, value: &str, kind: TargetKind) -> Result<Vec<RblQuery<'_>>> {
        self.catalog
            .eligible(kind)
            .map(|provider| RblQuery::new(value, kind, provider).map_err(RblError::from))
            .collect()
    }

    /// One query per eligible provider for each resolved address.
    fn address_queries(&self, ips: &[IpAddr]) -> Vec<RblQuery<'_>> {
        ips.iter()
            .flat_map(|ip| {
                self.catalog
                    .eligible(TargetKind::of_ip(ip))
                    .map(move |provider| RblQuery::for_ip(ip, provider))
            })
            .collect()
    }

    /// Check a target against every applicable provider.
    ///
    /// Only a blank target ([`RblError::Validation`]), an unencodable IP
    /// literal ([`RblError::InvalidAddress`]) or a domain that resolves to
    /// nothing ([`RblError::DomainResolution`]) fail the check; provider
    /// failures are reported inside the response.
    #[instrument(skip(self, raw), fields(target = %raw.trim()))]
    pub async fn check(&self, raw: &str) -> Result<AggregateResponse> {
        if raw.trim().is_empty() {
            return Err(RblError::Validation("Target is required".into()));
        }

        let target = classify(raw);

        let (queries, resolved) = match target.kind {
            TargetKind::Ipv4 | TargetKind::Ipv6 => {
                (self.queries_for(&target.value, target.kind)?, None)
            }
            TargetKind::Domain => {
                let resolver = DomainResolver::new(self.lookup.clone(), self.config.resolve_timeout());
                let ips = resolver.resolve(&target.value).await?;

                let mut queries = self.queries_for(&target.value, TargetKind::Domain)?;
                queries.extend(self.address_queries(&ips));
                (queries, Some(ips))
            }
        };

        let limiter = ConcurrencyLimiter::new(self.config.concurrency);
        let executor = RblQueryExecutor::new(
            self.lookup.clone(),
            self.config.query_timeout(),
            self.config.txt_timeout(),
        );

        // join_all keeps submission order, so results follow catalog order
        let results = join_all(
            queries
                .iter()
                .map(|query| limiter.submit(executor.execute(query))),
        )
        .await;

        let response = AggregateResponse::new(
            target.value,
            target.kind,
            resolved.as_deref(),
            results,
        );

        info!(
            kind = %response.target_type,
            checked = response.summary.total_checked,
            listed = response.summary.listed_count,
            errors = response.summary.error_count,
            peak_concurrency = limiter.peak(),
            "RBL check complete"
        );

        Ok(response)
    }
}
