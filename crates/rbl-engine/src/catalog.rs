//! The provider catalog.
//!
//! Built once at startup (either the built-in table or a TOML file) and
//! shared read-only behind an `Arc` for the process lifetime.

use rbl_core::{ProviderKind, RblError, RblProvider, Result, TargetKind};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Immutable table of DNS reputation list providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RblCatalog {
    providers: Vec<RblProvider>,
}

/// On-disk catalog layout: a `[[provider]]` array.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "provider", default)]
    providers: Vec<RblProvider>,
}

impl RblCatalog {
    /// Build a catalog, rejecting malformed entries.
    pub fn new(providers: Vec<RblProvider>) -> Result<Self> {
        if providers.is_empty() {
            return Err(RblError::Catalog("catalog has no providers".into()));
        }

        let mut zones = HashSet::new();
        for p in &providers {
            if p.zone.trim().is_empty() || p.name.trim().is_empty() {
                return Err(RblError::Catalog(format!(
                    "provider '{}' needs both a zone and a name",
                    p.name
                )));
            }
            if p.kind == ProviderKind::Domain && p.supports_ipv6 {
                return Err(RblError::Catalog(format!(
                    "domain provider {} cannot support IPv6",
                    p.zone
                )));
            }
            if !zones.insert(p.zone.to_lowercase()) {
                return Err(RblError::Catalog(format!("duplicate zone {}", p.zone)));
            }
        }

        Ok(Self { providers })
    }

    /// The default provider table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            providers: builtin_providers(),
        }
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| RblError::Catalog(e.to_string()))?;
        Self::new(file.providers)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Providers able to answer for the given target kind, in catalog order.
    pub fn eligible(&self, kind: TargetKind) -> impl Iterator<Item = &RblProvider> {
        self.providers.iter().filter(move |p| p.can_query(kind))
    }

    /// Look up a provider by zone (case-insensitive).
    #[must_use]
    pub fn get(&self, zone: &str) -> Option<&RblProvider> {
        self.providers
            .iter()
            .find(|p| p.zone.eq_ignore_ascii_case(zone))
    }

    /// All providers in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, RblProvider> {
        self.providers.iter()
    }

    /// Number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if the catalog holds no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl<'a> IntoIterator for &'a RblCatalog {
    type Item = &'a RblProvider;
    type IntoIter = std::slice::Iter<'a, RblProvider>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn ip(zone: &str, name: &str) -> RblProvider {
    RblProvider::new(zone, name, ProviderKind::Ip)
}

fn domain(zone: &str, name: &str) -> RblProvider {
    RblProvider::new(zone, name, ProviderKind::Domain)
}

fn both(zone: &str, name: &str) -> RblProvider {
    RblProvider::new(zone, name, ProviderKind::Both)
}

fn builtin_providers() -> Vec<RblProvider> {
    vec![
        ip("zen.spamhaus.org", "Spamhaus ZEN").with_ipv6().with_info(
            "https://www.spamhaus.org/zen/",
            "Combined Spamhaus IP blocklists (SBL, XBL, PBL)",
        ),
        ip("bl.spamcop.net", "SpamCop").with_info(
            "https://www.spamcop.net/bl.shtml",
            "IPs reported as sending spam by SpamCop users",
        ),
        ip("b.barracudacentral.org", "Barracuda").with_info(
            "https://www.barracudacentral.org/rbl",
            "Barracuda Reputation Block List",
        ),
        ip("dnsbl.sorbs.net", "SORBS").with_info(
            "http://www.sorbs.net/",
            "Spam and Open Relay Blocking System aggregate zone",
        ),
        ip("cbl.abuseat.org", "CBL").with_info(
            "https://www.abuseat.org/",
            "Composite Blocking List of infected and proxy hosts",
        ),
        ip("dnsbl-1.uceprotect.net", "UCEPROTECT Level 1").with_info(
            "https://www.uceprotect.net/",
            "Single IPs caught sending to spam traps",
        ),
        ip("psbl.surriel.com", "PSBL").with_info(
            "https://psbl.org/",
            "Passive Spam Block List fed by spam traps",
        ),
        ip("bl.mailspike.net", "Mailspike").with_info(
            "https://mailspike.io/",
            "Mailspike IP reputation blacklist",
        ),
        ip("dnsbl.dronebl.org", "DroneBL").with_ipv6().with_info(
            "https://dronebl.org/",
            "Drones, botnets and abusable proxies",
        ),
        ip("all.s5h.net", "s5h.net").with_info(
            "https://www.usenix.org.uk/content/rbl.html",
            "Hosts seen sending spam or probing",
        ),
        ip("ix.dnsbl.manitu.net", "NiX Spam").with_info(
            "https://www.nixspam.net/",
            "IPs seen sending spam in the last 12 hours",
        ),
        ip("truncate.gbudb.net", "GBUdb Truncate").with_info(
            "https://www.gbudb.com/truncate/",
            "IPs with consistently bad message statistics",
        ),
        both("dnsbl.spfbl.net", "SPFBL").with_ipv6().with_info(
            "https://spfbl.net/en/dnsbl/",
            "SPFBL reputation for IPs and domains",
        ),
        both("hostkarma.junkemailfilter.com", "Hostkarma").with_info(
            "https://wiki.junkemailfilter.com/index.php/Spam_DNS_Lists",
            "JunkEmailFilter host reputation",
        ),
        domain("dbl.spamhaus.org", "Spamhaus DBL").with_info(
            "https://www.spamhaus.org/dbl/",
            "Domains found in spam and associated with abuse",
        ),
        domain("multi.surbl.org", "SURBL").with_info(
            "https://www.surbl.org/",
            "Domains that appear in unsolicited message bodies",
        ),
        domain("multi.uribl.com", "URIBL").with_info(
            "https://uribl.com/",
            "Domains found in spam message URIs",
        ),
        domain("dbl.nordspam.com", "NordSpam DBL").with_info(
            "https://www.nordspam.com/",
            "Domains used in spam and phishing",
        ),
    ]
}
