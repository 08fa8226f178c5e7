use serde::{Deserialize, Serialize};

use super::TargetKind;

/// Which target kinds a provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// IP reputation list (reversed-address queries)
    Ip,
    /// Domain reputation list (RHSBL / URI lists)
    Domain,
    /// Accepts both IPs and domains
    Both,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ip => write!(f, "ip"),
            Self::Domain => write!(f, "domain"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// A DNS reputation list provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RblProvider {
    /// DNS suffix queries are built under (e.g. `zen.spamhaus.org`)
    pub zone: String,

    /// Human-readable provider name
    pub name: String,

    /// Accepted target kinds
    #[serde(rename = "type")]
    pub kind: ProviderKind,

    /// Whether IPv6 addresses can be queried (only meaningful for IP lists)
    #[serde(default, rename = "supportsIPv6", alias = "supports_ipv6")]
    pub supports_ipv6: bool,

    /// Provider homepage or delisting page
    #[serde(default)]
    pub url: String,

    /// Short description of what the list tracks
    #[serde(default)]
    pub description: String,
}

impl RblProvider {
    /// Create a provider with empty metadata
    #[must_use]
    pub fn new(zone: impl Into<String>, name: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            zone: zone.into(),
            name: name.into(),
            kind,
            supports_ipv6: false,
            url: String::new(),
            description: String::new(),
        }
    }

    /// Mark the provider as answering IPv6 queries
    #[must_use]
    pub const fn with_ipv6(mut self) -> Self {
        self.supports_ipv6 = true;
        self
    }

    /// Attach the informational url and description
    #[must_use]
    pub fn with_info(mut self, url: impl Into<String>, description: impl Into<String>) -> Self {
        self.url = url.into();
        self.description = description.into();
        self
    }

    /// Whether this provider can answer for a target of the given kind
    #[must_use]
    pub const fn can_query(&self, target: TargetKind) -> bool {
        match self.kind {
            ProviderKind::Both => true,
            ProviderKind::Domain => matches!(target, TargetKind::Domain),
            ProviderKind::Ip => match target {
                TargetKind::Ipv4 => true,
                TargetKind::Ipv6 => self.supports_ipv6,
                TargetKind::Domain => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [TargetKind; 3] = [TargetKind::Ipv4, TargetKind::Ipv6, TargetKind::Domain];

    #[test]
    fn domain_provider_only_takes_domains() {
        let p = RblProvider::new("dbl.example", "DBL", ProviderKind::Domain);
        assert!(!p.can_query(TargetKind::Ipv4));
        assert!(!p.can_query(TargetKind::Ipv6));
        assert!(p.can_query(TargetKind::Domain));
    }

    #[test]
    fn ip_provider_respects_ipv6_flag() {
        let v4_only = RblProvider::new("bl.example", "BL", ProviderKind::Ip);
        assert!(v4_only.can_query(TargetKind::Ipv4));
        assert!(!v4_only.can_query(TargetKind::Ipv6));
        assert!(!v4_only.can_query(TargetKind::Domain));

        let dual = v4_only.with_ipv6();
        assert!(dual.can_query(TargetKind::Ipv4));
        assert!(dual.can_query(TargetKind::Ipv6));
        assert!(!dual.can_query(TargetKind::Domain));
    }

    #[test]
    fn both_provider_takes_everything() {
        let p = RblProvider::new("multi.example", "Multi", ProviderKind::Both);
        assert!(ALL_KINDS.iter().all(|k| p.can_query(*k)));
    }

    #[test]
    fn provider_wire_format() {
        let p = RblProvider::new("zen.example", "Zen", ProviderKind::Ip)
            .with_ipv6()
            .with_info("https://zen.example", "combined list");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "ip");
        assert_eq!(json["supportsIPv6"], true);
        assert_eq!(json["url"], "https://zen.example");
    }
}
