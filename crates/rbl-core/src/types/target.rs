use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Classification of a check target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Dotted-quad IPv4 address
    Ipv4,
    /// Colon-separated IPv6 address
    Ipv6,
    /// Anything else, validated later by resolution
    Domain,
}

impl TargetKind {
    /// Kind of a concrete resolved address
    #[must_use]
    pub const fn of_ip(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::Ipv4,
            IpAddr::V6(_) => Self::Ipv6,
        }
    }

    /// Returns true for the two address kinds
    #[must_use]
    pub const fn is_ip(self) -> bool {
        matches!(self, Self::Ipv4 | Self::Ipv6)
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Domain => "domain",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ipv4" | "v4" => Ok(Self::Ipv4),
            "ipv6" | "v6" => Ok(Self::Ipv6),
            "domain" => Ok(Self::Domain),
            other => Err(format!("unknown target kind: {other} (expected ipv4, ipv6 or domain)")),
        }
    }
}

/// A normalized, classified check target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Normalized target string
    pub value: String,
    /// Classified kind
    pub kind: TargetKind,
    /// Addresses the domain resolved to (empty for IP targets)
    pub resolved: Vec<IpAddr>,
}

impl Target {
    /// Create an unresolved target
    #[must_use]
    pub fn new(value: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            value: value.into(),
            kind,
            resolved: Vec::new(),
        }
    }
}
