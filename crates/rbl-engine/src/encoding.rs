//! DNSBL query name encoding.
//!
//! Standard DNSBL pattern: reverse the address and query it under the
//! provider zone.
//!
//! - IPv4 `192.0.2.1` under `zen.example` -> `1.2.0.192.zen.example`
//! - IPv6 addresses are expanded to 32 nibbles, reversed and dot-separated
//! - Domains are queried as `<domain>.<zone>`
//!
//! Typed targets go through the string encoders and may be rejected.
//! Resolved addresses are encoded from their parsed form with
//! [`reverse_ip`], which cannot fail.

use rbl_core::{RblError, TargetKind};
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

use crate::classify::strip_scope;

/// Address that cannot be turned into a query name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid address '{address}': {reason}")]
pub struct InvalidAddress {
    /// Offending input
    pub address: String,
    /// What was wrong with it
    pub reason: String,
}

impl InvalidAddress {
    fn new(address: &str, reason: impl Into<String>) -> Self {
        Self {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<InvalidAddress> for RblError {
    fn from(err: InvalidAddress) -> Self {
        Self::InvalidAddress(err.to_string())
    }
}

/// Reverse the octets of a dotted-quad address (without zone suffix).
///
/// `1.2.3.4` -> `4.3.2.1`
pub fn reverse_ipv4(ip: &str) -> Result<String, InvalidAddress> {
    let octets: Vec<&str> = ip.split('.').collect();
    if octets.len() != 4 || octets.iter().any(|o| o.is_empty()) {
        return Err(InvalidAddress::new(
            ip,
            format!("expected 4 octets, got {}", octets.len()),
        ));
    }

    Ok(octets.iter().rev().copied().collect::<Vec<_>>().join("."))
}

/// Split one side of a `::` into hextets, validating each.
fn hextets<'a>(part: &'a str, ip: &str) -> Result<Vec<&'a str>, InvalidAddress> {
    if part.is_empty() {
        return Ok(Vec::new());
    }

    part.split(':')
        .map(|group| {
            if group.is_empty() || group.len() > 4 {
                Err(InvalidAddress::new(ip, format!("bad group '{group}'")))
            } else if !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                Err(InvalidAddress::new(ip, format!("non-hex group '{group}'")))
            } else {
                Ok(group)
            }
        })
        .collect()
}

/// Expand an IPv6 literal into its 32 lowercase nibbles, most significant first.
///
/// A trailing dotted quad (`::ffff:192.0.2.1`) counts as the last two groups.
pub fn expand_ipv6(ip: &str) -> Result<String, InvalidAddress> {
    let embedded;
    let addr = match strip_scope(ip).rsplit_once(':') {
        Some((head, tail)) if tail.contains('.') => {
            let v4: Ipv4Addr = tail
                .parse()
                .map_err(|_| InvalidAddress::new(ip, format!("bad IPv4 tail '{tail}'")))?;
            let [a, b, c, d] = v4.octets();
            embedded = format!(
                "{head}:{:x}:{:x}",
                u16::from_be_bytes([a, b]),
                u16::from_be_bytes([c, d])
            );
            embedded.as_str()
        }
        _ => strip_scope(ip),
    };

    let groups = match addr.matches("::").count() {
        0 => {
            let groups = hextets(addr, ip)?;
            if groups.len() != 8 {
                return Err(InvalidAddress::new(
                    ip,
                    format!("expected 8 groups, got {}", groups.len()),
                ));
            }
            groups
        }
        1 => {
            let (left, right) = addr
                .split_once("::")
                .ok_or_else(|| InvalidAddress::new(ip, "malformed '::'"))?;
            let left = hextets(left, ip)?;
            let right = hextets(right, ip)?;
            let used = left.len() + right.len();
            if used > 8 {
                return Err(InvalidAddress::new(ip, format!("{used} groups exceed 8")));
            }
            let mut groups = left;
            groups.extend(std::iter::repeat("0").take(8 - used));
            groups.extend(right);
            groups
        }
        _ => return Err(InvalidAddress::new(ip, "more than one '::'")),
    };

    Ok(groups
        .iter()
        .map(|g| format!("{:0>4}", g.to_ascii_lowercase()))
        .collect())
}

/// Reverse an IPv6 address nibble by nibble (without zone suffix).
///
/// `2001:db8::1` -> `1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2`
pub fn reverse_ipv6(ip: &str) -> Result<String, InvalidAddress> {
    let nibbles = expand_ipv6(ip)?;
    let reversed: Vec<String> = nibbles.chars().rev().map(String::from).collect();
    Ok(reversed.join("."))
}

/// Reverse a parsed address: octets for IPv4, nibbles for IPv6.
#[must_use]
pub fn reverse_ip(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}")
        }
        IpAddr::V6(v6) => v6
            .octets()
            .iter()
            .rev()
            .flat_map(|byte| [byte & 0x0f, byte >> 4])
            .map(|nibble| format!("{nibble:x}"))
            .collect::<Vec<_>>()
            .join("."),
    }
}

/// Query name for a resolved address under a provider zone.
#[must_use]
pub fn ip_query_name(ip: &IpAddr, zone: &str) -> String {
    format!("{}.{zone}", reverse_ip(ip))
}

/// Build the full DNSBL query name for a target under a provider zone.
///
/// Example: `build_query_name("192.0.2.1", TargetKind::Ipv4, "bl.example")`
/// -> `"1.2.0.192.bl.example"`
pub fn build_query_name(value: &str, kind: TargetKind, zone: &str) -> Result<String, InvalidAddress> {
    let prefix = match kind {
        TargetKind::Domain => value.to_string(),
        TargetKind::Ipv4 => reverse_ipv4(value)?,
        TargetKind::Ipv6 => reverse_ipv6(value)?,
    };
    Ok(format!("{prefix}.{zone}"))
}
