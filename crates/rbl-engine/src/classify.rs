//! Target normalization and classification.
//!
//! Classification is purely lexical. Anything that is not shaped like an
//! IPv4 or IPv6 literal is a domain candidate; resolution decides later
//! whether it exists.

use rbl_core::{Target, TargetKind};

/// Trim, lowercase, drop one trailing dot and convert IDNs to punycode.
///
/// Punycode conversion is best-effort: on failure the lowercased input is
/// kept as is.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let value = lowered.strip_suffix('.').unwrap_or(&lowered);

    if value.is_ascii() {
        return value.to_string();
    }

    idna::domain_to_ascii(value).unwrap_or_else(|_| value.to_string())
}

/// Four dot-separated groups of 1-3 digits.
#[must_use]
pub fn is_ipv4_literal(value: &str) -> bool {
    let groups: Vec<&str> = value.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()))
}

/// Colon-separated hex groups of up to 4 digits, 3 to 8 fields in total
/// (so `::` compression is allowed). The last field may be a dotted quad
/// standing for two groups. A trailing `%scope` is ignored.
#[must_use]
pub fn is_ipv6_literal(value: &str) -> bool {
    let addr = strip_scope(value);
    if !addr.contains(':') {
        return false;
    }

    let mut fields: Vec<&str> = addr.split(':').collect();
    let mut allowed = 3..=8;
    if fields.last().is_some_and(|f| f.contains('.')) {
        match fields.pop() {
            Some(tail) if is_ipv4_literal(tail) => allowed = 2..=7,
            _ => return false,
        }
    }

    allowed.contains(&fields.len())
        && fields
            .iter()
            .all(|f| f.len() <= 4 && f.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Remove a `%zone` suffix from an IPv6 literal.
#[must_use]
pub fn strip_scope(value: &str) -> &str {
    value.split_once('%').map_or(value, |(addr, _)| addr)
}

/// Classify an already normalized value.
#[must_use]
pub fn kind_of(value: &str) -> TargetKind {
    if is_ipv4_literal(value) {
        TargetKind::Ipv4
    } else if is_ipv6_literal(value) {
        TargetKind::Ipv6
    } else {
        TargetKind::Domain
    }
}

/// Normalize and classify a raw target string.
#[must_use]
pub fn classify(raw: &str) -> Target {
    let value = normalize(raw);
    let kind = kind_of(&value);
    Target::new(value, kind)
}
