use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::{RblProvider, TargetKind};

/// Outcome of one provider query.
///
/// `listed == true` never carries an `error`, and a present `error`
/// always means `listed == false`. Use the constructors to keep it so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RblResult {
    /// Provider name, suffixed with ` (<ip>)` for a domain's resolved addresses
    pub rbl: String,

    /// Whether the target is listed
    pub listed: bool,

    /// Address returned by the list (only when listed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// TXT explanation, best-effort
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Wall time spent on the query in milliseconds
    pub response_time: u64,

    /// Query failure (timeout, resolver error, provider-side block)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Provider url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Provider description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RblResult {
    /// Not listed, no error
    #[must_use]
    pub fn clean(rbl: impl Into<String>, response_time: u64) -> Self {
        Self {
            rbl: rbl.into(),
            listed: false,
            response: None,
            reason: None,
            response_time,
            error: None,
            url: None,
            description: None,
        }
    }

    /// Query failed; never counts as a listing
    #[must_use]
    pub fn failed(rbl: impl Into<String>, response_time: u64, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::clean(rbl, response_time)
        }
    }

    /// Genuine listing
    #[must_use]
    pub fn listed(
        rbl: impl Into<String>,
        response_time: u64,
        response: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self {
            listed: true,
            response: Some(response.into()),
            reason,
            ..Self::clean(rbl, response_time)
        }
    }

    /// Carry the provider's informational metadata
    #[must_use]
    pub fn with_provider_info(mut self, provider: &RblProvider) -> Self {
        self.url = Some(provider.url.clone()).filter(|u| !u.is_empty());
        self.description = Some(provider.description.clone()).filter(|d| !d.is_empty());
        self
    }

    /// Returns true if the query failed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns true if not listed and no error
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        !self.listed && self.error.is_none()
    }
}

/// Counts over a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of results
    pub total_checked: usize,
    /// Results with `listed == true`
    pub listed_count: usize,
    /// Results neither listed nor failed
    pub clean_count: usize,
    /// Results with an error
    pub error_count: usize,
}

impl Summary {
    /// Tally a result set into mutually exclusive buckets
    #[must_use]
    pub fn from_results(results: &[RblResult]) -> Self {
        results.iter().fold(
            Self {
                total_checked: results.len(),
                ..Self::default()
            },
            |mut acc, r| {
                if r.listed {
                    acc.listed_count += 1;
                } else if r.is_error() {
                    acc.error_count += 1;
                } else {
                    acc.clean_count += 1;
                }
                acc
            },
        )
    }
}

/// Full answer to a check request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    /// Normalized target
    pub target: String,

    /// Classified kind
    pub target_type: TargetKind,

    /// Addresses a domain target resolved to
    #[serde(default, rename = "resolvedIPs", skip_serializing_if = "Option::is_none")]
    pub resolved_ips: Option<Vec<String>>,

    /// One entry per dispatched query
    pub results: Vec<RblResult>,

    /// Counts derived from `results`
    pub summary: Summary,

    /// When the check completed
    pub timestamp: DateTime<Utc>,
}

impl AggregateResponse {
    /// Assemble a response, deriving the summary from the results
    #[must_use]
    pub fn new(
        target: impl Into<String>,
        target_type: TargetKind,
        resolved: Option<&[IpAddr]>,
        results: Vec<RblResult>,
    ) -> Self {
        let summary = Summary::from_results(&results);
        Self {
            target: target.into(),
            target_type,
            resolved_ips: resolved.map(|ips| ips.iter().map(ToString::to_string).collect()),
            results,
            summary,
            timestamp: Utc::now(),
        }
    }

    /// Returns true if any provider lists the target
    #[must_use]
    pub const fn is_listed(&self) -> bool {
        self.summary.listed_count > 0
    }

    /// Iterate over the listings only
    pub fn listings(&self) -> impl Iterator<Item = &RblResult> {
        self.results.iter().filter(|r| r.listed)
    }
}
