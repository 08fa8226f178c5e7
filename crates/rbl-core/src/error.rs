use thiserror::Error;

/// Result type alias for RBL check operations
pub type Result<T> = std::result::Result<T, RblError>;

/// Errors that abort a whole check request.
///
/// Per-provider failures never show up here; they are folded into the
/// `error` field of the matching [`crate::RblResult`].
#[derive(Error, Debug)]
pub enum RblError {
    /// Target missing or blank
    #[error("{0}")]
    Validation(String),

    /// Target looked like an IP literal but could not be encoded
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Domain target has no resolvable A or AAAA records
    #[error("{message}")]
    DomainResolution {
        /// Domain that failed to resolve
        domain: String,
        /// Underlying lookup failure
        cause: LookupError,
        /// User-facing description
        message: String,
    },

    /// Provider catalog is malformed
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Resolver could not be constructed
    #[error("resolver error: {0}")]
    Resolver(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl RblError {
    /// Build a domain resolution error with a message chosen from the lookup failure.
    #[must_use]
    pub fn domain_resolution(domain: &str, cause: LookupError) -> Self {
        let message = match &cause {
            LookupError::NotFound => {
                format!("Domain {domain} does not exist or could not be found")
            }
            LookupError::NoData => {
                format!("Domain {domain} exists but has no A or AAAA records")
            }
            LookupError::Timeout => format!("DNS lookup timed out for {domain}"),
            LookupError::Other(msg) => format!("Failed to resolve domain {domain}: {msg}"),
        };
        Self::DomainResolution {
            domain: domain.to_string(),
            cause,
            message,
        }
    }

    /// Returns true if the request itself was malformed
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidAddress(_))
    }

    /// HTTP status code the serving layer should answer with
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

/// Closed set of DNS lookup failures.
///
/// Resolver-specific errors are mapped into one of these at the lookup
/// seam, so classification downstream is an exhaustive `match`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// NXDOMAIN: the name does not exist
    #[error("name not found")]
    NotFound,

    /// The name exists but holds no records of the requested type
    #[error("no records of the requested type")]
    NoData,

    /// No answer within the deadline
    #[error("lookup timed out")]
    Timeout,

    /// Any other resolver failure
    #[error("{0}")]
    Other(String),
}

impl LookupError {
    /// Conventional resolver code for this failure
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "ENOTFOUND",
            Self::NoData => "ENODATA",
            Self::Timeout => "ETIMEOUT",
            Self::Other(_) => "EOTHER",
        }
    }

    /// Returns true for the expected negative answers (NXDOMAIN / NODATA)
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        matches!(self, Self::NotFound | Self::NoData)
    }
}
