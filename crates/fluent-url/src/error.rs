//! Error types for URL building.
//!
//! Every failure is detected synchronously at the call that caused it and handed back to the
//! caller; nothing is retried or defaulted.

use thiserror::Error;

/// Main error type for URL building operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Scheme other than `http` or `https`
    #[error("Unsupported scheme: {0} (only http and https are supported)")]
    UnsupportedScheme(String),

    /// Not a syntactically valid host name or IP literal
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    /// Port outside of `0..=65535`
    #[error("Port out of range: {0} (must be between 0 and 65535)")]
    PortOutOfRange(String),

    /// A `{name}` placeholder had no bound path value at build time
    #[error("Unresolved path placeholder: {{{0}}}")]
    UnresolvedPlaceholder(String),

    /// Input could not be parsed as a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Specialized result type for URL building operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedScheme(_) => "UNSUPPORTED_SCHEME",
            Self::InvalidHost(_) => "INVALID_HOST",
            Self::PortOutOfRange(_) => "PORT_OUT_OF_RANGE",
            Self::UnresolvedPlaceholder(_) => "UNRESOLVED_PLACEHOLDER",
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        match err {
            url::ParseError::InvalidPort => Self::PortOutOfRange(err.to_string()),
            url::ParseError::EmptyHost
            | url::ParseError::IdnaError
            | url::ParseError::InvalidIpv4Address
            | url::ParseError::InvalidIpv6Address
            | url::ParseError::InvalidDomainCharacter => Self::InvalidHost(err.to_string()),
            _ => Self::InvalidUrl(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
