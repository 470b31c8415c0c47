//! Supported URL schemes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The schemes a builder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain `http`
    Http,
    /// `https`
    Https,
}

impl Scheme {
    /// Parses a scheme name. Matching is exact: `HTTP` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScheme`] for anything but `http` and `https`.
    pub fn parse(input: &str) -> Result<Self> {
        match input {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(Error::UnsupportedScheme(other.to_string())),
        }
    }

    /// Scheme name as it appears in a URL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Port used when a URL does not name one.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
