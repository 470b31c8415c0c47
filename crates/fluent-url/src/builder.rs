//! URL builders.
//!
//! [`UrlBuilding`] is the operation set both builders share, [`UrlComponents`] the read-only
//! view with [`UrlComponents::build`]. The two variants differ only in what an operation does
//! to its receiver:
//!
//! - [`UrlBuilder`] implements [`UrlBuilding`] for `&mut UrlBuilder`. Operations update the
//!   builder in place and return the same `&mut` for chaining.
//! - [`ImmutableUrlBuilder`] implements [`UrlBuilding`] for `&ImmutableUrlBuilder`. Operations
//!   return a new builder with its own copy of the state and never touch the receiver.
//!
//! Chaining reads the same for both:
//!
//! ```
//! use fluent_url::{ImmutableUrlBuilder, UrlBuilder, UrlBuilding, UrlComponents};
//!
//! let mut mutable = UrlBuilder::parse("http://test.de")?;
//! mutable.set_port(8080)?.add_path("a").add_query_key("debug");
//! assert_eq!(mutable.build()?.as_str(), "http://test.de:8080/a?debug");
//!
//! let base = ImmutableUrlBuilder::parse("http://test.de")?;
//! let derived = base.set_port(8080)?.add_path("a").add_query_key("debug");
//! assert_eq!(derived.build()?.as_str(), "http://test.de:8080/a?debug");
//! assert_eq!(base.build()?.as_str(), "http://test.de/");
//! # Ok::<(), fluent_url::Error>(())
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};
use crate::parts::{render, UrlParts};
use crate::query::QueryParameterCollection;
use crate::scheme::Scheme;

/// Operations that change the URL under construction.
///
/// Implemented for `&mut UrlBuilder` (in place) and `&ImmutableUrlBuilder` (copy on write).
/// A failing operation leaves the builder it was called on unchanged.
pub trait UrlBuilding: Sized {
    /// What every operation hands back for further chaining.
    type Output;

    /// Sets the scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScheme`] unless `scheme` is `http` or `https`.
    fn set_scheme(self, scheme: &str) -> Result<Self::Output>;

    /// Sets the host name or IP address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] if `host` is not a valid host name or IP literal.
    fn set_host(self, host: &str) -> Result<Self::Output>;

    /// Sets the port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PortOutOfRange`] if `port` lies outside `0..=65535`.
    fn set_port<P: Into<i64>>(self, port: P) -> Result<Self::Output>;

    /// Appends path segments. `path` may contain several segments separated by `/`.
    fn add_path(self, path: &str) -> Self::Output;

    /// Binds `value` to the `{key}` placeholder, replacing an earlier binding.
    fn with_path_value<K, V>(self, key: K, value: V) -> Self::Output
    where
        K: Into<String>,
        V: Into<String>;

    /// Adds one `key=value` query parameter per value, in order.
    ///
    /// With no values a bare `key` is added instead. `key` must not be empty; debug builds
    /// panic on an empty key.
    fn add_query<I, V>(self, key: &str, values: I) -> Self::Output
    where
        I: IntoIterator<Item = V>,
        V: Into<String>;

    /// Adds a bare `key` query parameter. `key` must not be empty.
    fn add_query_key(self, key: &str) -> Self::Output {
        self.add_query(key, std::iter::empty::<String>())
    }
}

/// Read-only access to a builder's components.
pub trait UrlComponents {
    /// Snapshot of the builder state.
    fn parts(&self) -> &UrlParts;

    /// Scheme of the URL.
    fn scheme(&self) -> Scheme {
        self.parts().scheme()
    }

    /// Host name or IP address.
    fn host(&self) -> &str {
        self.parts().host()
    }

    /// Port, the scheme's default unless set explicitly.
    fn port(&self) -> u16 {
        self.parts().port()
    }

    /// Path segments with placeholders unresolved.
    fn segments(&self) -> &[String] {
        self.parts().segments()
    }

    /// Placeholder values.
    fn path_values(&self) -> &HashMap<String, String> {
        self.parts().path_values()
    }

    /// Query parameters.
    fn query_parameters(&self) -> &QueryParameterCollection {
        self.parts().query_parameters()
    }

    /// Renders the URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedPlaceholder`] if a path segment references a placeholder
    /// without a value.
    fn build(&self) -> Result<Url> {
        render(self.parts())
    }
}

/// Builder that mutates in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    parts: UrlParts,
}

impl UrlBuilder {
    /// Creates a builder from a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` cannot be parsed and [`Error::UnsupportedScheme`]
    /// unless it is an `http` or `https` URL.
    pub fn parse(url: &str) -> Result<Self> {
        UrlParts::parse(url).map(Self::from)
    }

    /// Creates a builder from a parsed URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScheme`] unless `url` is an `http` or `https` URL.
    pub fn from_url(url: &Url) -> Result<Self> {
        UrlParts::from_url(url).map(Self::from)
    }

    /// Consumes the builder, returning its state.
    #[must_use]
    pub fn into_parts(self) -> UrlParts {
        self.parts
    }
}

impl<'a> UrlBuilding for &'a mut UrlBuilder {
    type Output = &'a mut UrlBuilder;

    fn set_scheme(self, scheme: &str) -> Result<Self::Output> {
        self.parts.set_scheme(scheme)?;
        Ok(self)
    }

    fn set_host(self, host: &str) -> Result<Self::Output> {
        self.parts.set_host(host)?;
        Ok(self)
    }

    fn set_port<P: Into<i64>>(self, port: P) -> Result<Self::Output> {
        self.parts.set_port(port)?;
        Ok(self)
    }

    fn add_path(self, path: &str) -> Self::Output {
        self.parts.add_path(path);
        self
    }

    fn with_path_value<K, V>(self, key: K, value: V) -> Self::Output
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.parts.set_path_value(key, value);
        self
    }

    fn add_query<I, V>(self, key: &str, values: I) -> Self::Output
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.parts.add_query(key, values);
        self
    }
}

impl UrlComponents for UrlBuilder {
    fn parts(&self) -> &UrlParts {
        &self.parts
    }
}

/// Persistent builder: every operation yields a new builder and leaves the receiver as it was.
///
/// Derived builders copy segments, placeholder values and query parameters, so no state is
/// shared between a builder and the builders derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmutableUrlBuilder {
    parts: UrlParts,
}

impl ImmutableUrlBuilder {
    /// Creates a builder from a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` cannot be parsed and [`Error::UnsupportedScheme`]
    /// unless it is an `http` or `https` URL.
    pub fn parse(url: &str) -> Result<Self> {
        UrlParts::parse(url).map(Self::from)
    }

    /// Creates a builder from a parsed URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScheme`] unless `url` is an `http` or `https` URL.
    pub fn from_url(url: &Url) -> Result<Self> {
        UrlParts::from_url(url).map(Self::from)
    }

    /// Consumes the builder, returning its state.
    #[must_use]
    pub fn into_parts(self) -> UrlParts {
        self.parts
    }

    fn derive(&self, change: impl FnOnce(&mut UrlParts)) -> Self {
        let mut parts = self.parts.clone();
        change(&mut parts);
        Self { parts }
    }

    fn try_derive(&self, change: impl FnOnce(&mut UrlParts) -> Result<()>) -> Result<Self> {
        let mut parts = self.parts.clone();
        change(&mut parts)?;
        Ok(Self { parts })
    }
}

impl UrlBuilding for &ImmutableUrlBuilder {
    type Output = ImmutableUrlBuilder;

    fn set_scheme(self, scheme: &str) -> Result<Self::Output> {
        self.try_derive(|parts| parts.set_scheme(scheme))
    }

    fn set_host(self, host: &str) -> Result<Self::Output> {
        self.try_derive(|parts| parts.set_host(host))
    }

    fn set_port<P: Into<i64>>(self, port: P) -> Result<Self::Output> {
        self.try_derive(|parts| parts.set_port(port))
    }

    fn add_path(self, path: &str) -> Self::Output {
        self.derive(|parts| parts.add_path(path))
    }

    fn with_path_value<K, V>(self, key: K, value: V) -> Self::Output
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.derive(|parts| parts.set_path_value(key, value))
    }

    fn add_query<I, V>(self, key: &str, values: I) -> Self::Output
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.derive(|parts| parts.add_query(key, values))
    }
}

impl UrlComponents for ImmutableUrlBuilder {
    fn parts(&self) -> &UrlParts {
        &self.parts
    }
}

macro_rules! builder_conversions {
    ($builder:ident) => {
        impl From<UrlParts> for $builder {
            fn from(parts: UrlParts) -> Self {
                Self { parts }
            }
        }

        impl FromStr for $builder {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl TryFrom<&Url> for $builder {
            type Error = Error;

            fn try_from(url: &Url) -> Result<Self> {
                Self::from_url(url)
            }
        }

        impl TryFrom<Url> for $builder {
            type Error = Error;

            fn try_from(url: Url) -> Result<Self> {
                Self::from_url(&url)
            }
        }
    };
}

builder_conversions!(UrlBuilder);
builder_conversions!(ImmutableUrlBuilder);

impl From<UrlBuilder> for ImmutableUrlBuilder {
    fn from(builder: UrlBuilder) -> Self {
        Self {
            parts: builder.parts,
        }
    }
}

impl From<ImmutableUrlBuilder> for UrlBuilder {
    fn from(builder: ImmutableUrlBuilder) -> Self {
        Self {
            parts: builder.parts,
        }
    }
}
