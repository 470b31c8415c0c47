//! Builder state and rendering.
//!
//! [`UrlParts`] holds everything a builder knows about the URL under construction. Both builder
//! variants wrap one and delegate every operation to it; [`render`] turns a snapshot back into
//! a [`Url`].

use std::collections::HashMap;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::host::{check_host, url_host};
use crate::path::PathTemplate;
use crate::query::{QueryParameter, QueryParameterCollection};
use crate::scheme::Scheme;

/// Decomposed URL: scheme, host, port, path template and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    scheme: Scheme,
    host: String,
    port: u16,
    path: PathTemplate,
    query: QueryParameterCollection,
    // input carried a `?` with nothing after it
    empty_query_marker: bool,
}

impl UrlParts {
    /// Parses a URL string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the string is not a URL, [`Error::PortOutOfRange`] if its
    /// port does not fit 16 bits, and the errors of [`UrlParts::from_url`].
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input)?;
        Self::from_url(&url)
    }

    /// Decomposes an already parsed URL.
    ///
    /// Path segments are cleaned (empty segments dropped) and the query is exploded on `&`.
    /// Without an explicit port the scheme's default port is used. A bare trailing `?` is
    /// remembered and rendered again as long as no query parameter is added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScheme`] unless the scheme is `http` or `https`, and
    /// [`Error::InvalidHost`] if the URL has no host.
    pub fn from_url(url: &Url) -> Result<Self> {
        let scheme = Scheme::parse(url.scheme())?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::InvalidHost(url.as_str().to_string()))?
            .to_string();
        let port = url
            .port_or_known_default()
            .unwrap_or_else(|| scheme.default_port());
        let path = PathTemplate::from_segments(url.path_segments().into_iter().flatten());
        let query = QueryParameterCollection::from_query(url.query().unwrap_or_default());
        let empty_query_marker = url.query() == Some("");

        debug!(
            %scheme,
            %host,
            port,
            segments = path.segments().len(),
            query_parameters = query.len(),
            "decomposed url"
        );

        Ok(Self {
            scheme,
            host,
            port,
            path,
            query,
            empty_query_marker,
        })
    }

    /// Replaces the scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScheme`] unless `scheme` is `http` or `https`; the current
    /// scheme is kept.
    pub fn set_scheme(&mut self, scheme: &str) -> Result<()> {
        self.scheme = Scheme::parse(scheme)?;
        Ok(())
    }

    /// Replaces the host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] if `host` is neither a host name nor an IP literal; the
    /// current host is kept.
    pub fn set_host(&mut self, host: &str) -> Result<()> {
        check_host(host)?;
        self.host = host.to_string();
        Ok(())
    }

    /// Replaces the port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PortOutOfRange`] if `port` lies outside `0..=65535`; the current port is
    /// kept.
    pub fn set_port(&mut self, port: impl Into<i64>) -> Result<()> {
        let port = port.into();
        self.port = u16::try_from(port).map_err(|_| Error::PortOutOfRange(port.to_string()))?;
        Ok(())
    }

    /// Appends the segments of `path`.
    pub fn add_path(&mut self, path: &str) {
        self.path.push_path(path);
    }

    /// Binds a placeholder value.
    pub fn set_path_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.path.set_value(key, value);
    }

    /// Adds one `key=value` parameter per value, or a bare `key` when `values` is empty.
    ///
    /// `key` must not be empty; debug builds panic on an empty key.
    pub fn add_query<I, V>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        debug_assert!(!key.is_empty(), "query key must not be empty");
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            self.query.add(QueryParameter::bare(key));
            return;
        }
        self.query
            .add_range(values.map(|value| QueryParameter::new(key, value)));
    }

    /// Current scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Current host, as given.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Current port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Path template (segments and placeholder values).
    #[must_use]
    pub const fn path(&self) -> &PathTemplate {
        &self.path
    }

    /// Path segments, placeholders unresolved.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        self.path.segments()
    }

    /// Placeholder values.
    #[must_use]
    pub fn path_values(&self) -> &HashMap<String, String> {
        self.path.values()
    }

    /// Query parameters.
    #[must_use]
    pub const fn query_parameters(&self) -> &QueryParameterCollection {
        &self.query
    }
}

/// Renders a snapshot of builder state into a URL.
///
/// Placeholders are substituted, segments joined with `/` and the query rendered from the
/// collection. Percent-encoding of the result is left to [`Url`].
///
/// # Errors
///
/// Returns [`Error::UnresolvedPlaceholder`] if a segment references an unbound name, or
/// [`Error::InvalidHost`] if [`Url`] rejects the host.
pub fn render(parts: &UrlParts) -> Result<Url> {
    let path = parts.path.resolve()?;

    let mut url = Url::parse(&format!("{}://{}/", parts.scheme, url_host(&parts.host)))?;
    url.set_port(Some(parts.port))
        .map_err(|()| Error::PortOutOfRange(parts.port.to_string()))?;
    url.set_path(&format!("/{path}"));

    let query = parts.query.to_query_string();
    url.set_query((!query.is_empty() || parts.empty_query_marker).then_some(query.as_str()));

    debug!(url = %url, "rendered url");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_url_defaults_port_by_scheme() {
        assert_eq!(UrlParts::parse("http://test.de").unwrap().port(), 80);
        assert_eq!(UrlParts::parse("https://test.de").unwrap().port(), 443);
        assert_eq!(UrlParts::parse("https://test.de:8443").unwrap().port(), 8443);
    }

    #[test]
    fn from_url_rejects_unsupported_scheme() {
        assert_eq!(
            UrlParts::parse("ftp://test.de").unwrap_err(),
            Error::UnsupportedScheme("ftp".to_string())
        );
    }

    #[test]
    fn from_url_rejects_port_overflow() {
        assert!(matches!(
            UrlParts::parse("http://test.de:65536"),
            Err(Error::PortOutOfRange(_))
        ));
    }

    #[test]
    fn from_url_cleans_segments() {
        let parts = UrlParts::parse("http://test.de/this//is/").unwrap();
        assert_eq!(parts.segments(), ["this", "is"]);
    }

    #[test]
    fn from_url_explodes_query() {
        let parts = UrlParts::parse("http://test.de/?a=big&test").unwrap();
        let keys: Vec<_> = parts.query_parameters().iter().map(QueryParameter::key).collect();
        assert_eq!(keys, ["a", "test"]);
    }

    #[test]
    fn failed_setters_keep_state() {
        let mut parts = UrlParts::parse("https://test.de:8443/a").unwrap();
        let before = parts.clone();

        assert!(parts.set_scheme("ftp").is_err());
        assert!(parts.set_host("not a host").is_err());
        assert!(parts.set_port(-1).is_err());
        assert!(parts.set_port(65_536).is_err());

        assert_eq!(parts, before);
    }

    #[test]
    fn add_query_without_values_adds_bare_key() {
        let mut parts = UrlParts::parse("http://test.de").unwrap();
        parts.add_query("flag", std::iter::empty::<String>());
        parts.add_query("a", ["1", "2"]);
        assert_eq!(parts.query_parameters().to_query_string(), "flag&a=1&a=2");
    }

    #[test]
    fn render_round_trip() {
        for input in [
            "http://www.test.de/this/is?a=big&test",
            "https://www.test2.com/",
            "https://test.de:4242/more/bla",
            "http://test.de/a?",
        ] {
            let parts = UrlParts::parse(input).unwrap();
            assert_eq!(render(&parts).unwrap().as_str(), input);
        }
    }

    #[test]
    fn render_empty_query_marker_gives_way_to_parameters() {
        let mut parts = UrlParts::parse("http://test.de/a?").unwrap();
        assert!(parts.query_parameters().is_empty());

        parts.add_query("k", ["v"]);
        assert_eq!(render(&parts).unwrap().as_str(), "http://test.de/a?k=v");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "query key must not be empty")]
    fn add_query_rejects_empty_key() {
        let mut parts = UrlParts::parse("http://test.de").unwrap();
        parts.add_query("", ["x"]);
    }

    #[test]
    fn render_substitutes_placeholders() {
        let mut parts = UrlParts::parse("http://test.de/{Hello}").unwrap();
        parts.set_path_value("Hello", "hello");
        assert_eq!(render(&parts).unwrap().as_str(), "http://test.de/hello");
    }

    #[test]
    fn render_fails_on_unbound_placeholder() {
        let parts = UrlParts::parse("http://test.de/{X}").unwrap();
        assert_eq!(
            render(&parts).unwrap_err(),
            Error::UnresolvedPlaceholder("X".to_string())
        );
    }

    #[test]
    fn render_ipv6_host() {
        let mut parts = UrlParts::parse("http://test.de").unwrap();
        parts.set_host("::1").unwrap();
        let url = render(&parts).unwrap();
        assert_eq!(url.as_str(), "http://[::1]/");
    }

    #[test]
    fn render_explicit_port_zero() {
        let mut parts = UrlParts::parse("http://test.de").unwrap();
        parts.set_port(0).unwrap();
        assert_eq!(render(&parts).unwrap().as_str(), "http://test.de:0/");
    }
}
