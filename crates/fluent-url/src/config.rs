//! Endpoint configuration.
//!
//! An [`EndpointConfig`] describes a base URL together with default placeholder values and
//! query parameters. It can be loaded with serde from any format and turned into either
//! builder variant.

use crate::builder::{ImmutableUrlBuilder, UrlBuilder};
use crate::parts::UrlParts;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;
use validator::Validate;

/// Configuration for a URL endpoint.
///
/// Path values and query entries are applied on top of the base URL, in declaration order,
/// whenever a builder is created from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EndpointConfig {
    /// Base URL the builders start from (e.g., "https://api.example.com/v1/{tenant}")
    #[validate(url)]
    pub base_url: String,

    /// Default values for path placeholders
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub path_values: BTreeMap<String, String>,

    /// Default query parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryEntry>,
}

/// A query key with its values. No values means a bare key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct QueryEntry {
    /// Query parameter key
    #[validate(length(min = 1))]
    pub key: String,

    /// Values, rendered as one `key=value` pair each
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl QueryEntry {
    /// Create a query entry.
    #[must_use]
    pub fn new<I, V>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl EndpointConfig {
    /// Create a new endpoint configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL (e.g., "https://api.example.com")
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            path_values: BTreeMap::new(),
            query: Vec::new(),
        };

        config.validate_config()?;

        Ok(config)
    }

    /// Set a default placeholder value.
    #[must_use]
    pub fn with_path_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_values.insert(key.into(), value.into());
        self
    }

    /// Append a default query entry.
    #[must_use]
    pub fn with_query(mut self, entry: QueryEntry) -> Self {
        self.query.push(entry);
        self
    }

    /// Validate the configuration, including every query entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the base URL is not a URL or a query key is empty.
    pub fn validate_config(&self) -> Result<(), Error> {
        self.validate()?;
        for entry in &self.query {
            entry.validate()?;
        }
        Ok(())
    }

    /// Parse the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {}", e)))
    }

    /// Create a mutable builder seeded from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the base URL is not an `http` or
    /// `https` URL.
    pub fn to_builder(&self) -> Result<UrlBuilder, Error> {
        self.to_parts().map(UrlBuilder::from)
    }

    /// Create an immutable builder seeded from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the base URL is not an `http` or
    /// `https` URL.
    pub fn to_immutable_builder(&self) -> Result<ImmutableUrlBuilder, Error> {
        self.to_parts().map(ImmutableUrlBuilder::from)
    }

    fn to_parts(&self) -> Result<UrlParts, Error> {
        self.validate_config()?;

        let mut parts = UrlParts::from_url(&self.parse_base_url()?)?;
        for (key, value) in &self.path_values {
            parts.set_path_value(key.as_str(), value.as_str());
        }
        for entry in &self.query {
            parts.add_query(&entry.key, entry.values.iter().map(String::as_str));
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{UrlBuilding, UrlComponents};

    #[test]
    fn test_endpoint_config_new() {
        let config = EndpointConfig::new("https://api.example.com").unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert!(config.path_values.is_empty());
        assert!(config.query.is_empty());
    }

    #[test]
    fn test_endpoint_config_invalid_url() {
        let result = EndpointConfig::new("not-a-url");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_endpoint_config_builder() {
        let config = EndpointConfig::new("https://api.example.com/{tenant}")
            .unwrap()
            .with_path_value("tenant", "acme")
            .with_query(QueryEntry::new("format", ["json"]))
            .with_query(QueryEntry::new("pretty", Vec::<String>::new()));

        let url = config.to_builder().unwrap().build().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/acme?format=json&pretty"
        );
    }

    #[test]
    fn test_endpoint_config_immutable_builder() {
        let config = EndpointConfig::new("http://test.de")
            .unwrap()
            .with_query(QueryEntry::new("a", ["1", "2"]));

        let base = config.to_immutable_builder().unwrap();
        let derived = base.add_path("items");

        assert_eq!(base.build().unwrap().as_str(), "http://test.de/?a=1&a=2");
        assert_eq!(derived.build().unwrap().as_str(), "http://test.de/items?a=1&a=2");
    }

    #[test]
    fn test_endpoint_config_parse_base_url() {
        let config = EndpointConfig::new("https://api.example.com:8443").unwrap();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("api.example.com"));
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn test_endpoint_config_unsupported_scheme() {
        let config = EndpointConfig::new("ftp://files.example.com").unwrap();
        assert_eq!(
            config.to_builder().unwrap_err(),
            Error::UnsupportedScheme("ftp".to_string())
        );
    }

    #[test]
    fn test_endpoint_config_empty_query_key() {
        let config = EndpointConfig::new("https://api.example.com")
            .unwrap()
            .with_query(QueryEntry::new("", ["x"]));

        assert!(matches!(
            config.validate_config(),
            Err(Error::ConfigError(_))
        ));
        assert!(config.to_immutable_builder().is_err());
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: EndpointConfig =
            serde_json::from_str(r#"{"base_url": "https://api.example.com"}"#).unwrap();

        assert!(config.path_values.is_empty());
        assert!(config.query.is_empty());
        assert!(config.validate_config().is_ok());
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{
            "base_url": "https://api.example.com/users/{id}",
            "path_values": {"id": "42"},
            "query": [
                {"key": "fields", "values": ["name", "mail"]},
                {"key": "verbose"}
            ]
        }"#;

        let config: EndpointConfig = serde_json::from_str(json).unwrap();
        let url = config.to_builder().unwrap().build().unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/users/42?fields=name&fields=mail&verbose"
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = EndpointConfig::new("https://api.example.com")
            .unwrap()
            .with_path_value("id", "1")
            .with_query(QueryEntry::new("a", ["b"]));

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EndpointConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_serialization_skips_empty() {
        let config = EndpointConfig::new("https://api.example.com").unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("path_values"));
        assert!(!json.contains("query"));
    }
}
