//! Query parameters and the ordered, multi-valued collection holding them.
//!
//! A [`QueryParameterCollection`] groups parameters by key. Keys keep the order in which they
//! were first seen and every key keeps its values in the order they were added, so
//! `a=1&b=2&a=3` renders back as `a=1&a=3&b=2`.

use std::fmt;

/// A single query parameter: a key with an optional value.
///
/// The rendered form is kept verbatim, so a parameter parsed from a raw token always renders
/// back to exactly that token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    key: String,
    value: Option<String>,
    raw: String,
}

impl QueryParameter {
    /// Parses a raw `key=value` or bare `key` token.
    ///
    /// The token is split on the first `=`. The value is taken from after that `=` up to, but
    /// not including, the last character of the token, so `a=big` yields the value `bi`. The
    /// rendered form is unaffected and stays `a=big`.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let Some(split) = raw.find('=') else {
            return Self {
                key: raw.clone(),
                value: None,
                raw,
            };
        };

        // byte offset of the last character; '=' is ASCII so split + 1 is a char boundary
        let end = raw.char_indices().last().map_or(0, |(idx, _)| idx);
        let start = (split + 1).min(end);

        Self {
            key: raw[..split].to_string(),
            value: Some(raw[start..end].to_string()),
            raw,
        }
    }

    /// Creates a `key=value` parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        Self {
            raw: format!("{key}={value}"),
            key,
            value: Some(value),
        }
    }

    /// Creates a parameter that consists of the key alone.
    #[must_use]
    pub fn bare(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            raw: key.clone(),
            key,
            value: None,
        }
    }

    /// Key of the parameter.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value of the parameter, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Renders the parameter as `key` or `key=value` (unencoded).
    #[must_use]
    pub fn render(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for QueryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Ordered multi-map from key to the parameters sharing that key.
///
/// Parameters are only ever added. Cloning produces an independent deep copy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParameterCollection {
    groups: Vec<(String, Vec<QueryParameter>)>,
}

impl QueryParameterCollection {
    /// Create a new, empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Builds a collection from a raw query string (without the leading `?`).
    ///
    /// The string is exploded on `&` and each token parsed with [`QueryParameter::parse`]. An
    /// empty string yields an empty collection.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        if query.is_empty() {
            return Self::new();
        }
        query.split('&').map(QueryParameter::parse).collect()
    }

    /// Appends a parameter to the group for its key, creating the group on first sight.
    pub fn add(&mut self, parameter: QueryParameter) {
        match self
            .groups
            .iter()
            .position(|(key, _)| *key == parameter.key)
        {
            Some(index) => self.groups[index].1.push(parameter),
            None => self.groups.push((parameter.key.clone(), vec![parameter])),
        }
    }

    /// Adds every parameter in iteration order.
    pub fn add_range<I>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = QueryParameter>,
    {
        for parameter in parameters {
            self.add(parameter);
        }
    }

    /// Iterates all parameters, grouped by first-seen key then in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryParameter> + '_ {
        self.groups.iter().flat_map(|(_, parameters)| parameters.iter())
    }

    /// Number of parameters across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, parameters)| parameters.len()).sum()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Renders every parameter joined with `&`, e.g. `a=1&a=2&b=3`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(QueryParameter::render)
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for QueryParameterCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl Extend<QueryParameter> for QueryParameterCollection {
    fn extend<I: IntoIterator<Item = QueryParameter>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl FromIterator<QueryParameter> for QueryParameterCollection {
    fn from_iter<I: IntoIterator<Item = QueryParameter>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.add_range(iter);
        collection
    }
}
