//! Path segments with `{name}` placeholders.
//!
//! Paths are kept as a list of segments plus a table of placeholder values. Placeholders are
//! only resolved when a URL is rendered, so values may be bound before or after the segments
//! referencing them are added.

use std::collections::HashMap;
use std::iter::FusedIterator;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::error::{Error, Result};

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{(\w+)\}").expect("placeholder pattern is a valid regex");
}

/// Lazy iterator over the segments of a raw path, see [`split_path`].
#[derive(Debug, Clone)]
pub struct PathSegments<'a> {
    raw: &'a str,
    cursor: usize,
    done: bool,
}

/// Splits `raw` on `/` into segments.
///
/// A slash found directly at the cursor (a leading slash, or the second of two adjacent
/// slashes) produces nothing. Whatever follows the last slash is always produced, even when
/// empty, so a trailing slash yields an empty final segment:
///
/// ```
/// use fluent_url::split_path;
///
/// assert_eq!(split_path("/some/path").collect::<Vec<_>>(), ["some", "path"]);
/// assert_eq!(split_path("some/path/").collect::<Vec<_>>(), ["some", "path", ""]);
/// ```
#[must_use]
pub fn split_path(raw: &str) -> PathSegments<'_> {
    PathSegments {
        raw,
        cursor: 0,
        done: false,
    }
}

impl<'a> Iterator for PathSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let start = self.cursor;
            match self.raw[start..].find('/') {
                None => {
                    self.done = true;
                    return Some(&self.raw[start..]);
                }
                Some(0) => self.cursor = start + 1,
                Some(offset) => {
                    self.cursor = start + offset + 1;
                    return Some(&self.raw[start..start + offset]);
                }
            }
        }
        None
    }
}

impl FusedIterator for PathSegments<'_> {}

/// Replaces every `{name}` placeholder in `segment` with its bound value.
///
/// `%7B` and `%7D` are turned back into braces first, since segments taken from a parsed URL
/// arrive percent-encoded.
///
/// # Errors
///
/// Returns [`Error::UnresolvedPlaceholder`] for the first placeholder without a value.
pub fn substitute<S>(segment: &str, values: &HashMap<String, String, S>) -> Result<String>
where
    S: std::hash::BuildHasher,
{
    let segment = segment.replace("%7B", "{").replace("%7D", "}");

    let mut resolved = String::with_capacity(segment.len());
    let mut last = 0;
    for captures in PLACEHOLDER.captures_iter(&segment) {
        let (Some(token), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = values
            .get(name.as_str())
            .ok_or_else(|| Error::UnresolvedPlaceholder(name.as_str().to_string()))?;
        trace!(placeholder = name.as_str(), value = %value, "substituting path placeholder");

        resolved.push_str(&segment[last..token.start()]);
        resolved.push_str(value);
        last = token.end();
    }
    resolved.push_str(&segment[last..]);

    Ok(resolved)
}

/// Ordered path segments together with the values for their placeholders.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<String>,
    values: HashMap<String, String>,
}

impl PathTemplate {
    /// Creates an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a template from segments taken from a parsed URL.
    ///
    /// Trailing slashes are trimmed and empty segments dropped.
    #[must_use]
    pub fn from_segments<'a, I>(segments: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|segment| segment.trim_end_matches('/'))
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            values: HashMap::new(),
        }
    }

    /// Appends the segments of `path` as produced by [`split_path`].
    pub fn push_path(&mut self, path: &str) {
        self.segments.extend(split_path(path).map(str::to_string));
    }

    /// Binds `value` to the placeholder `key`, replacing an earlier binding.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Segments in order, placeholders unresolved.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Placeholder values.
    #[must_use]
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Substitutes every segment and joins them with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedPlaceholder`] if a segment references an unbound name.
    pub fn resolve(&self) -> Result<String> {
        let resolved = self
            .segments
            .iter()
            .map(|segment| substitute(segment, &self.values))
            .collect::<Result<Vec<_>>>()?;
        Ok(resolved.join("/"))
    }
}
