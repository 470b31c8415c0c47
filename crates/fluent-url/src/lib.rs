//! # fluent-url
//!
//! Fluent builders for composing `http`/`https` URLs without manual string concatenation.
//!
//! A builder is seeded from an existing URL, then scheme, host, port, path segments (with
//! `{name}` placeholders) and multi-valued query parameters are adjusted before the result is
//! rendered into a [`url::Url`].
//!
//! Two variants share one operation set ([`UrlBuilding`]):
//!
//! - [`UrlBuilder`] mutates in place and hands back `&mut Self` for chaining.
//! - [`ImmutableUrlBuilder`] leaves the receiver untouched and returns a fresh builder.
//!
//! ```
//! use fluent_url::{UrlBuilder, UrlBuilding, UrlComponents};
//!
//! let mut builder = UrlBuilder::parse("https://api.example.com/v1?format=json")?;
//! let url = builder
//!     .add_path("users/{id}")
//!     .with_path_value("id", "42")
//!     .add_query("fields", ["name", "mail"])
//!     .build()?;
//!
//! assert_eq!(
//!     url.as_str(),
//!     "https://api.example.com/v1/users/42?format=json&fields=name&fields=mail"
//! );
//! # Ok::<(), fluent_url::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error type and error codes
//! - [`query`] - Query parameters and the ordered multi-valued collection
//! - [`path`] - Path splitting, placeholder substitution and path templates
//! - [`host`] - Host name and IP literal validation
//! - [`scheme`] - Supported URL schemes
//! - [`parts`] - Builder state and rendering
//! - [`builder`] - Builder contract and its two implementations
//! - [`config`] - Serializable endpoint configuration

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod config;
pub mod error;
pub mod host;
pub mod parts;
pub mod path;
pub mod query;
pub mod scheme;

// Re-export commonly used types
pub use builder::{ImmutableUrlBuilder, UrlBuilder, UrlBuilding, UrlComponents};
pub use config::{EndpointConfig, QueryEntry};
pub use error::{Error, Result};
pub use parts::{render, UrlParts};
pub use path::{split_path, substitute, PathSegments, PathTemplate};
pub use query::{QueryParameter, QueryParameterCollection};
pub use scheme::Scheme;
