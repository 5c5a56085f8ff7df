//! URI utilities.

use camino::Utf8Path;
use http::uri::PathAndQuery;
use http::Uri;
use thiserror::Error;
use url::Url;

/// The provided URL cannot be a base URL,
/// and so is not valid as the base part of an API URL.
#[derive(Debug, Error)]
#[error("cannot be a base URL: {0}")]
pub struct CannotBeABase(url::Url);

/// Errors that can occur when parsing a URI.
#[derive(Debug, Error)]
pub enum ParseUriError {
    /// An error occurred while parsing the URI.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// The provided URL cannot be a base URL,
    #[error(transparent)]
    CannotBeABase(#[from] CannotBeABase),

    /// The URI is invalid, but URL parsing succeded.
    #[error("invalid URI: {0}")]
    Invalid(http::uri::InvalidUri),
}

/// Convert a value into a URI.
pub trait IntoUri {
    /// Convert the value into a URI.
    fn into_uri(self) -> Result<Uri, ParseUriError>;
}

impl IntoUri for Url {
    fn into_uri(self) -> Result<Uri, ParseUriError> {
        if self.cannot_be_a_base() {
            return Err(CannotBeABase(self).into());
        }

        self.as_str().parse().map_err(ParseUriError::Invalid)
    }
}

impl IntoUri for Uri {
    fn into_uri(self) -> Result<Uri, ParseUriError> {
        Ok(self)
    }
}

impl IntoUri for &str {
    fn into_uri(self) -> Result<Uri, ParseUriError> {
        let url: Url = self.parse()?;
        url.into_uri()
    }
}

/// Serialize and Deserialize a URI to and from a string.
pub mod serde {
    use http::Uri;
    use serde::{Deserialize as _, Deserializer};

    use super::IntoUri as _;

    /// Deserialize a base URI from a string, rejecting URLs that cannot be a base.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Uri, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.as_str().into_uri().map_err(serde::de::Error::custom)
    }

    /// Serialize a URI as a string
    pub fn serialize<S>(uri: &Uri, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(uri)
    }
}

/// Extension trait for URIs.
pub trait UriExtension {
    /// Join a path to a URI. Any query on the original URI is dropped.
    fn join<P: AsRef<str>>(self, path: P) -> Uri;

    /// Replace the whole query string of a URI. An empty query removes it.
    fn with_query(self, query: &str) -> Uri;
}

impl UriExtension for Uri {
    fn join<P: AsRef<str>>(self, path: P) -> Uri {
        let mut parts = self.into_parts();

        let base = parts
            .path_and_query
            .as_ref()
            .map(|pq| pq.path())
            .unwrap_or("/");
        let joined = Utf8Path::new(base).join(path.as_ref());
        parts.path_and_query = Some(
            PathAndQuery::from_maybe_shared(joined.to_string()).expect("joined path is valid"),
        );

        Uri::from_parts(parts).expect("joined URI is valid")
    }

    fn with_query(self, query: &str) -> Uri {
        let mut parts = self.into_parts();

        let path = parts
            .path_and_query
            .as_ref()
            .map(|pq| pq.path())
            .unwrap_or("/");
        let pq = if query.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{query}")
        };
        parts.path_and_query =
            Some(PathAndQuery::from_maybe_shared(pq).expect("encoded query is valid"));

        Uri::from_parts(parts).expect("URI with query is valid")
    }
}
