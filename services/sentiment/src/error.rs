//! Errors for commit search and its configuration.

use api_client::HttpResponseError;
use thiserror::Error;

/// Errors returned by [`CommitSearchClient`](crate::CommitSearchClient).
#[derive(Debug, Error)]
pub enum CommitSearchError {
    /// The server answered with a status other than `200 OK`.
    #[error(transparent)]
    Status(#[from] HttpResponseError),

    /// The transport failed, passed through as-is.
    #[error(transparent)]
    Transport(hyperdriver::client::Error),

    /// The request could not be built.
    #[error("Request: {0}")]
    Request(#[source] api_client::Error),

    /// The response body could not be read.
    #[error("Receiving body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A `200 OK` body did not match the expected shape.
    #[error("Decoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CommitSearchError {
    /// The HTTP status, when the server answered with an unexpected one.
    pub fn status(&self) -> Option<http::StatusCode> {
        match self {
            CommitSearchError::Status(error) => Some(error.status()),
            _ => None,
        }
    }
}

impl From<api_client::Error> for CommitSearchError {
    fn from(error: api_client::Error) -> Self {
        match error {
            api_client::Error::Request(error) => CommitSearchError::Transport(error),
            api_client::Error::Response(error) => CommitSearchError::Status(error),
            api_client::Error::ResponseBody(error) => CommitSearchError::Body(error),
            error => CommitSearchError::Request(error),
        }
    }
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    /// The server address is not a usable base URL.
    #[error("Server address: {0}")]
    Uri(#[from] api_client::uri::ParseUriError),
}
