//! Error types for API Clients

use http::StatusCode;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error occured while sending or recieving an HTTP request
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with an unexpected status
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// An error occured while recieving the response body
    #[error("Error reading response body: {0}")]
    ResponseBody(#[source] BoxError),

    /// An error occured while sending the request
    #[error(transparent)]
    Request(#[from] hyperdriver::client::Error),

    /// The request could not be assembled
    #[error("Building request: {0}")]
    Build(#[from] http::Error),

    /// Query parameters could not be URL-encoded
    #[error("Encoding query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

/// A server returned a status other than the one the caller expected.
///
/// The response body is left unread.
#[derive(Debug, Clone, Error)]
#[error("HTTP error! status: {}", .status.as_u16())]
pub struct HttpResponseError {
    status: StatusCode,
}

impl HttpResponseError {
    /// Create an error for an unexpected status.
    pub fn new(status: StatusCode) -> Self {
        Self { status }
    }

    /// The HTTP status code of the response
    pub fn status(&self) -> StatusCode {
        self.status
    }
}
