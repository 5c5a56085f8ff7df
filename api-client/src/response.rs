//! Response types for working with HTTP responses.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::BodyExt as _;
use hyperdriver::Body;

use crate::error::HttpResponseError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Wrapper around an HTTP response that keeps the parts of the request which produced it.
#[derive(Debug)]
pub struct Response {
    request: http::request::Parts,
    response: http::response::Parts,
    body: Body,
}

impl Response {
    /// Create a new `Response` instance.
    pub fn new(request: http::request::Parts, response: http::Response<Body>) -> Self {
        let (response, body) = response.into_parts();

        Self {
            request,
            response,
            body,
        }
    }

    /// Copy the method, URI, version and headers out of a request.
    pub(crate) fn request_parts(parts: &http::request::Parts) -> http::request::Parts {
        let mut request = http::Request::new(());
        *request.method_mut() = parts.method.clone();
        *request.uri_mut() = parts.uri.clone();
        *request.version_mut() = parts.version;
        *request.headers_mut() = parts.headers.clone();
        request.into_parts().0
    }

    /// Get the status code of the response.
    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// Get the headers of the response.
    pub fn headers(&self) -> &http::HeaderMap {
        &self.response.headers
    }

    /// Get the URI of the request that generated the response.
    pub fn uri(&self) -> &http::Uri {
        &self.request.uri
    }

    /// Fail with an [`HttpResponseError`] unless the response has exactly `expected` status.
    ///
    /// The body is dropped unread on failure.
    pub fn expect_status(self, expected: StatusCode) -> Result<Self, HttpResponseError> {
        if self.status() == expected {
            Ok(self)
        } else {
            Err(HttpResponseError::new(self.status()))
        }
    }

    /// Collect the response body.
    pub async fn bytes(self) -> Result<Bytes, BoxError> {
        let collected = self.body.collect().await.map_err(Into::<BoxError>::into)?;
        Ok(collected.to_bytes())
    }

    /// Collect the response body into a `String`.
    pub async fn text(self) -> Result<String, BoxError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(Into::into)
    }
}
