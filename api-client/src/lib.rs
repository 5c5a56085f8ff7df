//! A small client for JSON APIs served over HTTP / HTTPS.
//!
//! [`ApiClient`] holds a base URI and the tower service used to carry requests.
//! Service crates wrap it to expose typed endpoints.

use std::sync::Arc;

use http::Method;
use http::Uri;
use hyperdriver::client::SharedClientService;
use hyperdriver::service::SharedService;
use hyperdriver::Body;
use tower::ServiceExt;

mod error;
pub mod mock;
pub mod request;
pub mod response;
pub mod uri;

pub use self::error::{Error, HttpResponseError};
pub use self::request::RequestBuilder;
pub use self::response::Response;
use self::uri::UriExtension as _;

/// Build the default transport: a TCP client speaking HTTP/1.1 or HTTP/2, with TLS.
pub fn transport() -> SharedClientService<Body, Body> {
    hyperdriver::Client::build_tcp_http()
        .with_default_tls()
        .build_service()
}

/// A client for accessing APIs over HTTP / HTTPS
///
/// Clones share the same transport, so a single client can serve many
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Arc<Uri>,
    inner: SharedClientService<Body, Body>,
}

impl ApiClient {
    /// Create a new API Client from a base URL, using the default transport.
    pub fn new(base: Uri) -> Self {
        Self::new_with_inner_service(base, transport())
    }

    /// Create a new API Client which sends requests through `inner`.
    pub fn new_with_inner_service<S>(base: Uri, inner: S) -> Self
    where
        S: tower::Service<
                http::Request<hyperdriver::Body>,
                Response = http::Response<hyperdriver::Body>,
                Error = hyperdriver::client::Error,
            > + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        let service = tower::ServiceBuilder::new()
            .layer(SharedService::layer())
            .service(inner);

        ApiClient {
            base: Arc::new(base),
            inner: service,
        }
    }

    /// The URI for an endpoint relative to the base.
    pub fn endpoint(&self, endpoint: &str) -> Uri {
        (*self.base).clone().join(endpoint)
    }

    /// Start a GET request against an endpoint.
    pub fn get(&self, endpoint: &str) -> RequestBuilder {
        RequestBuilder::new(self.clone(), self.endpoint(endpoint), Method::GET)
    }

    /// Send a request through the transport, without inspecting the response status.
    pub async fn execute(&self, req: http::Request<hyperdriver::Body>) -> Result<Response, Error> {
        let (parts, body) = req.into_parts();
        let request = Response::request_parts(&parts);
        let req = http::Request::from_parts(parts, body);

        tracing::trace!(method = %req.method(), uri = %req.uri(), "Sending request");
        let response = self.inner.clone().oneshot(req).await?;
        Ok(Response::new(request, response))
    }
}
