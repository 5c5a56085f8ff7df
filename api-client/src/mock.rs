//! A mock transport for exercising API clients without a network.
//!
//! Routes are matched on the full path and query first, then on the path alone.
//! Anything unmatched gets a `404` with a small JSON body.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};
use parking_lot::Mutex;

type MakeError = Arc<dyn Fn() -> hyperdriver::client::Error + Send + Sync>;

const NOT_FOUND_BODY: &[u8] = b"{\"message\":\"not found\"}\n";

#[derive(Clone)]
enum MockResponse {
    Reply {
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    },
    Fail(MakeError),
}

impl fmt::Debug for MockResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockResponse::Reply { status, .. } => {
                f.debug_struct("Reply").field("status", status).finish()
            }
            MockResponse::Fail(_) => f.debug_struct("Fail").finish(),
        }
    }
}

/// A request seen by a [`MockService`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: Method,
    /// Full request URI
    pub uri: Uri,
    /// Request headers, after every layer above the mock has run
    pub headers: HeaderMap,
}

/// A tower service which answers from a table of canned responses.
///
/// Clones share the same request log.
#[derive(Debug, Default, Clone)]
pub struct MockService {
    responses: HashMap<String, MockResponse>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    /// An empty mock: every request is answered with `404`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `route` with `status` and `body`.
    ///
    /// `route` is either a bare path (`/api/v1/commit`) or a path with a query
    /// (`/api/v1/commit?limit=2`).
    pub fn add(&mut self, route: &str, status: StatusCode, body: impl Into<Bytes>) {
        self.add_with_headers(route, status, HeaderMap::new(), body);
    }

    /// Answer requests for `route` with `status`, `headers` and `body`.
    pub fn add_with_headers(
        &mut self,
        route: &str,
        status: StatusCode,
        headers: HeaderMap,
        body: impl Into<Bytes>,
    ) {
        let response = MockResponse::Reply {
            status,
            headers,
            body: body.into(),
        };
        self.responses.insert(route.to_owned(), response);
    }

    /// Answer requests for `route` with a JSON body and `Content-Type: application/json`.
    ///
    /// Fails, leaving the routes untouched, if `value` cannot be serialized.
    pub fn add_json<T>(
        &mut self,
        route: &str,
        status: StatusCode,
        value: &T,
    ) -> serde_json::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        let body = serde_json::to_vec(value)?;
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        self.add_with_headers(route, status, headers, body);
        Ok(())
    }

    /// Fail requests for `route` at the transport level with the error built by `error`.
    pub fn fail<F>(&mut self, route: &str, error: F)
    where
        F: Fn() -> hyperdriver::client::Error + Send + Sync + 'static,
    {
        self.responses
            .insert(route.to_owned(), MockResponse::Fail(Arc::new(error)));
    }

    /// Every request seen so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    fn route(&self, uri: &Uri) -> Option<&MockResponse> {
        let exact = uri.path_and_query().map(|pq| pq.as_str());
        exact
            .and_then(|route| self.responses.get(route))
            .or_else(|| self.responses.get(uri.path()))
    }
}

impl tower::Service<http::Request<hyperdriver::Body>> for MockService {
    type Response = http::Response<hyperdriver::Body>;
    type Error = hyperdriver::client::Error;
    type Future = std::future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<hyperdriver::Body>) -> Self::Future {
        self.requests.lock().push(RecordedRequest {
            method: req.method().clone(),
            uri: req.uri().clone(),
            headers: req.headers().clone(),
        });

        let (status, headers, body) = match self.route(req.uri()) {
            Some(MockResponse::Reply {
                status,
                headers,
                body,
            }) => (*status, headers.clone(), body.clone()),
            Some(MockResponse::Fail(error)) => {
                tracing::trace!(uri = %req.uri(), "Mock transport failure");
                return std::future::ready(Err((error.as_ref())()));
            }
            None => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/json; charset=utf-8"),
                );
                (
                    StatusCode::NOT_FOUND,
                    headers,
                    Bytes::from_static(NOT_FOUND_BODY),
                )
            }
        };

        let mut response = http::Response::new(hyperdriver::Body::from(body));
        *response.status_mut() = status;
        *response.version_mut() = http::Version::HTTP_11;
        *response.headers_mut() = headers;

        std::future::ready(Ok(response))
    }
}

#[cfg(test)]
mod tests {
    use tower::ServiceExt as _;

    use super::*;

    fn get(uri: &str) -> http::Request<hyperdriver::Body> {
        http::Request::get(uri)
            .body(hyperdriver::Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn exact_query_routes_win_over_paths() {
        let mut mock = MockService::new();
        mock.add("/items", StatusCode::OK, "any page");
        mock.add("/items?page=2", StatusCode::ACCEPTED, "second page");

        let response = mock.clone().oneshot(get("/items?page=2")).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = mock.clone().oneshot(get("/items?page=3")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = mock.clone().oneshot(get("/other")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let seen = mock.requests();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].uri, "/items?page=2");
        assert_eq!(seen[2].method, Method::GET);
    }

    #[tokio::test]
    async fn json_routes_carry_content_type() {
        let mut mock = MockService::new();
        mock.add_json(
            "/items",
            StatusCode::OK,
            &serde_json::json!({ "items": [1, 2] }),
        )
        .unwrap();

        let response = mock.clone().oneshot(get("/items")).await.unwrap();
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn unserializable_json_is_rejected() {
        use std::collections::HashMap;

        // JSON object keys must be strings.
        let value: HashMap<Vec<u8>, u32> = HashMap::from([(vec![1], 1)]);

        let mut mock = MockService::new();
        assert!(mock.add_json("/items", StatusCode::OK, &value).is_err());
        assert!(mock.responses.is_empty());
    }

    #[tokio::test]
    async fn failures_are_injected() {
        let mut mock = MockService::new();
        mock.fail("/items", || hyperdriver::client::Error::RequestTimeout);

        let err = mock.oneshot(get("/items")).await.unwrap_err();
        assert!(matches!(err, hyperdriver::client::Error::RequestTimeout));
    }
}
