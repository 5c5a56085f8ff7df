//! Request construction.

use http::header::HeaderValue;
use http::{HeaderMap, HeaderName, Method, Uri};
use hyperdriver::Body;
use serde::Serialize;

use crate::error::Error;
use crate::response::Response;
use crate::uri::UriExtension as _;
use crate::ApiClient;

/// Builder for a single request against an [`ApiClient`].
#[derive(Debug)]
pub struct RequestBuilder {
    client: ApiClient,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl RequestBuilder {
    /// Start a request with a method and a fully resolved URI.
    pub fn new(client: ApiClient, uri: Uri, method: Method) -> Self {
        Self {
            client,
            method,
            uri,
            headers: HeaderMap::new(),
        }
    }

    /// Set a header, replacing any previous value for the same name.
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Serialize `query` as `application/x-www-form-urlencoded` and use it as the query string.
    ///
    /// Fields which serialize to nothing (e.g. `None` with `skip_serializing_if`)
    /// do not appear at all.
    pub fn query<Q>(mut self, query: &Q) -> Result<Self, Error>
    where
        Q: Serialize + ?Sized,
    {
        let encoded = serde_urlencoded::to_string(query)?;
        self.uri = self.uri.with_query(&encoded);
        Ok(self)
    }

    /// Assemble the `http::Request`. Requests carry no body.
    pub fn build(self) -> Result<http::Request<Body>, Error> {
        Ok(self.split()?.1)
    }

    fn split(self) -> Result<(ApiClient, http::Request<Body>), Error> {
        let mut builder = http::Request::builder().method(self.method).uri(self.uri);
        if let Some(headers) = builder.headers_mut() {
            *headers = self.headers;
        }

        let req = builder.body(Body::empty())?;
        Ok((self.client, req))
    }

    /// Send the request, returning the response whatever its status.
    pub async fn send(self) -> Result<Response, Error> {
        let (client, req) = self.split()?;
        client.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::mock::MockService;

    #[derive(Serialize)]
    struct Page<'a> {
        limit: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        cursor: Option<&'a str>,
    }

    fn client() -> ApiClient {
        ApiClient::new_with_inner_service(
            "http://sentiment.test/api/".parse().unwrap(),
            MockService::new(),
        )
    }

    #[test]
    fn query_is_encoded_into_uri() {
        let req = client()
            .get("items")
            .query(&Page {
                limit: 5,
                cursor: Some("a b&c"),
            })
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(req.uri().path(), "/api/items");
        assert_eq!(req.uri().query(), Some("limit=5&cursor=a+b%26c"));
    }

    #[test]
    fn skipped_fields_are_left_out() {
        let req = client()
            .get("items")
            .query(&Page {
                limit: 5,
                cursor: None,
            })
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(req.uri().query(), Some("limit=5"));
    }

    #[test]
    fn headers_are_carried() {
        let req = client()
            .get("items")
            .header(
                http::header::ACCEPT,
                HeaderValue::from_static("application/json"),
            )
            .build()
            .unwrap();

        assert_eq!(
            req.headers().get(http::header::ACCEPT).unwrap(),
            "application/json"
        );
        assert_eq!(req.method(), &Method::GET);
    }

    #[tokio::test]
    async fn requests_have_an_empty_body() {
        use http_body_util::BodyExt as _;

        let req = client().get("items").build().unwrap();
        let body = req.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
