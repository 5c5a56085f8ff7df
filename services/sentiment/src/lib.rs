//! Client for the commit sentiment search API.
//!
//! The server scores commit messages and serves them newest-first, one page at a
//! time. [`CommitSearchClient::get_commits`] fetches a single page; the
//! [`Bookmark`] on that page is the cursor for the next one.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use sentiment::CommitSearchClient;
//!
//! let client = CommitSearchClient::new("http://localhost:8080/".parse()?);
//! let page = client.get_commits(None, 30).await?;
//! for commit in &page.commits {
//!     println!("{} {:+.2} {}", commit.sha, commit.sentiment.score, commit.message);
//! }
//!
//! if let Some(bookmark) = &page.bookmark {
//!     let _next = client.get_commits(Some(bookmark), 30).await?;
//! }
//! # Ok(())
//! # }
//! ```

use api_client::{ApiClient, Response};
use http::header::{self, HeaderValue};
use http::{StatusCode, Uri};
use serde::Serialize;
use tower_http::set_header::SetRequestHeaderLayer;

mod config;
mod error;
pub mod models;

pub use crate::config::{CommitSearchConfiguration, SERVER_ENV};
pub use crate::error::{CommitSearchError, ConfigError};
pub use crate::models::{Author, Bookmark, Commit, SearchCommitResponse, Sentiment};

const COMMIT_ENDPOINT: &str = "api/v1/commit";
const HEALTH_ENDPOINT: &str = "health";
const JSON: &str = "application/json";

/// Page size the server falls back to when none is requested.
pub const DEFAULT_LIMIT: u32 = 30;

/// Query parameters for one page of commits.
///
/// `bookmark` is left off the wire entirely when there is none, so that the
/// first page and a resumed page are never confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitQuery<'a> {
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    bookmark: Option<&'a str>,
}

impl<'a> CommitQuery<'a> {
    /// Query for `limit` commits, resuming at `bookmark` when it is non-empty.
    pub fn new(bookmark: Option<&'a str>, limit: u32) -> Self {
        Self {
            limit,
            bookmark: bookmark.filter(|cursor| !cursor.is_empty()),
        }
    }

    /// Requested page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Cursor to resume at, if any.
    pub fn bookmark(&self) -> Option<&'a str> {
        self.bookmark
    }
}

/// Client for the commit search API.
///
/// Stateless: each call sends exactly one request. Clones share the transport,
/// and concurrent calls do not interfere with each other.
#[derive(Debug, Clone)]
pub struct CommitSearchClient {
    inner: ApiClient,
}

impl CommitSearchClient {
    /// Create a client for the server rooted at `server`.
    pub fn new(server: Uri) -> Self {
        Self::with_service(server, api_client::transport())
    }

    /// Create a client from a configuration.
    pub fn from_config(config: &CommitSearchConfiguration) -> Self {
        Self::new(config.server.clone())
    }

    /// Create a client which sends requests through `service`.
    ///
    /// Every request is marked `Content-Type: application/json` before it
    /// reaches `service`.
    pub fn with_service<S>(server: Uri, service: S) -> Self
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
            .layer(SetRequestHeaderLayer::overriding(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON),
            ))
            .service(service);

        Self {
            inner: ApiClient::new_with_inner_service(server, service),
        }
    }

    fn commits_request(
        &self,
        bookmark: Option<&Bookmark>,
        limit: u32,
    ) -> Result<http::Request<hyperdriver::Body>, CommitSearchError> {
        let query = CommitQuery::new(bookmark.map(Bookmark::as_str), limit);
        Ok(self.inner.get(COMMIT_ENDPOINT).query(&query)?.build()?)
    }

    /// Fetch one page of up to `limit` commits.
    ///
    /// Pass `None` for the first page, or the bookmark from the previous page to
    /// continue. Anything but `200 OK` is an error; the server decides what
    /// page sizes it accepts.
    #[tracing::instrument(skip(self))]
    pub async fn get_commits(
        &self,
        bookmark: Option<&Bookmark>,
        limit: u32,
    ) -> Result<SearchCommitResponse, CommitSearchError> {
        let request = self.commits_request(bookmark, limit)?;
        let response = expect_ok(self.inner.execute(request).await?)?;

        let body = response.bytes().await.map_err(CommitSearchError::Body)?;
        tracing::trace!(body = %String::from_utf8_lossy(&body), "Commit page body");

        let page: SearchCommitResponse = serde_json::from_slice(&body)?;
        tracing::debug!(
            commits = page.commits.len(),
            has_next = page.has_next(),
            "Fetched commit page"
        );
        Ok(page)
    }

    /// Check that the server is up.
    #[tracing::instrument(skip(self))]
    pub async fn health(&self) -> Result<(), CommitSearchError> {
        let response = self.inner.get(HEALTH_ENDPOINT).send().await?;
        expect_ok(response)?;
        Ok(())
    }
}

fn expect_ok(response: Response) -> Result<Response, CommitSearchError> {
    if response.status() != StatusCode::OK {
        tracing::error!(uri = %response.uri(), "Error response from commit search: {:?}", response.status());
    }

    Ok(response.expect_status(StatusCode::OK)?)
}
