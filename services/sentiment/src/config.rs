//! Configuration for reaching the commit search server.

use api_client::uri::IntoUri as _;
use http::Uri;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable holding the server root URL.
pub const SERVER_ENV: &str = "COMMIT_SEARCH_SERVER";

/// Commit search API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSearchConfiguration {
    /// Root URL of the server. The API lives under `api/v1/` below it.
    #[serde(with = "api_client::uri::serde")]
    pub server: Uri,
}

impl CommitSearchConfiguration {
    /// Configuration pointing at `server`.
    pub fn new(server: Uri) -> Self {
        Self { server }
    }

    /// Read the configuration from `COMMIT_SEARCH_SERVER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server = std::env::var(SERVER_ENV).map_err(|_| ConfigError::Missing(SERVER_ENV))?;
        Self::parse(&server)
    }

    fn parse(server: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(server.into_uri()?))
    }
}
