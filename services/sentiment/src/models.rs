//! Commit search data models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque cursor marking where the next page of results resumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmark(String);

impl Bookmark {
    /// Wrap a cursor string returned by the server.
    pub fn new<S: Into<String>>(cursor: S) -> Self {
        Self(cursor.into())
    }

    /// The cursor as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Bookmark {
    fn from(cursor: String) -> Self {
        Self(cursor)
    }
}

impl From<&str> for Bookmark {
    fn from(cursor: &str) -> Self {
        Self(cursor.to_owned())
    }
}

impl AsRef<str> for Bookmark {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One page of commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCommitResponse {
    /// Commits in the order the server returned them.
    pub commits: Vec<Commit>,

    /// Cursor for the next page; `None` when this is the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<Bookmark>,
}

impl SearchCommitResponse {
    /// Whether the server reported another page after this one.
    pub fn has_next(&self) -> bool {
        self.bookmark.is_some()
    }
}

/// A commit with its sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// The SHA of the commit.
    pub sha: String,

    /// Link to the commit.
    pub url: String,

    /// The commit message.
    pub message: String,

    /// The author of the commit.
    pub author: Author,

    /// Commit timestamp, exactly as the server formatted it.
    pub time: String,

    /// Sentiment of the commit message.
    pub sentiment: Sentiment,
}

/// The author of a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Author login
    pub username: String,
    /// Author avatar image
    pub avatar_url: String,
}

/// A sentiment score and the model which produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Typically -1.0 (negative) to 1.0 (positive). Not range checked.
    pub score: f64,
    /// Name of the model used for evaluation
    pub model: String,
}
