//! Errors reported by the posts store

use thiserror::Error;

/// Outcome of a failed read against the posts store.
///
/// Views branch on this value; it is never raised as a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network or remote-store failure, carrying the remote message
    #[error("{0}")]
    FetchFailed(String),

    /// A single-record query matched nothing
    #[error("post not found")]
    NotFound,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::FetchFailed(err.to_string())
    }
}
