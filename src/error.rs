//! Error types for a cache invalidation run.
//!
//! Every variant is fatal: the run stops at the first error and nothing is
//! retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvalidationError {
    /// The account's access group could not be discovered.
    #[error("error getting access group id: {0}")]
    Configuration(String),

    /// Transport failure, timeout, or an unexpected status from the API.
    #[error("remote call failed: {0}")]
    RemoteCall(String),

    /// The invalidation POST came back with something other than 200 OK.
    #[error("invalidation failed: API returned {status}")]
    InvalidationRejected { status: u16 },

    /// Input record could not be assembled from the chosen source.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<wreq::Error> for InvalidationError {
    fn from(err: wreq::Error) -> Self {
        if err.is_timeout() {
            Self::RemoteCall(format!("request timed out: {}", err))
        } else {
            Self::RemoteCall(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, InvalidationError>;
