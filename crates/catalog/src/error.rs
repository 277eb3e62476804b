//! Error types for the catalog client.

use thiserror::Error;

/// Result type alias for catalog operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Message used when a fetch succeeds but yields no usable records.
pub const NO_TOILETS_FOUND: &str = "no toilets found";

/// Failures while fetching the toilet catalog.
///
/// Every failure is terminal for the current fetch cycle; the client
/// performs no automatic retries. A user-triggered refresh is the retry
/// mechanism.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure reaching the backend
    #[error("network error: {0}")]
    Network(String),

    /// The backend responded but returned no usable records
    #[error("data error: {0}")]
    Data(String),

    /// Anything not classified above
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Classify a reqwest error.
    #[must_use]
    pub fn from_request(err: &reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            Self::Network(err.to_string())
        } else if err.is_decode() {
            Self::Data(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }

    /// The "fetched but empty" classification.
    #[must_use]
    pub fn no_results() -> Self {
        Self::Data(NO_TOILETS_FOUND.to_string())
    }

    /// True for transport-level failures.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// True when the backend responded but the result set was unusable.
    #[must_use]
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }
}
