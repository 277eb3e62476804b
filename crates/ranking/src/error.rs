//! Error types for the ranking pipeline and feed lifecycle.

use thiserror::Error;
use wclook_catalog::FetchError;

/// Failures of a ranking pass.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingError {
    /// No current position could be resolved.
    ///
    /// Recoverable: the user granting permission or the device acquiring
    /// a fix makes the next pass succeed. The pipeline never falls back
    /// to a stale or default position.
    #[error("unable to get user location")]
    LocationUnavailable,
}

/// Classification of a failed fetch/rank cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No device position could be resolved
    LocationUnavailable,
    /// Transport-level failure reaching the catalog
    Network,
    /// The catalog responded but yielded no usable records
    NoResults,
    /// Anything else
    Unknown,
}

/// A failed cycle as held by the `Failed` lifecycle state: an error
/// classification plus a human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FeedFailure {
    /// What went wrong
    pub kind: FailureKind,
    /// Message suitable for direct display
    pub message: String,
}

impl From<RankingError> for FeedFailure {
    fn from(err: RankingError) -> Self {
        Self {
            kind: FailureKind::LocationUnavailable,
            message: err.to_string(),
        }
    }
}

impl From<FetchError> for FeedFailure {
    fn from(err: FetchError) -> Self {
        let kind = match err {
            FetchError::Network(_) => FailureKind::Network,
            FetchError::Data(_) => FailureKind::NoResults,
            FetchError::Unknown(_) => FailureKind::Unknown,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}
