use std::time::Duration;
use thiserror::Error;

use crate::model::resource::{CategoryResultDto, FetchErrorKind};

/// Failure of a single upstream resource fetch.
///
/// Fetchers translate every way a request can go wrong into one of these variants
/// so the aggregator can decide whether serving an expired cache entry is
/// acceptable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The upstream did not answer within the fetcher's time bound.
    #[error("Upstream request timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream answered with a non-success status other than 404.
    ///
    /// A 429 means the route is rate limited; callers back off by serving stale data.
    #[error("Upstream responded with status {status}")]
    Upstream {
        /// HTTP status returned by the upstream
        status: u16,
    },

    /// The requested scope does not exist upstream.
    #[error("Resource not found upstream")]
    NotFound,

    /// The request never produced a response (connection refused, reset, TLS...).
    #[error("Failed to reach upstream: {0}")]
    Transport(String),

    /// The upstream answered successfully with a body that could not be decoded.
    #[error("Failed to decode upstream payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether an expired cache entry may be served in place of this failure.
    ///
    /// A missing resource stays missing no matter how old the cached copy is, so
    /// `NotFound` is the only failure that never falls back.
    pub fn allows_stale(&self) -> bool {
        !matches!(self, FetchError::NotFound)
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Timeout(_) => FetchErrorKind::Timeout,
            FetchError::Upstream { .. } => FetchErrorKind::Upstream,
            FetchError::NotFound => FetchErrorKind::NotFound,
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::Decode(_) => FetchErrorKind::Decode,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Upstream { status } => Some(*status),
            FetchError::NotFound => Some(404),
            _ => None,
        }
    }

    pub fn into_dto(self) -> CategoryResultDto {
        CategoryResultDto::Error {
            error: self.kind(),
            http_status: self.status(),
            message: self.to_string(),
        }
    }
}

/// Maps an unsuccessful reqwest error to a fetch error.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::from_status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl FetchError {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => FetchError::NotFound,
            status => FetchError::Upstream { status },
        }
    }
}
