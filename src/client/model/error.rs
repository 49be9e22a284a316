use thiserror::Error;

/// Failure of a call from the client to the guildboard API.
///
/// `status` is the HTTP status of the response, or 500 when no usable response was
/// received at all.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub status: u64,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u64, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
