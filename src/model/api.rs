use serde::{Deserialize, Serialize};

/// Error body returned by every API endpoint on failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ErrorDto {
    pub error: String,
}
