//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 409 Conflict
            Self::DuplicateCampaign => StatusCode::CONFLICT,

            // 400 Bad Request
            Self::InvalidRequest
            | Self::InvalidFormat
            | Self::InvalidCampaign
            | Self::InvalidLoyaltyRule
            | Self::InvalidProductGroup
            | Self::InvalidPrice
            | Self::InvalidQuantity
            | Self::InvalidLineId => StatusCode::BAD_REQUEST,

            // 502 / 504 upstream
            Self::RemoteUnavailable | Self::RemoteMalformed => StatusCode::BAD_GATEWAY,
            Self::RemoteTimeout => StatusCode::GATEWAY_TIMEOUT,

            // 500 Internal Server Error
            Self::ConfigLoadFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
