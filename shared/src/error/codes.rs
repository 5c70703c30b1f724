//! Unified error codes for the promotions engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Campaign configuration errors
//! - 2xxx: Cart errors
//! - 3xxx: Evaluation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Campaign ====================
    /// Campaign failed validation
    InvalidCampaign = 1001,
    /// Campaign id used twice
    DuplicateCampaign = 1002,
    /// Loyalty rule failed validation
    InvalidLoyaltyRule = 1003,
    /// Product group failed validation
    InvalidProductGroup = 1004,

    // ==================== 2xxx: Cart ====================
    /// Line price is negative
    InvalidPrice = 2001,
    /// Line quantity is zero
    InvalidQuantity = 2002,
    /// Line id is empty
    InvalidLineId = 2003,

    // ==================== 3xxx: Evaluation ====================
    /// Authoritative service unreachable or failed
    RemoteUnavailable = 3001,
    /// Authoritative service did not answer in time
    RemoteTimeout = 3002,
    /// Authoritative service returned an unreadable body
    RemoteMalformed = 3003,

    // ==================== 9xxx: System ====================
    /// Configuration document could not be read
    ConfigLoadFailed = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Campaign
            ErrorCode::InvalidCampaign => "Campaign is invalid",
            ErrorCode::DuplicateCampaign => "Campaign id is already in use",
            ErrorCode::InvalidLoyaltyRule => "Loyalty rule is invalid",
            ErrorCode::InvalidProductGroup => "Product group is invalid",

            // Cart
            ErrorCode::InvalidPrice => "Line price must be non-negative",
            ErrorCode::InvalidQuantity => "Line quantity must be at least 1",
            ErrorCode::InvalidLineId => "Line id must not be empty",

            // Evaluation
            ErrorCode::RemoteUnavailable => "Authoritative evaluation failed",
            ErrorCode::RemoteTimeout => "Authoritative evaluation timed out",
            ErrorCode::RemoteMalformed => "Authoritative evaluation returned a malformed body",

            // System
            ErrorCode::ConfigLoadFailed => "Campaign configuration could not be loaded",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Campaign
            1001 => Ok(ErrorCode::InvalidCampaign),
            1002 => Ok(ErrorCode::DuplicateCampaign),
            1003 => Ok(ErrorCode::InvalidLoyaltyRule),
            1004 => Ok(ErrorCode::InvalidProductGroup),

            // Cart
            2001 => Ok(ErrorCode::InvalidPrice),
            2002 => Ok(ErrorCode::InvalidQuantity),
            2003 => Ok(ErrorCode::InvalidLineId),

            // Evaluation
            3001 => Ok(ErrorCode::RemoteUnavailable),
            3002 => Ok(ErrorCode::RemoteTimeout),
            3003 => Ok(ErrorCode::RemoteMalformed),

            // System
            9002 => Ok(ErrorCode::ConfigLoadFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);
        assert_eq!(ErrorCode::InvalidCampaign.code(), 1001);
        assert_eq!(ErrorCode::InvalidQuantity.code(), 2002);
        assert_eq!(ErrorCode::RemoteTimeout.code(), 3002);
        assert_eq!(ErrorCode::ConfigLoadFailed.code(), 9002);
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_roundtrip() {
        for code in [
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::DuplicateCampaign,
            ErrorCode::InvalidPrice,
            ErrorCode::RemoteMalformed,
            ErrorCode::ConfigLoadFailed,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::InvalidPrice).unwrap();
        assert_eq!(json, "2001");
        let code: ErrorCode = serde_json::from_str("3001").unwrap();
        assert_eq!(code, ErrorCode::RemoteUnavailable);
        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }
}
