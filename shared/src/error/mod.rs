//! Unified error system
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error body returned by the HTTP service
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Campaign configuration errors
//! - 2xxx: Cart errors
//! - 3xxx: Evaluation errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::InvalidQuantity, "quantity must be positive")
//!     .with_detail("line_id", "l1");
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 2002);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
