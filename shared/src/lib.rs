//! Shared types for the promotions engine
//!
//! Campaign model, cart snapshot, loyalty rules, product groups, evaluation
//! output and the remote evaluation wire format, plus the unified error codes.

pub mod error;
pub mod evaluation;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use evaluation::{EvaluatedLine, EvaluateRequest, EvaluateResponse, EvaluationResult};
pub use models::{Campaign, CampaignKind, CampaignSet, CartLine, CartSnapshot};
pub use serde::{Deserialize, Serialize};
