//! Evaluation output types
//!
//! Produced by the engine's evaluator and loyalty calculator, and exchanged
//! with the authoritative service over `POST /evaluate`.

pub mod applied_campaign;
pub mod evaluated_line;
pub mod result;
pub mod wire;

pub use applied_campaign::{AppliedCampaign, promo_label};
pub use evaluated_line::EvaluatedLine;
pub use result::{AccrualSource, EvaluationResult, LinePoints, LoyaltyBreakdown};
pub use wire::{AppliedCampaignSummary, AppliedStatus, EvaluateRequest, EvaluateResponse};
