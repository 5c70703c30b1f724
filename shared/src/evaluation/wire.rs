//! Remote evaluation request/response (`POST /evaluate`)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::EvaluationResult;
use crate::models::cart::CartLine;

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluateRequest {
    pub cart: Vec<CartLine>,
}

/// Outcome of a campaign in one evaluation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppliedStatus {
    /// Reduced at least one line
    Applied,
    /// Targeted lines but every one kept a better discount
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppliedCampaignSummary {
    pub id: String,
    pub name: String,
    pub status: AppliedStatus,
}

/// Response body of the authoritative service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub cart_total: Decimal,
    pub points_earned: u64,
    pub applied_campaigns: Vec<AppliedCampaignSummary>,
    /// ISO-8601
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluateResponse {
    pub fn from_result(result: &EvaluationResult, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            cart_total: result.cart_total,
            points_earned: result.points.total,
            applied_campaigns: result.applied_campaigns.clone(),
            evaluated_at,
        }
    }
}
