//! Evaluation result and loyalty breakdown

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::evaluated_line::EvaluatedLine;
use super::wire::AppliedCampaignSummary;
use crate::models::loyalty_rule::LoyaltyScope;

/// Which policy a line accrued under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AccrualSource {
    #[serde(rename_all = "camelCase")]
    Rule { rule_id: String, scope: LoyaltyScope },
    #[serde(rename_all = "camelCase")]
    Campaign { campaign_id: String },
    NoPolicy,
}

/// Points earned by one line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinePoints {
    pub line_id: String,
    pub points: u64,
    pub source: AccrualSource,
    /// The policy applied but excluded this line (promo / fully discounted)
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyBreakdown {
    pub total: u64,
    pub per_line: Vec<LinePoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NaiveDate>,
}

/// Output of one evaluation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub lines: Vec<EvaluatedLine>,
    /// Campaigns that reduced at least one line, in application order
    pub applied_promo_names: Vec<String>,
    /// Every campaign that targeted a line, in application order
    #[serde(default)]
    pub applied_campaigns: Vec<AppliedCampaignSummary>,
    /// Pre-discount total
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub cart_total: Decimal,
    pub points: LoyaltyBreakdown,
}
