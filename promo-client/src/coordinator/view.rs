//! What the UI shows for the current cart

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::evaluation::{AppliedCampaignSummary, EvaluateResponse, EvaluatedLine, EvaluationResult};

/// Trust level of the displayed totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Local evaluation, not yet confirmed
    Preview,
    /// Values come from the authoritative service
    Authoritative { evaluated_at: DateTime<Utc> },
    /// The remote check failed or timed out; values are the local preview
    Unverified { reason: String },
}

/// Snapshot published to subscribers for one cart version
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatedView {
    /// Cart version the values belong to
    pub version: u64,
    pub status: VerificationStatus,
    pub cart_total: Decimal,
    pub points_earned: u64,
    pub applied_campaigns: Vec<AppliedCampaignSummary>,
    /// Per-line detail from the local evaluation
    pub lines: Vec<EvaluatedLine>,
}

impl CoordinatedView {
    /// Empty cart before the first update
    pub fn empty() -> Self {
        Self {
            version: 0,
            status: VerificationStatus::Preview,
            cart_total: Decimal::ZERO,
            points_earned: 0,
            applied_campaigns: vec![],
            lines: vec![],
        }
    }

    /// Preview built from a local evaluation
    pub fn preview(version: u64, result: EvaluationResult) -> Self {
        Self {
            version,
            status: VerificationStatus::Preview,
            cart_total: result.cart_total,
            points_earned: result.points.total,
            applied_campaigns: result.applied_campaigns,
            lines: result.lines,
        }
    }

    /// Replace the totals with the authoritative response, unconditionally
    pub fn authoritative(mut self, response: EvaluateResponse) -> Self {
        self.status = VerificationStatus::Authoritative {
            evaluated_at: response.evaluated_at,
        };
        self.cart_total = response.cart_total;
        self.points_earned = response.points_earned;
        self.applied_campaigns = response.applied_campaigns;
        self
    }

    /// Keep the preview values, flagged as not verified
    pub fn unverified(mut self, reason: impl Into<String>) -> Self {
        self.status = VerificationStatus::Unverified {
            reason: reason.into(),
        };
        self
    }

    pub fn is_authoritative(&self) -> bool {
        matches!(self.status, VerificationStatus::Authoritative { .. })
    }

    pub fn is_preview(&self) -> bool {
        self.status == VerificationStatus::Preview
    }

    pub fn is_unverified(&self) -> bool {
        matches!(self.status, VerificationStatus::Unverified { .. })
    }
}

impl Default for CoordinatedView {
    fn default() -> Self {
        Self::empty()
    }
}
