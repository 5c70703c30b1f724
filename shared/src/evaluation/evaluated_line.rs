//! Evaluated Line - a cart line annotated with promotion results

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::applied_campaign::AppliedCampaign;
use crate::models::campaign::CampaignType;
use crate::models::cart::CartLine;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedLine {
    #[serde(flatten)]
    pub line: CartLine,
    /// Per-unit discount, always within `0..=price`
    pub discount: Decimal,
    /// Labels of campaigns that currently reduce this line
    #[serde(default)]
    pub promo_labels: Vec<String>,
    /// Every campaign that targeted this line during the pass
    #[serde(default)]
    pub applied_campaign_ids: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_campaigns: Vec<AppliedCampaign>,
}

impl EvaluatedLine {
    pub fn from_line(line: CartLine) -> Self {
        Self {
            line,
            discount: Decimal::ZERO,
            promo_labels: vec![],
            applied_campaign_ids: BTreeSet::new(),
            applied_campaigns: vec![],
        }
    }

    pub fn id(&self) -> &str {
        &self.line.id
    }

    pub fn price(&self) -> Decimal {
        self.line.price
    }

    /// Unit price after promotions
    pub fn effective_price(&self) -> Decimal {
        (self.line.price - self.discount).max(Decimal::ZERO)
    }

    /// Effective price * quantity
    pub fn line_total(&self) -> Decimal {
        self.effective_price() * Decimal::from(self.line.quantity)
    }

    pub fn discount_total(&self) -> Decimal {
        self.discount * Decimal::from(self.line.quantity)
    }

    pub fn is_discounted(&self) -> bool {
        self.discount > Decimal::ZERO
    }

    /// Free or nearly so: the whole price is discounted, or a promotion
    /// left it at or below the nominal price.
    pub fn is_fully_discounted(&self, nominal_price: Decimal) -> bool {
        self.discount >= self.line.price
            || (self.is_discounted() && self.effective_price() <= nominal_price)
    }

    /// Whether `campaign_id` already targeted this line
    pub fn is_marked_by(&self, campaign_id: &str) -> bool {
        self.applied_campaign_ids.contains(campaign_id)
    }

    /// Whether a campaign of the given type already targeted this line
    pub fn is_marked_by_type(&self, campaign_type: CampaignType) -> bool {
        self.applied_campaigns
            .iter()
            .any(|a| a.campaign_type == campaign_type)
    }
}
