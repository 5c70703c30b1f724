//! Applied Campaign - tracks which campaigns touched a line

use crate::models::campaign::{Campaign, CampaignType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Applied campaign record on an evaluated line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCampaign {
    // === Campaign Identity ===
    pub campaign_id: String,
    pub name: String,
    pub campaign_type: CampaignType,

    // === Calculation Info ===
    /// Set price the campaign reduces the line to
    pub target_price: Decimal,
    /// Discount actually contributed to the line (per unit)
    pub calculated_amount: Decimal,
    /// Customer-facing label ("free", "reduced to 1.50", or the cart label)
    pub label: String,

    // === Control ===
    /// Lost to a better campaign under best-price stacking
    #[serde(default)]
    pub skipped: bool,
}

impl AppliedCampaign {
    /// Create from a campaign with its calculated amount
    pub fn from_campaign(
        campaign: &Campaign,
        target_price: Decimal,
        calculated_amount: Decimal,
    ) -> Self {
        Self {
            campaign_id: campaign.id.clone(),
            name: campaign.name.clone(),
            campaign_type: campaign.campaign_type(),
            target_price,
            calculated_amount,
            label: promo_label(campaign, target_price),
            skipped: false,
        }
    }
}

/// Label for a set-price effect: the configured cart label, else "free"
/// for a zero target price, else "reduced to {target}".
pub fn promo_label(campaign: &Campaign, target_price: Decimal) -> String {
    if let Some(label) = &campaign.display.cart_label {
        return label.clone();
    }
    if target_price.is_zero() {
        "free".to_string()
    } else {
        format!("reduced to {}", target_price.normalize())
    }
}
