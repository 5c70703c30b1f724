//! Campaign configuration snapshot handed to the engine per call

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::campaign::Campaign;
use super::loyalty_rule::LoyaltyRule;
use super::product_group::ProductGroup;

/// Per-line rounding of accrued points
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PointsRounding {
    Floor,
    /// Half-up
    #[default]
    Round,
}

/// How several campaigns targeting the same line combine
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StackingMode {
    /// Only the single largest discount applies per line
    BestPrice,
    /// Discounts add up, capped at the line price
    #[default]
    Cumulative,
}

fn default_coin_rate() -> Decimal {
    Decimal::ONE
}

fn default_nominal_price() -> Decimal {
    Decimal::ONE
}

/// Engine-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    /// Multiplier on raw accrual before rounding
    #[serde(default = "default_coin_rate")]
    pub coin_rate: Decimal,
    #[serde(default)]
    pub rounding: PointsRounding,
    /// Points expire this many days after evaluation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_days: Option<u32>,
    #[serde(default)]
    pub stacking_mode: StackingMode,
    /// Product groups invisible to campaign matchers
    #[serde(default)]
    pub excluded_groups: Vec<String>,
    /// Discounted lines at or below this effective price count as fully discounted
    #[serde(default = "default_nominal_price")]
    pub nominal_price: Decimal,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            coin_rate: default_coin_rate(),
            rounding: PointsRounding::default(),
            expiry_days: None,
            stacking_mode: StackingMode::default(),
            excluded_groups: vec![],
            nominal_price: default_nominal_price(),
        }
    }
}

/// Fully resolved configuration snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSet {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub loyalty_rules: Vec<LoyaltyRule>,
    #[serde(default)]
    pub product_groups: Vec<ProductGroup>,
    #[serde(default)]
    pub settings: EngineSettings,
}

impl CampaignSet {
    pub fn new(campaigns: Vec<Campaign>) -> Self {
        Self {
            campaigns,
            ..Self::default()
        }
    }

    pub fn with_loyalty_rules(mut self, rules: Vec<LoyaltyRule>) -> Self {
        self.loyalty_rules = rules;
        self
    }

    pub fn with_groups(mut self, groups: Vec<ProductGroup>) -> Self {
        self.product_groups = groups;
        self
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }
}
