//! Campaign Model
//!
//! Tagged campaign variants. The model carries no evaluation logic; matching
//! and effects live in the engine's pricing module.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
    Paused,
}

/// Labels shown to the customer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLabels {
    /// Badge shown on the product card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_label: Option<String>,
    /// Label shown on the cart line; replaces the generated "free"/"reduced to" text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_label: Option<String>,
}

/// Selects cart lines either by category or by product group.
///
/// JSON: `"pizza"` or `{"group": "lunch-drinks"}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LineMatcher {
    Category(String),
    Group { group: String },
}

impl LineMatcher {
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category(name.into())
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::Group { group: id.into() }
    }
}

/// Which line an Nth-item campaign discounts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SelectionPolicy {
    /// Cheapest among the first `n` qualifying lines (earliest wins ties)
    #[default]
    Cheapest,
    /// The `n`-th qualifying line
    FixedIndex,
}

/// Hour window `[start, end)`; wraps past midnight when `start > end`.
///
/// JSON: `[11, 15]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "(u8, u8)", into = "(u8, u8)")]
pub struct HourRange {
    pub start: u8,
    pub end: u8,
}

impl HourRange {
    pub fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    /// Whether `hour` (0..=23) falls inside the window
    pub fn contains(&self, hour: u32) -> bool {
        let (start, end) = (u32::from(self.start), u32::from(self.end));
        if start <= end {
            hour >= start && hour < end
        } else {
            // Overnight (e.g. 22 - 2)
            hour >= start || hour < end
        }
    }
}

impl From<(u8, u8)> for HourRange {
    fn from((start, end): (u8, u8)) -> Self {
        Self { start, end }
    }
}

impl From<HourRange> for (u8, u8) {
    fn from(range: HourRange) -> Self {
        (range.start, range.end)
    }
}

/// Variant-specific campaign definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CampaignKind {
    /// One `target` line per `combo` line, inside a weekday/hour window
    #[serde(rename_all = "camelCase")]
    WeekdayCombo {
        /// 0 = Sunday .. 6 = Saturday
        weekdays: BTreeSet<u8>,
        hour_range: HourRange,
        combo_category: LineMatcher,
        target_category: LineMatcher,
        target_price: Decimal,
    },
    /// One line discounted once the category count reaches `n`
    #[serde(rename_all = "camelCase")]
    NthItem {
        n: u32,
        target_category: LineMatcher,
        #[serde(default)]
        selection_policy: SelectionPolicy,
        target_price: Decimal,
    },
    /// One line discounted once the pre-discount subtotal reaches `min_amount`
    #[serde(rename_all = "camelCase")]
    ThresholdGift {
        min_amount: Decimal,
        target_category: LineMatcher,
        target_price: Decimal,
    },
    /// Point accrual, not a discount
    #[serde(rename_all = "camelCase")]
    LoyaltyAccrual {
        rate_percent: Decimal,
        #[serde(default)]
        exclude_fully_discounted: bool,
    },
}

/// Data-less discriminant of [`CampaignKind`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CampaignType {
    WeekdayCombo,
    NthItem,
    ThresholdGift,
    LoyaltyAccrual,
}

impl CampaignKind {
    pub fn campaign_type(&self) -> CampaignType {
        match self {
            Self::WeekdayCombo { .. } => CampaignType::WeekdayCombo,
            Self::NthItem { .. } => CampaignType::NthItem,
            Self::ThresholdGift { .. } => CampaignType::ThresholdGift,
            Self::LoyaltyAccrual { .. } => CampaignType::LoyaltyAccrual,
        }
    }

    /// Set price applied by discount variants; `None` for accrual campaigns
    pub fn target_price(&self) -> Option<Decimal> {
        match self {
            Self::WeekdayCombo { target_price, .. }
            | Self::NthItem { target_price, .. }
            | Self::ThresholdGift { target_price, .. } => Some(*target_price),
            Self::LoyaltyAccrual { .. } => None,
        }
    }
}

/// Campaign entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    /// Higher runs first
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub display: DisplayLabels,
    /// Valid from (Unix millis, inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<i64>,
    /// Valid until (Unix millis, exclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<i64>,
    #[serde(flatten)]
    pub kind: CampaignKind,
}

impl Campaign {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CampaignKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority: 0,
            status: CampaignStatus::Active,
            display: DisplayLabels::default(),
            valid_from: None,
            valid_until: None,
            kind,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: CampaignStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_cart_label(mut self, label: impl Into<String>) -> Self {
        self.display.cart_label = Some(label.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    pub fn campaign_type(&self) -> CampaignType {
        self.kind.campaign_type()
    }

    /// Whether `now_millis` falls inside the optional validity window
    pub fn is_within_validity(&self, now_millis: i64) -> bool {
        self.valid_from.is_none_or(|from| now_millis >= from)
            && self.valid_until.is_none_or(|until| now_millis < until)
    }
}
