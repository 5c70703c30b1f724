//! Loyalty Rule Model
//!
//! Declarative, scope-based point accrual. Coexists with the imperative
//! `LoyaltyAccrual` campaign; the engine resolves one policy per line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loyalty rule scope, ordered from least to most specific
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyScope {
    Global,
    Category,
    Sku,
}

/// Loyalty rule entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyRule {
    pub id: String,
    pub scope: LoyaltyScope,
    /// Category name or line id, depending on scope; unused for global
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Accrual percent (10 = 10% of the effective price)
    pub percent: Decimal,
    /// Lines carrying any promotion discount earn nothing under this rule
    #[serde(default)]
    pub exclude_promo_items: bool,
}

impl LoyaltyRule {
    pub fn global(id: impl Into<String>, percent: Decimal) -> Self {
        Self {
            id: id.into(),
            scope: LoyaltyScope::Global,
            target: None,
            percent,
            exclude_promo_items: false,
        }
    }

    pub fn category(id: impl Into<String>, category: impl Into<String>, percent: Decimal) -> Self {
        Self {
            id: id.into(),
            scope: LoyaltyScope::Category,
            target: Some(category.into()),
            percent,
            exclude_promo_items: false,
        }
    }

    pub fn sku(id: impl Into<String>, line_id: impl Into<String>, percent: Decimal) -> Self {
        Self {
            id: id.into(),
            scope: LoyaltyScope::Sku,
            target: Some(line_id.into()),
            percent,
            exclude_promo_items: false,
        }
    }

    pub fn excluding_promo_items(mut self) -> Self {
        self.exclude_promo_items = true;
        self
    }
}
