//! Configuration entry validation
//!
//! Each campaign, loyalty rule and product group is checked on its own.
//! A failing entry is dropped by the loader; the rest stays active.

use rust_decimal::Decimal;
use shared::ErrorCode;
use shared::models::{
    Campaign, CampaignKind, EngineSettings, LineMatcher, LoyaltyRule, LoyaltyScope, ProductGroup,
};
use std::fmt;
use thiserror::Error;

/// Kind of configuration entry an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Campaign,
    LoyaltyRule,
    ProductGroup,
    Settings,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Campaign => "campaign",
            EntryKind::LoyaltyRule => "loyalty rule",
            EntryKind::ProductGroup => "product group",
            EntryKind::Settings => "settings",
        };
        f.write_str(name)
    }
}

/// Configuration load error
///
/// `entry` is the entry id, or `#<index>` when the entry has no usable id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{kind} {entry}: missing field `{field}`")]
    MissingField {
        kind: EntryKind,
        entry: String,
        field: &'static str,
    },

    #[error("{kind} {entry}: `{field}` {reason}")]
    OutOfRange {
        kind: EntryKind,
        entry: String,
        field: &'static str,
        reason: String,
    },

    #[error("{kind} {entry}: malformed entry: {reason}")]
    Malformed {
        kind: EntryKind,
        entry: String,
        reason: String,
    },

    #[error("{kind} {entry}: duplicate id, keeping the first definition")]
    DuplicateId { kind: EntryKind, entry: String },

    #[error("configuration document rejected: {0}")]
    Document(String),

    #[error("failed to read configuration {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

impl ConfigError {
    /// Map to the unified error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::DuplicateId {
                kind: EntryKind::Campaign,
                ..
            } => ErrorCode::DuplicateCampaign,
            ConfigError::MissingField { kind, .. }
            | ConfigError::OutOfRange { kind, .. }
            | ConfigError::Malformed { kind, .. }
            | ConfigError::DuplicateId { kind, .. } => match kind {
                EntryKind::Campaign => ErrorCode::InvalidCampaign,
                EntryKind::LoyaltyRule => ErrorCode::InvalidLoyaltyRule,
                EntryKind::ProductGroup => ErrorCode::InvalidProductGroup,
                EntryKind::Settings => ErrorCode::InvalidFormat,
            },
            ConfigError::Document(_) => ErrorCode::InvalidFormat,
            ConfigError::Unreadable { .. } => ErrorCode::ConfigLoadFailed,
        }
    }

    /// Entry kind, if the error concerns a single entry
    pub fn kind(&self) -> Option<EntryKind> {
        match self {
            ConfigError::MissingField { kind, .. }
            | ConfigError::OutOfRange { kind, .. }
            | ConfigError::Malformed { kind, .. }
            | ConfigError::DuplicateId { kind, .. } => Some(*kind),
            ConfigError::Document(_) | ConfigError::Unreadable { .. } => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==================== Helpers ====================

fn out_of_range(kind: EntryKind, entry: &str, field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::OutOfRange {
        kind,
        entry: entry.to_string(),
        field,
        reason: reason.into(),
    }
}

fn require_id(kind: EntryKind, id: &str, index: usize) -> ConfigResult<()> {
    if id.trim().is_empty() {
        return Err(ConfigError::MissingField {
            kind,
            entry: format!("#{}", index),
            field: "id",
        });
    }
    Ok(())
}

fn require_percent(kind: EntryKind, entry: &str, field: &'static str, value: Decimal) -> ConfigResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(out_of_range(kind, entry, field, format!("must be within 0..=100, got {}", value)));
    }
    Ok(())
}

fn require_non_negative(kind: EntryKind, entry: &str, field: &'static str, value: Decimal) -> ConfigResult<()> {
    if value < Decimal::ZERO {
        return Err(out_of_range(kind, entry, field, format!("must be non-negative, got {}", value)));
    }
    Ok(())
}

fn require_matcher(entry: &str, field: &'static str, matcher: &LineMatcher) -> ConfigResult<()> {
    let empty = match matcher {
        LineMatcher::Category(category) => category.trim().is_empty(),
        LineMatcher::Group { group } => group.trim().is_empty(),
    };
    if empty {
        return Err(ConfigError::MissingField {
            kind: EntryKind::Campaign,
            entry: entry.to_string(),
            field,
        });
    }
    Ok(())
}

// ==================== Entries ====================

/// Validate a campaign at position `index` of the configuration
pub fn validate_campaign(campaign: &Campaign, index: usize) -> ConfigResult<()> {
    let kind = EntryKind::Campaign;
    require_id(kind, &campaign.id, index)?;
    let entry = campaign.id.as_str();

    if let Some(target_price) = campaign.kind.target_price() {
        require_non_negative(kind, entry, "targetPrice", target_price)?;
    }

    match &campaign.kind {
        CampaignKind::WeekdayCombo {
            weekdays,
            hour_range,
            combo_category,
            target_category,
            ..
        } => {
            if weekdays.is_empty() {
                return Err(ConfigError::MissingField {
                    kind,
                    entry: entry.to_string(),
                    field: "weekdays",
                });
            }
            if let Some(day) = weekdays.iter().find(|d| **d > 6) {
                return Err(out_of_range(kind, entry, "weekdays", format!("must be within 0..=6, got {}", day)));
            }
            if hour_range.start > 24 || hour_range.end > 24 {
                return Err(out_of_range(kind, entry, "hourRange", "hours must be within 0..=24"));
            }
            if hour_range.start == hour_range.end {
                return Err(out_of_range(kind, entry, "hourRange", "start and end must differ"));
            }
            require_matcher(entry, "comboCategory", combo_category)?;
            require_matcher(entry, "targetCategory", target_category)?;
        }
        CampaignKind::NthItem {
            n, target_category, ..
        } => {
            if *n < 1 {
                return Err(out_of_range(kind, entry, "n", "must be at least 1"));
            }
            require_matcher(entry, "targetCategory", target_category)?;
        }
        CampaignKind::ThresholdGift {
            min_amount,
            target_category,
            ..
        } => {
            require_non_negative(kind, entry, "minAmount", *min_amount)?;
            require_matcher(entry, "targetCategory", target_category)?;
        }
        CampaignKind::LoyaltyAccrual { rate_percent, .. } => {
            require_percent(kind, entry, "ratePercent", *rate_percent)?;
        }
    }

    if let (Some(from), Some(until)) = (campaign.valid_from, campaign.valid_until)
        && from >= until
    {
        return Err(out_of_range(kind, entry, "validUntil", "must be after validFrom"));
    }

    Ok(())
}

/// Validate a loyalty rule at position `index`
pub fn validate_loyalty_rule(rule: &LoyaltyRule, index: usize) -> ConfigResult<()> {
    let kind = EntryKind::LoyaltyRule;
    require_id(kind, &rule.id, index)?;
    require_percent(kind, &rule.id, "percent", rule.percent)?;

    let has_target = rule.target.as_deref().is_some_and(|t| !t.trim().is_empty());
    if rule.scope != LoyaltyScope::Global && !has_target {
        return Err(ConfigError::MissingField {
            kind,
            entry: rule.id.clone(),
            field: "target",
        });
    }
    Ok(())
}

/// Validate a product group at position `index`
pub fn validate_product_group(group: &ProductGroup, index: usize) -> ConfigResult<()> {
    require_id(EntryKind::ProductGroup, &group.id, index)
}

/// Validate engine settings
pub fn validate_settings(settings: &EngineSettings) -> ConfigResult<()> {
    let kind = EntryKind::Settings;
    require_non_negative(kind, "settings", "coinRate", settings.coin_rate)?;
    require_non_negative(kind, "settings", "nominalPrice", settings.nominal_price)?;
    Ok(())
}
