//! Loyalty Accrual Calculator
//!
//! Derives points from the evaluated cart. Each line accrues under exactly
//! one policy, picked by most specific scope:
//!
//! 1. SKU rule targeting the line id
//! 2. Category rule targeting the line category
//! 3. Global rule
//! 4. Live `LoyaltyAccrual` campaign (highest priority, then config order)
//!
//! Within one scope the first rule in configuration order wins.

use chrono::Days;
use rust_decimal::Decimal;
use shared::evaluation::{AccrualSource, EvaluatedLine, LinePoints, LoyaltyBreakdown};
use shared::models::{Campaign, CampaignKind, CampaignSet, EngineSettings, LoyaltyRule, LoyaltyScope};

use crate::money::round_points;
use crate::pricing::{EvaluationContext, is_campaign_live, order_by_priority};

/// Which discounted lines a policy refuses to reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    None,
    /// Free or nearly free lines (see `EngineSettings::nominal_price`)
    FullyDiscounted,
    /// Any line with a discount
    PromoItems,
}

/// A resolved accrual policy, from a loyalty rule or an accrual campaign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccrualPolicy {
    pub rate_percent: Decimal,
    pub exclusion: Exclusion,
    pub source: AccrualSource,
}

impl AccrualPolicy {
    pub fn from_rule(rule: &LoyaltyRule) -> Self {
        Self {
            rate_percent: rule.percent,
            exclusion: if rule.exclude_promo_items {
                Exclusion::PromoItems
            } else {
                Exclusion::None
            },
            source: AccrualSource::Rule {
                rule_id: rule.id.clone(),
                scope: rule.scope,
            },
        }
    }

    /// `None` for discount campaigns
    pub fn from_campaign(campaign: &Campaign) -> Option<Self> {
        match &campaign.kind {
            CampaignKind::LoyaltyAccrual {
                rate_percent,
                exclude_fully_discounted,
            } => Some(Self {
                rate_percent: *rate_percent,
                exclusion: if *exclude_fully_discounted {
                    Exclusion::FullyDiscounted
                } else {
                    Exclusion::None
                },
                source: AccrualSource::Campaign {
                    campaign_id: campaign.id.clone(),
                },
            }),
            _ => None,
        }
    }

    /// Whether the policy refuses to reward this line
    pub fn excludes(&self, line: &EvaluatedLine, settings: &EngineSettings) -> bool {
        match self.exclusion {
            Exclusion::None => false,
            Exclusion::FullyDiscounted => line.is_fully_discounted(settings.nominal_price),
            Exclusion::PromoItems => line.is_discounted(),
        }
    }
}

/// Points a single line earns under `policy`.
///
/// `effective_price * quantity * rate / 100 * coin_rate`, rounded per line.
pub fn line_points(line: &EvaluatedLine, policy: &AccrualPolicy, settings: &EngineSettings) -> u64 {
    if policy.excludes(line, settings) {
        return 0;
    }
    let raw = line.line_total() * policy.rate_percent / Decimal::ONE_HUNDRED * settings.coin_rate;
    round_points(raw, settings.rounding)
}

/// Sum of points for `lines` accruing under a single policy
pub fn accrue(lines: &[EvaluatedLine], policy: &AccrualPolicy, settings: &EngineSettings) -> u64 {
    lines.iter().map(|line| line_points(line, policy, settings)).sum()
}

/// Most specific policy for one line; `None` when nothing applies
pub fn resolve_policy(
    line: &EvaluatedLine,
    rules: &[LoyaltyRule],
    campaign_policy: Option<&AccrualPolicy>,
) -> Option<AccrualPolicy> {
    let targets = |rule: &LoyaltyRule, value: &str| rule.target.as_deref() == Some(value);

    let sku = rules
        .iter()
        .find(|r| r.scope == LoyaltyScope::Sku && targets(*r, &line.line.id));
    let category = || {
        rules
            .iter()
            .find(|r| r.scope == LoyaltyScope::Category && targets(*r, &line.line.category))
    };
    let global = || rules.iter().find(|r| r.scope == LoyaltyScope::Global);

    sku.or_else(category)
        .or_else(global)
        .map(AccrualPolicy::from_rule)
        .or_else(|| campaign_policy.cloned())
}

/// Accrual campaign used as the fallback policy
fn campaign_policy(set: &CampaignSet, ctx: &EvaluationContext) -> Option<AccrualPolicy> {
    order_by_priority(&set.campaigns)
        .into_iter()
        .filter(|c| is_campaign_live(c, ctx))
        .find_map(AccrualPolicy::from_campaign)
}

/// Points for the whole evaluated cart, with the per-line breakdown
pub fn accrue_cart(
    lines: &[EvaluatedLine],
    set: &CampaignSet,
    ctx: &EvaluationContext,
) -> LoyaltyBreakdown {
    let settings = &set.settings;
    let fallback = campaign_policy(set, ctx);

    let per_line: Vec<LinePoints> = lines
        .iter()
        .map(|line| match resolve_policy(line, &set.loyalty_rules, fallback.as_ref()) {
            Some(policy) => LinePoints {
                line_id: line.id().to_string(),
                points: line_points(line, &policy, settings),
                excluded: policy.excludes(line, settings),
                source: policy.source,
            },
            None => LinePoints {
                line_id: line.id().to_string(),
                points: 0,
                source: AccrualSource::NoPolicy,
                excluded: false,
            },
        })
        .collect();

    let total = per_line.iter().map(|p| p.points).sum();
    let expires_at = settings
        .expiry_days
        .and_then(|days| ctx.local_date().checked_add_days(Days::new(u64::from(days))));

    LoyaltyBreakdown {
        total,
        per_line,
        expires_at,
    }
}
