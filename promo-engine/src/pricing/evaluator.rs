//! Rule Evaluator
//!
//! Applies all discount campaigns to a cart snapshot in a single
//! deterministic pass. Campaigns run in priority order (higher first, ties
//! keep configuration order). Each campaign checks its condition against
//! the working copy, then discounts at most as many units as its own
//! cardinality allows and marks them with its id.
//!
//! Conditions and effects both count units (`quantity`). When a campaign
//! discounts only some units of a line, those units are split off into a
//! line of their own with the same id.

use rust_decimal::Decimal;
use shared::evaluation::{AppliedCampaignSummary, AppliedStatus, EvaluatedLine};
use shared::models::{
    Campaign, CampaignKind, CampaignSet, CartSnapshot, LineMatcher, SelectionPolicy,
    StackingMode,
};

use super::calculator::apply_set_price;
use super::context::EvaluationContext;
use super::matcher::{is_campaign_live, matches_line};
use crate::marketing::GroupMembers;

/// Output of the discount pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignPass {
    pub lines: Vec<EvaluatedLine>,
    /// Campaigns that reduced at least one line, in application order
    pub applied_promo_names: Vec<String>,
    /// Every campaign that targeted a line, in application order
    pub applied_campaigns: Vec<AppliedCampaignSummary>,
}

/// Sort campaigns by priority (higher first), keeping configuration order on ties
pub fn order_by_priority(campaigns: &[Campaign]) -> Vec<&Campaign> {
    let mut ordered: Vec<&Campaign> = campaigns.iter().collect();
    // sort_by is stable
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
    ordered
}

/// Working state of one pass
struct Pass<'a> {
    lines: Vec<EvaluatedLine>,
    /// Lines outside every excluded group
    visible: Vec<bool>,
    groups: &'a GroupMembers,
    mode: StackingMode,
}

impl Pass<'_> {
    /// Visible lines matching `matcher`, in cart order
    fn matching(&self, matcher: &LineMatcher) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(idx, line)| self.visible[*idx] && matches_line(matcher, &line.line, self.groups))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Units of the visible lines matching `matcher`: each line index
    /// repeated `quantity` times, in cart order
    fn matching_units(&self, matcher: &LineMatcher) -> Vec<usize> {
        self.matching(matcher)
            .into_iter()
            .flat_map(|idx| std::iter::repeat_n(idx, self.lines[idx].line.quantity as usize))
            .collect()
    }

    /// A line the campaign may still select: neither this campaign nor
    /// another campaign of the same type has targeted it
    fn is_targetable(&self, idx: usize, campaign: &Campaign) -> bool {
        let line = &self.lines[idx];
        !line.is_marked_by(&campaign.id) && !line.is_marked_by_type(campaign.campaign_type())
    }

    /// `(line, units)` pairs the campaign discounts on this cart, in cart order
    fn select_targets(&self, campaign: &Campaign, subtotal: Decimal) -> Vec<(usize, u32)> {
        match &campaign.kind {
            CampaignKind::NthItem {
                n,
                target_category,
                selection_policy,
                ..
            } => {
                let units = self.matching_units(target_category);
                let n = *n as usize;
                if n == 0 || units.len() < n {
                    return vec![];
                }
                let window = &units[..n];
                // A line already taken by a same-type campaign leaves the
                // pick to the other lines of the window
                let selected = match selection_policy {
                    SelectionPolicy::Cheapest => window
                        .iter()
                        .copied()
                        .filter(|idx| self.is_targetable(*idx, campaign))
                        .min_by(|a, b| self.lines[*a].price().cmp(&self.lines[*b].price())),
                    SelectionPolicy::FixedIndex => Some(window[n - 1])
                        .filter(|idx| self.is_targetable(*idx, campaign)),
                };
                selected.map(|idx| (idx, 1)).into_iter().collect()
            }
            CampaignKind::WeekdayCombo {
                combo_category,
                target_category,
                ..
            } => {
                let mut remaining = self.matching_units(combo_category).len() as u32;
                let mut targets = Vec::new();
                for idx in self.matching(target_category) {
                    if remaining == 0 {
                        break;
                    }
                    if !self.is_targetable(idx, campaign) {
                        continue;
                    }
                    let units = self.lines[idx].line.quantity.min(remaining);
                    remaining -= units;
                    targets.push((idx, units));
                }
                targets
            }
            CampaignKind::ThresholdGift {
                min_amount,
                target_category,
                ..
            } => {
                if subtotal < *min_amount {
                    return vec![];
                }
                self.matching(target_category)
                    .into_iter()
                    .find(|idx| self.is_targetable(*idx, campaign))
                    .map(|idx| (idx, 1))
                    .into_iter()
                    .collect()
            }
            CampaignKind::LoyaltyAccrual { .. } => vec![],
        }
    }

    /// Split `units` off the line at `idx` into a line of its own, placed
    /// right after the remainder. Returns the index of the split-off part.
    fn split_units(&mut self, idx: usize, units: u32) -> usize {
        let quantity = self.lines[idx].line.quantity;
        if units >= quantity {
            return idx;
        }
        let mut part = self.lines[idx].clone();
        part.line.quantity = units;
        self.lines[idx].line.quantity = quantity - units;
        self.lines.insert(idx + 1, part);
        self.visible.insert(idx + 1, self.visible[idx]);
        idx + 1
    }
}

/// Run every discount campaign of the set over the cart
pub fn evaluate_campaigns(
    cart: &CartSnapshot,
    set: &CampaignSet,
    groups: &GroupMembers,
    ctx: &EvaluationContext,
) -> CampaignPass {
    let lines: Vec<EvaluatedLine> = cart
        .lines()
        .iter()
        .cloned()
        .map(EvaluatedLine::from_line)
        .collect();
    let visible = lines
        .iter()
        .map(|l| !groups.contains_any(&set.settings.excluded_groups, &l.line))
        .collect();
    let mut pass = Pass {
        lines,
        visible,
        groups,
        mode: set.settings.stacking_mode,
    };

    // Threshold measure: every line, pre-discount, excluded groups included
    let subtotal = cart.subtotal();
    let mut touched: Vec<&Campaign> = Vec::new();

    for campaign in order_by_priority(&set.campaigns) {
        let Some(target_price) = campaign.kind.target_price() else {
            continue;
        };
        if !is_campaign_live(campaign, ctx) {
            tracing::debug!(campaign_id = %campaign.id, "Campaign not live, skipping");
            continue;
        }

        let targets = pass.select_targets(campaign, subtotal);
        if targets.is_empty() {
            tracing::debug!(campaign_id = %campaign.id, "Campaign condition not met");
            continue;
        }

        // Back to front, so splitting a line keeps earlier indices valid
        for (idx, units) in targets.into_iter().rev() {
            let idx = pass.split_units(idx, units);
            let contributed = apply_set_price(&mut pass.lines[idx], campaign, target_price, pass.mode);
            tracing::debug!(
                campaign_id = %campaign.id,
                line_id = %pass.lines[idx].id(),
                contributed,
                "Campaign targeted line"
            );
        }
        touched.push(campaign);
    }

    // Best-price stacking can displace an earlier campaign, so status is
    // read from the final line records
    let applied_campaigns: Vec<AppliedCampaignSummary> = touched
        .iter()
        .map(|campaign| {
            let reduces_a_line = pass.lines.iter().any(|line| {
                line.applied_campaigns
                    .iter()
                    .any(|a| a.campaign_id == campaign.id && !a.skipped)
            });
            AppliedCampaignSummary {
                id: campaign.id.clone(),
                name: campaign.name.clone(),
                status: if reduces_a_line {
                    AppliedStatus::Applied
                } else {
                    AppliedStatus::Skipped
                },
            }
        })
        .collect();

    let applied_promo_names = applied_campaigns
        .iter()
        .filter(|s| s.status == AppliedStatus::Applied)
        .map(|s| s.name.clone())
        .collect();

    CampaignPass {
        lines: pass.lines,
        applied_promo_names,
        applied_campaigns,
    }
}
