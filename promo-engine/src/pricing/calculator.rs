//! Discount Calculator
//!
//! Applies a set-price effect to one evaluated line and combines it with
//! discounts already on the line according to the stacking mode.

use rust_decimal::Decimal;
use shared::evaluation::{AppliedCampaign, EvaluatedLine};
use shared::models::{Campaign, StackingMode};

/// Per-unit discount that brings `price` down to `target_price`
pub fn nominal_discount(price: Decimal, target_price: Decimal) -> Decimal {
    (price - target_price).max(Decimal::ZERO)
}

/// Apply a set-price campaign to one line.
///
/// - `Cumulative`: the nominal discount is added to what the line already
///   has, capped so the discount never exceeds the price. The record keeps
///   the capped contribution.
/// - `BestPrice`: the line keeps the single largest nominal discount. A
///   losing campaign is recorded as skipped with the amount it would have
///   given; ties keep the earlier campaign.
///
/// Returns `true` when the campaign now reduces the line.
pub fn apply_set_price(
    line: &mut EvaluatedLine,
    campaign: &Campaign,
    target_price: Decimal,
    mode: StackingMode,
) -> bool {
    let nominal = nominal_discount(line.price(), target_price);
    let mut applied = AppliedCampaign::from_campaign(campaign, target_price, nominal);

    match mode {
        StackingMode::Cumulative => {
            let headroom = (line.price() - line.discount).max(Decimal::ZERO);
            let contributed = nominal.min(headroom);
            line.discount += contributed;
            applied.calculated_amount = contributed;
            applied.skipped = contributed.is_zero();
        }
        StackingMode::BestPrice => {
            if nominal > line.discount {
                for previous in line.applied_campaigns.iter_mut() {
                    previous.skipped = true;
                }
                line.discount = nominal;
            } else {
                applied.skipped = true;
            }
        }
    }

    let contributed = !applied.skipped;
    line.applied_campaign_ids.insert(campaign.id.clone());
    line.applied_campaigns.push(applied);
    refresh_labels(line);
    contributed
}

/// Promo labels are the labels of the campaigns that still reduce the line
fn refresh_labels(line: &mut EvaluatedLine) {
    line.promo_labels = line
        .applied_campaigns
        .iter()
        .filter(|a| !a.skipped)
        .map(|a| a.label.clone())
        .collect();
}
