//! Evaluation Engine
//!
//! `(CartSnapshot, CampaignSet, EvaluationContext) -> EvaluationResult`.
//! Local previews and the authoritative service both call this function.

use rust_decimal::Decimal;
use shared::evaluation::EvaluationResult;
use shared::models::{CampaignSet, CartSnapshot};

use super::context::EvaluationContext;
use super::evaluator::evaluate_campaigns;
use crate::marketing::{Catalog, GroupMembers, accrue_cart};

/// Evaluate a cart, resolving dynamic groups against the cart's own products
pub fn evaluate(cart: &CartSnapshot, set: &CampaignSet, ctx: &EvaluationContext) -> EvaluationResult {
    evaluate_with_catalog(cart, set, &Catalog::from_cart(cart), ctx)
}

/// Evaluate a cart with an explicit catalog for dynamic group predicates
pub fn evaluate_with_catalog(
    cart: &CartSnapshot,
    set: &CampaignSet,
    catalog: &Catalog,
    ctx: &EvaluationContext,
) -> EvaluationResult {
    let groups = GroupMembers::build(&set.product_groups, catalog);
    let pass = evaluate_campaigns(cart, set, &groups, ctx);
    let points = accrue_cart(&pass.lines, set, ctx);

    let subtotal = cart.subtotal();
    let discount_total: Decimal = pass.lines.iter().map(|l| l.discount_total()).sum();
    let cart_total: Decimal = pass.lines.iter().map(|l| l.line_total()).sum();

    tracing::debug!(
        lines = pass.lines.len(),
        %subtotal,
        %discount_total,
        points = points.total,
        "Cart evaluated"
    );

    EvaluationResult {
        lines: pass.lines,
        applied_promo_names: pass.applied_promo_names,
        applied_campaigns: pass.applied_campaigns,
        subtotal,
        discount_total,
        cart_total,
        points,
    }
}
