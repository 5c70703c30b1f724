use super::*;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use shared::evaluation::{AppliedStatus, EvaluationResult};
use shared::models::{
    Campaign, CampaignKind, CampaignSet, CampaignStatus, CartLine, CartSnapshot, EngineSettings,
    HourRange, LineMatcher, ProductGroup, SelectionPolicy, StackingMode,
};

// ==================== Helpers ====================

/// Monday 2026-03-02 12:00 UTC
fn monday_noon() -> EvaluationContext {
    EvaluationContext::at(&Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap())
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

fn line(id: &str, category: &str, price: i64) -> CartLine {
    CartLine::new(id, id, category, dec(price))
}

fn pizzas(prices: &[i64]) -> Vec<CartLine> {
    prices
        .iter()
        .enumerate()
        .map(|(i, price)| line(&format!("pizza-{}", i), "pizza", *price))
        .collect()
}

fn nth_item(id: &str, n: u32, policy: SelectionPolicy, target_price: i64) -> Campaign {
    Campaign::new(
        id,
        format!("{} name", id),
        CampaignKind::NthItem {
            n,
            target_category: LineMatcher::category("pizza"),
            selection_policy: policy,
            target_price: dec(target_price),
        },
    )
}

fn threshold_gift(id: &str, min_amount: i64, category: &str, target_price: i64) -> Campaign {
    Campaign::new(
        id,
        format!("{} name", id),
        CampaignKind::ThresholdGift {
            min_amount: dec(min_amount),
            target_category: LineMatcher::category(category),
            target_price: dec(target_price),
        },
    )
}

fn lunch_combo(weekdays: &[u8], target_price: i64) -> Campaign {
    Campaign::new(
        "lunch",
        "Lunch combo",
        CampaignKind::WeekdayCombo {
            weekdays: weekdays.iter().copied().collect(),
            hour_range: HourRange::new(11, 15),
            combo_category: LineMatcher::category("combo"),
            target_category: LineMatcher::category("drinks"),
            target_price: dec(target_price),
        },
    )
}

fn run(lines: Vec<CartLine>, set: &CampaignSet) -> EvaluationResult {
    evaluate(&CartSnapshot::new(lines), set, &monday_noon())
}

fn discounts(result: &EvaluationResult) -> Vec<Decimal> {
    result.lines.iter().map(|l| l.discount).collect()
}

// ==================== Properties ====================

#[test]
fn test_evaluation_is_deterministic() {
    let set = CampaignSet::new(vec![
        nth_item("seventh", 3, SelectionPolicy::Cheapest, 1),
        threshold_gift("gift", 1000, "pizza", 0),
        lunch_combo(&[1], 1),
    ]);
    let cart = vec![
        line("c1", "combo", 900),
        line("d1", "drinks", 200),
        line("d2", "drinks", 250),
    ]
    .into_iter()
    .chain(pizzas(&[700, 650, 800]))
    .collect::<Vec<_>>();

    let first = serde_json::to_string(&run(cart.clone(), &set)).unwrap();
    let second = serde_json::to_string(&run(cart, &set)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_discount_bound_holds_under_cumulative_stacking() {
    let set = CampaignSet::new(vec![
        nth_item("nth", 1, SelectionPolicy::Cheapest, 0),
        threshold_gift("gift", 0, "pizza", 0),
    ]);
    let result = run(pizzas(&[500, 0]), &set);

    for evaluated in &result.lines {
        assert!(evaluated.discount >= Decimal::ZERO);
        assert!(evaluated.discount <= evaluated.price());
    }
    assert_eq!(result.cart_total, Decimal::ZERO);
}

#[test]
fn test_no_duplicate_campaign_on_a_line() {
    // Two entries sharing an id: the second must not re-target the line
    let set = CampaignSet::new(vec![
        threshold_gift("gift", 0, "rolls", 1),
        threshold_gift("gift", 0, "rolls", 1),
    ]);
    let result = run(vec![line("r1", "rolls", 350)], &set);

    let evaluated = &result.lines[0];
    assert_eq!(evaluated.applied_campaigns.len(), 1);
    assert_eq!(evaluated.applied_campaign_ids.len(), 1);
    assert_eq!(evaluated.discount, dec(349));
}

// ==================== Nth item ====================

#[test]
fn test_nth_item_cheapest_picks_minimum_price() {
    let set = CampaignSet::new(vec![nth_item("seventh", 7, SelectionPolicy::Cheapest, 1)]);
    let result = run(pizzas(&[500, 501, 502, 503, 504, 505, 506]), &set);

    assert_eq!(result.lines[0].discount, dec(499));
    assert!(result.lines[1..].iter().all(|l| l.discount.is_zero()));
    assert_eq!(result.lines[0].promo_labels, vec!["reduced to 1"]);
}

#[test]
fn test_nth_item_below_threshold_does_not_fire() {
    let set = CampaignSet::new(vec![nth_item("seventh", 7, SelectionPolicy::Cheapest, 1)]);
    let result = run(pizzas(&[500, 501, 502, 503, 504, 505]), &set);

    assert!(result.lines.iter().all(|l| l.discount.is_zero()));
    assert!(result.applied_promo_names.is_empty());
    assert!(result.applied_campaigns.is_empty());
}

#[test]
fn test_nth_item_cheapest_ties_pick_earliest() {
    let set = CampaignSet::new(vec![nth_item("third", 3, SelectionPolicy::Cheapest, 0)]);
    let result = run(pizzas(&[600, 400, 400, 300]), &set);

    // 300 is outside the first three lines
    assert_eq!(discounts(&result), vec![dec(0), dec(400), dec(0), dec(0)]);
    assert_eq!(result.lines[1].promo_labels, vec!["free"]);
}

#[test]
fn test_nth_item_fixed_index_picks_nth_line() {
    let set = CampaignSet::new(vec![nth_item("third", 3, SelectionPolicy::FixedIndex, 100)]);
    let mut cart = pizzas(&[600, 400, 900, 300]);
    cart.insert(1, line("d1", "drinks", 200));
    let result = run(cart, &set);

    // Third pizza in category order is the 900 one, at cart position 3
    assert_eq!(result.lines[3].discount, dec(800));
    assert_eq!(result.discount_total, dec(800));
}

#[test]
fn test_nth_item_counts_units_of_one_line() {
    let set = CampaignSet::new(vec![nth_item("seventh", 7, SelectionPolicy::Cheapest, 1)]);

    let result = run(vec![line("p1", "pizza", 500).with_quantity(7)], &set);
    assert_eq!(discounts(&result), vec![dec(0), dec(499)]);
    assert_eq!(result.lines[0].line.quantity, 6);
    assert_eq!(result.lines[1].line.quantity, 1);
    assert_eq!(result.discount_total, dec(499));
    assert_eq!(result.cart_total, dec(6 * 500 + 1));

    let result = run(vec![line("p1", "pizza", 500).with_quantity(6)], &set);
    assert!(result.discount_total.is_zero());
    assert_eq!(result.lines.len(), 1);
}

#[test]
fn test_nth_item_window_spans_line_quantities() {
    let set = CampaignSet::new(vec![nth_item("third", 3, SelectionPolicy::FixedIndex, 0)]);
    let cart = vec![
        line("p1", "pizza", 700).with_quantity(2),
        line("p2", "pizza", 900).with_quantity(2),
    ];
    let result = run(cart, &set);

    // Units: p1, p1, p2, p2; the third unit is the first p2
    assert_eq!(discounts(&result), vec![dec(0), dec(0), dec(900)]);
    assert_eq!(result.lines[2].id(), "p2");
    assert_eq!(result.lines[1].line.quantity, 1);
}

#[test]
fn test_cheapest_skips_line_taken_by_same_type() {
    let set = CampaignSet::new(vec![
        nth_item("first", 3, SelectionPolicy::Cheapest, 1),
        nth_item("second", 3, SelectionPolicy::Cheapest, 1),
    ]);
    let result = run(pizzas(&[500, 400, 450]), &set);

    // "second" cannot reuse the 400 line and takes the next cheapest in its window
    assert_eq!(discounts(&result), vec![dec(0), dec(399), dec(449)]);
    assert_eq!(result.applied_promo_names, vec!["first name", "second name"]);
}

#[test]
fn test_same_type_does_not_retarget_line() {
    let set = CampaignSet::new(vec![
        nth_item("first", 1, SelectionPolicy::Cheapest, 0),
        nth_item("second", 1, SelectionPolicy::Cheapest, 100),
    ]);
    let result = run(pizzas(&[500, 700]), &set);

    assert_eq!(discounts(&result), vec![dec(500), dec(0)]);
    assert_eq!(result.applied_promo_names, vec!["first name"]);
}

// ==================== Weekday combo ====================

#[test]
fn test_combo_ratio_cap() {
    let set = CampaignSet::new(vec![lunch_combo(&[1, 2, 3, 4, 5], 1)]);
    let result = run(
        vec![
            line("c1", "combo", 900),
            line("d1", "drinks", 200),
            line("d2", "drinks", 200),
            line("d3", "drinks", 200),
        ],
        &set,
    );

    assert_eq!(discounts(&result), vec![dec(0), dec(199), dec(0), dec(0)]);
    assert_eq!(result.lines[1].effective_price(), Decimal::ONE);
}

#[test]
fn test_combo_two_units_discount_two_drinks() {
    let set = CampaignSet::new(vec![lunch_combo(&[1], 1)]);
    let result = run(
        vec![
            line("d1", "drinks", 200),
            line("c1", "combo", 900),
            line("d2", "drinks", 300),
            line("c2", "combo", 900),
            line("d3", "drinks", 250),
        ],
        &set,
    );
    assert_eq!(
        discounts(&result),
        vec![dec(199), dec(0), dec(299), dec(0), dec(0)]
    );
}

#[test]
fn test_combo_ratio_cap_counts_units() {
    let set = CampaignSet::new(vec![lunch_combo(&[1], 1)]);
    let result = run(
        vec![line("c1", "combo", 900), line("d1", "drinks", 200).with_quantity(3)],
        &set,
    );

    // One combo unit: one of the three drinks, split off the line
    assert_eq!(discounts(&result), vec![dec(0), dec(0), dec(199)]);
    assert_eq!(result.lines[1].line.quantity, 2);
    assert_eq!(result.lines[2].line.quantity, 1);
    assert_eq!(result.discount_total, dec(199));
    assert_eq!(result.cart_total, dec(1301));
}

#[test]
fn test_combo_quantity_spreads_over_drink_lines() {
    let set = CampaignSet::new(vec![lunch_combo(&[1], 1)]);
    let result = run(
        vec![
            line("c1", "combo", 900).with_quantity(3),
            line("d1", "drinks", 200).with_quantity(2),
            line("d2", "drinks", 300).with_quantity(2),
        ],
        &set,
    );

    // d1 fully covered, one unit of d2 split off
    assert_eq!(discounts(&result), vec![dec(0), dec(199), dec(0), dec(299)]);
    assert_eq!(result.lines[1].line.quantity, 2);
    assert_eq!(result.lines[3].line.quantity, 1);
    assert_eq!(result.discount_total, dec(199 * 2 + 299));
}

#[test]
fn test_combo_outside_window_does_not_fire() {
    // Sunday only
    let set = CampaignSet::new(vec![lunch_combo(&[0], 1)]);
    let result = run(vec![line("c1", "combo", 900), line("d1", "drinks", 200)], &set);
    assert!(result.lines.iter().all(|l| l.discount.is_zero()));

    // Monday, but evening
    let set = CampaignSet::new(vec![lunch_combo(&[1], 1)]);
    let evening = EvaluationContext::at(&Utc.with_ymd_and_hms(2026, 3, 2, 20, 0, 0).unwrap());
    let result = evaluate(
        &CartSnapshot::new(vec![line("c1", "combo", 900), line("d1", "drinks", 200)]),
        &set,
        &evening,
    );
    assert!(result.lines.iter().all(|l| l.discount.is_zero()));
}

// ==================== Threshold gift ====================

#[test]
fn test_threshold_gift_reached() {
    let set = CampaignSet::new(vec![threshold_gift("gift", 2500, "rolls", 1)]);
    let result = run(vec![line("p1", "pizza", 2250), line("r1", "rolls", 350)], &set);

    assert_eq!(result.subtotal, dec(2600));
    assert_eq!(result.lines[1].discount, dec(349));
    assert_eq!(result.cart_total, dec(2251));
}

#[test]
fn test_threshold_gift_not_reached() {
    let set = CampaignSet::new(vec![threshold_gift("gift", 2500, "rolls", 1)]);
    let result = run(vec![line("p1", "pizza", 2050), line("r1", "rolls", 350)], &set);

    assert_eq!(result.subtotal, dec(2400));
    assert_eq!(result.lines[1].discount, Decimal::ZERO);
}

#[test]
fn test_threshold_uses_pre_discount_subtotal_with_quantity() {
    let set = CampaignSet::new(vec![
        nth_item("free-pizza", 1, SelectionPolicy::Cheapest, 0),
        threshold_gift("gift", 2500, "rolls", 0),
    ]);
    let cart = vec![
        line("p1", "pizza", 1000).with_quantity(2),
        line("r1", "rolls", 500),
    ];
    let result = run(cart, &set);

    // 2 * 1000 + 500 counts even though a pizza is discounted first
    assert_eq!(result.subtotal, dec(2500));
    assert_eq!(result.lines[2].id(), "r1");
    assert_eq!(result.lines[2].discount, dec(500));
    // Only one of the two pizzas is free
    assert_eq!(discounts(&result), vec![dec(0), dec(1000), dec(500)]);
    assert_eq!(result.cart_total, dec(1000));
}

#[test]
fn test_threshold_gift_discounts_one_unit_of_a_line() {
    let set = CampaignSet::new(vec![threshold_gift("gift", 2500, "rolls", 1)]);
    let cart = vec![line("p1", "pizza", 2250), line("r1", "rolls", 350).with_quantity(2)];
    let result = run(cart, &set);

    assert_eq!(result.lines.len(), 3);
    assert_eq!(result.lines[1].id(), "r1");
    assert_eq!(result.lines[1].line.quantity, 1);
    assert!(result.lines[1].discount.is_zero());
    assert_eq!(result.lines[2].id(), "r1");
    assert_eq!(result.lines[2].line.quantity, 1);
    assert_eq!(result.lines[2].discount, dec(349));
    assert_eq!(result.discount_total, dec(349));
    assert_eq!(result.cart_total, dec(2601));
}

#[test]
fn test_threshold_gift_discounts_only_one_line() {
    let set = CampaignSet::new(vec![threshold_gift("gift", 0, "rolls", 1)]);
    let result = run(vec![line("r1", "rolls", 350), line("r2", "rolls", 350)], &set);
    assert_eq!(discounts(&result), vec![dec(349), dec(0)]);
}

// ==================== Priority ====================

#[test]
fn test_higher_priority_runs_first() {
    let set = CampaignSet::new(vec![
        threshold_gift("low", 0, "rolls", 200),
        threshold_gift("high", 0, "rolls", 0).with_priority(10),
    ]);
    let result = run(vec![line("r1", "rolls", 350)], &set);

    // Same type: the second gift cannot re-target the roll
    assert_eq!(result.lines[0].discount, dec(350));
    assert_eq!(result.applied_promo_names, vec!["high name"]);
}

#[test]
fn test_priority_ties_keep_configuration_order() {
    let set = CampaignSet::new(vec![
        threshold_gift("a", 0, "rolls", 200).with_priority(5),
        threshold_gift("b", 0, "rolls", 0).with_priority(5),
    ]);
    let result = run(vec![line("r1", "rolls", 350)], &set);
    assert_eq!(result.lines[0].discount, dec(150));
    assert_eq!(result.applied_promo_names, vec!["a name"]);
}

#[test]
fn test_order_by_priority_is_stable() {
    let campaigns = vec![
        threshold_gift("a", 0, "rolls", 0),
        threshold_gift("b", 0, "rolls", 0).with_priority(3),
        threshold_gift("c", 0, "rolls", 0),
        threshold_gift("d", 0, "rolls", 0).with_priority(3),
    ];
    let ids: Vec<&str> = order_by_priority(&campaigns)
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["b", "d", "a", "c"]);
}

// ==================== Stacking ====================

fn stacked_set(mode: StackingMode) -> CampaignSet {
    CampaignSet::new(vec![
        threshold_gift("gift", 0, "pizza", 600),
        nth_item("nth", 1, SelectionPolicy::Cheapest, 500),
    ])
    .with_settings(EngineSettings {
        stacking_mode: mode,
        ..EngineSettings::default()
    })
}

#[test]
fn test_cumulative_stacking_adds_discounts() {
    let result = run(pizzas(&[1000]), &stacked_set(StackingMode::Cumulative));

    assert_eq!(result.lines[0].discount, dec(900));
    assert_eq!(result.lines[0].promo_labels.len(), 2);
    assert_eq!(result.applied_promo_names, vec!["gift name", "nth name"]);
}

#[test]
fn test_best_price_stacking_keeps_single_best() {
    let result = run(pizzas(&[1000]), &stacked_set(StackingMode::BestPrice));

    assert_eq!(result.lines[0].discount, dec(500));
    assert_eq!(result.lines[0].promo_labels, vec!["reduced to 500"]);
    assert_eq!(result.applied_promo_names, vec!["nth name"]);
    assert_eq!(result.applied_campaigns[0].id, "gift");
    assert_eq!(result.applied_campaigns[0].status, AppliedStatus::Skipped);
    assert_eq!(result.applied_campaigns[1].status, AppliedStatus::Applied);
}

// ==================== Scoping ====================

#[test]
fn test_excluded_groups_are_invisible_to_matchers() {
    let set = CampaignSet::new(vec![
        nth_item("third", 3, SelectionPolicy::Cheapest, 0),
        threshold_gift("gift", 3000, "rolls", 0),
    ])
    .with_groups(vec![ProductGroup::fixed("premium", "Premium", vec!["pizza-0".into()])])
    .with_settings(EngineSettings {
        excluded_groups: vec!["premium".into()],
        ..EngineSettings::default()
    });
    let mut cart = pizzas(&[2500, 400, 450]);
    cart.push(line("r1", "rolls", 350));
    let result = run(cart, &set);

    // Only two visible pizzas: nth does not fire
    assert!(result.lines[..3].iter().all(|l| l.discount.is_zero()));
    // The excluded pizza still counts toward the subtotal
    assert_eq!(result.lines[3].discount, dec(350));
}

#[test]
fn test_group_matcher_targets_group_members() {
    let campaign = Campaign::new(
        "gift",
        "Gift",
        CampaignKind::ThresholdGift {
            min_amount: Decimal::ZERO,
            target_category: LineMatcher::group("soft"),
            target_price: Decimal::ZERO,
        },
    );
    let set = CampaignSet::new(vec![campaign])
        .with_groups(vec![ProductGroup::fixed("soft", "Soft", vec!["cola".into()])]);
    let result = run(vec![line("beer", "drinks", 300), line("cola", "drinks", 150)], &set);

    assert_eq!(discounts(&result), vec![dec(0), dec(150)]);
}

#[test]
fn test_unknown_group_disables_campaign() {
    let campaign = Campaign::new(
        "gift",
        "Gift",
        CampaignKind::ThresholdGift {
            min_amount: Decimal::ZERO,
            target_category: LineMatcher::group("missing"),
            target_price: Decimal::ZERO,
        },
    );
    let result = run(vec![line("cola", "drinks", 150)], &CampaignSet::new(vec![campaign]));
    assert!(result.lines[0].discount.is_zero());
    assert!(result.applied_campaigns.is_empty());
}

#[test]
fn test_paused_and_expired_campaigns_do_not_fire() {
    let mut expired = threshold_gift("expired", 0, "rolls", 0);
    expired.valid_until = Some(monday_noon().timestamp_millis() - 1);
    let set = CampaignSet::new(vec![
        threshold_gift("paused", 0, "rolls", 0).with_status(CampaignStatus::Paused),
        expired,
    ]);
    let result = run(vec![line("r1", "rolls", 350)], &set);
    assert!(result.lines[0].discount.is_zero());
}

#[test]
fn test_cart_label_replaces_generated_label() {
    let set = CampaignSet::new(vec![
        threshold_gift("gift", 0, "rolls", 0).with_cart_label("Birthday roll"),
    ]);
    let result = run(vec![line("r1", "rolls", 350)], &set);
    assert_eq!(result.lines[0].promo_labels, vec!["Birthday roll"]);
}

// ==================== Pipeline ====================

#[test]
fn test_full_pipeline_totals_and_points() {
    let accrual = Campaign::new(
        "loyal",
        "Loyalty",
        CampaignKind::LoyaltyAccrual {
            rate_percent: dec(10),
            exclude_fully_discounted: true,
        },
    );
    let set = CampaignSet::new(vec![threshold_gift("gift", 2500, "rolls", 1), accrual]);
    let result = run(vec![line("p1", "pizza", 2250), line("r1", "rolls", 350)], &set);

    assert_eq!(result.subtotal, dec(2600));
    assert_eq!(result.discount_total, dec(349));
    assert_eq!(result.cart_total, dec(2251));
    // Pizza earns 225, the gifted roll is excluded
    assert_eq!(result.points.total, 225);
    assert!(result.points.per_line[1].excluded);
    // Accrual campaigns never show up as applied discounts
    assert_eq!(result.applied_promo_names, vec!["gift name"]);
}

#[test]
fn test_input_cart_is_not_mutated() {
    let set = CampaignSet::new(vec![threshold_gift("gift", 0, "rolls", 0)]);
    let cart = CartSnapshot::new(vec![line("r1", "rolls", 350)]);
    let before = cart.clone();
    let _ = evaluate(&cart, &set, &monday_noon());
    assert_eq!(cart, before);
}
