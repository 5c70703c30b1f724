//! Campaign Matcher
//!
//! Logic for matching campaigns to cart lines and checking time validity.

use chrono::{Datelike, NaiveDateTime, Timelike};
use shared::models::{Campaign, CampaignKind, CartLine, HourRange, LineMatcher};
use std::collections::BTreeSet;

use super::context::EvaluationContext;
use crate::marketing::GroupMembers;

/// Check if a matcher selects the line, by category or by group membership
pub fn matches_line(matcher: &LineMatcher, line: &CartLine, groups: &GroupMembers) -> bool {
    match matcher {
        LineMatcher::Category(category) => line.category == *category,
        LineMatcher::Group { group } => groups.contains(group, line),
    }
}

/// Weekday index with 0 = Sunday
pub fn weekday_index(now: &NaiveDateTime) -> u8 {
    // num_days_from_sunday is always < 7
    now.weekday().num_days_from_sunday() as u8
}

/// Check the weekday set and the `[start, end)` hour window
pub fn is_in_window(weekdays: &BTreeSet<u8>, hour_range: &HourRange, now: &NaiveDateTime) -> bool {
    weekdays.contains(&weekday_index(now)) && hour_range.contains(now.hour())
}

/// Check if a campaign may fire at all in this context:
/// active status, validity window and, for combos, the weekday/hour window.
pub fn is_campaign_live(campaign: &Campaign, ctx: &EvaluationContext) -> bool {
    if !campaign.is_active() {
        return false;
    }
    if !campaign.is_within_validity(ctx.timestamp_millis()) {
        return false;
    }
    match &campaign.kind {
        CampaignKind::WeekdayCombo {
            weekdays,
            hour_range,
            ..
        } => is_in_window(weekdays, hour_range, &ctx.now),
        _ => true,
    }
}
