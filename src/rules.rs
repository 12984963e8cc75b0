// 🏷️ Scoring Rules - Rules as Data
// Each rule is an independent pure function of a receipt; points are their sum

use crate::receipt::Receipt;
use chrono::{Datelike, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

pub type Points = u64;

/// A rule's contribution for one receipt
pub type RuleFn = fn(&Receipt) -> Points;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Clone, Copy)]
pub struct ScoringRule {
    /// Rule ID for tracking
    pub id: &'static str,

    /// Human-readable summary shown in breakdowns
    pub description: &'static str,

    pub apply: RuleFn,
}

impl std::fmt::Debug for ScoringRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringRule")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl ScoringRule {
    pub const fn new(id: &'static str, description: &'static str, apply: RuleFn) -> Self {
        ScoringRule { id, description, apply }
    }
}

/// The standard rule set, in reporting order
pub const DEFAULT_RULES: [ScoringRule; 7] = [
    ScoringRule::new(
        "retailer_name",
        "1 point per alphanumeric character in the retailer name",
        retailer_name,
    ),
    ScoringRule::new(
        "round_total",
        "50 points if the total is a whole dollar amount",
        round_total,
    ),
    ScoringRule::new(
        "quarter_total",
        "25 points if the total is a multiple of 0.25",
        quarter_total,
    ),
    ScoringRule::new("item_pairs", "5 points for every two items", item_pairs),
    ScoringRule::new(
        "item_descriptions",
        "ceil(price * 0.2) per item whose trimmed description length is a multiple of 3",
        item_descriptions,
    ),
    ScoringRule::new("odd_day", "6 points if the purchase day is odd", odd_day),
    ScoringRule::new(
        "afternoon",
        "10 points if purchased from 14:00 up to 16:00",
        afternoon,
    ),
];

// ============================================================================
// RULES
// ============================================================================

pub fn retailer_name(receipt: &Receipt) -> Points {
    receipt
        .retailer
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .count() as Points
}

pub fn round_total(receipt: &Receipt) -> Points {
    if receipt.total.fract().is_zero() {
        50
    } else {
        0
    }
}

pub fn quarter_total(receipt: &Receipt) -> Points {
    let quarter = Decimal::new(25, 2);
    if (receipt.total % quarter).is_zero() {
        25
    } else {
        0
    }
}

pub fn item_pairs(receipt: &Receipt) -> Points {
    (receipt.items.len() / 2) as Points * 5
}

pub fn item_descriptions(receipt: &Receipt) -> Points {
    receipt
        .items
        .iter()
        .filter(|item| item.trimmed_description_len() % 3 == 0)
        .map(|item| ceil_fifth(item.price))
        .fold(0, Points::saturating_add)
}

/// `ceil(price * 0.2)` without rounding the product.
///
/// Multiplying first rounds to 28 decimal places, which can drop a tiny
/// positive price to zero. Splitting off the remainder mod 5 keeps every
/// step exact. Prices are validated non-negative; very large ones saturate.
fn ceil_fifth(price: Decimal) -> Points {
    let five = Decimal::from(5);
    let remainder = price % five;
    let whole_fifths = ((price - remainder) / five).to_u64().unwrap_or(Points::MAX);

    if remainder.is_zero() {
        whole_fifths
    } else {
        whole_fifths.saturating_add(1)
    }
}

pub fn odd_day(receipt: &Receipt) -> Points {
    if receipt.purchase_date.day() % 2 == 1 {
        6
    } else {
        0
    }
}

pub fn afternoon(receipt: &Receipt) -> Points {
    if (14..16).contains(&receipt.purchase_time.hour()) {
        10
    } else {
        0
    }
}

// ============================================================================
// BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule_id: &'static str,
    pub description: &'static str,
    pub points: Points,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub total: Points,
    pub contributions: Vec<RuleContribution>,
}

impl PointsBreakdown {
    /// Contribution of a single rule, if it ran
    pub fn points_for(&self, rule_id: &str) -> Option<Points> {
        self.contributions
            .iter()
            .find(|c| c.rule_id == rule_id)
            .map(|c| c.points)
    }
}

// ============================================================================
// SCORING ENGINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    rules: Vec<ScoringRule>,
}

impl ScoringEngine {
    /// Engine with the standard rule set
    pub fn new() -> Self {
        ScoringEngine::from_rules(DEFAULT_RULES.to_vec())
    }

    pub fn from_rules(rules: Vec<ScoringRule>) -> Self {
        ScoringEngine { rules }
    }

    /// Append a rule; existing rules are untouched
    pub fn add_rule(&mut self, rule: ScoringRule) {
        self.rules.push(rule);
    }

    /// Sum of every rule's contribution
    pub fn score(&self, receipt: &Receipt) -> Points {
        self.rules
            .iter()
            .map(|rule| (rule.apply)(receipt))
            .fold(0, Points::saturating_add)
    }

    pub fn breakdown(&self, receipt: &Receipt) -> PointsBreakdown {
        let contributions: Vec<RuleContribution> = self
            .rules
            .iter()
            .map(|rule| RuleContribution {
                rule_id: rule.id,
                description: rule.description,
                points: (rule.apply)(receipt),
            })
            .collect();

        let total = contributions
            .iter()
            .map(|c| c.points)
            .fold(0, Points::saturating_add);

        PointsBreakdown { total, contributions }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
