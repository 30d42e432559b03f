//! Folds many rule outcomes into one `ClassificationResult`.
//!
//! The aggregator is the only place where the three outcome channels meet:
//! - safety assertions are merged per aspect through the lattice,
//! - classification weights are summed per category and a winner picked by
//!   `CATEGORY_PRIORITY`,
//! - advisory deltas shift the final confidence.

use tracing::debug;

use crate::model::{
    ClassificationResult, Confidence, ExplanationMetadata, RuleMatch, SafetyFlags, SignalCategory,
};
use crate::rules::outcome::{RuleOutcome, SafetyAssertion};

/// Tie-break order, strongest signal first. A later category only wins with
/// a strictly larger weight total.
pub const CATEGORY_PRIORITY: [SignalCategory; SignalCategory::COUNT] = [
    SignalCategory::Offer,
    SignalCategory::Interview,
    SignalCategory::Assignment,
    SignalCategory::RecruiterOutreach,
    SignalCategory::Rejection,
    SignalCategory::Advertisement,
    SignalCategory::Unknown,
];

/// Aggregate outcomes into a single verdict. Never fails.
///
/// An empty or all-abstaining slice yields `Unknown` with zero confidence and
/// permissive safety flags; the engine substitutes the conservative result
/// for the empty case before getting here.
pub fn aggregate_outcomes(outcomes: &[RuleOutcome]) -> ClassificationResult {
    let safety = merge_safety(outcomes);

    let mut totals = [0u32; SignalCategory::COUNT];
    for (category, weight) in outcomes.iter().filter_map(RuleOutcome::vote) {
        totals[category.index()] += u32::from(weight);
    }

    let (category, _) = CATEGORY_PRIORITY.iter().fold(
        (SignalCategory::Unknown, 0u32),
        |(best, best_total), candidate| {
            let total = totals[candidate.index()];
            if total > best_total {
                (*candidate, total)
            } else {
                (best, best_total)
            }
        },
    );

    let mut matched_rules: Vec<RuleMatch> = outcomes
        .iter()
        .filter_map(|outcome| match outcome.vote() {
            Some((voted, weight)) if voted == category => {
                Some(RuleMatch {
                    rule_id: outcome.rule_id,
                    weight,
                })
            }
            _ => None,
        })
        .collect();
    matched_rules.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.rule_id.ordinal().cmp(&b.rule_id.ordinal()))
    });

    let contributed: i64 = matched_rules.iter().map(|m| i64::from(m.weight)).sum();
    let adjusted: i64 = outcomes
        .iter()
        .filter_map(RuleOutcome::confidence_delta)
        .map(i64::from)
        .sum();
    let confidence = Confidence::clamped(contributed + adjusted);

    let primary_rule = matched_rules.first().map(|m| m.rule_id);

    debug!(
        category = %category,
        confidence = confidence.value(),
        safe_to_delete = safety.safe_to_delete,
        requires_review = safety.requires_review,
        contributors = matched_rules.len(),
        rules_evaluated = outcomes.len(),
        "Outcomes aggregated"
    );

    ClassificationResult {
        category,
        confidence,
        safety,
        explanation: ExplanationMetadata {
            matched_rules,
            primary_rule,
            rules_evaluated: outcomes.len(),
        },
    }
}

/// Per-aspect lattice fold. Any `AssertUnsafe` protects the email on that
/// aspect regardless of how many other rules asserted safe.
fn merge_safety(outcomes: &[RuleOutcome]) -> SafetyFlags {
    let delete = SafetyAssertion::merge_all(outcomes.iter().map(|o| o.safety.safe_to_delete));
    let review = SafetyAssertion::merge_all(outcomes.iter().map(|o| o.safety.requires_review));

    SafetyFlags {
        safe_to_delete: !delete.is_unsafe(),
        requires_review: review.is_unsafe(),
    }
}
