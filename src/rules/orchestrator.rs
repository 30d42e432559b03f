//! Phased rule orchestrator.
//!
//! Runs every supplied rule exactly once. Rules are visited phase by phase
//! (Safety, Classification, Noise, Advisory); inside a phase they keep the
//! caller's order. Outcomes are returned untouched, with no filtering and no
//! interpretation.

use tracing::trace;

use super::outcome::RuleOutcome;
use super::{Rule, RuleContext, RulePhase};
use crate::model::NormalizedEmail;

/// Stateless orchestrator over a borrowed rule list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleOrchestrator;

impl RuleOrchestrator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `rules` against `email` and collect every outcome.
    pub fn evaluate(&self, email: &NormalizedEmail, rules: &[&dyn Rule]) -> Vec<RuleOutcome> {
        let mut outcomes = Vec::with_capacity(rules.len());

        for phase in RulePhase::ORDER {
            let context = RuleContext::new(email, phase);

            for rule in rules.iter().filter(|rule| rule.phase() == phase) {
                let outcome = rule.evaluate(&context);
                trace!(
                    id = %email.id,
                    phase = phase.label(),
                    rule = %outcome.rule_id,
                    match_state = ?outcome.match_state,
                    "Rule evaluated"
                );
                outcomes.push(outcome);
            }
        }

        outcomes
    }
}

/// Shorthand for `RuleOrchestrator::new().evaluate(email, rules)`.
pub fn evaluate_rules(email: &NormalizedEmail, rules: &[&dyn Rule]) -> Vec<RuleOutcome> {
    RuleOrchestrator::new().evaluate(email, rules)
}
