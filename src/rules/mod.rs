//! Rule contract, outcome model, built-in rules, and the phased orchestrator.
//!
//! Every email flows through:
//! 1. `RuleOrchestrator::evaluate()`: each rule once, grouped by phase
//! 2. `aggregation::aggregate_outcomes()`: one result from many outcomes
//!
//! Rules are pure: no clock, no randomness, no logging, no shared state.

pub mod classification;
pub mod keywords;
pub mod noise;
pub mod orchestrator;
pub mod outcome;
pub mod safety;

use serde::{Deserialize, Serialize};

use crate::model::{NormalizedEmail, RuleId};

pub use classification::BasicCareerSignal;
pub use keywords::KeywordSet;
pub use noise::JobPlatformNoise;
pub use orchestrator::{RuleOrchestrator, evaluate_rules};
pub use outcome::{
    AdvisoryContribution, ClassificationContribution, MatchState, RuleOutcome, SafetyAssertion,
    SafetyContribution,
};
pub use safety::ProtectHighValueEmails;

/// Semantic phase a rule belongs to. Phases run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePhase {
    /// Decide what must never be deleted.
    Safety,
    /// Pick the career signal.
    Classification,
    /// Recognise promotional noise.
    Noise,
    /// Nudge confidence or add explanation hints.
    Advisory,
}

impl RulePhase {
    pub const ORDER: [RulePhase; 4] = [
        Self::Safety,
        Self::Classification,
        Self::Noise,
        Self::Advisory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Safety => "safety",
            Self::Classification => "classification",
            Self::Noise => "noise",
            Self::Advisory => "advisory",
        }
    }
}

/// Read-only view handed to each rule.
///
/// Rules see the input and the phase being run, never other rules' outcomes.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub input: &'a NormalizedEmail,
    pub phase: RulePhase,
}

impl<'a> RuleContext<'a> {
    pub fn new(input: &'a NormalizedEmail, phase: RulePhase) -> Self {
        Self { input, phase }
    }
}

/// A single deterministic rule.
///
/// Implementations must be pure functions of the context and must not fail;
/// a rule that does not apply returns an abstaining outcome.
pub trait Rule: Send + Sync {
    /// Stable identifier, constant for the lifetime of the rule.
    fn id(&self) -> RuleId;

    /// Phase this rule is scheduled in. Defaults to classification.
    fn phase(&self) -> RulePhase {
        RulePhase::Classification
    }

    /// Evaluate the rule against one email.
    fn evaluate(&self, context: &RuleContext<'_>) -> RuleOutcome;
}

/// The rules shipped with the engine, in their canonical order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ProtectHighValueEmails::new()),
        Box::new(BasicCareerSignal::new()),
        Box::new(JobPlatformNoise::new()),
    ]
}
