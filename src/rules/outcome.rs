//! What a single rule invocation hands back to the engine.
//!
//! An outcome never decides anything on its own. It carries three
//! independent channels (safety, classification, advisory) that only the
//! aggregator combines.

use serde::{Deserialize, Serialize};

use crate::model::{RuleId, SignalCategory};

/// Upper bound of a classification weight.
pub const MAX_CONFIDENCE_WEIGHT: u8 = 100;

/// Bound (in both directions) of an advisory confidence delta.
pub const MAX_CONFIDENCE_DELTA: i8 = 50;

/// Whether a rule matched, did not match, or declined to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    NoMatch,
    Match,
    /// Not applicable to this input; contributes nothing.
    Abstain,
}

// ── Safety ──────────────────────────────────────────────────────────

/// Tri-state opinion on one safety aspect.
///
/// Forms a lattice under [`SafetyAssertion::merge`]: `NoOpinion` is the
/// identity, `AssertSafe` absorbs `NoOpinion`, and `AssertUnsafe` absorbs
/// everything. Once unsafe, always unsafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyAssertion {
    #[default]
    NoOpinion,
    AssertSafe,
    AssertUnsafe,
}

impl SafetyAssertion {
    /// Least upper bound of two assertions. Commutative and associative.
    pub fn merge(self, other: SafetyAssertion) -> SafetyAssertion {
        use SafetyAssertion::*;

        match (self, other) {
            (AssertUnsafe, _) | (_, AssertUnsafe) => AssertUnsafe,
            (AssertSafe, _) | (_, AssertSafe) => AssertSafe,
            (NoOpinion, NoOpinion) => NoOpinion,
        }
    }

    /// Fold any number of assertions into one.
    pub fn merge_all<I>(assertions: I) -> SafetyAssertion
    where
        I: IntoIterator<Item = SafetyAssertion>,
    {
        assertions
            .into_iter()
            .fold(SafetyAssertion::NoOpinion, SafetyAssertion::merge)
    }

    pub fn is_unsafe(&self) -> bool {
        matches!(self, Self::AssertUnsafe)
    }
}

/// Safety opinions, one per aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SafetyContribution {
    /// `AssertUnsafe` means the email must not be auto-deleted.
    pub safe_to_delete: SafetyAssertion,
    /// `AssertUnsafe` means a human must review it.
    pub requires_review: SafetyAssertion,
}

impl SafetyContribution {
    pub const NO_OPINION: SafetyContribution = SafetyContribution {
        safe_to_delete: SafetyAssertion::NoOpinion,
        requires_review: SafetyAssertion::NoOpinion,
    };

    /// Protect the email on both aspects.
    pub const PROTECT: SafetyContribution = SafetyContribution {
        safe_to_delete: SafetyAssertion::AssertUnsafe,
        requires_review: SafetyAssertion::AssertUnsafe,
    };
}

// ── Classification ──────────────────────────────────────────────────

/// A rule's category suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ClassificationContribution {
    pub suggested_category: Option<SignalCategory>,
    /// Only meaningful when a category is suggested. `[0, 100]`.
    pub confidence_weight: u8,
}

impl ClassificationContribution {
    pub const NONE: ClassificationContribution = ClassificationContribution {
        suggested_category: None,
        confidence_weight: 0,
    };

    pub fn suggest(category: SignalCategory, weight: u8) -> Self {
        Self {
            suggested_category: Some(category),
            confidence_weight: weight.min(MAX_CONFIDENCE_WEIGHT),
        }
    }
}

// ── Advisory ────────────────────────────────────────────────────────

/// Global confidence adjustment and optional explanation hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AdvisoryContribution {
    /// `[-50, +50]`. Applied regardless of which category wins.
    pub confidence_delta: Option<i8>,
    pub explanation_rule: Option<RuleId>,
}

impl AdvisoryContribution {
    pub const NONE: AdvisoryContribution = AdvisoryContribution {
        confidence_delta: None,
        explanation_rule: None,
    };

    pub fn adjust(delta: i8) -> Self {
        Self {
            confidence_delta: Some(delta.clamp(-MAX_CONFIDENCE_DELTA, MAX_CONFIDENCE_DELTA)),
            explanation_rule: None,
        }
    }

    pub fn with_explanation(mut self, rule_id: RuleId) -> Self {
        self.explanation_rule = Some(rule_id);
        self
    }
}

// ── Outcome ─────────────────────────────────────────────────────────

/// Self-contained result of evaluating one rule against one email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule_id: RuleId,
    pub match_state: MatchState,
    pub safety: SafetyContribution,
    pub classification: ClassificationContribution,
    pub advisory: AdvisoryContribution,
}

impl RuleOutcome {
    /// A matched outcome with every channel empty; fill in with the `with_*` builders.
    pub fn matched(rule_id: RuleId) -> Self {
        Self::empty(rule_id, MatchState::Match)
    }

    pub fn no_match(rule_id: RuleId) -> Self {
        Self::empty(rule_id, MatchState::NoMatch)
    }

    pub fn abstain(rule_id: RuleId) -> Self {
        Self::empty(rule_id, MatchState::Abstain)
    }

    fn empty(rule_id: RuleId, match_state: MatchState) -> Self {
        Self {
            rule_id,
            match_state,
            safety: SafetyContribution::NO_OPINION,
            classification: ClassificationContribution::NONE,
            advisory: AdvisoryContribution::NONE,
        }
    }

    pub fn with_safety(mut self, safety: SafetyContribution) -> Self {
        self.safety = safety;
        self
    }

    pub fn with_classification(mut self, classification: ClassificationContribution) -> Self {
        self.classification = classification;
        self
    }

    pub fn with_advisory(mut self, advisory: AdvisoryContribution) -> Self {
        self.advisory = advisory;
        self
    }

    /// Category this outcome votes for, if it matched and suggested one.
    /// The weight is capped at [`MAX_CONFIDENCE_WEIGHT`].
    pub fn vote(&self) -> Option<(SignalCategory, u8)> {
        if self.match_state != MatchState::Match {
            return None;
        }
        let weight = self.classification.confidence_weight.min(MAX_CONFIDENCE_WEIGHT);
        self.classification
            .suggested_category
            .map(|category| (category, weight))
    }

    /// Advisory delta, held to `[-MAX_CONFIDENCE_DELTA, MAX_CONFIDENCE_DELTA]`
    /// even when the field was set directly.
    pub fn confidence_delta(&self) -> Option<i8> {
        self.advisory
            .confidence_delta
            .map(|delta| delta.clamp(-MAX_CONFIDENCE_DELTA, MAX_CONFIDENCE_DELTA))
    }
}
