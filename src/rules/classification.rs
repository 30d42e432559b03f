//! Classification phase: first-match keyword classifier.

use std::sync::LazyLock;

use super::keywords::KeywordSet;
use super::outcome::{ClassificationContribution, RuleOutcome};
use super::{Rule, RuleContext, RulePhase};
use crate::model::{RuleId, SignalCategory};

pub const OFFER_WEIGHT: u8 = 60;
pub const INTERVIEW_WEIGHT: u8 = 50;
pub const ASSIGNMENT_WEIGHT: u8 = 40;

struct Signal {
    keywords: KeywordSet,
    category: SignalCategory,
    weight: u8,
}

/// Checked strongest first; the first hit wins.
static SIGNALS: LazyLock<[Signal; 3]> = LazyLock::new(|| {
    [
        Signal {
            keywords: KeywordSet::builtin(&["offer"]),
            category: SignalCategory::Offer,
            weight: OFFER_WEIGHT,
        },
        Signal {
            keywords: KeywordSet::builtin(&["interview"]),
            category: SignalCategory::Interview,
            weight: INTERVIEW_WEIGHT,
        },
        Signal {
            keywords: KeywordSet::builtin(&["assignment"]),
            category: SignalCategory::Assignment,
            weight: ASSIGNMENT_WEIGHT,
        },
    ]
});

/// Suggests exactly one category per email based on subject/body keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCareerSignal;

impl BasicCareerSignal {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BasicCareerSignal {
    fn id(&self) -> RuleId {
        RuleId::BasicCareerSignal
    }

    fn phase(&self) -> RulePhase {
        RulePhase::Classification
    }

    fn evaluate(&self, context: &RuleContext<'_>) -> RuleOutcome {
        let email = context.input;
        let texts = [email.subject.as_str(), email.body_plain.as_str()];

        SIGNALS
            .iter()
            .find(|signal| signal.keywords.matches_any(&texts))
            .map(|signal| {
                RuleOutcome::matched(self.id()).with_classification(
                    ClassificationContribution::suggest(signal.category, signal.weight),
                )
            })
            .unwrap_or_else(|| RuleOutcome::no_match(self.id()))
    }
}
