//! Safety phase: keep high-value career mail away from automatic deletion.

use std::sync::LazyLock;

use super::keywords::KeywordSet;
use super::outcome::{RuleOutcome, SafetyContribution};
use super::{Rule, RuleContext, RulePhase};
use crate::model::RuleId;

/// Phrases that mark an email as too valuable to lose.
pub const HIGH_VALUE_KEYWORDS: [&str; 3] = ["offer", "interview", "assignment"];

static HIGH_VALUE: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::builtin(&HIGH_VALUE_KEYWORDS));

/// Asserts "unsafe to delete" and "requires review" whenever the subject or
/// body mentions an offer, an interview, or an assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtectHighValueEmails;

impl ProtectHighValueEmails {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ProtectHighValueEmails {
    fn id(&self) -> RuleId {
        RuleId::SafetyHighValueEmail
    }

    fn phase(&self) -> RulePhase {
        RulePhase::Safety
    }

    fn evaluate(&self, context: &RuleContext<'_>) -> RuleOutcome {
        let email = context.input;

        if HIGH_VALUE.matches_any(&[email.subject.as_str(), email.body_plain.as_str()]) {
            return RuleOutcome::matched(self.id()).with_safety(SafetyContribution::PROTECT);
        }

        RuleOutcome::no_match(self.id())
    }
}
