//! Noise phase: job-board digests and "apply now" blasts.

use std::sync::LazyLock;

use super::keywords::KeywordSet;
use super::outcome::{AdvisoryContribution, ClassificationContribution, RuleOutcome};
use super::safety::HIGH_VALUE_KEYWORDS;
use super::{Rule, RuleContext, RulePhase};
use crate::model::{RuleId, SignalCategory};

pub const ADVERTISEMENT_WEIGHT: u8 = 10;
pub const NOISE_CONFIDENCE_DELTA: i8 = -20;

pub const NOISE_PHRASES: [&str; 7] = [
    "jobs for you",
    "recommended jobs",
    "top jobs",
    "new jobs",
    "hiring now",
    "don't miss",
    "apply now",
];

static NOISE: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::builtin(&NOISE_PHRASES));

static HIGH_VALUE: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::builtin(&HIGH_VALUE_KEYWORDS));

/// Flags bulk job-board mail as advertisement and lowers overall confidence.
///
/// Matches only when all three hold:
/// - the email comes from a known job board,
/// - it mentions none of the high-value keywords,
/// - it contains at least one noise phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobPlatformNoise;

impl JobPlatformNoise {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for JobPlatformNoise {
    fn id(&self) -> RuleId {
        RuleId::JobPlatformNoise
    }

    fn phase(&self) -> RulePhase {
        RulePhase::Noise
    }

    fn evaluate(&self, context: &RuleContext<'_>) -> RuleOutcome {
        let email = context.input;

        if !email.is_from_job_board() {
            return RuleOutcome::no_match(self.id());
        }

        let texts = [email.subject.as_str(), email.body_plain.as_str()];

        // High-value mail from a job board is never noise, even with a noise phrase.
        if HIGH_VALUE.matches_any(&texts) || !NOISE.matches_any(&texts) {
            return RuleOutcome::no_match(self.id());
        }

        RuleOutcome::matched(self.id())
            .with_classification(ClassificationContribution::suggest(
                SignalCategory::Advertisement,
                ADVERTISEMENT_WEIGHT,
            ))
            .with_advisory(AdvisoryContribution::adjust(NOISE_CONFIDENCE_DELTA))
    }
}
