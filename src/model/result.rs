//! Classification output types.

use serde::{Deserialize, Serialize};

// ── Signal category ─────────────────────────────────────────────────

/// Career signal an email carries. Exactly one applies per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    Unknown,
    Offer,
    Rejection,
    Interview,
    Assignment,
    RecruiterOutreach,
    Advertisement,
}

impl SignalCategory {
    /// Number of categories, for fixed-size per-category tables.
    pub const COUNT: usize = 7;

    /// Every category in declaration order.
    pub const ALL: [SignalCategory; Self::COUNT] = [
        Self::Unknown,
        Self::Offer,
        Self::Rejection,
        Self::Interview,
        Self::Assignment,
        Self::RecruiterOutreach,
        Self::Advertisement,
    ];

    /// Stable slot of this category in a `[_; COUNT]` table.
    pub fn index(&self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Offer => 1,
            Self::Rejection => 2,
            Self::Interview => 3,
            Self::Assignment => 4,
            Self::RecruiterOutreach => 5,
            Self::Advertisement => 6,
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Offer => "offer",
            Self::Rejection => "rejection",
            Self::Interview => "interview",
            Self::Assignment => "assignment",
            Self::RecruiterOutreach => "recruiter_outreach",
            Self::Advertisement => "advertisement",
        }
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Confidence ──────────────────────────────────────────────────────

/// Rule-based certainty in `[0, 100]`. Not a probability.
///
/// Serialized as a bare number; deserializing anything above 100 fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const ZERO: Confidence = Confidence(0);
    pub const MAX: Confidence = Confidence(100);

    /// Clamp an arbitrary signed sum into range.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Confidence {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX.0 {
            return Err(format!("confidence {value} is above {}", Self::MAX.0));
        }
        Ok(Self(value))
    }
}

impl From<Confidence> for u8 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

// ── Safety flags ────────────────────────────────────────────────────

/// Downstream guard rails for destructive actions on the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SafetyFlags {
    /// When false, the email must not be deleted or archived automatically.
    pub safe_to_delete: bool,
    /// When true, a human should look before anything destructive happens.
    pub requires_review: bool,
}

impl SafetyFlags {
    /// The posture used when nothing could be evaluated at all.
    pub const CONSERVATIVE: SafetyFlags = SafetyFlags {
        safe_to_delete: false,
        requires_review: true,
    };
}

// ── Explanation ─────────────────────────────────────────────────────

/// Stable identifier of a rule, used in explanations and for tie-breaking.
///
/// Declaration order is the ordinal order: when two contributing rules carry
/// the same weight, the lower ordinal is listed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum RuleId {
    SubjectKeywordOffer = 1,
    SubjectKeywordRejection = 2,
    SubjectKeywordInterview = 3,
    SenderDomainJobBoard = 4,
    SenderDomainRecruiter = 5,
    BodyPatternOffer = 6,
    BodyPatternRejection = 7,
    BodyPatternInterview = 8,
    PlatformLinkedIn = 9,
    PlatformNaukri = 10,
    PlatformIndeed = 11,
    NoisePatternAdvertisement = 12,
    NoisePatternMassEmail = 13,
    FallbackUnknown = 14,
    SafetyHighValueEmail = 15,
    BasicCareerSignal = 16,
    JobPlatformNoise = 17,
}

impl RuleId {
    pub fn ordinal(&self) -> u16 {
        *self as u16
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One rule that contributed to the winning category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleMatch {
    pub rule_id: RuleId,
    /// Weight the rule put behind the winning category, in `[0, 100]`.
    pub weight: u8,
}

/// Machine-readable account of how a result was reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExplanationMetadata {
    /// Contributors, heaviest first, ties by rule ordinal.
    pub matched_rules: Vec<RuleMatch>,
    /// First entry of `matched_rules`, if any.
    pub primary_rule: Option<RuleId>,
    /// Number of rule outcomes that were considered.
    pub rules_evaluated: usize,
}

// ── Classification result ───────────────────────────────────────────

/// Final, immutable verdict for one email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: SignalCategory,
    pub confidence: Confidence,
    pub safety: SafetyFlags,
    pub explanation: ExplanationMetadata,
}

impl ClassificationResult {
    /// Result returned when no rule produced an outcome: unknown, no
    /// confidence, and protected from deletion.
    pub fn conservative_unknown() -> Self {
        Self {
            category: SignalCategory::Unknown,
            confidence: Confidence::ZERO,
            safety: SafetyFlags::CONSERVATIVE,
            explanation: ExplanationMetadata {
                matched_rules: Vec::new(),
                primary_rule: None,
                rules_evaluated: 0,
            },
        }
    }
}
