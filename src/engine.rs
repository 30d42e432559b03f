//! Engine facade: the one entry point callers need.
//!
//! Validates the input, runs the rule set through the orchestrator, and
//! hands the outcomes to the aggregator.

use tracing::debug;

use crate::aggregation::aggregate_outcomes;
use crate::error::EngineError;
use crate::model::{ClassificationResult, NormalizedEmail};
use crate::rules::{Rule, RuleOrchestrator, builtin_rules};

/// Semantic version of the engine's public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ApiVersion {
    /// `major << 16 | minor << 8 | patch`.
    pub fn packed(&self) -> u32 {
        (u32::from(self.major) << 16) | (u32::from(self.minor) << 8) | u32::from(self.patch)
    }

    /// Only a major bump breaks callers.
    pub fn is_compatible_with(&self, major: u8) -> bool {
        self.major == major
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

pub const API_VERSION: ApiVersion = ApiVersion {
    major: 1,
    minor: 0,
    patch: 0,
};

/// Deterministic classifier over a fixed rule set.
///
/// Holds no mutable state; share it freely across threads.
pub struct Engine {
    rules: Vec<Box<dyn Rule>>,
    orchestrator: RuleOrchestrator,
}

impl Engine {
    /// Engine with the built-in rules.
    pub fn new() -> Self {
        Self::with_rules(builtin_rules())
    }

    /// Engine with a caller-chosen rule set. May be empty.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            rules,
            orchestrator: RuleOrchestrator::new(),
        }
    }

    /// Classify one email.
    ///
    /// Validation failures are returned before any rule runs.
    pub fn classify(&self, email: &NormalizedEmail) -> Result<ClassificationResult, EngineError> {
        validate(email)?;

        let rules: Vec<&dyn Rule> = self.rules.iter().map(|rule| rule.as_ref()).collect();
        let outcomes = self.orchestrator.evaluate(email, &rules);

        let result = if outcomes.is_empty() {
            ClassificationResult::conservative_unknown()
        } else {
            aggregate_outcomes(&outcomes)
        };

        debug!(
            id = %email.id,
            category = %result.category,
            confidence = result.confidence.value(),
            safe_to_delete = result.safety.safe_to_delete,
            requires_review = result.safety.requires_review,
            primary_rule = ?result.explanation.primary_rule,
            "Email classified"
        );

        Ok(result)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<_> = self.rules.iter().map(|rule| rule.id()).collect();
        f.debug_struct("Engine").field("rules", &ids).finish()
    }
}

fn validate(email: &NormalizedEmail) -> Result<(), EngineError> {
    if email.sender.is_empty() {
        return Err(EngineError::EmptySender);
    }
    if email.id.is_empty() {
        return Err(EngineError::EmptyId);
    }
    if email.timestamp_utc < 0 {
        return Err(EngineError::MalformedTimestamp);
    }
    Ok(())
}
