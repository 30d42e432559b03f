//! Value types shared by the rules, the aggregator, and the engine boundary.
//!
//! Everything here is plain data: created per call, never mutated after
//! construction, and safe to send across threads.

pub mod email;
pub mod result;

pub use email::{NormalizedEmail, SourcePlatform};
pub use result::{
    ClassificationResult, Confidence, ExplanationMetadata, RuleId, RuleMatch, SafetyFlags,
    SignalCategory,
};
