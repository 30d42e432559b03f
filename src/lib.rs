//! Career Signal: deterministic, rule-based classification of career emails.
//!
//! ```no_run
//! use career_signal::{Engine, NormalizedEmail};
//!
//! let engine = Engine::new();
//! let email = NormalizedEmail {
//!     id: "msg-1".into(),
//!     sender: "talent@acme.example".into(),
//!     subject: "Your offer letter".into(),
//!     body_plain: String::new(),
//!     recipients: vec![],
//!     timestamp_utc: 1_700_000_000,
//!     source_platform: None,
//! };
//! let result = engine.classify(&email)?;
//! assert!(!result.safety.safe_to_delete);
//! # Ok::<(), career_signal::EngineError>(())
//! ```

pub mod aggregation;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod replay;
pub mod rules;
pub mod store;

pub use aggregation::{CATEGORY_PRIORITY, aggregate_outcomes};
pub use engine::{API_VERSION, ApiVersion, Engine};
pub use error::{EngineError, ErrorBand, Error, Result};
pub use lifecycle::{
    LifecycleEvent, LifecyclePolicy, LifecycleState, LifecycleTracker, infer_lifecycle,
};
pub use model::{
    ClassificationResult, Confidence, ExplanationMetadata, NormalizedEmail, RuleId, RuleMatch,
    SafetyFlags, SignalCategory, SourcePlatform,
};
pub use rules::{Rule, RuleContext, RuleOutcome, RulePhase, evaluate_rules};
