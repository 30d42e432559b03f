//! Error types for the career signal engine.

/// Top-level error type for everything outside the pure core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),
}

// ── Engine ──────────────────────────────────────────────────────────

/// Failure band of an [`EngineError`], derivable from the numeric code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorBand {
    /// 1–49: the caller handed in something malformed.
    InvalidInput,
    /// 50–99: well-formed input the engine does not handle.
    UnsupportedInput,
    /// 100–149: the engine broke one of its own invariants.
    InternalInvariant,
    /// 150–199: the engine was driven in a way it does not allow.
    EngineMisuse,
}

impl ErrorBand {
    /// Band a raw code falls into, or `None` for 0 and anything above 199.
    pub fn of_code(code: u8) -> Option<ErrorBand> {
        match code {
            1..=49 => Some(Self::InvalidInput),
            50..=99 => Some(Self::UnsupportedInput),
            100..=149 => Some(Self::InternalInvariant),
            150..=199 => Some(Self::EngineMisuse),
            _ => None,
        }
    }
}

/// Errors returned across the engine boundary.
///
/// Codes are stable and part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[repr(u8)]
pub enum EngineError {
    #[error("invalid input")]
    InvalidInput = 1,

    #[error("sender is empty")]
    EmptySender = 2,

    #[error("email id is empty")]
    EmptyId = 3,

    #[error("timestamp is malformed")]
    MalformedTimestamp = 4,

    #[error("unsupported input")]
    UnsupportedInput = 50,

    #[error("unsupported source platform")]
    UnsupportedPlatform = 51,

    #[error("unsupported text encoding")]
    UnsupportedEncoding = 52,

    #[error("internal invariant violated")]
    InternalInvariantViolation = 100,

    #[error("rule evaluation failed")]
    RuleEvaluationFailure = 101,

    #[error("precondition violated")]
    PreconditionViolation = 150,

    #[error("invalid engine state")]
    InvalidState = 151,
}

impl EngineError {
    const ALL: [EngineError; 11] = [
        Self::InvalidInput,
        Self::EmptySender,
        Self::EmptyId,
        Self::MalformedTimestamp,
        Self::UnsupportedInput,
        Self::UnsupportedPlatform,
        Self::UnsupportedEncoding,
        Self::InternalInvariantViolation,
        Self::RuleEvaluationFailure,
        Self::PreconditionViolation,
        Self::InvalidState,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<EngineError> {
        Self::ALL.into_iter().find(|error| error.code() == code)
    }

    pub fn band(&self) -> ErrorBand {
        match self {
            Self::InvalidInput | Self::EmptySender | Self::EmptyId | Self::MalformedTimestamp => {
                ErrorBand::InvalidInput
            }
            Self::UnsupportedInput | Self::UnsupportedPlatform | Self::UnsupportedEncoding => {
                ErrorBand::UnsupportedInput
            }
            Self::InternalInvariantViolation | Self::RuleEvaluationFailure => {
                ErrorBand::InternalInvariant
            }
            Self::PreconditionViolation | Self::InvalidState => ErrorBand::EngineMisuse,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.band() == ErrorBand::InvalidInput
    }

    pub fn is_unsupported_input(&self) -> bool {
        self.band() == ErrorBand::UnsupportedInput
    }

    pub fn is_internal(&self) -> bool {
        self.band() == ErrorBand::InternalInvariant
    }

    pub fn is_misuse(&self) -> bool {
        self.band() == ErrorBand::EngineMisuse
    }
}

// ── Ambient ─────────────────────────────────────────────────────────

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Replay input errors.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(EngineError::InvalidInput.code(), 1);
        assert_eq!(EngineError::EmptySender.code(), 2);
        assert_eq!(EngineError::EmptyId.code(), 3);
        assert_eq!(EngineError::MalformedTimestamp.code(), 4);
        assert_eq!(EngineError::UnsupportedInput.code(), 50);
        assert_eq!(EngineError::UnsupportedPlatform.code(), 51);
        assert_eq!(EngineError::UnsupportedEncoding.code(), 52);
        assert_eq!(EngineError::InternalInvariantViolation.code(), 100);
        assert_eq!(EngineError::RuleEvaluationFailure.code(), 101);
        assert_eq!(EngineError::PreconditionViolation.code(), 150);
        assert_eq!(EngineError::InvalidState.code(), 151);
    }

    #[test]
    fn band_matches_code_range() {
        for error in EngineError::ALL {
            assert_eq!(ErrorBand::of_code(error.code()), Some(error.band()), "{error:?}");
        }
    }

    #[test]
    fn code_round_trips() {
        for error in EngineError::ALL {
            assert_eq!(EngineError::from_code(error.code()), Some(error));
        }
        assert_eq!(EngineError::from_code(0), None);
        assert_eq!(EngineError::from_code(5), None);
        assert_eq!(EngineError::from_code(200), None);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(ErrorBand::of_code(0), None);
        assert_eq!(ErrorBand::of_code(49), Some(ErrorBand::InvalidInput));
        assert_eq!(ErrorBand::of_code(50), Some(ErrorBand::UnsupportedInput));
        assert_eq!(ErrorBand::of_code(99), Some(ErrorBand::UnsupportedInput));
        assert_eq!(ErrorBand::of_code(100), Some(ErrorBand::InternalInvariant));
        assert_eq!(ErrorBand::of_code(150), Some(ErrorBand::EngineMisuse));
        assert_eq!(ErrorBand::of_code(199), Some(ErrorBand::EngineMisuse));
        assert_eq!(ErrorBand::of_code(200), None);
    }

    #[test]
    fn predicates_follow_band() {
        assert!(EngineError::EmptySender.is_invalid_input());
        assert!(EngineError::UnsupportedEncoding.is_unsupported_input());
        assert!(EngineError::RuleEvaluationFailure.is_internal());
        assert!(EngineError::InvalidState.is_misuse());
        assert!(!EngineError::InvalidState.is_invalid_input());
    }

    #[test]
    fn engine_error_converts_into_top_level() {
        let error: Error = EngineError::EmptyId.into();
        assert!(matches!(error, Error::Engine(EngineError::EmptyId)));
        assert_eq!(error.to_string(), "Engine error: email id is empty");
    }
}
