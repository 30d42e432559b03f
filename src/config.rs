//! Configuration types.

use crate::error::ConfigError;
use crate::lifecycle::LifecyclePolicy;

const LOG_VAR: &str = "CAREER_SIGNAL_LOG";
const POLICY_VAR: &str = "CAREER_SIGNAL_LIFECYCLE_POLICY";
const PRETTY_VAR: &str = "CAREER_SIGNAL_PRETTY";

/// Runtime configuration for the CLI, built from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Policy for folding thread lifecycles during replay.
    pub lifecycle_policy: LifecyclePolicy,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            lifecycle_policy: LifecyclePolicy::ClosedIsTerminal,
            pretty: false,
        }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_filter = lookup(LOG_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_filter);

        let lifecycle_policy = match lookup(POLICY_VAR) {
            Some(raw) => raw.parse::<LifecyclePolicy>().map_err(|message| ConfigError::InvalidValue {
                key: POLICY_VAR.to_string(),
                message,
            })?,
            None => defaults.lifecycle_policy,
        };

        let pretty = lookup(PRETTY_VAR)
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.pretty);

        Ok(Self {
            log_filter,
            lifecycle_policy,
            pretty,
        })
    }
}
