//! Normalized email input: the only thing rules ever look at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform an email originated from, when the caller knows it.
///
/// There is no "unknown" variant; absence is `Option::None` on the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePlatform {
    #[serde(rename = "linkedin")]
    LinkedIn,
    Naukri,
    Indeed,
    Glassdoor,
    Gmail,
    Outlook,
    Yahoo,
}

impl SourcePlatform {
    /// Job boards whose bulk mail is treated as noise candidates.
    pub fn is_job_board(&self) -> bool {
        matches!(
            self,
            Self::LinkedIn | Self::Naukri | Self::Indeed | Self::Glassdoor
        )
    }
}

/// A single email, already parsed and cleaned up by the caller.
///
/// The engine never parses raw MIME. Text fields are expected to be
/// trimmed and HTML-free; the engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEmail {
    /// Stable caller-defined identifier (message-id, database key, ...). Must be non-empty.
    pub id: String,
    /// Normalized sender address. Must be non-empty.
    pub sender: String,
    /// Subject line, possibly empty.
    #[serde(default)]
    pub subject: String,
    /// Plain-text body, possibly empty or truncated.
    #[serde(default)]
    pub body_plain: String,
    /// To/CC/BCC addresses, if available.
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Seconds since the Unix epoch. Negative values are rejected by the engine.
    pub timestamp_utc: i64,
    /// Originating platform, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_platform: Option<SourcePlatform>,
}

impl NormalizedEmail {
    /// The timestamp as a calendar time, or `None` when it is negative or out of range.
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        if self.timestamp_utc < 0 {
            return None;
        }
        DateTime::from_timestamp(self.timestamp_utc, 0)
    }

    /// Whether the email came from a known job board.
    pub fn is_from_job_board(&self) -> bool {
        self.source_platform
            .is_some_and(|platform| platform.is_job_board())
    }
}
