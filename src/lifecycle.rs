//! Application lifecycle state machine.
//!
//! Derives where a job application stands from the categories of the emails
//! in its thread. Events must already be in chronological order; nothing
//! here sorts.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::SignalCategory;

/// Where an application stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Nothing career-relevant seen yet.
    #[default]
    Unknown,
    /// Contact made or an assignment received.
    Applied,
    /// At least one interview signal.
    Interviewing,
    /// An offer arrived.
    Offer,
    /// Rejected.
    Closed,
}

impl LifecycleState {
    /// State after observing one classified email.
    pub fn transition(self, category: SignalCategory) -> LifecycleState {
        use LifecycleState::*;
        use SignalCategory as C;

        match (self, category) {
            // Rejection closes from anywhere.
            (Unknown | Applied | Interviewing | Offer, C::Rejection) => Closed,

            (Unknown | Applied | Interviewing | Closed, C::Offer) => Offer,

            (Unknown | Applied | Closed, C::Interview) => Interviewing,
            (Unknown | Closed, C::Assignment | C::RecruiterOutreach) => Applied,

            (state, _) => state,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Applied => "applied",
            Self::Interviewing => "interviewing",
            Self::Offer => "offer",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

/// Whether `Closed` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePolicy {
    /// Once closed, later emails are ignored.
    #[default]
    ClosedIsTerminal,
    /// A later offer, interview, or outreach may reopen the thread.
    ClosedCanReopen,
}

impl LifecyclePolicy {
    fn stops_at(&self, state: LifecycleState) -> bool {
        *self == Self::ClosedIsTerminal && state.is_closed()
    }
}

impl std::str::FromStr for LifecyclePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" => Ok(Self::ClosedIsTerminal),
            "reopen" => Ok(Self::ClosedCanReopen),
            other => Err(format!("expected 'terminal' or 'reopen', got '{other}'")),
        }
    }
}

/// One classified email in a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub category: SignalCategory,
    pub timestamp_utc: i64,
}

/// Fold chronologically ordered events into a final state.
pub fn infer_lifecycle(events: &[LifecycleEvent], policy: LifecyclePolicy) -> LifecycleState {
    let mut state = LifecycleState::Unknown;

    for event in events {
        if policy.stops_at(state) {
            break;
        }
        state = state.transition(event.category);
    }

    state
}

/// Incremental form of [`infer_lifecycle`] for events that arrive one at a
/// time, with the state persisted between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleTracker {
    state: LifecycleState,
    policy: LifecyclePolicy,
    last_timestamp: Option<i64>,
}

impl LifecycleTracker {
    pub fn new(policy: LifecyclePolicy) -> Self {
        Self::resume(LifecycleState::Unknown, policy)
    }

    /// Continue from a previously stored state.
    pub fn resume(state: LifecycleState, policy: LifecyclePolicy) -> Self {
        Self {
            state,
            policy,
            last_timestamp: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Apply one event. Events older than the last applied one are rejected.
    pub fn apply(&mut self, event: LifecycleEvent) -> Result<LifecycleState, EngineError> {
        if self
            .last_timestamp
            .is_some_and(|last| event.timestamp_utc < last)
        {
            return Err(EngineError::PreconditionViolation);
        }
        self.last_timestamp = Some(event.timestamp_utc);

        if !self.policy.stops_at(self.state) {
            self.state = self.state.transition(event.category);
        }

        Ok(self.state)
    }
}
