use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle phases of one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    NotStarted,
    Reading,
    Aggregating,
    Finalizing,
    Done,
    Failed,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::NotStarted => "not_started",
            RunPhase::Reading => "reading",
            RunPhase::Aggregating => "aggregating",
            RunPhase::Finalizing => "finalizing",
            RunPhase::Done => "done",
            RunPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed)
    }
}

/// Status tag attached to each transition event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Failed(String),
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => f.write_str("success"),
            RunStatus::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// One structured event per driver state transition.
#[derive(Debug, Clone, Serialize)]
pub struct RunEvent {
    pub timestamp: DateTime<Utc>,
    pub engine: String,
    pub phase: RunPhase,
    pub status: RunStatus,
}

/// Observer of run lifecycle events. Observers see every transition,
/// including the terminal one.
pub trait RunObserver {
    fn on_transition(&mut self, event: &RunEvent);
}
