//! Submission outcome state machine
//!
//! Each orchestrator owns one `SubmissionOutcome` and moves it through
//! `Idle -> Pending -> Success | Failure -> Idle`. Every attempt replaces the
//! previous outcome wholesale.

use serde::Serialize;
use std::fmt;

/// Why a submission attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Required input missing; no request was sent.
    Validation,
    /// The request never produced an HTTP response.
    Network,
    /// Non-2xx response.
    Server { status: u16 },
    /// 2xx response whose body did not match the expected shape.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Validation => f.write_str("validation"),
            FailureKind::Network => f.write_str("network"),
            FailureKind::Server { status } => write!(f, "server ({})", status),
            FailureKind::MalformedResponse => f.write_str("malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionOutcome<T> {
    Idle,
    Pending,
    Success(T),
    Failure {
        kind: FailureKind,
        message: String,
    },
}

/// Returned when a transition is not allowed from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("A submission is already in progress")]
pub struct AlreadyPending;

impl<T> Default for SubmissionOutcome<T> {
    fn default() -> Self {
        SubmissionOutcome::Idle
    }
}

impl<T> SubmissionOutcome<T> {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        SubmissionOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionOutcome::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionOutcome::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SubmissionOutcome::Failure { .. })
    }

    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            SubmissionOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Failure { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            SubmissionOutcome::Failure { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Transition into `Pending`. Rejected while a submission is in flight.
    pub fn begin(&mut self) -> Result<(), AlreadyPending> {
        if self.is_pending() {
            return Err(AlreadyPending);
        }
        *self = SubmissionOutcome::Pending;
        Ok(())
    }

    /// Return a terminal outcome to `Idle`. Has no effect on `Idle` or `Pending`.
    pub fn acknowledge(&mut self) -> bool {
        if self.is_terminal() {
            *self = SubmissionOutcome::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_from_any_non_pending_state() {
        let mut outcome: SubmissionOutcome<u32> = SubmissionOutcome::Idle;
        assert!(outcome.begin().is_ok());
        assert!(outcome.is_pending());

        let mut outcome = SubmissionOutcome::Success(1);
        assert!(outcome.begin().is_ok());
        assert!(outcome.success().is_none());

        let mut outcome: SubmissionOutcome<u32> =
            SubmissionOutcome::failure(FailureKind::Network, "down");
        assert!(outcome.begin().is_ok());
        assert!(outcome.failure_message().is_none());
    }

    #[test]
    fn begin_while_pending_is_rejected() {
        let mut outcome: SubmissionOutcome<u32> = SubmissionOutcome::Pending;
        assert_eq!(outcome.begin(), Err(AlreadyPending));
        assert!(outcome.is_pending());
    }

    #[test]
    fn acknowledge_only_clears_terminal_states() {
        let mut pending: SubmissionOutcome<u32> = SubmissionOutcome::Pending;
        assert!(!pending.acknowledge());
        assert!(pending.is_pending());

        let mut done = SubmissionOutcome::Success(3);
        assert!(done.acknowledge());
        assert!(done.is_idle());
    }

    #[test]
    fn failure_serializes_with_kind() {
        let outcome: SubmissionOutcome<u32> =
            SubmissionOutcome::failure(FailureKind::Server { status: 500 }, "GenAI quota exceeded");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["state"], "failure");
        assert_eq!(value["kind"]["kind"], "server");
        assert_eq!(value["kind"]["status"], 500);
        assert_eq!(value["message"], "GenAI quota exceeded");
    }
}
