//! Domain error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Why a guarded transition was refused.
///
/// Every refusal is an expected, user-correctable outcome. None of these are
/// fatal, and all of them are reported to the initiating actor only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The target equals the current state, or the hand/slot is taken.
    StateConflict,
    /// A required holding/standing/open precondition is not satisfied.
    PreconditionUnmet,
    /// The access check failed.
    PermissionDenied,
    /// No free hand was available.
    ResourceExhausted,
}

impl FailureKind {
    /// Machine-readable code for this kind.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::StateConflict => "state_conflict",
            Self::PreconditionUnmet => "precondition_unmet",
            Self::PermissionDenied => "permission_denied",
            Self::ResourceExhausted => "resource_exhausted",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A refused transition together with the explanation shown to the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionFailure {
    /// The taxonomy bucket of the refusal.
    pub kind: FailureKind,
    /// Player-facing explanation.
    pub message: String,
}

impl TransitionFailure {
    /// Creates a failure of the given kind.
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransitionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An aggregate was not found.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A guarded transition was refused.
    #[error("transition rejected: {0}")]
    Rejected(TransitionFailure),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<TransitionFailure> for DomainError {
    fn from(failure: TransitionFailure) -> Self {
        Self::Rejected(failure)
    }
}
