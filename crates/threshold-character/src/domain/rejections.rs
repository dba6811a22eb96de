//! Reasons a character refuses a transition.

use thiserror::Error;
use threshold_core::error::{FailureKind, TransitionFailure};

use super::posture::Posture;

/// Why a posture change was refused. The only cause is already being there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("You are already {}.", .0.adjective())]
pub struct PostureRejection(pub Posture);

impl From<PostureRejection> for TransitionFailure {
    fn from(rejection: PostureRejection) -> Self {
        TransitionFailure::new(FailureKind::StateConflict, rejection.to_string())
    }
}

/// Why an actor may not move between locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MovementRejection {
    /// The actor is sitting, kneeling or lying.
    #[error("You must be standing to move.")]
    NotStanding,
}

impl From<MovementRejection> for TransitionFailure {
    fn from(rejection: MovementRejection) -> Self {
        TransitionFailure::new(FailureKind::PreconditionUnmet, rejection.to_string())
    }
}
