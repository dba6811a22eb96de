//! Reasons a doorway refuses a transition or a traversal.

use thiserror::Error;
use threshold_core::error::{FailureKind, TransitionFailure};
use threshold_core::text::capitalize_first;

/// Why a door could not be opened or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DoorRejection {
    /// Opening a door that is open.
    #[error("It's already open.")]
    AlreadyOpen,
    /// Opening a door that is locked.
    #[error("You can't open it, because it's locked.")]
    Locked,
    /// Closing a door that is closed or locked.
    #[error("It's already closed.")]
    AlreadyClosed,
    /// The actor is not standing beside the leaf.
    #[error("You don't see that here.")]
    OutOfReach,
}

impl From<DoorRejection> for TransitionFailure {
    fn from(rejection: DoorRejection) -> Self {
        let kind = match rejection {
            DoorRejection::AlreadyOpen | DoorRejection::AlreadyClosed => {
                FailureKind::StateConflict
            }
            DoorRejection::Locked | DoorRejection::OutOfReach => FailureKind::PreconditionUnmet,
        };
        TransitionFailure::new(kind, rejection.to_string())
    }
}

/// Message used when access control refuses a traversal and the leaf has no
/// message of its own.
pub const GENERIC_TRAVERSE_ERROR: &str = "You cannot go there.";

/// Message used when the actor is not standing beside the door.
pub const OUT_OF_REACH: &str = "You don't see that here.";

/// Why an actor could not pass through a door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalRejection {
    /// The actor is not standing beside the leaf.
    OutOfReach,
    /// The doorway is closed or locked.
    Closed,
    /// Access control refused; carries the leaf's custom message, if any.
    Denied(Option<String>),
}

impl TraversalRejection {
    /// Builds the player-facing failure. `door_name` is the leaf's name as
    /// the actor sees it.
    #[must_use]
    pub fn into_failure(self, door_name: &str) -> TransitionFailure {
        match self {
            Self::OutOfReach => {
                TransitionFailure::new(FailureKind::PreconditionUnmet, OUT_OF_REACH.to_owned())
            }
            Self::Closed => TransitionFailure::new(
                FailureKind::PreconditionUnmet,
                capitalize_first(&format!("{door_name} is closed.")),
            ),
            Self::Denied(custom) => TransitionFailure::new(
                FailureKind::PermissionDenied,
                custom.unwrap_or_else(|| GENERIC_TRAVERSE_ERROR.to_owned()),
            ),
        }
    }
}
