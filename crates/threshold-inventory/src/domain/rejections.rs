//! Reasons the inventory refuses a transition.
//!
//! The `Display` text of each variant is exactly what the actor is told.

use thiserror::Error;
use threshold_core::error::{FailureKind, TransitionFailure};

/// Why an item could not be worn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WearRejection {
    /// The item already sits on its slot.
    #[error("You're already wearing that.")]
    AlreadyWearing,
    /// The item is not in either hand.
    #[error("You have to be holding something to wear it.")]
    NotHolding,
    /// The item has no wear slot.
    #[error("You can't wear that.")]
    NotWearable,
    /// A different item occupies the slot.
    #[error("You're already wearing something else there.")]
    SlotOccupied,
}

impl From<WearRejection> for TransitionFailure {
    fn from(rejection: WearRejection) -> Self {
        let kind = match rejection {
            WearRejection::AlreadyWearing | WearRejection::SlotOccupied => {
                FailureKind::StateConflict
            }
            WearRejection::NotHolding | WearRejection::NotWearable => {
                FailureKind::PreconditionUnmet
            }
        };
        TransitionFailure::new(kind, rejection.to_string())
    }
}

/// Why a worn item could not be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RemoveRejection {
    /// The item is not on any of this actor's slots.
    #[error("You aren't wearing that.")]
    NotWearing,
    /// Both hands are full.
    #[error("You don't have a free hand to hold it in.")]
    NoFreeHand,
}

impl From<RemoveRejection> for TransitionFailure {
    fn from(rejection: RemoveRejection) -> Self {
        let kind = match rejection {
            RemoveRejection::NotWearing => FailureKind::PreconditionUnmet,
            RemoveRejection::NoFreeHand => FailureKind::ResourceExhausted,
        };
        TransitionFailure::new(kind, rejection.to_string())
    }
}

/// Why an item could not be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickUpRejection {
    /// The item is already held or worn by this actor.
    #[error("You're already carrying that.")]
    AlreadyCarrying,
    /// Both hands are full.
    #[error("Your hands are full.")]
    HandsFull,
    /// The item is not lying where the actor stands.
    #[error("You don't see that here.")]
    NotHere,
}

impl From<PickUpRejection> for TransitionFailure {
    fn from(rejection: PickUpRejection) -> Self {
        let kind = match rejection {
            PickUpRejection::AlreadyCarrying => FailureKind::StateConflict,
            PickUpRejection::HandsFull => FailureKind::ResourceExhausted,
            PickUpRejection::NotHere => FailureKind::PreconditionUnmet,
        };
        TransitionFailure::new(kind, rejection.to_string())
    }
}

/// Why an item could not be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DropRejection {
    /// The item is worn and must come off first.
    #[error("You have to remove it first.")]
    Worn,
    /// The item is not in either hand.
    #[error("You aren't holding that.")]
    NotHolding,
}

impl From<DropRejection> for TransitionFailure {
    fn from(rejection: DropRejection) -> Self {
        TransitionFailure::new(FailureKind::PreconditionUnmet, rejection.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_conflicts_are_state_conflicts() {
        let failure: TransitionFailure = WearRejection::SlotOccupied.into();
        assert_eq!(failure.kind, FailureKind::StateConflict);
        assert_eq!(failure.message, "You're already wearing something else there.");
    }

    #[test]
    fn test_no_free_hand_is_resource_exhausted() {
        let failure: TransitionFailure = RemoveRejection::NoFreeHand.into();
        assert_eq!(failure.kind, FailureKind::ResourceExhausted);
        assert_eq!(failure.message, "You don't have a free hand to hold it in.");
    }

    #[test]
    fn test_item_out_of_reach_is_precondition_unmet() {
        let failure: TransitionFailure = PickUpRejection::NotHere.into();
        assert_eq!(failure.kind, FailureKind::PreconditionUnmet);
        assert_eq!(failure.message, "You don't see that here.");
    }
}
