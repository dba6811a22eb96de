//! Guarded transition protocol.
//!
//! Every state change on an entity goes through the same three steps:
//!
//! 1. [`GuardedTransition::can_transition`]: a side-effect-free predicate.
//! 2. [`GuardedTransition::apply_transition`]: runs only when step 1 said
//!    yes; records and applies the resulting events.
//! 3. [`GuardedTransition::on_transition_failed`]: runs only when step 1
//!    said no; explains why, without touching state.
//!
//! [`attempt`] is the only place the three steps are sequenced, so no
//! machine can run its apply step after a failed check or produce a failure
//! after a passed one.

use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{DomainError, TransitionFailure};
use crate::ports::Notifier;

/// A state holder that can be driven toward a `Target` under the guarded
/// transition protocol.
///
/// The trait is generic over the target so one aggregate can host several
/// machines (wear and remove on the same inventory, for instance).
pub trait GuardedTransition<Target> {
    /// Extra information the guard needs besides the aggregate's own state.
    type Context: ?Sized;

    /// The reason a transition was refused. Its conversion into
    /// [`TransitionFailure`] supplies the player-facing explanation.
    type Rejection: Into<TransitionFailure> + std::fmt::Debug;

    /// Returns whether moving to `target` is legal right now.
    fn can_transition(&self, target: &Target, context: &Self::Context) -> bool;

    /// Moves to `target`, recording the events that describe the change.
    fn apply_transition(
        &mut self,
        target: &Target,
        context: &Self::Context,
        correlation_id: Uuid,
        clock: &dyn Clock,
    );

    /// Explains why moving to `target` is not legal right now.
    fn on_transition_failed(&self, target: &Target, context: &Self::Context) -> Self::Rejection;
}

/// Runs one guarded transition: check, then apply or explain.
///
/// # Errors
///
/// Returns the machine's rejection when `can_transition` is false. In that
/// case the machine is left untouched.
pub fn attempt<M, Target>(
    machine: &mut M,
    target: &Target,
    context: &M::Context,
    correlation_id: Uuid,
    clock: &dyn Clock,
) -> Result<(), M::Rejection>
where
    M: GuardedTransition<Target> + ?Sized,
{
    if machine.can_transition(target, context) {
        machine.apply_transition(target, context, correlation_id, clock);
        Ok(())
    } else {
        Err(machine.on_transition_failed(target, context))
    }
}

/// Reports a refused transition to the initiating actor, and to nobody
/// else, and converts it into the error returned to the caller.
#[must_use]
pub fn refuse<R>(rejection: R, actor_id: Uuid, notifier: &Notifier<'_>) -> DomainError
where
    R: Into<TransitionFailure>,
{
    let failure = rejection.into();
    notifier.tell(actor_id, &failure.message);
    DomainError::Rejected(failure)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::error::FailureKind;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[derive(Debug)]
    struct AlreadyLit;

    impl From<AlreadyLit> for TransitionFailure {
        fn from(_: AlreadyLit) -> Self {
            TransitionFailure::new(FailureKind::StateConflict, "It's already lit.")
        }
    }

    #[derive(Default)]
    struct Lamp {
        lit: bool,
        applied: u32,
        explained: std::cell::Cell<u32>,
    }

    impl GuardedTransition<bool> for Lamp {
        type Context = ();
        type Rejection = AlreadyLit;

        fn can_transition(&self, target: &bool, _context: &()) -> bool {
            *target != self.lit
        }

        fn apply_transition(
            &mut self,
            target: &bool,
            _context: &(),
            _correlation_id: Uuid,
            _clock: &dyn Clock,
        ) {
            self.lit = *target;
            self.applied += 1;
        }

        fn on_transition_failed(&self, _target: &bool, _context: &()) -> AlreadyLit {
            self.explained.set(self.explained.get() + 1);
            AlreadyLit
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_attempt_applies_when_guard_passes() {
        // Arrange
        let mut lamp = Lamp::default();

        // Act
        let result = attempt(&mut lamp, &true, &(), Uuid::new_v4(), &clock());

        // Assert
        assert!(result.is_ok());
        assert!(lamp.lit);
        assert_eq!(lamp.applied, 1);
        assert_eq!(lamp.explained.get(), 0);
    }

    #[test]
    fn test_attempt_explains_without_applying_when_guard_fails() {
        // Arrange
        let mut lamp = Lamp {
            lit: true,
            ..Lamp::default()
        };

        // Act
        let result = attempt(&mut lamp, &true, &(), Uuid::new_v4(), &clock());

        // Assert
        let failure: TransitionFailure = result.unwrap_err().into();
        assert_eq!(failure.message, "It's already lit.");
        assert_eq!(lamp.applied, 0);
        assert_eq!(lamp.explained.get(), 1);
    }
}
