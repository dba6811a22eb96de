//! Aggregate roots for the Exits context.

use threshold_core::aggregate::AggregateRoot;
use threshold_core::clock::Clock;
use threshold_core::error::DomainError;
use threshold_core::event::EventMetadata;
use threshold_core::transition::GuardedTransition;
use uuid::Uuid;

use super::door::{DoorLeaf, DoorSide, DoorState};
use super::events::{
    DoorClosed, DoorLocked, DoorOpened, DoorUnlocked, DoorwayBuilt, ExitEvent, ExitEventKind,
};
use super::rejections::{DoorRejection, TraversalRejection};

/// Transition target for the door pair state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorAction {
    /// Open both leaves.
    Open,
    /// Close both leaves.
    Close,
}

/// Who is working the door, and from which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorUse {
    /// The side the actor stands at.
    pub side: DoorSide,
    /// The acting actor.
    pub actor_id: Uuid,
    /// Where the actor currently is, if anywhere.
    pub actor_location: Option<Uuid>,
}

/// The aggregate root for a pair of door leaves.
///
/// Both leaves read the single `state` field, so they can never be observed
/// disagreeing.
#[derive(Debug)]
pub struct Doorway {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (persisted event count).
    pub(crate) version: i64,
    leaves: Option<[DoorLeaf; 2]>,
    state: DoorState,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<ExitEvent>,
}

impl Doorway {
    /// Creates an empty, not yet built doorway.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            leaves: None,
            state: DoorState::default(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: ExitEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let metadata = EventMetadata::record(
            kind.event_type(),
            self.id,
            self.next_sequence_number(),
            correlation_id,
            clock,
        );
        self.mutate(&kind);
        self.uncommitted_events.push(ExitEvent { metadata, kind });
    }

    fn mutate(&mut self, kind: &ExitEventKind) {
        match kind {
            ExitEventKind::DoorwayBuilt(payload) => {
                self.leaves = Some([payload.front.clone(), payload.back.clone()]);
                self.state = DoorState::Closed;
            }
            ExitEventKind::DoorOpened(_) => self.state = DoorState::Open,
            ExitEventKind::DoorClosed(_) | ExitEventKind::DoorUnlocked(_) => {
                self.state = DoorState::Closed;
            }
            ExitEventKind::DoorLocked(_) => self.state = DoorState::Locked,
        }
    }

    /// Joins two leaves into a closed doorway.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the doorway already exists, or if
    /// the leaves share an exit entity or a location.
    pub fn build(
        &mut self,
        front: DoorLeaf,
        back: DoorLeaf,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.leaves.is_some() {
            return Err(DomainError::Validation(format!(
                "doorway {} already exists",
                self.id
            )));
        }
        if front.exit_id == back.exit_id {
            return Err(DomainError::Validation(
                "a door cannot be paired with itself".into(),
            ));
        }
        if front.location_id == back.location_id {
            return Err(DomainError::Validation(
                "paired doors must stand in different locations".into(),
            ));
        }
        self.record(
            ExitEventKind::DoorwayBuilt(DoorwayBuilt {
                doorway_id: self.id,
                front,
                back,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Locks a closed doorway.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the doorway is built and
    /// closed.
    pub fn lock(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        self.ensure_built()?;
        if self.state != DoorState::Closed {
            return Err(DomainError::Validation(format!(
                "doorway {} must be closed to lock it",
                self.id
            )));
        }
        self.record(
            ExitEventKind::DoorLocked(DoorLocked { doorway_id: self.id }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Unlocks a locked doorway, leaving it closed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the doorway is built and
    /// locked.
    pub fn unlock(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        self.ensure_built()?;
        if self.state != DoorState::Locked {
            return Err(DomainError::Validation(format!(
                "doorway {} is not locked",
                self.id
            )));
        }
        self.record(
            ExitEventKind::DoorUnlocked(DoorUnlocked { doorway_id: self.id }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    fn ensure_built(&self) -> Result<(), DomainError> {
        if self.leaves.is_none() {
            return Err(DomainError::Validation(format!(
                "doorway {} has not been built",
                self.id
            )));
        }
        Ok(())
    }

    /// Returns the shared state of both leaves.
    #[must_use]
    pub fn state(&self) -> DoorState {
        self.state
    }

    /// Returns the leaf on `side`, once built.
    #[must_use]
    pub fn leaf(&self, side: DoorSide) -> Option<&DoorLeaf> {
        self.leaves.as_ref().map(|leaves| &leaves[side.index()])
    }

    /// Returns the side whose leaf is the exit entity `exit_id`.
    #[must_use]
    pub fn side_of(&self, exit_id: Uuid) -> Option<DoorSide> {
        DoorSide::ALL
            .into_iter()
            .find(|side| self.leaf(*side).is_some_and(|leaf| leaf.exit_id == exit_id))
    }

    /// Returns whether an actor at `actor_location` stands beside the leaf
    /// on `side`.
    #[must_use]
    pub fn within_reach(&self, side: DoorSide, actor_location: Option<Uuid>) -> bool {
        self.leaf(side)
            .is_some_and(|leaf| actor_location == Some(leaf.location_id))
    }

    /// Decides whether an actor at `actor_location` entering from `side` may
    /// pass, given the outcome of the access check. The actor must stand at
    /// the leaf, and a closed or locked door refuses before access is
    /// considered.
    ///
    /// # Errors
    ///
    /// Returns `TraversalRejection::OutOfReach` if the actor is elsewhere,
    /// `TraversalRejection::Closed` unless the doorway is open, and
    /// `TraversalRejection::Denied` when access was refused.
    pub fn check_traversal(
        &self,
        side: DoorSide,
        actor_location: Option<Uuid>,
        permitted: bool,
    ) -> Result<Uuid, TraversalRejection> {
        let (Some(leaf), Some(far)) = (self.leaf(side), self.leaf(side.opposite())) else {
            return Err(TraversalRejection::Denied(None));
        };
        if !self.within_reach(side, actor_location) {
            return Err(TraversalRejection::OutOfReach);
        }
        if self.state != DoorState::Open {
            return Err(TraversalRejection::Closed);
        }
        if !permitted {
            return Err(TraversalRejection::Denied(leaf.traverse_error.clone()));
        }
        Ok(far.location_id)
    }
}

impl GuardedTransition<DoorAction> for Doorway {
    type Context = DoorUse;
    type Rejection = DoorRejection;

    fn can_transition(&self, target: &DoorAction, context: &DoorUse) -> bool {
        self.within_reach(context.side, context.actor_location)
            && match target {
                DoorAction::Open => self.state == DoorState::Closed,
                DoorAction::Close => self.state == DoorState::Open,
            }
    }

    fn apply_transition(
        &mut self,
        target: &DoorAction,
        context: &DoorUse,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let kind = match target {
            DoorAction::Open => ExitEventKind::DoorOpened(DoorOpened {
                doorway_id: self.id,
                side: context.side,
                actor_id: context.actor_id,
            }),
            DoorAction::Close => ExitEventKind::DoorClosed(DoorClosed {
                doorway_id: self.id,
                side: context.side,
                actor_id: context.actor_id,
            }),
        };
        self.record(kind, correlation_id, clock);
    }

    fn on_transition_failed(&self, target: &DoorAction, context: &DoorUse) -> DoorRejection {
        if !self.within_reach(context.side, context.actor_location) {
            return DoorRejection::OutOfReach;
        }
        match (target, self.state) {
            (DoorAction::Open, DoorState::Locked) => DoorRejection::Locked,
            (DoorAction::Open, _) => DoorRejection::AlreadyOpen,
            (DoorAction::Close, _) => DoorRejection::AlreadyClosed,
        }
    }
}

impl AggregateRoot for Doorway {
    type Event = ExitEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        self.mutate(&event.kind);
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
