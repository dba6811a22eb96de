//! Aggregate roots for the Inventory & Equipment context.

use threshold_core::aggregate::AggregateRoot;
use threshold_core::clock::Clock;
use threshold_core::error::DomainError;
use threshold_core::event::EventMetadata;
use threshold_core::ports::NameResolver;
use threshold_core::transition::GuardedTransition;
use uuid::Uuid;

use super::events::{
    InventoryCreated, InventoryEvent, InventoryEventKind, ItemDropped, ItemPickedUp, ItemRemoved,
    ItemWorn,
};
use super::rejections::{DropRejection, PickUpRejection, RemoveRejection, WearRejection};
use super::slots::{EquipmentSlot, Hand, Item};

/// Transition target: move the held item onto its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wear(pub Uuid);

/// Transition target: move the worn item back into a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remove(pub Uuid);

/// Transition target: take the item into a free hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickUp(pub Item);

/// Transition target: let go of a held item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutDown(pub Uuid);

/// Namespace for inventory stream ids. Other contexts key their aggregates
/// by the actor id too, so the inventory derives its own.
const INVENTORY_STREAM_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2d4e_8b3a_4c59_9e07_51d2_a8f3_c6b1);

/// The aggregate root for one actor's hands and equipment slots.
///
/// Every item appears at most once across `hands` and `equipment`; each
/// transition moves an item between them rather than copying it.
#[derive(Debug)]
pub struct Inventory {
    /// Aggregate identifier, derived from the owner with [`Inventory::stream_id`].
    pub id: Uuid,
    /// The actor whose hands and slots these are.
    pub actor_id: Uuid,
    /// Current version (persisted event count).
    pub(crate) version: i64,
    created: bool,
    dominant_hand: Hand,
    hands: [Option<Item>; Hand::COUNT],
    equipment: [Option<Item>; EquipmentSlot::COUNT],
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<InventoryEvent>,
}

impl Inventory {
    /// Creates an empty, not yet initialised inventory for `actor_id`.
    #[must_use]
    pub fn new(actor_id: Uuid) -> Self {
        Self {
            id: Self::stream_id(actor_id),
            actor_id,
            version: 0,
            created: false,
            dominant_hand: Hand::default(),
            hands: [None; Hand::COUNT],
            equipment: [None; EquipmentSlot::COUNT],
            uncommitted_events: Vec::new(),
        }
    }

    /// The event stream holding `actor_id`'s inventory.
    #[must_use]
    pub fn stream_id(actor_id: Uuid) -> Uuid {
        Uuid::new_v5(&INVENTORY_STREAM_NAMESPACE, actor_id.as_bytes())
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(&mut self, kind: InventoryEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let metadata = EventMetadata::record(
            kind.event_type(),
            self.id,
            self.next_sequence_number(),
            correlation_id,
            clock,
        );
        self.mutate(&kind);
        self.uncommitted_events.push(InventoryEvent { metadata, kind });
    }

    fn mutate(&mut self, kind: &InventoryEventKind) {
        match kind {
            InventoryEventKind::InventoryCreated(payload) => {
                self.created = true;
                self.dominant_hand = payload.dominant_hand;
            }
            InventoryEventKind::ItemPickedUp(payload) => {
                self.hands[payload.hand.index()] = Some(payload.item);
            }
            InventoryEventKind::ItemDropped(payload) => {
                self.hands[payload.hand.index()] = None;
            }
            InventoryEventKind::ItemWorn(payload) => {
                let item = self.hands[payload.hand.index()].take();
                self.equipment[payload.slot.index()] = item;
            }
            InventoryEventKind::ItemRemoved(payload) => {
                let item = self.equipment[payload.slot.index()].take();
                self.hands[payload.hand.index()] = item;
            }
        }
    }

    /// Initialises the inventory with empty hands and slots, producing an
    /// `InventoryCreated` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the inventory already exists.
    pub fn create(
        &mut self,
        dominant_hand: Hand,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.created {
            return Err(DomainError::Validation(format!(
                "inventory for actor {} already exists",
                self.actor_id
            )));
        }
        self.record(
            InventoryEventKind::InventoryCreated(InventoryCreated {
                actor_id: self.actor_id,
                dominant_hand,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Returns whether the inventory has been initialised.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.created
    }

    /// Returns the dominant hand.
    #[must_use]
    pub fn dominant_hand(&self) -> Hand {
        self.dominant_hand
    }

    /// Returns the item held in `hand`.
    #[must_use]
    pub fn held(&self, hand: Hand) -> Option<Item> {
        self.hands[hand.index()]
    }

    /// Returns the item worn on `slot`.
    #[must_use]
    pub fn worn(&self, slot: EquipmentSlot) -> Option<Item> {
        self.equipment[slot.index()]
    }

    /// Hands in preference order: dominant first.
    fn hands_by_preference(&self) -> [Hand; Hand::COUNT] {
        [self.dominant_hand, self.dominant_hand.other()]
    }

    /// Returns an empty hand, preferring the dominant one.
    #[must_use]
    pub fn free_hand(&self) -> Option<Hand> {
        self.hands_by_preference()
            .into_iter()
            .find(|hand| self.held(*hand).is_none())
    }

    /// Returns the hand holding `item_id`, checking the dominant hand first.
    #[must_use]
    pub fn hand_holding(&self, item_id: Uuid) -> Option<Hand> {
        self.hands_by_preference()
            .into_iter()
            .find(|hand| self.held(*hand).is_some_and(|item| item.id == item_id))
    }

    /// Returns the slot wearing `item_id`.
    #[must_use]
    pub fn slot_wearing(&self, item_id: Uuid) -> Option<EquipmentSlot> {
        EquipmentSlot::ALL
            .into_iter()
            .find(|slot| self.worn(*slot).is_some_and(|item| item.id == item_id))
    }

    /// Returns whether `item_id` currently occupies one of the slots.
    #[must_use]
    pub fn is_worn(&self, item_id: Uuid) -> bool {
        self.slot_wearing(item_id).is_some()
    }

    fn check_wear(&self, item_id: Uuid) -> Result<(Hand, EquipmentSlot), WearRejection> {
        if self.is_worn(item_id) {
            return Err(WearRejection::AlreadyWearing);
        }
        let hand = self.hand_holding(item_id).ok_or(WearRejection::NotHolding)?;
        let slot = self
            .held(hand)
            .and_then(|item| item.wear_slot)
            .ok_or(WearRejection::NotWearable)?;
        if self.worn(slot).is_some() {
            return Err(WearRejection::SlotOccupied);
        }
        Ok((hand, slot))
    }

    fn check_remove(&self, item_id: Uuid) -> Result<(EquipmentSlot, Hand), RemoveRejection> {
        let slot = self
            .slot_wearing(item_id)
            .ok_or(RemoveRejection::NotWearing)?;
        let hand = self.free_hand().ok_or(RemoveRejection::NoFreeHand)?;
        Ok((slot, hand))
    }

    fn check_pick_up(&self, item: &Item) -> Result<Hand, PickUpRejection> {
        if self.hand_holding(item.id).is_some() || self.is_worn(item.id) {
            return Err(PickUpRejection::AlreadyCarrying);
        }
        self.free_hand().ok_or(PickUpRejection::HandsFull)
    }

    fn check_drop(&self, item_id: Uuid) -> Result<Hand, DropRejection> {
        if self.is_worn(item_id) {
            return Err(DropRejection::Worn);
        }
        self.hand_holding(item_id).ok_or(DropRejection::NotHolding)
    }

    /// Lists every slot in declaration order, one per line, as
    /// `"<Slot>: <item or Nothing>"`.
    #[must_use]
    pub fn describe_equipment(&self, names: &dyn NameResolver, viewer: Uuid) -> String {
        EquipmentSlot::ALL
            .iter()
            .map(|slot| {
                let worn = self
                    .worn(*slot)
                    .map_or_else(|| "Nothing".to_owned(), |item| names.display_name(item.id, viewer));
                format!("{}: {worn}", slot.display_name())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Describes what the hands hold in a single sentence.
    #[must_use]
    pub fn describe_inventory(&self, names: &dyn NameResolver, viewer: Uuid) -> String {
        let held: Vec<String> = Hand::ALL
            .iter()
            .filter_map(|hand| {
                self.held(*hand).map(|item| {
                    format!("{} in your {hand} hand", names.display_name(item.id, viewer))
                })
            })
            .collect();

        if held.is_empty() {
            "You aren't carrying anything.".to_owned()
        } else {
            format!("You are holding {}.", held.join(" and "))
        }
    }
}

impl GuardedTransition<Wear> for Inventory {
    type Context = ();
    type Rejection = WearRejection;

    fn can_transition(&self, target: &Wear, _context: &()) -> bool {
        self.check_wear(target.0).is_ok()
    }

    fn apply_transition(
        &mut self,
        target: &Wear,
        _context: &(),
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let plan = self.check_wear(target.0);
        debug_assert!(plan.is_ok(), "wear applied after a failed check");
        let Ok((hand, slot)) = plan else {
            return;
        };
        self.record(
            InventoryEventKind::ItemWorn(ItemWorn {
                actor_id: self.actor_id,
                item_id: target.0,
                hand,
                slot,
            }),
            correlation_id,
            clock,
        );
    }

    fn on_transition_failed(&self, target: &Wear, _context: &()) -> WearRejection {
        self.check_wear(target.0)
            .err()
            .unwrap_or(WearRejection::NotHolding)
    }
}

impl GuardedTransition<Remove> for Inventory {
    type Context = ();
    type Rejection = RemoveRejection;

    fn can_transition(&self, target: &Remove, _context: &()) -> bool {
        self.check_remove(target.0).is_ok()
    }

    fn apply_transition(
        &mut self,
        target: &Remove,
        _context: &(),
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let plan = self.check_remove(target.0);
        debug_assert!(plan.is_ok(), "remove applied after a failed check");
        let Ok((slot, hand)) = plan else {
            return;
        };
        self.record(
            InventoryEventKind::ItemRemoved(ItemRemoved {
                actor_id: self.actor_id,
                item_id: target.0,
                slot,
                hand,
            }),
            correlation_id,
            clock,
        );
    }

    fn on_transition_failed(&self, target: &Remove, _context: &()) -> RemoveRejection {
        self.check_remove(target.0)
            .err()
            .unwrap_or(RemoveRejection::NotWearing)
    }
}

impl GuardedTransition<PickUp> for Inventory {
    type Context = ();
    type Rejection = PickUpRejection;

    fn can_transition(&self, target: &PickUp, _context: &()) -> bool {
        self.check_pick_up(&target.0).is_ok()
    }

    fn apply_transition(
        &mut self,
        target: &PickUp,
        _context: &(),
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let plan = self.check_pick_up(&target.0);
        debug_assert!(plan.is_ok(), "pick-up applied after a failed check");
        let Ok(hand) = plan else {
            return;
        };
        self.record(
            InventoryEventKind::ItemPickedUp(ItemPickedUp {
                actor_id: self.actor_id,
                item: target.0,
                hand,
            }),
            correlation_id,
            clock,
        );
    }

    fn on_transition_failed(&self, target: &PickUp, _context: &()) -> PickUpRejection {
        self.check_pick_up(&target.0)
            .err()
            .unwrap_or(PickUpRejection::AlreadyCarrying)
    }
}

impl GuardedTransition<PutDown> for Inventory {
    type Context = ();
    type Rejection = DropRejection;

    fn can_transition(&self, target: &PutDown, _context: &()) -> bool {
        self.check_drop(target.0).is_ok()
    }

    fn apply_transition(
        &mut self,
        target: &PutDown,
        _context: &(),
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let plan = self.check_drop(target.0);
        debug_assert!(plan.is_ok(), "drop applied after a failed check");
        let Ok(hand) = plan else {
            return;
        };
        self.record(
            InventoryEventKind::ItemDropped(ItemDropped {
                actor_id: self.actor_id,
                item_id: target.0,
                hand,
            }),
            correlation_id,
            clock,
        );
    }

    fn on_transition_failed(&self, target: &PutDown, _context: &()) -> DropRejection {
        self.check_drop(target.0)
            .err()
            .unwrap_or(DropRejection::NotHolding)
    }
}

impl AggregateRoot for Inventory {
    type Event = InventoryEvent;

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
