//! Hands, equipment slots, and items.
//!
//! Both registries are closed enums so that every hand or slot lookup is an
//! array index. There is no way to name a slot the body does not have.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of an actor's two holding locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    /// The left hand.
    Left,
    /// The right hand.
    #[default]
    Right,
}

impl Hand {
    /// Number of hands.
    pub const COUNT: usize = 2;

    /// Every hand, left first.
    pub const ALL: [Hand; Self::COUNT] = [Hand::Left, Hand::Right];

    /// Returns the other hand.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Position of this hand in a hand-indexed array.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    /// Lower-case name used in sentences ("in your left hand").
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named body location that can wear at most one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Face,
    Neck,
    RightArm,
    LeftArm,
    RightHand,
    LeftHand,
    Torso,
    Waist,
    RightLeg,
    LeftLeg,
    RightFoot,
    LeftFoot,
}

impl EquipmentSlot {
    /// Number of slots.
    pub const COUNT: usize = 13;

    /// Every slot in declaration order, which is also display order.
    pub const ALL: [EquipmentSlot; Self::COUNT] = [
        Self::Head,
        Self::Face,
        Self::Neck,
        Self::RightArm,
        Self::LeftArm,
        Self::RightHand,
        Self::LeftHand,
        Self::Torso,
        Self::Waist,
        Self::RightLeg,
        Self::LeftLeg,
        Self::RightFoot,
        Self::LeftFoot,
    ];

    /// Position of this slot in a slot-indexed array.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name shown in the equipment listing, e.g. "Right arm".
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Face => "Face",
            Self::Neck => "Neck",
            Self::RightArm => "Right arm",
            Self::LeftArm => "Left arm",
            Self::RightHand => "Right hand",
            Self::LeftHand => "Left hand",
            Self::Torso => "Torso",
            Self::Waist => "Waist",
            Self::RightLeg => "Right leg",
            Self::LeftLeg => "Left leg",
            Self::RightFoot => "Right foot",
            Self::LeftFoot => "Left foot",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An item as far as the allocator cares: its identity and, for wearables,
/// the slot it goes on.
///
/// Whether an item can be worn is fixed when the descriptor is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// The item's entity identifier.
    pub id: Uuid,
    /// Slot the item is worn on; `None` for plain objects.
    pub wear_slot: Option<EquipmentSlot>,
}

impl Item {
    /// An object that cannot be worn.
    #[must_use]
    pub fn plain(id: Uuid) -> Self {
        Self { id, wear_slot: None }
    }

    /// An object worn on `slot`.
    #[must_use]
    pub fn wearable(id: Uuid, slot: EquipmentSlot) -> Self {
        Self {
            id,
            wear_slot: Some(slot),
        }
    }

    /// Returns whether the item can be worn at all.
    #[must_use]
    pub fn can_wear(&self) -> bool {
        self.wear_slot.is_some()
    }
}
