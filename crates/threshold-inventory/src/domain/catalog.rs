//! Where items live outside of anyone's hands.
//!
//! Items are registered once with their wear slot. Picking one up moves it
//! from its room onto the actor, and dropping it moves it back, so a single
//! item can only ever be carried by one actor at a time.

use uuid::Uuid;

use super::slots::Item;

/// Registry of items and their current whereabouts.
///
/// An item's whereabouts is either a location id (lying in a room) or the
/// id of the actor carrying it.
pub trait ItemCatalog: Send + Sync {
    /// Returns the registered item and where it currently is.
    fn lookup(&self, item_id: Uuid) -> Option<(Item, Option<Uuid>)>;

    /// Moves `item_id` to `to`, but only if it is still at `from`.
    ///
    /// Returns `false` and leaves the catalog untouched when the item is
    /// unknown or has moved since it was looked up.
    fn relocate(&self, item_id: Uuid, from: Uuid, to: Option<Uuid>) -> bool;
}
