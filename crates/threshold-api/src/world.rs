//! In-memory world directory and per-request mailbox.
//!
//! The directory answers the name, location and access questions the state
//! machines ask through the core ports, and keeps the item catalog. The mailbox collects what a single
//! request told whom, so the response can return it.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};

use serde::Serialize;
use threshold_core::ports::{AccessControl, Capability, Locator, Messenger, NameResolver};
use threshold_inventory::domain::catalog::ItemCatalog;
use threshold_inventory::domain::slots::Item;
use tracing::debug;
use uuid::Uuid;

const UNKNOWN_NAME: &str = "something";

#[derive(Debug, Default)]
struct Directory {
    names: HashMap<Uuid, String>,
    locations: BTreeMap<Uuid, Uuid>,
    denied: HashSet<(Uuid, Uuid, Capability)>,
    items: HashMap<Uuid, Item>,
}

impl Directory {
    fn view(&self, id: Uuid) -> EntityView {
        EntityView {
            id,
            name: self
                .names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
            location_id: self.locations.get(&id).copied(),
        }
    }
}

/// Names, locations and access rules for every registered entity.
///
/// Access is granted unless explicitly denied.
#[derive(Debug, Default)]
pub struct WorldDirectory {
    inner: RwLock<Directory>,
}

/// An entity as the directory knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityView {
    /// The entity.
    pub id: Uuid,
    /// Its display name.
    pub name: String,
    /// Where it is, if anywhere.
    pub location_id: Option<Uuid>,
}

impl WorldDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or updates an entity. Fields left as `None` keep their
    /// previous value.
    pub fn register(&self, id: Uuid, name: Option<String>, location_id: Option<Uuid>) -> EntityView {
        let mut directory = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(name) = name {
            directory.names.insert(id, name);
        }
        if let Some(location_id) = location_id {
            directory.locations.insert(id, location_id);
        }
        directory.view(id)
    }

    /// Adds `item` to the catalog, lying in `location_id`.
    ///
    /// Items are named and located like any other entity, but they are not
    /// occupants and never receive messages.
    pub fn register_item(&self, item: Item, name: String, location_id: Uuid) -> EntityView {
        let mut directory = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        directory.items.insert(item.id, item);
        directory.names.insert(item.id, name);
        directory.locations.insert(item.id, location_id);
        directory.view(item.id)
    }

    /// Puts `entity` in `location`, or nowhere.
    pub fn place(&self, entity: Uuid, location: Option<Uuid>) {
        let mut directory = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match location {
            Some(location) => directory.locations.insert(entity, location),
            None => directory.locations.remove(&entity),
        };
    }

    /// Allows or denies `capability` on `entity` to `actor`.
    pub fn set_access(&self, actor: Uuid, entity: Uuid, capability: Capability, allowed: bool) {
        let mut directory = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if allowed {
            directory.denied.remove(&(actor, entity, capability));
        } else {
            directory.denied.insert((actor, entity, capability));
        }
    }
}

impl NameResolver for WorldDirectory {
    fn display_name(&self, entity: Uuid, _viewer: Uuid) -> String {
        let directory = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        directory
            .names
            .get(&entity)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_NAME.to_owned())
    }
}

impl Locator for WorldDirectory {
    fn location_of(&self, entity: Uuid) -> Option<Uuid> {
        let directory = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        directory.locations.get(&entity).copied()
    }

    fn occupants(&self, location: Uuid) -> Vec<Uuid> {
        let directory = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        directory
            .locations
            .iter()
            .filter(|(id, at)| **at == location && !directory.items.contains_key(*id))
            .map(|(id, _)| *id)
            .collect()
    }
}

impl ItemCatalog for WorldDirectory {
    fn lookup(&self, item_id: Uuid) -> Option<(Item, Option<Uuid>)> {
        let directory = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let item = directory.items.get(&item_id).copied()?;
        Some((item, directory.locations.get(&item_id).copied()))
    }

    fn relocate(&self, item_id: Uuid, from: Uuid, to: Option<Uuid>) -> bool {
        let mut directory = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !directory.items.contains_key(&item_id)
            || directory.locations.get(&item_id) != Some(&from)
        {
            return false;
        }
        match to {
            Some(to) => directory.locations.insert(item_id, to),
            None => directory.locations.remove(&item_id),
        };
        true
    }
}

impl AccessControl for WorldDirectory {
    fn has_permission(&self, actor: Uuid, entity: Uuid, capability: Capability) -> bool {
        let directory = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        !directory.denied.contains(&(actor, entity, capability))
    }
}

/// One message delivered during a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Who it was sent to.
    pub recipient: Uuid,
    /// What they were told.
    pub text: String,
}

/// Messenger that keeps deliveries for the lifetime of one request.
#[derive(Debug, Default)]
pub struct Mailbox {
    deliveries: Mutex<Vec<Delivery>>,
}

impl Mailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes everything delivered so far, in delivery order.
    pub fn drain(&self) -> Vec<Delivery> {
        let mut deliveries = self
            .deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *deliveries)
    }
}

impl Messenger for Mailbox {
    fn send(&self, recipient: Uuid, text: &str) {
        debug!(%recipient, text, "message delivered");
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Delivery {
                recipient,
                text: text.to_owned(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_unspecified_fields() {
        // Arrange
        let world = WorldDirectory::new();
        let (id, room) = (Uuid::new_v4(), Uuid::new_v4());
        world.register(id, Some("lantern".into()), Some(room));

        // Act
        let view = world.register(id, None, None);

        // Assert
        assert_eq!(view.name, "lantern");
        assert_eq!(view.location_id, Some(room));
    }

    #[test]
    fn test_place_moves_entity_between_locations() {
        let world = WorldDirectory::new();
        let (id, hall, yard) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        world.register(id, Some("Ada".into()), Some(hall));

        world.place(id, Some(yard));

        assert!(world.occupants(hall).is_empty());
        assert_eq!(world.occupants(yard), vec![id]);

        world.place(id, None);
        assert_eq!(world.location_of(id), None);
    }

    #[test]
    fn test_access_defaults_to_allowed_and_can_be_restored() {
        let world = WorldDirectory::new();
        let (actor, gate) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(world.has_permission(actor, gate, Capability::Traverse));

        world.set_access(actor, gate, Capability::Traverse, false);
        assert!(!world.has_permission(actor, gate, Capability::Traverse));
        assert!(world.has_permission(actor, Uuid::new_v4(), Capability::Traverse));

        world.set_access(actor, gate, Capability::Traverse, true);
        assert!(world.has_permission(actor, gate, Capability::Traverse));
    }

    #[test]
    fn test_catalogued_items_are_located_but_never_occupants() {
        // Arrange
        let world = WorldDirectory::new();
        let (ada, hall) = (Uuid::new_v4(), Uuid::new_v4());
        world.register(ada, Some("Ada".into()), Some(hall));
        let lamp = Item::plain(Uuid::new_v4());

        // Act
        let view = world.register_item(lamp, "a brass lamp".into(), hall);

        // Assert
        assert_eq!(view.location_id, Some(hall));
        assert_eq!(world.location_of(lamp.id), Some(hall));
        assert_eq!(world.occupants(hall), vec![ada]);
        assert_eq!(world.lookup(lamp.id), Some((lamp, Some(hall))));
    }

    #[test]
    fn test_relocate_only_moves_items_still_where_expected() {
        let world = WorldDirectory::new();
        let (ada, brom, hall) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let lamp = Item::plain(Uuid::new_v4());
        world.register_item(lamp, "a brass lamp".into(), hall);

        assert!(world.relocate(lamp.id, hall, Some(ada)));
        assert!(!world.relocate(lamp.id, hall, Some(brom)));
        assert_eq!(world.location_of(lamp.id), Some(ada));

        assert!(world.relocate(lamp.id, ada, Some(hall)));
        assert_eq!(world.location_of(lamp.id), Some(hall));
        assert!(!world.relocate(Uuid::new_v4(), hall, Some(ada)));
    }

    #[test]
    fn test_unknown_entities_are_called_something() {
        let world = WorldDirectory::new();

        assert_eq!(world.display_name(Uuid::new_v4(), Uuid::new_v4()), "something");
    }

    #[test]
    fn test_mailbox_drains_in_delivery_order() {
        let mailbox = Mailbox::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        mailbox.send(a, "first");
        mailbox.send(b, "second");

        let drained = mailbox.drain();

        assert_eq!(
            drained,
            vec![
                Delivery {
                    recipient: a,
                    text: "first".into()
                },
                Delivery {
                    recipient: b,
                    text: "second".into()
                },
            ]
        );
        assert!(mailbox.drain().is_empty());
    }
}
