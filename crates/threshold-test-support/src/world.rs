//! Static world — a fixed directory of names, locations and access rules.

use std::collections::{BTreeMap, HashMap, HashSet};

use threshold_core::ports::{AccessControl, Capability, Locator, NameResolver};
use uuid::Uuid;

/// An immutable directory built up front with a small builder API.
///
/// Every permission is granted unless explicitly denied. Unknown entities
/// resolve to the name "something".
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    names: HashMap<Uuid, String>,
    locations: BTreeMap<Uuid, Uuid>,
    denied: HashSet<(Uuid, Uuid, Capability)>,
}

impl StaticWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named entity with no location.
    #[must_use]
    pub fn with_entity(mut self, id: Uuid, name: &str) -> Self {
        self.names.insert(id, name.to_owned());
        self
    }

    /// Registers a named entity standing in `location`.
    #[must_use]
    pub fn with_occupant(mut self, id: Uuid, name: &str, location: Uuid) -> Self {
        self.names.insert(id, name.to_owned());
        self.locations.insert(id, location);
        self
    }

    /// Denies `capability` on `entity` to `actor`.
    #[must_use]
    pub fn deny(mut self, actor: Uuid, entity: Uuid, capability: Capability) -> Self {
        self.denied.insert((actor, entity, capability));
        self
    }
}

impl NameResolver for StaticWorld {
    fn display_name(&self, entity: Uuid, _viewer: Uuid) -> String {
        self.names
            .get(&entity)
            .cloned()
            .unwrap_or_else(|| "something".to_owned())
    }
}

impl Locator for StaticWorld {
    fn location_of(&self, entity: Uuid) -> Option<Uuid> {
        self.locations.get(&entity).copied()
    }

    fn occupants(&self, location: Uuid) -> Vec<Uuid> {
        self.locations
            .iter()
            .filter(|(_, at)| **at == location)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl AccessControl for StaticWorld {
    fn has_permission(&self, actor: Uuid, entity: Uuid, capability: Capability) -> bool {
        !self.denied.contains(&(actor, entity, capability))
    }
}
