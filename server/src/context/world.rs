//! Known worlds.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use crate::error::ShareError;
use crate::profile::ContainerKey;
use crate::share::{ConfiguredShares, ShareSet};

/// A single world. Its own profiles hold every category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldContext {
    name: SmolStr,
    shares: ConfiguredShares,
}

impl WorldContext {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            shares: ConfiguredShares::everything(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Container holding this world's own profiles.
    #[must_use]
    pub fn container(&self) -> ContainerKey {
        ContainerKey::World(self.name.clone())
    }

    /// Concrete shares against `universe`. Always the whole universe.
    #[must_use]
    pub fn shares(&self, universe: &ShareSet) -> ShareSet {
        self.shares.resolve(universe)
    }
}

/// Registry of every world a transition may reference.
#[derive(Debug, Clone, Default)]
pub struct WorldRegistry {
    worlds: BTreeMap<SmolStr, WorldContext>,
}

impl WorldRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut registry = Self::default();
        for name in names {
            registry.add(name);
        }
        registry
    }

    /// Add a world. Returns `false` if it was already known.
    pub fn add(&mut self, name: impl Into<SmolStr>) -> bool {
        let name = name.into();
        if self.worlds.contains_key(&name) {
            return false;
        }
        self.worlds.insert(name.clone(), WorldContext::new(name));
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.worlds.contains_key(name)
    }

    /// Look up a world, failing with [`ShareError::UnknownWorld`].
    pub fn require(&self, name: &str) -> Result<&WorldContext, ShareError> {
        self.worlds
            .get(name)
            .ok_or_else(|| ShareError::UnknownWorld(name.into()))
    }

    /// World names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.worlds.keys().map(SmolStr::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_known_world() {
        let worlds = WorldRegistry::new(["world", "world_nether"]);
        assert_eq!(worlds.require("world").unwrap().name(), "world");
        assert_eq!(worlds.len(), 2);
    }

    #[test]
    fn test_world_shares_everything() {
        let registry = crate::share::CategoryRegistry::new();
        registry
            .register("mana", crate::share::CategoryHandler::slot("mana"))
            .unwrap();
        let world = WorldContext::new("world");

        assert_eq!(world.shares(&registry.all()), registry.all());
        assert_eq!(world.container(), ContainerKey::world("world"));
    }

    #[test]
    fn test_require_unknown_world() {
        let worlds = WorldRegistry::new(["world"]);
        let err = worlds.require("world_the_end").unwrap_err();
        assert!(matches!(err, ShareError::UnknownWorld(ref name) if name == "world_the_end"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_world_names_are_case_sensitive() {
        let worlds = WorldRegistry::new(["World"]);
        assert!(worlds.contains("World"));
        assert!(!worlds.contains("world"));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut worlds = WorldRegistry::default();
        assert!(worlds.is_empty());
        assert!(worlds.add("world"));
        assert!(!worlds.add("world"));
        assert_eq!(worlds.names().collect::<Vec<_>>(), ["world"]);
    }
}
