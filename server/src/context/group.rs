//! World groups and group membership lookup.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use smol_str::SmolStr;
use tracing::{debug, info};

use super::world::WorldRegistry;
use crate::config::GroupsFile;
use crate::error::ShareError;
use crate::share::{CategoryRegistry, ConfiguredShares, ShareSet};

/// Name of the group that can collect ungrouped worlds.
pub const DEFAULT_GROUP: &str = "default";

/// A named set of worlds sharing some categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGroup {
    name: SmolStr,
    worlds: BTreeSet<SmolStr>,
    shares: ConfiguredShares,
}

impl WorldGroup {
    pub fn new<I, S>(name: impl Into<SmolStr>, worlds: I, shares: ConfiguredShares) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            name: name.into(),
            worlds: worlds.into_iter().map(Into::into).collect(),
            shares,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn worlds(&self) -> &BTreeSet<SmolStr> {
        &self.worlds
    }

    #[must_use]
    pub fn contains_world(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }

    #[must_use]
    pub const fn configured_shares(&self) -> &ConfiguredShares {
        &self.shares
    }

    /// Concrete shares against `universe`.
    #[must_use]
    pub fn shares(&self, universe: &ShareSet) -> ShareSet {
        self.shares.resolve(universe)
    }

    /// Whether this group shares every category in `universe`.
    #[must_use]
    pub fn is_sharing_all(&self, universe: &ShareSet) -> bool {
        self.shares(universe) == *universe
    }
}

/// Resolves which groups a world belongs to.
pub trait GroupMembership: Send + Sync {
    /// Groups containing `world`, in configuration order.
    fn groups_containing(&self, world: &str) -> Vec<Arc<WorldGroup>>;
}

/// Groups loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: Vec<Arc<WorldGroup>>,
}

impl GroupRegistry {
    /// Build from already-parsed groups.
    ///
    /// Group names must be non-empty and unique.
    pub fn new(groups: Vec<WorldGroup>) -> Result<Self, ShareError> {
        let mut seen = HashSet::new();
        for group in &groups {
            if group.name.trim().is_empty() {
                return Err(ShareError::EmptyGroupName);
            }
            if !seen.insert(group.name.clone()) {
                return Err(ShareError::DuplicateGroup(group.name.clone()));
            }
        }

        Ok(Self {
            groups: groups.into_iter().map(Arc::new).collect(),
        })
    }

    /// Build from a groups file, validating every world and share name.
    ///
    /// With `default_ungrouped_worlds`, known worlds that belong to no group
    /// join the [`DEFAULT_GROUP`] group if one is configured.
    pub fn from_config(
        file: &GroupsFile,
        worlds: &WorldRegistry,
        registry: &CategoryRegistry,
        default_ungrouped_worlds: bool,
    ) -> Result<Self, ShareError> {
        let mut groups = Vec::with_capacity(file.groups.len());
        for config in &file.groups {
            for world in &config.worlds {
                worlds.require(world)?;
            }
            let shares = ConfiguredShares::parse(&config.shares, registry)?;
            groups.push(WorldGroup::new(
                config.name.clone(),
                config.worlds.iter().cloned(),
                shares,
            ));
        }

        if default_ungrouped_worlds {
            let ungrouped: Vec<SmolStr> = worlds
                .names()
                .filter(|world| !groups.iter().any(|g| g.contains_world(world)))
                .map(SmolStr::from)
                .collect();

            if let Some(default) = groups.iter_mut().find(|g| g.name() == DEFAULT_GROUP) {
                for world in ungrouped {
                    debug!(%world, "Adding ungrouped world to default group");
                    default.worlds.insert(world);
                }
            }
        }

        let registry = Self::new(groups)?;
        info!(groups = registry.groups.len(), worlds = worlds.len(), "Loaded world groups");
        Ok(registry)
    }

    /// Look up a group, failing with [`ShareError::UnknownGroup`].
    pub fn group(&self, name: &str) -> Result<&Arc<WorldGroup>, ShareError> {
        self.groups
            .iter()
            .find(|g| g.name() == name)
            .ok_or_else(|| ShareError::UnknownGroup(name.into()))
    }

    #[must_use]
    pub fn groups(&self) -> &[Arc<WorldGroup>] {
        &self.groups
    }
}

impl GroupMembership for GroupRegistry {
    fn groups_containing(&self, world: &str) -> Vec<Arc<WorldGroup>> {
        self.groups
            .iter()
            .filter(|g| g.contains_world(world))
            .cloned()
            .collect()
    }
}
