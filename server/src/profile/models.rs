//! Profile containers and stored profiles.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use smol_str::SmolStr;

use crate::share::{ShareCategory, ShareSet};

/// Owner of a set of player profiles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum ContainerKey {
    World(SmolStr),
    Group(SmolStr),
}

impl ContainerKey {
    pub fn world(name: impl Into<SmolStr>) -> Self {
        Self::World(name.into())
    }

    pub fn group(name: impl Into<SmolStr>) -> Self {
        Self::Group(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::World(name) | Self::Group(name) => name,
        }
    }
}

impl fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::World(name) => write!(f, "world:{name}"),
            Self::Group(name) => write!(f, "group:{name}"),
        }
    }
}

/// One player's stored state in one container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerProfile {
    entries: BTreeMap<ShareCategory, Value>,
}

impl PlayerProfile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, category: &ShareCategory) -> Option<&Value> {
        self.entries.get(category)
    }

    pub fn set(&mut self, category: ShareCategory, value: Value) {
        self.entries.insert(category, value);
    }

    pub fn remove(&mut self, category: &ShareCategory) -> Option<Value> {
        self.entries.remove(category)
    }

    /// Categories that currently hold a value.
    #[must_use]
    pub fn categories(&self) -> ShareSet {
        self.entries.keys().cloned().collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
