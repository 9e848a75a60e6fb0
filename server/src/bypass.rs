//! Bypass permissions.
//!
//! A bypass exempts a player from sharing rules:
//! - World bypass for the destination world skips all group and
//!   destination handling (the source world is still saved)
//! - Group bypass skips loading from that one destination group

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use uuid::Uuid;

/// Permission checks consulted during resolution.
pub trait BypassPolicy: Send + Sync {
    fn has_world_bypass(&self, player: Uuid, world: &str) -> bool;

    fn has_group_bypass(&self, player: Uuid, group: &str) -> bool;
}

/// Kind of bypass permission node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BypassNode {
    World,
    Group,
}

impl BypassNode {
    const PREFIX: &'static str = "worldshare.bypass";

    /// Segment naming the node kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Group => "group",
        }
    }

    /// Permission node granting bypass for `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use worldshare_server::bypass::BypassNode;
    ///
    /// assert_eq!(BypassNode::World.node("world_nether"), "worldshare.bypass.world.world_nether");
    /// ```
    #[must_use]
    pub fn node(&self, target: &str) -> String {
        format!("{}.{}.{target}", Self::PREFIX, self.kind())
    }

    /// Permission node granting bypass for every target of this kind.
    #[must_use]
    pub fn wildcard(&self) -> String {
        self.node("*")
    }
}

/// Never grants a bypass.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBypass;

impl BypassPolicy for NoBypass {
    fn has_world_bypass(&self, _player: Uuid, _world: &str) -> bool {
        false
    }

    fn has_group_bypass(&self, _player: Uuid, _group: &str) -> bool {
        false
    }
}

/// Bypass backed by per-player permission nodes.
///
/// Bypass is off unless `enabled`; grants are kept either way so the switch
/// can be flipped without re-granting.
#[derive(Debug, Default)]
pub struct PermissionBypass {
    enabled: AtomicBool,
    grants: DashMap<Uuid, HashSet<String>>,
}

impl PermissionBypass {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            grants: DashMap::new(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Switch bypass on or off. Takes effect for the next check.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Grant a raw permission node to `player`.
    pub fn grant(&self, player: Uuid, node: impl Into<String>) {
        self.grants.entry(player).or_default().insert(node.into());
    }

    /// Revoke a raw permission node. Returns whether it was granted.
    pub fn revoke(&self, player: Uuid, node: &str) -> bool {
        self.grants
            .get_mut(&player)
            .is_some_and(|mut nodes| nodes.remove(node))
    }

    fn has_node(&self, player: Uuid, kind: BypassNode, target: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.grants.get(&player).is_some_and(|nodes| {
            nodes.contains(&kind.node(target)) || nodes.contains(&kind.wildcard())
        })
    }
}

impl BypassPolicy for PermissionBypass {
    fn has_world_bypass(&self, player: Uuid, world: &str) -> bool {
        self.has_node(player, BypassNode::World, world)
    }

    fn has_group_bypass(&self, player: Uuid, group: &str) -> bool {
        self.has_node(player, BypassNode::Group, group)
    }
}
