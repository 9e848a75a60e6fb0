//! Profile storage.

use dashmap::DashMap;
use uuid::Uuid;

use super::models::{ContainerKey, PlayerProfile};

/// Backing store for player profiles.
///
/// Implementations must be safe to share between threads. Callers serialize
/// access per player, so a store only needs per-key consistency.
pub trait ProfileStore: Send + Sync {
    /// Stored profile for `player` in `container`, if any.
    fn player_data(&self, container: &ContainerKey, player: Uuid) -> Option<PlayerProfile>;

    /// Replace the stored profile for `player` in `container`.
    fn update_player_data(&self, container: &ContainerKey, player: Uuid, profile: PlayerProfile);
}

/// In-memory profile store keyed by container and player.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: DashMap<(ContainerKey, Uuid), PlayerProfile>,
}

impl InMemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn clear(&self) {
        self.profiles.clear();
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn player_data(&self, container: &ContainerKey, player: Uuid) -> Option<PlayerProfile> {
        self.profiles
            .get(&(container.clone(), player))
            .map(|entry| entry.value().clone())
    }

    fn update_player_data(&self, container: &ContainerKey, player: Uuid, profile: PlayerProfile) {
        self.profiles.insert((container.clone(), player), profile);
    }
}
