//! Capture and load of share categories between players and profiles.

use tracing::trace;

use super::models::ContainerKey;
use super::store::ProfileStore;
use crate::player::Player;
use crate::share::{CategoryRegistry, ShareSet};

/// Copy the player's live values for `categories` into their profile in
/// `container`.
///
/// The profile is created if missing. A category with no live value is
/// removed from the profile so the stored state mirrors the player.
pub fn capture_categories(
    store: &dyn ProfileStore,
    registry: &CategoryRegistry,
    container: &ContainerKey,
    categories: &ShareSet,
    player: &Player,
) {
    if categories.is_empty() {
        return;
    }

    let mut profile = store
        .player_data(container, player.id())
        .unwrap_or_default();

    for category in categories.iter() {
        match registry.capture(&category, player) {
            Some(value) => profile.set(category, value),
            None => {
                profile.remove(&category);
            }
        }
    }

    trace!(%container, player = %player.name(), %categories, "Captured categories");
    store.update_player_data(container, player.id(), profile);
}

/// Copy stored values for `categories` from the player's profile in
/// `container` onto the player.
///
/// A missing profile counts as empty. A category with no stored value is
/// reset to its default, so nothing from the previous context survives a
/// first visit.
pub fn load_categories(
    store: &dyn ProfileStore,
    registry: &CategoryRegistry,
    container: &ContainerKey,
    categories: &ShareSet,
    player: &mut Player,
) {
    let profile = store
        .player_data(container, player.id())
        .unwrap_or_default();

    for category in categories.iter() {
        match profile.get(&category) {
            Some(value) => registry.apply(&category, player, value),
            None => registry.reset(&category, player),
        }
    }

    trace!(%container, player = %player.name(), %categories, "Loaded categories");
}
