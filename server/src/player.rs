//! Live player state.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use smol_str::SmolStr;
use uuid::Uuid;

/// The live state of an online player.
///
/// State is a set of named slots holding opaque values. Built-in categories
/// use the slot named after the category; custom handlers may use any slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    id: Uuid,
    name: SmolStr,
    state: BTreeMap<SmolStr, Value>,
}

impl Player {
    pub fn new(id: Uuid, name: impl Into<SmolStr>) -> Self {
        Self {
            id,
            name: name.into(),
            state: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self, slot: &str) -> Option<&Value> {
        self.state.get(slot)
    }

    pub fn set(&mut self, slot: impl Into<SmolStr>, value: Value) {
        self.state.insert(slot.into(), value);
    }

    pub fn remove(&mut self, slot: &str) -> Option<Value> {
        self.state.remove(slot)
    }

    /// Every populated slot.
    #[must_use]
    pub const fn state(&self) -> &BTreeMap<SmolStr, Value> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slots() {
        let mut player = Player::new(Uuid::nil(), "Alex");
        assert_eq!(player.name(), "Alex");
        assert!(player.get("inventory").is_none());

        player.set("inventory", json!(["stone", "dirt"]));
        assert_eq!(player.get("inventory"), Some(&json!(["stone", "dirt"])));

        player.set("inventory", json!([]));
        assert_eq!(player.state().len(), 1);

        assert_eq!(player.remove("inventory"), Some(json!([])));
        assert!(player.state().is_empty());
    }
}
