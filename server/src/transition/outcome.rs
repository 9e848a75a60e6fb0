//! Transition outcomes.

use serde::Serialize;

use super::request::TransitionRequest;
use crate::profile::ContainerKey;
use crate::share::ShareSet;

/// Categories captured into or loaded from one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileTouch {
    pub container: ContainerKey,
    pub categories: ShareSet,
}

/// Result of resolving a transition.
///
/// Captures and loads are kept in resolution order, which is also the
/// order they are applied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
    pub request: TransitionRequest,
    pub captures: Vec<ProfileTouch>,
    pub loads: Vec<ProfileTouch>,
    /// A world or group bypass suppressed normal handling.
    pub bypassed: bool,
    /// A listener cancelled the transition; nothing was applied.
    pub cancelled: bool,
}

impl TransitionOutcome {
    #[must_use]
    pub const fn new(request: TransitionRequest) -> Self {
        Self {
            request,
            captures: Vec::new(),
            loads: Vec::new(),
            bypassed: false,
            cancelled: false,
        }
    }

    pub(crate) fn capture(&mut self, container: ContainerKey, categories: ShareSet) {
        self.captures.push(ProfileTouch {
            container,
            categories,
        });
    }

    pub(crate) fn load(&mut self, container: ContainerKey, categories: ShareSet) {
        self.loads.push(ProfileTouch {
            container,
            categories,
        });
    }

    /// Stop this outcome from being applied.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Categories captured into `container`, if any.
    #[must_use]
    pub fn captured_from(&self, container: &ContainerKey) -> Option<&ShareSet> {
        self.captures
            .iter()
            .find(|touch| touch.container == *container)
            .map(|touch| &touch.categories)
    }

    /// Categories loaded from `container`, if any.
    #[must_use]
    pub fn loaded_from(&self, container: &ContainerKey) -> Option<&ShareSet> {
        self.loads
            .iter()
            .find(|touch| touch.container == *container)
            .map(|touch| &touch.categories)
    }

    /// Every category loaded from any container.
    #[must_use]
    pub fn loaded_categories(&self) -> ShareSet {
        self.loads
            .iter()
            .fold(ShareSet::none(), |acc, touch| acc.union(&touch.categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use crate::share::Sharables;
    use crate::transition::Cause;
    use uuid::Uuid;

    fn outcome() -> TransitionOutcome {
        let player = Player::new(Uuid::now_v7(), "Alex");
        TransitionOutcome::new(TransitionRequest::new(&player, "world", "world2", Cause::WorldChange))
    }

    #[test]
    fn test_touch_lookup() {
        let mut outcome = outcome();
        outcome.capture(ContainerKey::world("world"), Sharables::all().into());
        outcome.load(ContainerKey::group("default"), Sharables::INVENTORY.into());

        assert_eq!(
            outcome.captured_from(&ContainerKey::world("world")),
            Some(&ShareSet::from(Sharables::all()))
        );
        assert_eq!(outcome.captured_from(&ContainerKey::world("world2")), None);
        assert_eq!(
            outcome.loaded_from(&ContainerKey::group("default")),
            Some(&ShareSet::from(Sharables::INVENTORY))
        );
    }

    #[test]
    fn test_loaded_categories_unions_loads() {
        let mut outcome = outcome();
        assert!(outcome.loaded_categories().is_empty());

        outcome.load(ContainerKey::group("default"), Sharables::INVENTORY.into());
        outcome.load(ContainerKey::world("world2"), Sharables::HEALTH.into());
        assert_eq!(
            outcome.loaded_categories(),
            ShareSet::from(Sharables::INVENTORY | Sharables::HEALTH)
        );
    }

    #[test]
    fn test_cancel() {
        let mut outcome = outcome();
        assert!(!outcome.cancelled);
        outcome.cancel();
        assert!(outcome.cancelled);
    }

    #[test]
    fn test_serialize() {
        let mut outcome = outcome();
        outcome.load(ContainerKey::group("default"), Sharables::INVENTORY.into());

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["request"]["cause"], "world_change");
        assert_eq!(json["loads"][0]["container"]["name"], "default");
        assert_eq!(json["loads"][0]["categories"][0], "inventory");
        assert_eq!(json["bypassed"], false);
    }
}
