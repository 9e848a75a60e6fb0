//! Transition handling: validate, resolve, notify, apply.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use super::outcome::TransitionOutcome;
use super::request::TransitionRequest;
use super::resolver::TransitionResolver;
use crate::bypass::PermissionBypass;
use crate::config::{Config, GroupsFile};
use crate::context::{GroupRegistry, WorldRegistry};
use crate::error::ShareError;
use crate::player::Player;
use crate::profile::{capture_categories, load_categories, ProfileStore};
use crate::share::CategoryRegistry;

/// Observes resolved transitions before they are applied.
pub trait HandlingListener: Send + Sync {
    /// Called once per transition with the planned outcome. Calling
    /// [`TransitionOutcome::cancel`] prevents it from being applied.
    fn on_handling(&self, outcome: &mut TransitionOutcome);
}

/// Runs transitions against a profile store.
pub struct ShareService {
    worlds: WorldRegistry,
    resolver: TransitionResolver,
    store: Arc<dyn ProfileStore>,
    permissions: Option<Arc<PermissionBypass>>,
    listeners: Vec<Arc<dyn HandlingListener>>,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl std::fmt::Debug for ShareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareService")
            .field("worlds", &self.worlds)
            .field("resolver", &self.resolver)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl ShareService {
    pub fn new(
        worlds: WorldRegistry,
        resolver: TransitionResolver,
        store: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            worlds,
            resolver,
            store,
            permissions: None,
            listeners: Vec::new(),
            locks: DashMap::new(),
        }
    }

    /// Build a service from configuration.
    ///
    /// Custom categories referenced by the groups file must already be
    /// registered in `categories`. Bypass is backed by a [`PermissionBypass`]
    /// enabled per `config.use_bypass`, reachable via [`Self::permissions`].
    pub fn from_config(
        config: &Config,
        file: &GroupsFile,
        categories: Arc<CategoryRegistry>,
        store: Arc<dyn ProfileStore>,
    ) -> Result<Self, ShareError> {
        let worlds = file.world_registry();
        let groups = GroupRegistry::from_config(
            file,
            &worlds,
            &categories,
            config.default_ungrouped_worlds,
        )?;
        let permissions = Arc::new(PermissionBypass::new(config.use_bypass));
        let resolver = TransitionResolver::new(categories, Arc::new(groups), permissions.clone());

        info!(
            worlds = worlds.len(),
            use_bypass = config.use_bypass,
            "Share service ready"
        );

        let mut service = Self::new(worlds, resolver, store);
        service.permissions = Some(permissions);
        Ok(service)
    }

    pub fn add_listener(&mut self, listener: Arc<dyn HandlingListener>) {
        self.listeners.push(listener);
    }

    #[must_use]
    pub const fn worlds(&self) -> &WorldRegistry {
        &self.worlds
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryRegistry {
        self.resolver.categories()
    }

    /// Permission grants, when built by [`Self::from_config`].
    #[must_use]
    pub fn permissions(&self) -> Option<&PermissionBypass> {
        self.permissions.as_deref()
    }

    /// Resolve and apply one transition.
    ///
    /// Unknown worlds and a request for a different player are rejected
    /// before anything is resolved. Transitions for the same player are
    /// serialized.
    #[tracing::instrument(
        skip(self, request, player),
        fields(
            player = %request.player_name,
            from = %request.from_world,
            to = %request.to_world,
        )
    )]
    pub fn handle(
        &self,
        request: TransitionRequest,
        player: &mut Player,
    ) -> Result<TransitionOutcome, ShareError> {
        self.worlds.require(&request.from_world)?;
        self.worlds.require(&request.to_world)?;
        if request.player_id != player.id() {
            return Err(ShareError::PlayerMismatch {
                expected: request.player_id,
                actual: player.id(),
            });
        }

        let lock = self.player_lock(player.id());
        let outcome = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.run(&request, player)
        };
        drop(lock);
        self.release_lock(player.id());

        Ok(outcome)
    }

    fn run(&self, request: &TransitionRequest, player: &mut Player) -> TransitionOutcome {
        let mut outcome = self.resolver.resolve(request);
        for listener in &self.listeners {
            listener.on_handling(&mut outcome);
        }

        if outcome.cancelled {
            debug!("Transition cancelled by listener");
            return outcome;
        }

        self.apply(&outcome, player);
        outcome
    }

    fn apply(&self, outcome: &TransitionOutcome, player: &mut Player) {
        let categories = self.resolver.categories();
        for touch in &outcome.captures {
            capture_categories(
                self.store.as_ref(),
                categories,
                &touch.container,
                &touch.categories,
                player,
            );
        }
        for touch in &outcome.loads {
            load_categories(
                self.store.as_ref(),
                categories,
                &touch.container,
                &touch.categories,
                player,
            );
        }
    }

    fn player_lock(&self, player: Uuid) -> Arc<Mutex<()>> {
        Arc::clone(&self.locks.entry(player).or_default())
    }

    /// Drop the lock entry once no transition holds it, so the map only
    /// tracks players with a transition in flight.
    fn release_lock(&self, player: Uuid) {
        self.locks
            .remove_if(&player, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bypass::BypassNode;
    use crate::config::GroupConfig;
    use crate::profile::{ContainerKey, InMemoryProfileStore};
    use crate::transition::Cause;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn groups_file() -> GroupsFile {
        GroupsFile {
            worlds: vec!["world".into(), "world_nether".into(), "world2".into()],
            groups: vec![GroupConfig {
                name: "default".into(),
                worlds: vec!["world2".into()],
                shares: vec!["inventory".into()],
            }],
        }
    }

    fn service(store: Arc<InMemoryProfileStore>) -> ShareService {
        ShareService::from_config(
            &Config::default_for_test(),
            &groups_file(),
            Arc::new(CategoryRegistry::new()),
            store,
        )
        .unwrap()
    }

    fn player() -> Player {
        let mut player = Player::new(Uuid::now_v7(), "Steve");
        player.set("inventory", json!(["stone"]));
        player.set("health", json!(20.0));
        player
    }

    struct Cancel(AtomicUsize);

    impl HandlingListener for Cancel {
        fn on_handling(&self, outcome: &mut TransitionOutcome) {
            self.0.fetch_add(1, Ordering::SeqCst);
            outcome.cancel();
        }
    }

    #[test]
    fn test_handle_applies_outcome() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = service(store.clone());
        let mut player = player();

        let request = TransitionRequest::new(&player, "world", "world2", Cause::WorldChange);
        let outcome = service.handle(request, &mut player).unwrap();

        assert!(!outcome.cancelled);
        let saved = store
            .player_data(&ContainerKey::world("world"), player.id())
            .unwrap();
        assert_eq!(saved.get(&crate::share::Sharables::HEALTH.into()), Some(&json!(20.0)));
    }

    #[test]
    fn test_player_locks_released_after_handle() {
        let service = service(Arc::new(InMemoryProfileStore::new()));
        let mut player = player();

        for (from, to) in [("world", "world2"), ("world2", "world_nether"), ("world_nether", "world")] {
            let request = TransitionRequest::new(&player, from, to, Cause::WorldChange);
            service.handle(request, &mut player).unwrap();
        }
        assert!(service.locks.is_empty());
    }

    #[test]
    fn test_player_lock_kept_while_held_elsewhere() {
        let service = service(Arc::new(InMemoryProfileStore::new()));
        let mut player = player();
        let held = service.player_lock(player.id());

        let request = TransitionRequest::new(&player, "world", "world2", Cause::WorldChange);
        service.handle(request, &mut player).unwrap();
        assert_eq!(service.locks.len(), 1);

        drop(held);
        let request = TransitionRequest::new(&player, "world2", "world", Cause::WorldChange);
        service.handle(request, &mut player).unwrap();
        assert!(service.locks.is_empty());
    }

    #[test]
    fn test_unknown_world_rejected() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = service(store.clone());
        let mut player = player();

        let request = TransitionRequest::new(&player, "world", "world_the_end", Cause::WorldChange);
        let err = service.handle(request, &mut player).unwrap_err();

        assert!(matches!(err, ShareError::UnknownWorld(ref w) if w == "world_the_end"));
        assert!(err.is_configuration_error());
        assert!(store.is_empty());
    }

    #[test]
    fn test_player_mismatch_rejected() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = service(store.clone());
        let mut player = player();
        let other = Player::new(Uuid::now_v7(), "Alex");

        let request = TransitionRequest::new(&other, "world", "world2", Cause::WorldChange);
        let err = service.handle(request, &mut player).unwrap_err();

        assert!(matches!(err, ShareError::PlayerMismatch { .. }));
        assert!(!err.is_configuration_error());
        assert!(store.is_empty());
    }

    #[test]
    fn test_cancelled_outcome_applies_nothing() {
        let store = Arc::new(InMemoryProfileStore::new());
        let mut service = service(store.clone());
        let listener = Arc::new(Cancel(AtomicUsize::new(0)));
        service.add_listener(listener.clone());
        let mut player = player();
        let before = player.clone();

        let request = TransitionRequest::new(&player, "world", "world2", Cause::WorldChange);
        let outcome = service.handle(request, &mut player).unwrap();

        assert!(outcome.cancelled);
        assert!(!outcome.loads.is_empty());
        assert_eq!(listener.0.load(Ordering::SeqCst), 1);
        assert!(store.is_empty());
        assert_eq!(player, before);
    }

    #[test]
    fn test_permissions_follow_config() {
        let store = Arc::new(InMemoryProfileStore::new());
        let service = service(store);
        let permissions = service.permissions().unwrap();
        assert!(permissions.is_enabled());

        let mut player = player();
        permissions.grant(player.id(), BypassNode::World.node("world2"));
        let request = TransitionRequest::new(&player, "world", "world2", Cause::Respawn);
        let outcome = service.handle(request, &mut player).unwrap();

        assert!(outcome.bypassed);
        assert!(outcome.loads.is_empty());
    }

    #[test]
    fn test_bypass_disabled_by_config() {
        let config = Config {
            use_bypass: false,
            ..Config::default_for_test()
        };
        let service = ShareService::from_config(
            &config,
            &groups_file(),
            Arc::new(CategoryRegistry::new()),
            Arc::new(InMemoryProfileStore::new()),
        )
        .unwrap();

        let mut player = player();
        let permissions = service.permissions().unwrap();
        permissions.grant(player.id(), BypassNode::World.node("world2"));
        let request = TransitionRequest::new(&player, "world", "world2", Cause::WorldChange);
        let outcome = service.handle(request, &mut player).unwrap();

        assert!(!outcome.bypassed);
        assert!(!outcome.loads.is_empty());

        permissions.set_enabled(true);
        let request = TransitionRequest::new(&player, "world_nether", "world2", Cause::WorldChange);
        let outcome = service.handle(request, &mut player).unwrap();
        assert!(outcome.bypassed);
        assert!(outcome.loads.is_empty());
    }

    #[test]
    fn test_from_config_rejects_unknown_share() {
        let mut file = groups_file();
        file.groups[0].shares = vec!["mana".into()];

        let err = ShareService::from_config(
            &Config::default_for_test(),
            &file,
            Arc::new(CategoryRegistry::new()),
            Arc::new(InMemoryProfileStore::new()),
        )
        .unwrap_err();
        assert!(matches!(err, ShareError::UnknownShare(_)));
    }
}
