//! Category registry: every known category and how to capture/apply it.
//!
//! Built-in categories are always present. Custom categories are added at
//! runtime by name together with a [`CategoryHandler`], so other components
//! can extend what gets shared without touching the resolver.

use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use smol_str::SmolStr;

use super::builtin::Sharables;
use super::category::ShareCategory;
use super::configured::{is_all_keyword, ConfiguredShares};
use super::set::ShareSet;
use crate::error::ShareError;
use crate::player::Player;

type CaptureFn = Arc<dyn Fn(&Player) -> Option<Value> + Send + Sync>;
type ApplyFn = Arc<dyn Fn(&mut Player, &Value) + Send + Sync>;
type ResetFn = Arc<dyn Fn(&mut Player) + Send + Sync>;

/// Capture/apply/reset functions for one category.
///
/// `capture` reads the live value off the player (`None` when unset);
/// `apply` writes a stored value back; `reset` puts the category back to
/// its default when a profile holds no value for it. All must be
/// idempotent.
#[derive(Clone)]
pub struct CategoryHandler {
    capture: CaptureFn,
    apply: ApplyFn,
    reset: ResetFn,
}

impl CategoryHandler {
    pub fn new<C, A>(capture: C, apply: A) -> Self
    where
        C: Fn(&Player) -> Option<Value> + Send + Sync + 'static,
        A: Fn(&mut Player, &Value) + Send + Sync + 'static,
    {
        Self {
            capture: Arc::new(capture),
            apply: Arc::new(apply),
            reset: Arc::new(|_: &mut Player| {}),
        }
    }

    /// Replace the reset function. Without one, reset leaves the player
    /// untouched.
    #[must_use]
    pub fn with_reset<R>(mut self, reset: R) -> Self
    where
        R: Fn(&mut Player) + Send + Sync + 'static,
    {
        self.reset = Arc::new(reset);
        self
    }

    /// Handler that copies the player state slot named `slot` verbatim.
    /// Reset clears the slot.
    pub fn slot(slot: impl Into<SmolStr>) -> Self {
        let slot: SmolStr = slot.into();
        let read = slot.clone();
        let clear = slot.clone();
        Self::new(
            move |player| player.get(&read).cloned(),
            move |player, value| player.set(slot.clone(), value.clone()),
        )
        .with_reset(move |player| {
            player.remove(&clear);
        })
    }

    pub fn capture(&self, player: &Player) -> Option<Value> {
        (self.capture)(player)
    }

    pub fn apply(&self, player: &mut Player, value: &Value) {
        (self.apply)(player, value);
    }

    pub fn reset(&self, player: &mut Player) {
        (self.reset)(player);
    }
}

impl fmt::Debug for CategoryHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryHandler").finish_non_exhaustive()
    }
}

/// Registry of every known category.
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    custom: DashMap<SmolStr, CategoryHandler>,
}

impl CategoryRegistry {
    /// Registry with only the built-in categories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom category.
    ///
    /// Names are case-insensitive and stored lowercase. Built-in names,
    /// presets, `all` keywords and names starting with `-` are rejected.
    pub fn register(
        &self,
        name: &str,
        handler: CategoryHandler,
    ) -> Result<ShareCategory, ShareError> {
        let normalized = name.trim().to_ascii_lowercase();
        if normalized.is_empty()
            || normalized.starts_with('-')
            || normalized.chars().any(char::is_whitespace)
            || is_all_keyword(&normalized)
            || Sharables::is_reserved_name(&normalized)
        {
            return Err(ShareError::InvalidCategoryName(name.to_string()));
        }

        let key = SmolStr::new(&normalized);
        match self.custom.entry(key.clone()) {
            Entry::Occupied(_) => Err(ShareError::DuplicateCategory(key)),
            Entry::Vacant(slot) => {
                slot.insert(handler);
                tracing::debug!(category = %key, "Registered custom share category");
                Ok(ShareCategory::Custom(key))
            }
        }
    }

    /// Remove a custom category. Returns whether it was registered.
    pub fn unregister(&self, name: &str) -> bool {
        self.custom
            .remove(name.trim().to_ascii_lowercase().as_str())
            .is_some()
    }

    /// Universal set: every built-in plus every custom category registered
    /// at the moment of the call.
    #[must_use]
    pub fn all(&self) -> ShareSet {
        let mut all = ShareSet::builtin(Sharables::all());
        for entry in self.custom.iter() {
            all.insert(ShareCategory::Custom(entry.key().clone()));
        }
        all
    }

    /// Every known category not in `set`.
    #[must_use]
    pub fn complement_of(&self, set: &ShareSet) -> ShareSet {
        self.all().difference(set)
    }

    /// Whether `set` holds exactly every known category.
    #[must_use]
    pub fn is_sharing_all(&self, set: &ShareSet) -> bool {
        *set == self.all()
    }

    /// Concrete set for a group's configured shares.
    #[must_use]
    pub fn from_configured(&self, configured: &ConfiguredShares) -> ShareSet {
        configured.resolve(&self.all())
    }

    /// Resolve a config name (built-in, preset, or custom) to a set.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ShareSet> {
        if let Some(flags) = Sharables::from_config_name(name) {
            return Some(ShareSet::builtin(flags));
        }
        let key = name.trim().to_ascii_lowercase();
        self.custom
            .contains_key(key.as_str())
            .then(|| std::iter::once(ShareCategory::Custom(SmolStr::new(&key))).collect())
    }

    #[must_use]
    pub fn is_registered(&self, category: &ShareCategory) -> bool {
        match category {
            ShareCategory::Builtin(flag) => flag.name().is_some(),
            ShareCategory::Custom(name) => self.custom.contains_key(name),
        }
    }

    fn handler(&self, category: &ShareCategory) -> Option<CategoryHandler> {
        match category {
            ShareCategory::Builtin(flag) => flag.name().map(CategoryHandler::slot),
            // Clone out so the shard lock is released before the handler runs.
            ShareCategory::Custom(name) => self.custom.get(name).map(|entry| entry.value().clone()),
        }
    }

    /// Live value of `category` on `player`. `None` for unset values and
    /// unregistered categories.
    pub fn capture(&self, category: &ShareCategory, player: &Player) -> Option<Value> {
        self.handler(category)?.capture(player)
    }

    /// Write `value` for `category` onto `player`. Unregistered categories
    /// are ignored.
    pub fn apply(&self, category: &ShareCategory, player: &mut Player, value: &Value) {
        match self.handler(category) {
            Some(handler) => handler.apply(player, value),
            None => tracing::warn!(category = %category, "No handler for share category"),
        }
    }

    /// Return `category` on `player` to its default. Unregistered categories
    /// are ignored.
    pub fn reset(&self, category: &ShareCategory, player: &mut Player) {
        match self.handler(category) {
            Some(handler) => handler.reset(player),
            None => tracing::warn!(category = %category, "No handler for share category"),
        }
    }
}
