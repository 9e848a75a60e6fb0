//! Transition resolution.
//!
//! Decides, for one transition, which categories are captured into which
//! containers and which are loaded from where. Nothing is applied here.

use std::sync::Arc;

use tracing::{debug, trace};

use super::outcome::TransitionOutcome;
use super::request::TransitionRequest;
use crate::bypass::BypassPolicy;
use crate::context::{GroupMembership, WorldContext};
use crate::profile::ContainerKey;
use crate::share::{CategoryRegistry, ShareSet};

/// Plans captures and loads for world transitions.
///
/// Resolution order:
/// 1. The source world always captures every category
/// 2. World bypass for the destination stops resolution
/// 3. Source groups capture their shares, except all-sharing groups that
///    also contain the destination
/// 4. Destination groups load their shares, except all-sharing groups that
///    also contain the source, which cover every category on their own;
///    with no destination groups the destination world loads everything
/// 5. The destination world loads whatever no group covered
#[derive(Clone)]
pub struct TransitionResolver {
    categories: Arc<CategoryRegistry>,
    groups: Arc<dyn GroupMembership>,
    bypass: Arc<dyn BypassPolicy>,
}

impl std::fmt::Debug for TransitionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionResolver")
            .field("categories", &self.categories)
            .finish_non_exhaustive()
    }
}

impl TransitionResolver {
    pub fn new(
        categories: Arc<CategoryRegistry>,
        groups: Arc<dyn GroupMembership>,
        bypass: Arc<dyn BypassPolicy>,
    ) -> Self {
        Self {
            categories,
            groups,
            bypass,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Plan a transition.
    #[tracing::instrument(
        skip(self, request),
        fields(
            player = %request.player_name,
            from = %request.from_world,
            to = %request.to_world,
            cause = %request.cause,
        )
    )]
    pub fn resolve(&self, request: &TransitionRequest) -> TransitionOutcome {
        let all = self.categories.all();
        let player = request.player_id;
        let from = request.from_world.as_str();
        let to = request.to_world.as_str();
        let source = WorldContext::new(from);
        let destination = WorldContext::new(to);
        let mut outcome = TransitionOutcome::new(request.clone());

        outcome.capture(source.container(), source.shares(&all));

        if self.bypass.has_world_bypass(player, to) {
            debug!("World bypass, skipping destination handling");
            outcome.bypassed = true;
            return outcome;
        }

        let from_groups = self.groups.groups_containing(from);
        if from_groups.is_empty() {
            trace!("No groups for source world");
        }
        for group in &from_groups {
            if group.contains_world(to) && group.is_sharing_all(&all) {
                trace!(group = group.name(), "Group spans both worlds and shares all, no capture");
                continue;
            }
            let shares = group.shares(&all);
            trace!(group = group.name(), %shares, "Capturing group shares");
            outcome.capture(ContainerKey::group(group.name()), shares);
        }

        let to_groups = self.groups.groups_containing(to);
        let resolved = if to_groups.is_empty() {
            trace!("No groups for destination world, loading everything from it");
            let shares = destination.shares(&all);
            outcome.load(destination.container(), shares.clone());
            shares
        } else {
            let mut resolved = ShareSet::none();
            for group in &to_groups {
                if self.bypass.has_group_bypass(player, group.name()) {
                    debug!(group = group.name(), "Group bypass, skipping group load");
                    outcome.bypassed = true;
                    continue;
                }
                if group.contains_world(from) && group.is_sharing_all(&all) {
                    trace!(group = group.name(), "Group spans both worlds and shares all");
                    resolved = all.clone();
                    continue;
                }
                let shares = group.shares(&all);
                trace!(group = group.name(), %shares, "Loading group shares");
                resolved = resolved.union(&shares);
                outcome.load(ContainerKey::group(group.name()), shares);
            }
            resolved
        };

        let remaining = all.difference(&resolved);
        if !remaining.is_empty() {
            trace!(%remaining, "Loading remaining categories from destination world");
            outcome.load(destination.container(), remaining);
        }

        debug!(
            captures = outcome.captures.len(),
            loads = outcome.loads.len(),
            bypassed = outcome.bypassed,
            "Resolved transition"
        );
        outcome
    }
}
