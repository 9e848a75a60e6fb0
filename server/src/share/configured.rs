//! Share lists as written in group configuration.

use super::registry::CategoryRegistry;
use super::set::ShareSet;
use crate::error::ShareError;

/// Entries that claim every category.
pub const ALL_KEYWORDS: [&str; 3] = ["all", "*", "everything"];

/// Whether `entry` is one of [`ALL_KEYWORDS`].
#[must_use]
pub fn is_all_keyword(entry: &str) -> bool {
    let entry = entry.trim();
    ALL_KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(entry))
}

/// A group's configured shares before they are made concrete.
///
/// Kept unresolved so that `all` keeps meaning "every category registered
/// right now", including custom categories registered after the group was
/// loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredShares {
    all: bool,
    include: ShareSet,
    exclude: ShareSet,
}

impl ConfiguredShares {
    /// Shares every category.
    #[must_use]
    pub const fn everything() -> Self {
        Self {
            all: true,
            include: ShareSet::none(),
            exclude: ShareSet::none(),
        }
    }

    /// Shares exactly `include`.
    #[must_use]
    pub const fn only(include: ShareSet) -> Self {
        Self {
            all: false,
            include,
            exclude: ShareSet::none(),
        }
    }

    /// Parse config entries such as `["all", "-economy"]` or
    /// `["inventory", "stats"]`.
    ///
    /// A leading `-` excludes the entry; exclusions win over inclusions
    /// regardless of order.
    pub fn parse<I, S>(entries: I, registry: &CategoryRegistry) -> Result<Self, ShareError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut shares = Self::default();

        for entry in entries {
            let entry = entry.as_ref().trim();
            let (negated, name) = match entry.strip_prefix('-') {
                Some(rest) => (true, rest.trim()),
                None => (false, entry),
            };

            if is_all_keyword(name) {
                if negated {
                    return Err(ShareError::UnknownShare(entry.to_string()));
                }
                shares.all = true;
                continue;
            }

            let set = registry
                .lookup(name)
                .ok_or_else(|| ShareError::UnknownShare(entry.to_string()))?;
            if negated {
                shares.exclude.extend_from(&set);
            } else {
                shares.include.extend_from(&set);
            }
        }

        Ok(shares)
    }

    /// Whether the configuration claims `all`.
    #[must_use]
    pub const fn claims_all(&self) -> bool {
        self.all
    }

    /// Concrete set against `universe`.
    #[must_use]
    pub fn resolve(&self, universe: &ShareSet) -> ShareSet {
        let base = if self.all {
            universe.clone()
        } else {
            self.include.intersection(universe)
        };
        base.difference(&self.exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::{CategoryHandler, ShareCategory, Sharables};

    fn registry() -> CategoryRegistry {
        let registry = CategoryRegistry::new();
        registry
            .register("mana", CategoryHandler::slot("mana"))
            .unwrap();
        registry
    }

    #[test]
    fn test_all_keywords() {
        assert!(is_all_keyword("all"));
        assert!(is_all_keyword(" ALL "));
        assert!(is_all_keyword("*"));
        assert!(is_all_keyword("everything"));
        assert!(!is_all_keyword("inventory"));
    }

    #[test]
    fn test_parse_all() {
        let registry = registry();
        let shares = ConfiguredShares::parse(["all"], &registry).unwrap();
        assert!(shares.claims_all());
        assert_eq!(shares.resolve(&registry.all()), registry.all());
    }

    #[test]
    fn test_parse_names_and_presets() {
        let registry = registry();
        let shares = ConfiguredShares::parse(["inventory", "all_experience", "mana"], &registry).unwrap();
        let resolved = shares.resolve(&registry.all());

        assert!(resolved.contains(&Sharables::INVENTORY.into()));
        assert!(resolved.contains(&Sharables::LEVEL.into()));
        assert!(resolved.contains(&ShareCategory::Custom("mana".into())));
        assert!(!resolved.contains(&Sharables::HEALTH.into()));
        assert_eq!(resolved.len(), 5);
    }

    #[test]
    fn test_parse_exclusions_win() {
        let registry = registry();
        let shares = ConfiguredShares::parse(["-economy", "all"], &registry).unwrap();
        let resolved = shares.resolve(&registry.all());

        assert!(!resolved.contains(&Sharables::ECONOMY.into()));
        assert_eq!(resolved, registry.complement_of(&Sharables::ECONOMY.into()));
    }

    #[test]
    fn test_parse_unknown_share() {
        let registry = registry();
        let err = ConfiguredShares::parse(["inventory", "inventroy"], &registry).unwrap_err();
        assert!(matches!(err, ShareError::UnknownShare(ref name) if name == "inventroy"));
    }

    #[test]
    fn test_parse_negated_all_rejected() {
        let registry = registry();
        assert!(ConfiguredShares::parse(["-all"], &registry).is_err());
    }

    #[test]
    fn test_all_tracks_later_registrations() {
        let registry = CategoryRegistry::new();
        let shares = ConfiguredShares::everything();
        let before = shares.resolve(&registry.all());

        registry
            .register("mana", CategoryHandler::slot("mana"))
            .unwrap();
        let after = shares.resolve(&registry.all());

        assert!(!before.contains(&ShareCategory::Custom("mana".into())));
        assert!(after.contains(&ShareCategory::Custom("mana".into())));
    }

    #[test]
    fn test_only_drops_unregistered_categories() {
        let registry = CategoryRegistry::new();
        let include: ShareSet = [ShareCategory::Custom("ghost".into()), Sharables::ARMOR.into()]
            .into_iter()
            .collect();
        let resolved = ConfiguredShares::only(include).resolve(&registry.all());
        assert_eq!(resolved, ShareSet::from(Sharables::ARMOR));
    }
}
