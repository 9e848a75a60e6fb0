//! Set algebra over share categories.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};
use smol_str::SmolStr;

use super::builtin::Sharables;
use super::category::ShareCategory;

/// An unordered set of [`ShareCategory`] values.
///
/// Built-in categories live in a bitfield and custom ones in a sorted name
/// set, so two sets with the same members always compare equal. The empty
/// set is [`ShareSet::none`]; the universal set is
/// [`CategoryRegistry::all`](super::CategoryRegistry::all), since only the
/// registry knows which custom categories exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShareSet {
    builtin: Sharables,
    custom: BTreeSet<SmolStr>,
}

impl ShareSet {
    /// The empty set.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            builtin: Sharables::empty(),
            custom: BTreeSet::new(),
        }
    }

    /// A set holding only built-in categories.
    #[must_use]
    pub const fn builtin(flags: Sharables) -> Self {
        Self {
            builtin: flags,
            custom: BTreeSet::new(),
        }
    }

    /// Built-in part of this set.
    #[must_use]
    pub const fn builtin_flags(&self) -> Sharables {
        self.builtin
    }

    pub fn insert(&mut self, category: ShareCategory) {
        match category {
            ShareCategory::Builtin(flag) => self.builtin |= flag,
            ShareCategory::Custom(name) => {
                self.custom.insert(name);
            }
        }
    }

    /// Categories in `self` or `other`, as a new set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend_from(other);
        merged
    }

    /// Add every category of `other` to `self` in place.
    pub fn extend_from(&mut self, other: &Self) {
        self.builtin |= other.builtin;
        self.custom.extend(other.custom.iter().cloned());
    }

    /// Categories in `self` but not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            builtin: self.builtin.difference(other.builtin),
            custom: self.custom.difference(&other.custom).cloned().collect(),
        }
    }

    /// Categories in both `self` and `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            builtin: self.builtin.intersection(other.builtin),
            custom: self.custom.intersection(&other.custom).cloned().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, category: &ShareCategory) -> bool {
        match category {
            ShareCategory::Builtin(flag) => !flag.is_empty() && self.builtin.contains(*flag),
            ShareCategory::Custom(name) => self.custom.contains(name),
        }
    }

    /// Whether every category of `other` is also in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        self.builtin.contains(other.builtin) && self.custom.is_superset(&other.custom)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty() && self.custom.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.builtin.iter().count() + self.custom.len()
    }

    /// Built-in categories in bit order, then custom categories by name.
    pub fn iter(&self) -> impl Iterator<Item = ShareCategory> + '_ {
        self.builtin
            .iter()
            .map(ShareCategory::Builtin)
            .chain(self.custom.iter().cloned().map(ShareCategory::Custom))
    }
}

impl From<Sharables> for ShareSet {
    fn from(flags: Sharables) -> Self {
        Self::builtin(flags)
    }
}

impl FromIterator<ShareCategory> for ShareSet {
    fn from_iter<I: IntoIterator<Item = ShareCategory>>(iter: I) -> Self {
        let mut set = Self::none();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl fmt::Display for ShareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, category) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(category.name())?;
        }
        f.write_str("]")
    }
}

impl Serialize for ShareSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
