//! A single share category.

use std::fmt;

use serde::{Serialize, Serializer};
use smol_str::SmolStr;

use super::builtin::Sharables;

/// One kind of player state tracked independently.
///
/// Built-in categories carry a single [`Sharables`] flag; custom categories
/// are registered at runtime and identified by name only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShareCategory {
    Builtin(Sharables),
    Custom(SmolStr),
}

impl ShareCategory {
    /// Config name of this category.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(flag) => flag.name().unwrap_or("unknown"),
            Self::Custom(name) => name.as_str(),
        }
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<Sharables> for ShareCategory {
    fn from(flag: Sharables) -> Self {
        Self::Builtin(flag)
    }
}

impl fmt::Display for ShareCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ShareCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
