//! Engine Configuration
//!
//! Runtime switches come from environment variables; world groups come from
//! a JSON groups file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::context::WorldRegistry;
use crate::error::ShareError;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the groups file (optional)
    pub groups_path: Option<PathBuf>,

    /// Whether bypass permissions are honored (default: false)
    pub use_bypass: bool,

    /// Whether worlds in no group join the `default` group (default: false)
    pub default_ungrouped_worlds: bool,

    /// Log level for this crate (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            groups_path: env::var("WORLDSHARE_GROUPS_PATH").ok().map(PathBuf::from),
            use_bypass: env_flag("WORLDSHARE_USE_BYPASS")?,
            default_ungrouped_worlds: env_flag("WORLDSHARE_DEFAULT_UNGROUPED_WORLDS")?,
            log_level: env::var("WORLDSHARE_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            groups_path: None,
            use_bypass: true,
            default_ungrouped_worlds: false,
            log_level: "debug".into(),
        }
    }

    /// Load the groups file named by `groups_path`.
    pub fn load_groups(&self) -> Result<GroupsFile> {
        let path = self
            .groups_path
            .as_deref()
            .context("WORLDSHARE_GROUPS_PATH must be set")?;
        GroupsFile::load(path)
            .with_context(|| format!("Failed to load groups from {}", path.display()))
    }
}

fn env_flag(key: &str) -> Result<bool> {
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .with_context(|| format!("{key} must be true or false, got {val:?}")),
        Err(_) => Ok(false),
    }
}

/// One group as written in the groups file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: SmolStr,
    #[serde(default)]
    pub worlds: Vec<SmolStr>,
    /// Share entries such as `"all"`, `"inventory"` or `"-economy"`
    #[serde(default)]
    pub shares: Vec<String>,
}

/// Groups file contents.
///
/// ```json
/// {
///   "worlds": ["world", "world_nether"],
///   "groups": [{ "name": "survival", "worlds": ["world", "world_nether"], "shares": ["all"] }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupsFile {
    /// Every known world
    #[serde(default)]
    pub worlds: Vec<SmolStr>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

impl GroupsFile {
    pub fn load(path: &Path) -> Result<Self, ShareError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ShareError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Registry of every world listed in the file.
    #[must_use]
    pub fn world_registry(&self) -> WorldRegistry {
        WorldRegistry::new(self.worlds.iter().cloned())
    }
}
