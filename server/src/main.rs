//! Worldshare Server - Dry-Run Entry Point
//!
//! Replays a JSON list of transitions against the configured groups and
//! prints each outcome as one JSON line.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use smol_str::SmolStr;
use tracing::info;
use uuid::Uuid;

use worldshare_server::config::Config;
use worldshare_server::player::Player;
use worldshare_server::profile::InMemoryProfileStore;
use worldshare_server::share::CategoryRegistry;
use worldshare_server::transition::{Cause, ShareService, TransitionRequest};

/// One entry of the transitions file.
#[derive(Debug, Deserialize)]
struct TransitionEntry {
    player: SmolStr,
    from: SmolStr,
    to: SmolStr,
    #[serde(default = "default_cause")]
    cause: Cause,
    /// Permission nodes granted before this transition
    #[serde(default)]
    bypass: Vec<String>,
    /// Live state slots set before this transition
    #[serde(default)]
    state: BTreeMap<SmolStr, Value>,
}

const fn default_cause() -> Cause {
    Cause::WorldChange
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries outcomes
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("worldshare_server={}", config.log_level).into()
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: worldshare-server <transitions.json>");
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Worldshare dry run"
    );

    let groups = config.load_groups()?;
    let service = ShareService::from_config(
        &config,
        &groups,
        Arc::new(CategoryRegistry::new()),
        Arc::new(InMemoryProfileStore::new()),
    )?;

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read transitions from {}", path.display()))?;
    let entries: Vec<TransitionEntry> =
        serde_json::from_str(&raw).context("Invalid transitions file")?;

    let mut players: HashMap<SmolStr, Player> = HashMap::new();
    for entry in entries {
        let player = players
            .entry(entry.player.clone())
            .or_insert_with(|| Player::new(Uuid::now_v7(), entry.player.clone()));
        for (slot, value) in entry.state {
            player.set(slot, value);
        }
        if let Some(permissions) = service.permissions() {
            for node in entry.bypass {
                permissions.grant(player.id(), node);
            }
        }

        let request = TransitionRequest::new(player, entry.from, entry.to, entry.cause);
        let outcome = service.handle(request, player)?;
        println!("{}", serde_json::to_string(&outcome)?);
    }

    info!(players = players.len(), "Dry run complete");
    Ok(())
}
