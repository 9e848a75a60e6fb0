//! Transition requests.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use uuid::Uuid;

use crate::player::Player;

/// What triggered a transition. Only used for labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    WorldChange,
    Death,
    Respawn,
}

impl Cause {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorldChange => "world_change",
            Self::Death => "death",
            Self::Respawn => "respawn",
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player moving from one world to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRequest {
    pub player_id: Uuid,
    pub player_name: SmolStr,
    pub from_world: SmolStr,
    pub to_world: SmolStr,
    pub cause: Cause,
    pub requested_at: DateTime<Utc>,
}

impl TransitionRequest {
    pub fn new(
        player: &Player,
        from_world: impl Into<SmolStr>,
        to_world: impl Into<SmolStr>,
        cause: Cause,
    ) -> Self {
        Self {
            player_id: player.id(),
            player_name: player.name().into(),
            from_world: from_world.into(),
            to_world: to_world.into(),
            cause,
            requested_at: Utc::now(),
        }
    }
}
