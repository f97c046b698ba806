//! # Host Events
//!
//! Typed event records the host delivers to the checkpoint plugin. Events
//! serialize as internally tagged JSON so hosts and replay scripts can carry
//! them as plain text:
//!
//! ```json
//! { "type": "shot_fired", "player_id": "550e8400-e29b-41d4-a716-446655440000",
//!   "position": { "x": 1.0, "y": 2.0, "z": 0.0 } }
//! ```

use crate::types::{PlayerId, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A team flag was captured.
    Capture {
        #[serde(default)]
        capturing_team: Option<String>,
    },
    /// A player left the server.
    PlayerPart { player_id: PlayerId },
    /// The host is choosing where the player respawns.
    SpawnPositionRequest { player_id: PlayerId },
    /// A player fired; `position` is the shooter's location at fire time.
    ShotFired {
        player_id: PlayerId,
        position: Position,
    },
    /// A player sent a state update. The position comes from the directory.
    PlayerUpdate { player_id: PlayerId },
}

impl HostEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HostEvent::Capture { .. } => "capture",
            HostEvent::PlayerPart { .. } => "player_part",
            HostEvent::SpawnPositionRequest { .. } => "spawn_position_request",
            HostEvent::ShotFired { .. } => "shot_fired",
            HostEvent::PlayerUpdate { .. } => "player_update",
        }
    }

    /// The player the event concerns, if any.
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            HostEvent::Capture { .. } => None,
            HostEvent::PlayerPart { player_id }
            | HostEvent::SpawnPositionRequest { player_id }
            | HostEvent::ShotFired { player_id, .. }
            | HostEvent::PlayerUpdate { player_id } => Some(*player_id),
        }
    }
}
