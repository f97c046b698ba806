//! In-memory game server that hosts the checkpoint plugin.
//!
//! Keeps the player directory, permission grants and a log of every message
//! and kill the plugin asks for, so a session can be inspected afterwards.

use plugin_checkpoint::{PlayerId, PlayerRecord, Pose, Position, Recipient, ServerContext};
use std::cell::RefCell;
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct SimPlayer {
    record: PlayerRecord,
    admin: bool,
    permissions: HashSet<String>,
}

/// A text message the plugin sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: Recipient,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct SimulatedServer {
    players: RefCell<Vec<SimPlayer>>,
    outbox: RefCell<Vec<Delivery>>,
    kills: RefCell<Vec<PlayerId>>,
}

impl SimulatedServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects a player, alive at `pose`. `admin` places them in the
    /// administrator message group.
    pub fn join(
        &self,
        callsign: &str,
        pose: Pose,
        admin: bool,
        permissions: impl IntoIterator<Item = String>,
    ) -> PlayerId {
        let id = PlayerId::new();
        self.players.borrow_mut().push(SimPlayer {
            record: PlayerRecord {
                id,
                callsign: callsign.to_string(),
                position: pose.position,
                rotation: pose.rotation,
                spawned: true,
            },
            admin,
            permissions: permissions.into_iter().collect(),
        });
        info!("🎮 {} joined as {}", callsign, id);
        id
    }

    pub fn part(&self, player_id: PlayerId) -> Option<PlayerRecord> {
        let mut players = self.players.borrow_mut();
        let at = players.iter().position(|p| p.record.id == player_id)?;
        Some(players.remove(at).record)
    }

    pub fn id_of(&self, callsign: &str) -> Option<PlayerId> {
        self.find_player_by_callsign(callsign).map(|p| p.id)
    }

    /// Updates a player's last known pose. `None` keeps the current heading.
    pub fn set_position(&self, player_id: PlayerId, position: Position, rotation: Option<f64>) {
        self.with_player(player_id, |record| {
            record.position = position;
            if let Some(rotation) = rotation {
                record.rotation = rotation;
            }
        });
    }

    pub fn set_spawned(&self, player_id: PlayerId, spawned: bool) {
        self.with_player(player_id, |record| record.spawned = spawned);
    }

    /// Brings a player back to life at `pose`.
    pub fn respawn(&self, player_id: PlayerId, pose: Pose) {
        self.with_player(player_id, |record| {
            record.position = pose.position;
            record.rotation = pose.rotation;
            record.spawned = true;
        });
    }

    pub fn has_permission(&self, player_id: PlayerId, permission: &str) -> bool {
        self.players
            .borrow()
            .iter()
            .any(|p| p.record.id == player_id && p.permissions.contains(permission))
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.outbox.borrow().clone()
    }

    pub fn kills(&self) -> Vec<PlayerId> {
        self.kills.borrow().clone()
    }

    fn with_player(&self, player_id: PlayerId, update: impl FnOnce(&mut PlayerRecord)) {
        if let Some(player) = self
            .players
            .borrow_mut()
            .iter_mut()
            .find(|p| p.record.id == player_id)
        {
            update(&mut player.record);
        }
    }

    fn describe(&self, recipient: Recipient) -> String {
        let players = self.players.borrow();
        match recipient {
            Recipient::Player(id) => players
                .iter()
                .find(|p| p.record.id == id)
                .map(|p| p.record.callsign.clone())
                .unwrap_or_else(|| id.to_string()),
            Recipient::Admins => {
                let admins: Vec<&str> = players
                    .iter()
                    .filter(|p| p.admin)
                    .map(|p| p.record.callsign.as_str())
                    .collect();
                format!("admins [{}]", admins.join(", "))
            }
            Recipient::All => "everyone".to_string(),
        }
    }
}

impl ServerContext for SimulatedServer {
    fn player(&self, player_id: PlayerId) -> Option<PlayerRecord> {
        self.players
            .borrow()
            .iter()
            .find(|p| p.record.id == player_id)
            .map(|p| p.record.clone())
    }

    fn find_player_by_callsign(&self, callsign: &str) -> Option<PlayerRecord> {
        self.players
            .borrow()
            .iter()
            .find(|p| p.record.callsign.eq_ignore_ascii_case(callsign))
            .map(|p| p.record.clone())
    }

    fn connected_players(&self) -> Vec<PlayerId> {
        self.players.borrow().iter().map(|p| p.record.id).collect()
    }

    fn send_message(&self, recipient: Recipient, text: &str) {
        info!("💬 to {}: {}", self.describe(recipient), text);
        self.outbox.borrow_mut().push(Delivery {
            recipient,
            text: text.to_string(),
        });
    }

    fn kill_player(&self, player_id: PlayerId) {
        debug!("💀 killing {}", self.describe(Recipient::Player(player_id)));
        self.set_spawned(player_id, false);
        self.kills.borrow_mut().push(player_id);
    }
}
