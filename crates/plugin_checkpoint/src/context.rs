//! # Server Context Interface
//!
//! The narrow view of the host server that the checkpoint plugin needs:
//! player lookups, text messaging and forced kills, plus a separate
//! [`Authorizer`] for capability checks.
//!
//! The plugin processes one event at a time on the host's event thread, so
//! these traits take `&self` and carry no `Send`/`Sync` bounds. Hosts that
//! record outbound traffic can use interior mutability.

use crate::types::{PlayerId, Pose, Position};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Snapshot of a player as known to the host's player directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub callsign: String,
    /// Last known position.
    pub position: Position,
    /// Last known heading.
    pub rotation: f64,
    /// Whether the player is currently alive in the world.
    pub spawned: bool,
}

impl PlayerRecord {
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }
}

/// Who a text message is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    Player(PlayerId),
    /// Everyone holding the server's administrator role.
    Admins,
    All,
}

/// Host services used while handling events and commands.
pub trait ServerContext: Debug {
    /// Looks a player up by id. `None` when the player is not connected.
    fn player(&self, player_id: PlayerId) -> Option<PlayerRecord>;

    /// Looks a connected player up by callsign.
    fn find_player_by_callsign(&self, callsign: &str) -> Option<PlayerRecord>;

    /// Ids of every connected player.
    fn connected_players(&self) -> Vec<PlayerId>;

    /// Sends a server text message.
    fn send_message(&self, recipient: Recipient, text: &str);

    /// Ends the player's current life.
    fn kill_player(&self, player_id: PlayerId);
}

/// Answers whether a player holds a named capability.
pub trait Authorizer {
    fn has_capability(&self, player_id: PlayerId, capability: &str) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(PlayerId, &str) -> bool,
{
    fn has_capability(&self, player_id: PlayerId, capability: &str) -> bool {
        self(player_id, capability)
    }
}
