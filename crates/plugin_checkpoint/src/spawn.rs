//! # Saved Spawn Points
//!
//! Per-player respawn poses captured while the player stands inside a
//! checkpoint zone. A stored pose replaces the host's own spawn placement.

use crate::types::{PlayerId, Pose, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Position and heading to respawn a player at.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub theta: f64,
}

impl SpawnPoint {
    pub fn new(position: Position, rotation: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            theta: rotation,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position(), self.theta)
    }
}

impl From<Pose> for SpawnPoint {
    fn from(pose: Pose) -> Self {
        Self::new(pose.position, pose.rotation)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpawnPointStore {
    points: HashMap<PlayerId, SpawnPoint>,
}

impl SpawnPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the pose, replacing any earlier one.
    pub fn upsert(&mut self, player_id: PlayerId, position: Position, rotation: f64) {
        self.points
            .insert(player_id, SpawnPoint::new(position, rotation));
    }

    pub fn query(&self, player_id: PlayerId) -> Option<SpawnPoint> {
        self.points.get(&player_id).copied()
    }

    pub fn clear(&mut self, player_id: PlayerId) -> Option<SpawnPoint> {
        let removed = self.points.remove(&player_id);
        if removed.is_some() {
            debug!("🏁 Checkpoint: cleared spawn point for {}", player_id);
        }
        removed
    }

    /// Drops every saved spawn point, returning how many were held.
    pub fn clear_all(&mut self) -> usize {
        let count = self.points.len();
        self.points.clear();
        debug!("🏁 Checkpoint: cleared {} spawn points", count);
        count
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_returns_exact_upserted_pose() {
        let mut store = SpawnPointStore::new();
        let player = PlayerId::new();
        let pos = Position::new(3.0, -4.5, 10.25);

        store.upsert(player, pos, 1.5);
        let point = store.query(player).unwrap();
        assert_eq!(point.position(), pos);
        assert_eq!(point.theta, 1.5);
        assert_eq!(point.pose(), Pose::new(pos, 1.5));
    }

    #[test]
    fn test_upsert_overwrites() {
        let mut store = SpawnPointStore::new();
        let player = PlayerId::new();

        store.upsert(player, Position::new(1.0, 1.0, 1.0), 0.0);
        store.upsert(player, Position::new(2.0, 2.0, 2.0), 3.0);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.query(player),
            Some(SpawnPoint { x: 2.0, y: 2.0, z: 2.0, theta: 3.0 })
        );
    }

    #[test]
    fn test_clear_removes_only_that_player() {
        let mut store = SpawnPointStore::new();
        let alice = PlayerId::new();
        let bob = PlayerId::new();
        store.upsert(alice, Position::zero(), 0.0);
        store.upsert(bob, Position::zero(), 0.0);

        assert!(store.clear(alice).is_some());
        assert!(store.query(alice).is_none());
        assert!(store.query(bob).is_some());
        assert!(store.clear(alice).is_none());
    }

    #[test]
    fn test_clear_all_empties_every_entry() {
        let mut store = SpawnPointStore::new();
        let players: Vec<PlayerId> = (0..3).map(|_| PlayerId::new()).collect();
        for (i, player) in players.iter().enumerate() {
            store.upsert(*player, Position::new(i as f64, 0.0, 0.0), 0.0);
        }

        assert_eq!(store.clear_all(), 3);
        assert!(store.is_empty());
        for player in players {
            assert!(store.query(player).is_none());
        }
    }
}
