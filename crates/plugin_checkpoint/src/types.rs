//! # Core Type Definitions
//!
//! Identifiers and spatial primitives shared by every checkpoint component.
//!
//! - [`PlayerId`] - Unique identifier for a connected player
//! - [`Position`] - 3D world position
//! - [`Pose`] - Position plus heading, as reported by the player directory

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player in the game world.
///
/// Wraps a UUID so player handles cannot be confused with zone indices or
/// other ordinals used by the checkpoint system.
///
/// ```rust
/// use plugin_checkpoint::PlayerId;
///
/// let player_id = PlayerId::new();
/// let parsed: PlayerId = player_id.to_string().parse()?;
/// assert_eq!(player_id, parsed);
/// # Ok::<(), uuid::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Creates a new random player ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::str::FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a 3D position in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Creates a new position with the specified coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin, used as the default zone center.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Coordinates as an array, in x/y/z order.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// A position together with a heading (radians around the vertical axis).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    pub rotation: f64,
}

impl Pose {
    pub fn new(position: Position, rotation: f64) -> Self {
        Self { position, rotation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_round_trips_through_display() {
        let id = PlayerId::new();
        let parsed: PlayerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_player_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_position_array_conversion() {
        let pos = Position::from([1.0, -2.5, 3.0]);
        assert_eq!(pos, Position::new(1.0, -2.5, 3.0));
        assert_eq!(pos.to_array(), [1.0, -2.5, 3.0]);
        assert_eq!(Position::zero(), Position::new(0.0, 0.0, 0.0));
    }
}
