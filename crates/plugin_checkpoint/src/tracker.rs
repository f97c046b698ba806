//! # Zone Membership Tracking
//!
//! Keeps the last zone each player was seen in and reports when a player
//! enters a zone other than the one remembered.
//!
//! The remembered zone only moves forward on a positive match. Leaving every
//! zone does not reset it, so walking out of a zone and back into the same one
//! is not a transition, while entering any other zone is.

use crate::types::{PlayerId, Position};
use crate::zone::{ZoneIndex, ZoneRegistry};
use std::collections::HashMap;
use tracing::debug;

/// Per-player membership state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerZoneState {
    /// Last zone the player was found in. `None` until the first match.
    pub last_zone: Option<ZoneIndex>,
}

/// Outcome of a single [`ZoneTracker::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    /// Zone containing the position, if any.
    pub entered_zone: Option<ZoneIndex>,
    /// True when `entered_zone` is a zone other than the remembered one.
    pub changed: bool,
}

impl TransitionResult {
    pub fn is_inside(&self) -> bool {
        self.entered_zone.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZoneTracker {
    states: HashMap<PlayerId, PlayerZoneState>,
}

impl ZoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the player's zone and advances their state.
    pub fn update(
        &mut self,
        registry: &ZoneRegistry,
        player_id: PlayerId,
        position: Position,
    ) -> TransitionResult {
        let state = self.states.entry(player_id).or_default();
        let previous = state.last_zone;
        let current = registry.locate(position);

        if current.is_some() {
            state.last_zone = current;
        }

        let changed = current.is_some() && current != previous;
        if changed {
            debug!(
                "🏁 Checkpoint: player {} moved from {:?} into zone {:?}",
                player_id, previous, current
            );
        }

        TransitionResult {
            entered_zone: current,
            changed,
        }
    }

    pub fn state(&self, player_id: PlayerId) -> Option<&PlayerZoneState> {
        self.states.get(&player_id)
    }

    /// Forgets a departed player.
    pub fn remove(&mut self, player_id: PlayerId) -> Option<PlayerZoneState> {
        self.states.remove(&player_id)
    }

    pub fn tracked_players(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_zone_registry() -> ZoneRegistry {
        let mut registry = ZoneRegistry::new();
        registry.load(["POSITION 0 0 0", "SIZE 5 5 5"]);
        registry.load(["POSITION 100 0 0", "SIZE 5 5 5"]);
        registry
    }

    #[test]
    fn test_first_entry_into_zone_zero_is_a_transition() {
        let registry = two_zone_registry();
        let mut tracker = ZoneTracker::new();
        let player = PlayerId::new();

        let result = tracker.update(&registry, player, Position::new(1.0, 1.0, 1.0));
        assert_eq!(result.entered_zone, Some(ZoneIndex(0)));
        assert!(result.changed);
        assert_eq!(tracker.state(player).unwrap().last_zone, Some(ZoneIndex(0)));
    }

    #[test]
    fn test_moving_within_a_zone_is_not_a_transition() {
        let registry = two_zone_registry();
        let mut tracker = ZoneTracker::new();
        let player = PlayerId::new();

        tracker.update(&registry, player, Position::new(1.0, 1.0, 1.0));
        let result = tracker.update(&registry, player, Position::new(-4.0, 2.0, 5.0));
        assert_eq!(result.entered_zone, Some(ZoneIndex(0)));
        assert!(!result.changed);
    }

    #[test]
    fn test_moving_between_zones_is_a_transition() {
        let registry = two_zone_registry();
        let mut tracker = ZoneTracker::new();
        let player = PlayerId::new();

        tracker.update(&registry, player, Position::zero());
        let result = tracker.update(&registry, player, Position::new(100.0, 0.0, 0.0));
        assert_eq!(result.entered_zone, Some(ZoneIndex(1)));
        assert!(result.changed);
    }

    #[test]
    fn test_leaving_all_zones_keeps_the_last_zone() {
        let registry = two_zone_registry();
        let mut tracker = ZoneTracker::new();
        let player = PlayerId::new();

        tracker.update(&registry, player, Position::zero());
        let outside = tracker.update(&registry, player, Position::new(50.0, 0.0, 0.0));
        assert_eq!(outside.entered_zone, None);
        assert!(!outside.changed);
        assert_eq!(tracker.state(player).unwrap().last_zone, Some(ZoneIndex(0)));

        let back = tracker.update(&registry, player, Position::new(2.0, 0.0, 0.0));
        assert_eq!(back.entered_zone, Some(ZoneIndex(0)));
        assert!(!back.changed, "re-entering the remembered zone is not a transition");

        let other = tracker.update(&registry, player, Position::new(101.0, 0.0, 0.0));
        assert!(other.changed);
    }

    #[test]
    fn test_outside_on_first_event_creates_empty_state() {
        let registry = two_zone_registry();
        let mut tracker = ZoneTracker::new();
        let player = PlayerId::new();

        let result = tracker.update(&registry, player, Position::new(50.0, 50.0, 50.0));
        assert!(!result.is_inside());
        assert!(!result.changed);
        assert_eq!(tracker.state(player), Some(&PlayerZoneState { last_zone: None }));
    }

    #[test]
    fn test_players_are_tracked_independently() {
        let registry = two_zone_registry();
        let mut tracker = ZoneTracker::new();
        let alice = PlayerId::new();
        let bob = PlayerId::new();

        assert!(tracker.update(&registry, alice, Position::zero()).changed);
        assert!(tracker.update(&registry, bob, Position::zero()).changed);
        assert_eq!(tracker.tracked_players(), 2);

        assert!(tracker.remove(alice).is_some());
        assert!(tracker.state(alice).is_none());
        assert!(tracker.update(&registry, alice, Position::zero()).changed);
    }
}
