//! # Event Routing
//!
//! Maps each [`HostEvent`] onto the tracker and spawn store.
//!
//! | Event                  | Position used                    | Effect                     |
//! |------------------------|----------------------------------|----------------------------|
//! | capture                | none                             | clear every spawn point    |
//! | player part            | none                             | forget the player          |
//! | spawn position request | none                             | override with saved pose   |
//! | shot fired             | shooter position at fire time    | tracking pipeline          |
//! | player update          | directory position, if spawned   | tracking pipeline          |
//!
//! The tracking pipeline resolves the player's zone, refreshes their saved
//! pose while they are inside one, and privately notifies them when they
//! enter a zone other than the one remembered.

use crate::config::CheckpointSettings;
use crate::context::{Recipient, ServerContext};
use crate::events::HostEvent;
use crate::spawn::{SpawnPoint, SpawnPointStore};
use crate::tracker::{TransitionResult, ZoneTracker};
use crate::types::{PlayerId, Position};
use crate::zone::{ZoneIndex, ZoneRegistry};
use tracing::{debug, info, warn};

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// Nothing to do for this event.
    Ignored,
    /// A capture wiped this many saved spawn points.
    SpawnPointsCleared(usize),
    /// The player's tracking state and spawn point were dropped.
    PlayerRemoved,
    /// The host must spawn the player at this pose instead of its own choice.
    SpawnOverride(SpawnPoint),
    /// The tracking pipeline ran.
    Tracked(TransitionResult),
}

impl EventOutcome {
    pub fn spawn_override(&self) -> Option<SpawnPoint> {
        match self {
            EventOutcome::SpawnOverride(point) => Some(*point),
            _ => None,
        }
    }
}

/// Borrowed view over the plugin state needed to process one event.
pub struct EventRouter<'a> {
    pub settings: &'a CheckpointSettings,
    pub registry: &'a ZoneRegistry,
    pub tracker: &'a mut ZoneTracker,
    pub spawns: &'a mut SpawnPointStore,
}

impl EventRouter<'_> {
    pub fn route(&mut self, event: &HostEvent, ctx: &dyn ServerContext) -> EventOutcome {
        match event {
            HostEvent::Capture { capturing_team } => {
                let cleared = self.spawns.clear_all();
                info!(
                    "🏁 Checkpoint: flag captured by {}, cleared {} spawn points",
                    capturing_team.as_deref().unwrap_or("unknown team"),
                    cleared
                );
                EventOutcome::SpawnPointsCleared(cleared)
            }
            HostEvent::PlayerPart { player_id } => {
                self.tracker.remove(*player_id);
                self.spawns.clear(*player_id);
                debug!("🏁 Checkpoint: player {} left, state dropped", player_id);
                EventOutcome::PlayerRemoved
            }
            HostEvent::SpawnPositionRequest { player_id } => match self.spawns.query(*player_id) {
                Some(point) => {
                    debug!("🏁 Checkpoint: respawning {} at saved {:?}", player_id, point);
                    EventOutcome::SpawnOverride(point)
                }
                None => EventOutcome::Ignored,
            },
            HostEvent::ShotFired { player_id, position } => {
                self.track(*player_id, Some(*position), ctx)
            }
            HostEvent::PlayerUpdate { player_id } => self.track(*player_id, None, ctx),
        }
    }

    /// Runs the tracking pipeline. `shot_from` is the fire position for shot
    /// events; updates use the directory's position.
    fn track(
        &mut self,
        player_id: PlayerId,
        shot_from: Option<Position>,
        ctx: &dyn ServerContext,
    ) -> EventOutcome {
        let Some(record) = ctx.player(player_id) else {
            warn!("🏁 Checkpoint: no directory entry for {}, skipping", player_id);
            return EventOutcome::Ignored;
        };

        let position = match shot_from {
            Some(position) => position,
            None if record.spawned => record.position,
            None => return EventOutcome::Ignored,
        };

        let result = self.tracker.update(self.registry, player_id, position);

        if let Some(zone) = result.entered_zone {
            self.spawns.upsert(player_id, record.position, record.rotation);
            if result.changed {
                let text = self.entry_message(zone);
                ctx.send_message(Recipient::Player(player_id), text);
                info!(
                    "🏁 Checkpoint: {} entered zone {}, spawn position saved",
                    record.callsign, zone
                );
            }
        }

        EventOutcome::Tracked(result)
    }

    fn entry_message(&self, zone: ZoneIndex) -> &str {
        self.registry
            .get(zone)
            .map(|z| z.message.as_str())
            .filter(|message| !message.is_empty())
            .unwrap_or(&self.settings.saved_message)
    }
}
