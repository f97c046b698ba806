//! The checkpoint plugin: zones, tracking, spawn points and commands behind
//! the three entry points a host calls.

use crate::commands::{CommandHandler, CommandOutcome, RESET_ALL_COMMAND, RESET_COMMAND};
use crate::config::CheckpointSettings;
use crate::context::{Authorizer, ServerContext};
use crate::events::HostEvent;
use crate::router::{EventOutcome, EventRouter};
use crate::spawn::{SpawnPoint, SpawnPointStore};
use crate::tracker::ZoneTracker;
use crate::types::PlayerId;
use crate::zone::{ZoneIndex, ZoneRegistry};
use tracing::{debug, info};

#[derive(Debug)]
pub struct CheckpointPlugin {
    settings: CheckpointSettings,
    registry: ZoneRegistry,
    tracker: ZoneTracker,
    spawns: SpawnPointStore,
    commands: CommandHandler,
}

impl CheckpointPlugin {
    pub fn new(settings: CheckpointSettings, authorizer: Box<dyn Authorizer>) -> Self {
        let commands = CommandHandler::new(settings.capability.clone(), authorizer);
        info!(
            "🏁 Checkpoint: plugin loaded (map object '{}', commands /{} /{})",
            settings.map_object, RESET_COMMAND, RESET_ALL_COMMAND
        );
        Self {
            settings,
            registry: ZoneRegistry::new(),
            tracker: ZoneTracker::new(),
            spawns: SpawnPointStore::new(),
            commands,
        }
    }

    pub fn name(&self) -> &str {
        "checkpoint"
    }

    pub fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn settings(&self) -> &CheckpointSettings {
        &self.settings
    }

    /// Offers a map object to the plugin. Returns `false` when the object is
    /// not a checkpoint and was left alone.
    pub fn load_map_object<I, S>(&mut self, object: &str, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !object.trim().eq_ignore_ascii_case(&self.settings.map_object) {
            debug!("🏁 Checkpoint: skipping map object '{}'", object);
            return false;
        }
        self.registry.load(lines);
        true
    }

    pub fn handle_event(&mut self, event: &HostEvent, ctx: &dyn ServerContext) -> EventOutcome {
        EventRouter {
            settings: &self.settings,
            registry: &self.registry,
            tracker: &mut self.tracker,
            spawns: &mut self.spawns,
        }
        .route(event, ctx)
    }

    pub fn handle_command(
        &mut self,
        invoker: PlayerId,
        command: &str,
        args: &str,
        ctx: &dyn ServerContext,
    ) -> CommandOutcome {
        self.commands
            .handle(&mut self.spawns, ctx, invoker, command, args)
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn zone_count(&self) -> usize {
        self.registry.len()
    }

    pub fn spawn_point(&self, player_id: PlayerId) -> Option<SpawnPoint> {
        self.spawns.query(player_id)
    }

    pub fn saved_spawn_points(&self) -> usize {
        self.spawns.len()
    }

    /// Last zone the player was seen in.
    pub fn current_zone(&self, player_id: PlayerId) -> Option<ZoneIndex> {
        self.tracker.state(player_id).and_then(|s| s.last_zone)
    }

    pub fn tracked_players(&self) -> usize {
        self.tracker.tracked_players()
    }
}
