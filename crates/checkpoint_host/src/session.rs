//! Replays a scripted session against the checkpoint plugin.
//!
//! The session plays the part of the game server: it keeps the simulated
//! player directory up to date and turns each script step into the host
//! events and commands a real server would deliver.

use crate::map::MapObject;
use crate::script::{split_command, ScriptStep};
use crate::server::SimulatedServer;
use plugin_checkpoint::{
    CheckpointPlugin, CheckpointSettings, CommandOutcome, EventOutcome, HostEvent, PlayerId,
    Pose, ServerContext,
};
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Totals for a finished session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub zones: usize,
    pub steps_applied: usize,
    pub steps_skipped: usize,
    pub messages_sent: usize,
    pub players_killed: usize,
    pub saved_spawn_points: usize,
}

#[derive(Debug)]
pub struct Session {
    plugin: CheckpointPlugin,
    server: Rc<SimulatedServer>,
    applied: usize,
    skipped: usize,
}

impl Session {
    /// Creates a session whose reset commands are authorized by the
    /// simulated server's permission grants.
    pub fn new(settings: CheckpointSettings) -> Self {
        let server = Rc::new(SimulatedServer::new());
        let grants = Rc::clone(&server);
        let plugin = CheckpointPlugin::new(
            settings,
            Box::new(move |player: PlayerId, capability: &str| {
                grants.has_permission(player, capability)
            }),
        );
        Self {
            plugin,
            server,
            applied: 0,
            skipped: 0,
        }
    }

    pub fn plugin(&self) -> &CheckpointPlugin {
        &self.plugin
    }

    pub fn server(&self) -> &SimulatedServer {
        &self.server
    }

    /// Offers every map object to the plugin; returns how many it took.
    pub fn load_map(&mut self, objects: &[MapObject]) -> usize {
        let taken = objects
            .iter()
            .filter(|object| self.plugin.load_map_object(&object.name, &object.lines))
            .count();
        info!(
            "🗺️ Map loaded: {} objects, {} checkpoint zones",
            objects.len(),
            self.plugin.zone_count()
        );
        taken
    }

    pub fn run(&mut self, steps: impl IntoIterator<Item = ScriptStep>) -> SessionReport {
        for step in steps {
            self.apply(step);
        }
        self.report()
    }

    /// Applies one step. Returns `false` if it was skipped.
    pub fn apply(&mut self, step: ScriptStep) -> bool {
        let applied = self.try_apply(step);
        if applied {
            self.applied += 1;
        } else {
            self.skipped += 1;
        }
        applied
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            zones: self.plugin.zone_count(),
            steps_applied: self.applied,
            steps_skipped: self.skipped,
            messages_sent: self.server.deliveries().len(),
            players_killed: self.server.kills().len(),
            saved_spawn_points: self.plugin.saved_spawn_points(),
        }
    }

    fn try_apply(&mut self, step: ScriptStep) -> bool {
        match step {
            ScriptStep::Join {
                callsign,
                position,
                rotation,
                admin,
                permissions,
            } => {
                if self.server.id_of(&callsign).is_some() {
                    warn!("⚠️ {} is already connected, skipping join", callsign);
                    return false;
                }
                let id = self
                    .server
                    .join(&callsign, Pose::new(position, rotation), admin, permissions);
                self.dispatch(HostEvent::PlayerUpdate { player_id: id });
                true
            }
            ScriptStep::Capture { team } => {
                self.dispatch(HostEvent::Capture {
                    capturing_team: team,
                });
                true
            }
            step => self.apply_player_step(step),
        }
    }

    fn apply_player_step(&mut self, step: ScriptStep) -> bool {
        let Some(player_id) = step.callsign().and_then(|c| self.server.id_of(c)) else {
            warn!("⚠️ Unknown player in step {:?}, skipping", step);
            return false;
        };

        match step {
            ScriptStep::Move {
                position, rotation, ..
            } => {
                self.server.set_position(player_id, position, rotation);
                self.dispatch(HostEvent::PlayerUpdate { player_id });
            }
            ScriptStep::Shoot { position, .. } => {
                let from = position
                    .or_else(|| self.server.player(player_id).map(|p| p.position))
                    .unwrap_or_default();
                self.dispatch(HostEvent::ShotFired {
                    player_id,
                    position: from,
                });
            }
            ScriptStep::Die { .. } => {
                self.server.set_spawned(player_id, false);
                self.dispatch(HostEvent::PlayerUpdate { player_id });
            }
            ScriptStep::Spawn { at, .. } => {
                let default_pose = at
                    .or_else(|| self.server.player(player_id).map(|p| p.pose()))
                    .unwrap_or_default();
                let pose = self
                    .dispatch(HostEvent::SpawnPositionRequest { player_id })
                    .spawn_override()
                    .map(|spawn| spawn.pose())
                    .unwrap_or(default_pose);
                self.server.respawn(player_id, pose);
                info!(
                    "🔄 Player {} respawned at ({:.2}, {:.2}, {:.2})",
                    player_id, pose.position.x, pose.position.y, pose.position.z
                );
                self.dispatch(HostEvent::PlayerUpdate { player_id });
            }
            ScriptStep::Part { .. } => {
                self.dispatch(HostEvent::PlayerPart { player_id });
                self.server.part(player_id);
            }
            ScriptStep::Command { line, .. } => {
                let (name, args) = split_command(&line);
                let server: &SimulatedServer = &self.server;
                match self.plugin.handle_command(player_id, name, args, server) {
                    CommandOutcome::NotHandled => {
                        warn!("⚠️ Unknown command: /{}", name);
                        return false;
                    }
                    outcome => debug!("Command /{} -> {:?}", name, outcome),
                }
            }
            ScriptStep::Join { .. } | ScriptStep::Capture { .. } => {}
        }
        true
    }

    fn dispatch(&mut self, event: HostEvent) -> EventOutcome {
        let server: &SimulatedServer = &self.server;
        let outcome = self.plugin.handle_event(&event, server);
        debug!("Event {} -> {:?}", event.kind(), outcome);
        outcome
    }
}
