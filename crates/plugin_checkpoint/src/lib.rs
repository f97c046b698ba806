//! # Checkpoint Plugin
//!
//! Checkpoint zones for multiplayer game servers. Map authors place
//! `CHECKPOINT` boxes in the world; a player who stands inside one has their
//! position saved, and respawns there instead of at the server's default
//! spawn until the save is reset.
//!
//! ## Components
//!
//! - [`ZoneRegistry`] - zones parsed from map objects, in load order
//! - [`ZoneTracker`] - per-player last zone and transition detection
//! - [`SpawnPointStore`] - saved respawn poses
//! - [`EventRouter`] - host events to tracking and spawn overrides
//! - [`CommandHandler`] - `/spawnreset` and `/spawnresetall`
//! - [`CheckpointPlugin`] - owns all of the above
//!
//! ## Host Integration
//!
//! The host implements [`ServerContext`] (player lookups, messaging, kills)
//! and supplies an [`Authorizer`] for the reset commands, then forwards map
//! objects, events and slash commands:
//!
//! ```rust
//! use plugin_checkpoint::*;
//! # use std::cell::RefCell;
//! # #[derive(Debug, Default)]
//! # struct Host { players: Vec<PlayerRecord>, sent: RefCell<Vec<String>> }
//! # impl ServerContext for Host {
//! #     fn player(&self, id: PlayerId) -> Option<PlayerRecord> {
//! #         self.players.iter().find(|p| p.id == id).cloned()
//! #     }
//! #     fn find_player_by_callsign(&self, name: &str) -> Option<PlayerRecord> {
//! #         self.players.iter().find(|p| p.callsign == name).cloned()
//! #     }
//! #     fn connected_players(&self) -> Vec<PlayerId> { self.players.iter().map(|p| p.id).collect() }
//! #     fn send_message(&self, _to: Recipient, text: &str) { self.sent.borrow_mut().push(text.into()) }
//! #     fn kill_player(&self, _id: PlayerId) {}
//! # }
//! let mut plugin = CheckpointPlugin::new(
//!     CheckpointSettings::default(),
//!     Box::new(|_: PlayerId, _: &str| false),
//! );
//! plugin.load_map_object("CHECKPOINT", ["POSITION 0 0 0", "SIZE 5 5 5", "MESSAGE safe zone"]);
//!
//! let alice = PlayerRecord {
//!     id: PlayerId::new(),
//!     callsign: "Alice".into(),
//!     position: Position::new(3.0, 3.0, 3.0),
//!     rotation: 0.0,
//!     spawned: true,
//! };
//! let host = Host { players: vec![alice.clone()], ..Default::default() };
//!
//! plugin.handle_event(&HostEvent::PlayerUpdate { player_id: alice.id }, &host);
//! assert_eq!(host.sent.borrow().as_slice(), ["safe zone"]);
//! assert!(plugin.spawn_point(alice.id).is_some());
//! ```
//!
//! Events are handled one at a time to completion; no state is shared
//! between plugin instances.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod plugin;
pub mod router;
pub mod spawn;
pub mod tracker;
pub mod types;
pub mod zone;

pub use commands::{CommandHandler, CommandOutcome, RESET_ALL_COMMAND, RESET_COMMAND};
pub use config::CheckpointSettings;
pub use context::{Authorizer, PlayerRecord, Recipient, ServerContext};
pub use error::CommandError;
pub use events::HostEvent;
pub use plugin::CheckpointPlugin;
pub use router::{EventOutcome, EventRouter};
pub use spawn::{SpawnPoint, SpawnPointStore};
pub use tracker::{PlayerZoneState, TransitionResult, ZoneTracker};
pub use types::{PlayerId, Pose, Position};
pub use zone::{parse_lenient, Zone, ZoneIndex, ZoneRegistry};
