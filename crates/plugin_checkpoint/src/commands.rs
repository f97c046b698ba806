//! # Spawn Reset Commands
//!
//! - `/spawnreset` resets the invoker's own saved spawn point.
//! - `/spawnreset <callsign>` resets another player's (requires the
//!   checkpoint capability).
//! - `/spawnresetall` resets everyone's (requires the capability).
//!
//! A reset kills the affected players so they respawn at the host's default
//! location. Rejected commands change nothing and only tell the invoker why.

use crate::context::{Authorizer, Recipient, ServerContext};
use crate::error::CommandError;
use crate::spawn::SpawnPointStore;
use crate::types::PlayerId;
use crate::zone::unquote;
use tracing::{info, warn};

pub const RESET_COMMAND: &str = "spawnreset";
pub const RESET_ALL_COMMAND: &str = "spawnresetall";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not one of the checkpoint commands.
    NotHandled,
    Completed,
    /// Refused; the invoker has been told why.
    Rejected(CommandError),
}

pub struct CommandHandler {
    capability: String,
    authorizer: Box<dyn Authorizer>,
}

impl std::fmt::Debug for CommandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHandler")
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

impl CommandHandler {
    pub fn new(capability: impl Into<String>, authorizer: Box<dyn Authorizer>) -> Self {
        Self {
            capability: capability.into(),
            authorizer,
        }
    }

    /// Runs `command` for `invoker`. `args` is the rest of the command line.
    pub fn handle(
        &self,
        spawns: &mut SpawnPointStore,
        ctx: &dyn ServerContext,
        invoker: PlayerId,
        command: &str,
        args: &str,
    ) -> CommandOutcome {
        let result = if command.eq_ignore_ascii_case(RESET_COMMAND) {
            let target = unquote(args.trim()).trim();
            if target.is_empty() {
                self.reset_self(spawns, ctx, invoker)
            } else {
                self.reset_other(spawns, ctx, invoker, target)
            }
        } else if command.eq_ignore_ascii_case(RESET_ALL_COMMAND) {
            self.reset_all(spawns, ctx, invoker)
        } else {
            return CommandOutcome::NotHandled;
        };

        match result {
            Ok(()) => CommandOutcome::Completed,
            Err(e) => {
                warn!("🏁 Checkpoint: /{} from {} rejected: {}", command, invoker, e);
                ctx.send_message(Recipient::Player(invoker), &e.to_string());
                CommandOutcome::Rejected(e)
            }
        }
    }

    fn is_admin(&self, player_id: PlayerId) -> bool {
        self.authorizer.has_capability(player_id, &self.capability)
    }

    fn reset_self(
        &self,
        spawns: &mut SpawnPointStore,
        ctx: &dyn ServerContext,
        invoker: PlayerId,
    ) -> Result<(), CommandError> {
        ctx.kill_player(invoker);
        ctx.send_message(
            Recipient::Player(invoker),
            "Your spawn position has been reset",
        );
        spawns.clear(invoker);
        Ok(())
    }

    fn reset_other(
        &self,
        spawns: &mut SpawnPointStore,
        ctx: &dyn ServerContext,
        invoker: PlayerId,
        callsign: &str,
    ) -> Result<(), CommandError> {
        if !self.is_admin(invoker) {
            return Err(CommandError::ResetOthersDenied);
        }
        let target = ctx
            .find_player_by_callsign(callsign)
            .ok_or_else(|| CommandError::NoSuchPlayer(callsign.to_string()))?;
        let admin = ctx.player(invoker).ok_or(CommandError::UnknownInvoker)?;

        ctx.kill_player(target.id);
        ctx.send_message(
            Recipient::Player(target.id),
            &format!("Your spawn position was reset by {}", admin.callsign),
        );
        ctx.send_message(
            Recipient::Player(invoker),
            &format!("{}'s spawn position has been reset", target.callsign),
        );
        ctx.send_message(
            Recipient::Admins,
            &format!(
                "{}'s spawn position was reset by {}",
                target.callsign, admin.callsign
            ),
        );
        spawns.clear(target.id);

        info!(
            "🏁 Checkpoint: {} reset the spawn position of {}",
            admin.callsign, target.callsign
        );
        Ok(())
    }

    fn reset_all(
        &self,
        spawns: &mut SpawnPointStore,
        ctx: &dyn ServerContext,
        invoker: PlayerId,
    ) -> Result<(), CommandError> {
        if !self.is_admin(invoker) {
            return Err(CommandError::ResetAllDenied);
        }
        let admin = ctx.player(invoker).ok_or(CommandError::UnknownInvoker)?;

        let cleared = spawns.clear_all();
        ctx.send_message(
            Recipient::All,
            &format!("{} has reset all spawn positions", admin.callsign),
        );
        for player_id in ctx.connected_players() {
            ctx.kill_player(player_id);
        }

        info!(
            "🏁 Checkpoint: {} reset all {} spawn positions",
            admin.callsign, cleared
        );
        Ok(())
    }
}
