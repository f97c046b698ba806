//! # Checkpoint Host
//!
//! Command-line host for the checkpoint plugin. It reads a world file,
//! hands its `checkpoint` objects to the plugin, then replays a scripted
//! session of joins, movement, deaths, respawns, captures and slash commands
//! against an in-memory game server and reports what the plugin did.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the bundled demo
//! checkpoint-host --config demos/checkpoint.toml
//!
//! # Override the inputs
//! checkpoint-host --map demos/world.map --script demos/session.jsonl --log-level debug
//!
//! # JSON logging
//! checkpoint-host --json-logs
//! ```
//!
//! The host loads its configuration from a TOML file (default:
//! `checkpoint.toml`). If the file doesn't exist, a default one is created.

use tracing::error;

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod script;
pub mod server;
pub mod session;

use app::Application;
use cli::CliArgs;
use config::AppConfig;

/// Runs the host: parse arguments, set up logging, replay the session.
///
/// # Exit Codes
///
/// * **0**: The session was replayed
/// * **1**: Error during startup, configuration, or replay
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Load configuration to get logging settings
    let mut logging = AppConfig::load_from_file(&args.config_path)
        .unwrap_or_default()
        .logging;
    if let Some(level) = &args.log_level {
        logging.level = level.clone();
    }

    if let Err(e) = logging::setup_logging(&logging, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    match Application::new(args) {
        Ok(app) => {
            if let Err(e) = app.run() {
                error!("❌ Session error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("❌ Failed to start application: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

pub use config::{LoggingSettings, SessionSettings};
pub use error::HostError;
pub use server::{Delivery, SimulatedServer};
pub use session::{Session, SessionReport};
