//! Main application logic and lifecycle management.
//!
//! The `Application` merges the config file with CLI overrides, then loads
//! the world into a fresh checkpoint plugin and replays the session script.

use crate::cli::CliArgs;
use crate::config::AppConfig;
use crate::error::HostError;
use crate::logging::display_banner;
use crate::map::load_map;
use crate::script::load_script;
use crate::session::{Session, SessionReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct Application {
    /// Loaded application configuration
    config: AppConfig,
    /// Where the configuration came from
    config_path: PathBuf,
}

impl Application {
    /// Creates a new application instance.
    ///
    /// 1. Load configuration from file (creating default if missing)
    /// 2. Apply command-line argument overrides
    /// 3. Validate merged configuration
    /// 4. Display startup banner
    pub fn new(args: CliArgs) -> Result<Self, HostError> {
        info!("🔧 Loading configuration from: {}", args.config_path.display());
        let config = AppConfig::load_from_file(&args.config_path)?;
        let app = Self::with_config(config, args)?;
        display_banner();
        Ok(app)
    }

    /// Builds the application from an already loaded config.
    pub fn with_config(mut config: AppConfig, args: CliArgs) -> Result<Self, HostError> {
        if let Some(map) = args.map {
            config.session.map = Some(map.to_string_lossy().to_string());
        }

        if let Some(script) = args.script {
            config.session.script = Some(script.to_string_lossy().to_string());
        }

        if let Some(log_level) = args.log_level {
            config.logging.level = log_level;
        }

        if args.json_logs {
            config.logging.json_format = true;
        }

        config.validate().map_err(HostError::InvalidConfig)?;
        info!("✅ Configuration loaded and validated successfully");

        Ok(Self {
            config,
            config_path: args.config_path,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads the world, replays the script and reports what happened.
    pub fn run(self) -> Result<SessionReport, HostError> {
        info!("🌟 Starting checkpoint session");
        self.log_configuration_summary();

        let mut session = Session::new(self.config.checkpoint.clone());

        match self.config.session.map.as_deref() {
            Some(map) => {
                let objects = load_map(Path::new(map))?;
                session.load_map(&objects);
            }
            None => warn!("⚠️ No map configured; running without checkpoint zones"),
        }

        let steps = match self.config.session.script.as_deref() {
            Some(script) => load_script(Path::new(script))?,
            None => {
                warn!("⚠️ No session script configured; nothing to replay");
                Vec::new()
            }
        };

        let report = session.run(steps);

        info!("📊 Session summary:");
        info!("  - Checkpoint zones: {}", report.zones);
        info!(
            "  - Steps applied: {} (skipped {})",
            report.steps_applied, report.steps_skipped
        );
        info!("  - Messages sent: {}", report.messages_sent);
        info!("  - Players killed: {}", report.players_killed);
        info!("  - Saved spawn points: {}", report.saved_spawn_points);
        info!("✅ Session complete");

        Ok(report)
    }

    fn log_configuration_summary(&self) {
        info!("📋 Configuration Summary:");
        info!("  📂 Config file: {}", self.config_path.display());
        info!(
            "  🗺️ Map: {}",
            self.config.session.map.as_deref().unwrap_or("<none>")
        );
        info!(
            "  📜 Script: {}",
            self.config.session.script.as_deref().unwrap_or("<none>")
        );
        info!(
            "  🏁 Map object: {} | Admin capability: {}",
            self.config.checkpoint.map_object, self.config.checkpoint.capability
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const WORLD: &str = "checkpoint\n  position 0 0 0\n  size 5 5 5\nend\n";

    const SCRIPT: &str = r#"
{"step": "join", "callsign": "Alice", "position": {"x": 50, "y": 0, "z": 0}}
{"step": "move", "callsign": "Alice", "position": {"x": 1, "y": 1, "z": 1}}
{"step": "command", "callsign": "Alice", "line": "/spawnreset"}
"#;

    fn args(dir: &TempDir) -> CliArgs {
        let map = dir.path().join("world.map");
        let script = dir.path().join("session.jsonl");
        std::fs::write(&map, WORLD).unwrap();
        std::fs::write(&script, SCRIPT).unwrap();
        CliArgs {
            config_path: dir.path().join("checkpoint.toml"),
            map: Some(map),
            script: Some(script),
            log_level: Some("debug".to_string()),
            json_logs: false,
        }
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = TempDir::new().unwrap();
        let app = Application::with_config(AppConfig::default(), args(&dir)).unwrap();

        assert_eq!(app.config().logging.level, "debug");
        assert!(app.config().session.map.as_deref().unwrap().ends_with("world.map"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.log_level = Some("chatty".to_string());

        let result = Application::with_config(AppConfig::default(), args);
        assert!(matches!(result, Err(HostError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_replays_session() {
        let dir = TempDir::new().unwrap();
        let app = Application::new(args(&dir)).unwrap();
        assert!(dir.path().join("checkpoint.toml").exists());

        let report = app.run().unwrap();
        assert_eq!(
            report,
            SessionReport {
                zones: 1,
                steps_applied: 3,
                steps_skipped: 0,
                messages_sent: 2,
                players_killed: 1,
                saved_spawn_points: 0,
            }
        );
    }

    #[test]
    fn test_missing_map_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.map = Some(dir.path().join("nope.map"));

        let app = Application::with_config(AppConfig::default(), args).unwrap();
        assert!(matches!(app.run(), Err(HostError::Io { .. })));
    }
}
