//! Session scripts.
//!
//! A script is JSON lines, one step per line, tagged by `step`:
//!
//! ```text
//! {"step": "join", "callsign": "Alice", "position": {"x": 50, "y": 0, "z": 0}}
//! {"step": "move", "callsign": "Alice", "position": {"x": 1, "y": 1, "z": 1}}
//! {"step": "command", "callsign": "Alice", "line": "/spawnreset"}
//! ```
//!
//! Blank lines and lines starting with `#` or `//` are skipped.

use crate::error::HostError;
use plugin_checkpoint::{Pose, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// A player connects and spawns at `position`.
    Join {
        callsign: String,
        #[serde(default)]
        position: Position,
        #[serde(default)]
        rotation: f64,
        /// Member of the administrator message group.
        #[serde(default)]
        admin: bool,
        #[serde(default)]
        permissions: Vec<String>,
    },
    /// A player reports a new position.
    Move {
        callsign: String,
        position: Position,
        #[serde(default)]
        rotation: Option<f64>,
    },
    /// A player fires, from `position` or from where they stand.
    Shoot {
        callsign: String,
        #[serde(default)]
        position: Option<Position>,
    },
    Die { callsign: String },
    /// A dead player respawns; `at` is where the server would put them.
    Spawn {
        callsign: String,
        #[serde(default)]
        at: Option<Pose>,
    },
    Capture {
        #[serde(default)]
        team: Option<String>,
    },
    Part { callsign: String },
    /// A slash command typed by a player, e.g. `/spawnreset Bob`.
    Command { callsign: String, line: String },
}

impl ScriptStep {
    pub fn callsign(&self) -> Option<&str> {
        match self {
            ScriptStep::Capture { .. } => None,
            ScriptStep::Join { callsign, .. }
            | ScriptStep::Move { callsign, .. }
            | ScriptStep::Shoot { callsign, .. }
            | ScriptStep::Die { callsign }
            | ScriptStep::Spawn { callsign, .. }
            | ScriptStep::Part { callsign }
            | ScriptStep::Command { callsign, .. } => Some(callsign),
        }
    }
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, HostError> {
    let content = std::fs::read_to_string(path).map_err(|e| HostError::io(path, e))?;
    let steps = parse_script(&content)?;
    debug!("Read {} steps from {}", steps.len(), path.display());
    Ok(steps)
}

pub fn parse_script(content: &str) -> Result<Vec<ScriptStep>, HostError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, raw)| {
            let line = raw.trim();
            !(line.is_empty() || line.starts_with('#') || line.starts_with("//"))
        })
        .map(|(number, raw)| {
            serde_json::from_str(raw.trim()).map_err(|source| HostError::Script {
                line: number + 1,
                source,
            })
        })
        .collect()
}

/// Splits `/name rest of line` into the command name and its arguments.
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    let line = line.strip_prefix('/').unwrap_or(line);
    match line.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_step_kinds() {
        let script = r#"
# setup
{"step": "join", "callsign": "Admin", "admin": true, "permissions": ["checkpoint-admin"]}
// movement
{"step": "move", "callsign": "Admin", "position": {"x": 1, "y": 2, "z": 3}, "rotation": 0.5}
{"step": "shoot", "callsign": "Admin"}
{"step": "die", "callsign": "Admin"}
{"step": "spawn", "callsign": "Admin", "at": {"position": {"x": 0, "y": 0, "z": 0}, "rotation": 0}}
{"step": "capture", "team": "red"}
{"step": "command", "callsign": "Admin", "line": "/spawnresetall"}
{"step": "part", "callsign": "Admin"}
"#;
        let steps = parse_script(script).unwrap();
        assert_eq!(steps.len(), 8);

        assert_eq!(
            steps[0],
            ScriptStep::Join {
                callsign: "Admin".to_string(),
                position: Position::zero(),
                rotation: 0.0,
                admin: true,
                permissions: vec!["checkpoint-admin".to_string()],
            }
        );
        assert_eq!(
            steps[1],
            ScriptStep::Move {
                callsign: "Admin".to_string(),
                position: Position::new(1.0, 2.0, 3.0),
                rotation: Some(0.5),
            }
        );
        assert_eq!(steps[5], ScriptStep::Capture { team: Some("red".to_string()) });
        assert_eq!(steps[5].callsign(), None);
        assert_eq!(steps[7].callsign(), Some("Admin"));
    }

    #[test]
    fn test_bad_line_reports_its_number() {
        let script = "{\"step\": \"die\", \"callsign\": \"A\"}\n\n{\"step\": \"teleport\"}\n";
        match parse_script(script).unwrap_err() {
            HostError::Script { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("/spawnreset"), ("spawnreset", ""));
        assert_eq!(split_command("/spawnreset  Big Bob "), ("spawnreset", "Big Bob"));
        assert_eq!(split_command("spawnresetall"), ("spawnresetall", ""));
        assert_eq!(split_command("  /SpawnReset \"Bob\""), ("SpawnReset", "\"Bob\""));
    }

    #[test]
    fn test_load_script_from_disk() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{\"step\": \"capture\"}\n").unwrap();
        assert_eq!(
            load_script(file.path()).unwrap(),
            vec![ScriptStep::Capture { team: None }]
        );
    }
}
