//! Checkpoint plugin settings.

use serde::{Deserialize, Serialize};

fn default_capability() -> String {
    "checkpoint-admin".to_string()
}

fn default_saved_message() -> String {
    "Saved new spawn position".to_string()
}

fn default_map_object() -> String {
    "CHECKPOINT".to_string()
}

/// Tunables for the checkpoint plugin.
///
/// Every field has a default, so an empty `[checkpoint]` table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointSettings {
    /// Capability required to reset other players or everyone.
    #[serde(default = "default_capability")]
    pub capability: String,
    /// Sent on entering a zone that has no message of its own.
    #[serde(default = "default_saved_message")]
    pub saved_message: String,
    /// Map object name that defines a zone (matched case-insensitively).
    #[serde(default = "default_map_object")]
    pub map_object: String,
}

impl Default for CheckpointSettings {
    fn default() -> Self {
        Self {
            capability: default_capability(),
            saved_message: default_saved_message(),
            map_object: default_map_object(),
        }
    }
}

impl CheckpointSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.capability.trim().is_empty() {
            return Err("checkpoint.capability cannot be empty".to_string());
        }
        if self.map_object.trim().is_empty() {
            return Err("checkpoint.map_object cannot be empty".to_string());
        }
        Ok(())
    }
}
