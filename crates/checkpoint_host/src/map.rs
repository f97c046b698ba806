//! World file reader.
//!
//! A world file is a list of objects. Each object starts with its name on a
//! line of its own and runs until a line reading `end`; `#` starts a comment.
//!
//! ```text
//! # spawn platform
//! checkpoint
//!   position 0 0 10
//!   size 5 5 1
//!   message "Platform reached"
//! end
//! ```
//!
//! Objects are returned whole so the host can offer every one of them to
//! plugins; the checkpoint plugin ignores what it does not recognize.

use crate::error::HostError;
use std::path::Path;
use tracing::debug;

/// One object block from a world file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapObject {
    pub name: String,
    /// 1-based line number of the object's name.
    pub line: usize,
    pub lines: Vec<String>,
}

pub fn load_map(path: &Path) -> Result<Vec<MapObject>, HostError> {
    let content = std::fs::read_to_string(path).map_err(|e| HostError::io(path, e))?;
    let objects = parse_map(&content)?;
    debug!("Read {} objects from {}", objects.len(), path.display());
    Ok(objects)
}

pub fn parse_map(content: &str) -> Result<Vec<MapObject>, HostError> {
    let mut objects = Vec::new();
    let mut current: Option<MapObject> = None;

    for (number, raw) in content.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        current = match current.take() {
            None => {
                let name = line.split_whitespace().next().unwrap_or(line);
                Some(MapObject {
                    name: name.to_string(),
                    line: number + 1,
                    lines: Vec::new(),
                })
            }
            Some(object) if line.eq_ignore_ascii_case("end") => {
                objects.push(object);
                None
            }
            Some(mut object) => {
                object.lines.push(line.to_string());
                Some(object)
            }
        };
    }

    match current {
        Some(object) => Err(HostError::UnterminatedObject {
            name: object.name,
            line: object.line,
        }),
        None => Ok(objects),
    }
}

/// Drops a trailing `#` comment, leaving `#` inside double quotes alone.
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (at, ch) in line.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..at],
            _ => {}
        }
    }
    line
}
