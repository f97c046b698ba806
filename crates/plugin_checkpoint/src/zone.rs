//! # Checkpoint Zones
//!
//! Axis-aligned checkpoint boxes parsed from `CHECKPOINT` map objects, and the
//! ordered registry they are loaded into.
//!
//! ## Map Object Format
//!
//! ```text
//! checkpoint
//!   position 0 0 0
//!   size 5 5 5
//!   message "safe zone"
//! end
//! ```
//!
//! Keys are matched case-insensitively. Parsing is best-effort: lines with too
//! few values and unknown keys are skipped, and non-numeric values read as 0,
//! so a broken definition still yields a (possibly degenerate) zone.

use crate::types::Position;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Stable identity of a zone: its position in map load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneIndex(pub usize);

impl std::fmt::Display for ZoneIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single checkpoint box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub index: ZoneIndex,
    pub center: Position,
    /// Half-size of the box on each axis.
    pub half_extent: Position,
    /// Text sent to a player entering the zone. Empty means the default text.
    pub message: String,
}

impl Zone {
    /// Builds a zone from the raw lines of one map object.
    pub fn from_lines<I, S>(index: ZoneIndex, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut zone = Zone {
            index,
            center: Position::zero(),
            half_extent: Position::zero(),
            message: String::new(),
        };

        for line in lines {
            zone.apply_line(line.as_ref());
        }

        if zone.half_extent.to_array().iter().any(|v| *v < 0.0) {
            warn!(
                "🏁 Checkpoint: zone {} has a negative size {:?} and can never be entered",
                index, zone.half_extent
            );
        }

        zone
    }

    fn apply_line(&mut self, line: &str) {
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            return;
        };

        if key.eq_ignore_ascii_case("POSITION") {
            match read_triple(tokens) {
                Some(center) => self.center = center,
                None => warn!("🏁 Checkpoint: ignoring short POSITION line '{}'", line.trim()),
            }
        } else if key.eq_ignore_ascii_case("SIZE") {
            match read_triple(tokens) {
                Some(extent) => self.half_extent = extent,
                None => warn!("🏁 Checkpoint: ignoring short SIZE line '{}'", line.trim()),
            }
        } else if key.eq_ignore_ascii_case("MESSAGE") {
            let rest = line.trim_start()[key.len()..].trim();
            if !rest.is_empty() {
                self.message = unquote(rest).to_string();
            }
        } else {
            debug!("🏁 Checkpoint: ignoring unknown key '{}'", key);
        }
    }

    /// Inclusive containment test on all six faces.
    pub fn contains(&self, position: Position) -> bool {
        let center = self.center.to_array();
        let extent = self.half_extent.to_array();

        position
            .to_array()
            .iter()
            .zip(center.iter().zip(extent.iter()))
            .all(|(p, (c, e))| c - e <= *p && *p <= c + e)
    }
}

fn read_triple<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Position> {
    let x = tokens.next()?;
    let y = tokens.next()?;
    let z = tokens.next()?;
    Some(Position::new(
        parse_lenient(x),
        parse_lenient(y),
        parse_lenient(z),
    ))
}

pub(crate) fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

/// Reads the longest leading decimal number from `token`, yielding 0.0 when
/// there is none. `"12abc"` reads as 12, `"abc"` as 0.
pub fn parse_lenient(token: &str) -> f64 {
    let s = token.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end = digits_from(end);
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let frac_end = digits_from(frac_start);
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Ordered list of zones, indexed by load order.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one map object and appends it, returning the new zone's index.
    pub fn load<I, S>(&mut self, lines: I) -> ZoneIndex
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index = ZoneIndex(self.zones.len());
        let zone = Zone::from_lines(index, lines);
        debug!(
            "🏁 Checkpoint: loaded zone {} at {:?} size {:?}",
            index, zone.center, zone.half_extent
        );
        self.zones.push(zone);
        index
    }

    pub fn get(&self, index: ZoneIndex) -> Option<&Zone> {
        self.zones.get(index.0)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Finds the zone containing `position`.
    ///
    /// Every zone is tested; when several overlap, the one loaded last wins.
    pub fn locate(&self, position: Position) -> Option<ZoneIndex> {
        self.zones
            .iter()
            .filter(|zone| zone.contains(position))
            .map(|zone| zone.index)
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(center: [f64; 3], extent: [f64; 3]) -> Zone {
        Zone {
            index: ZoneIndex(0),
            center: center.into(),
            half_extent: extent.into(),
            message: String::new(),
        }
    }

    #[test]
    fn test_parse_full_definition() {
        let zone = Zone::from_lines(
            ZoneIndex(3),
            ["POSITION 1 2 3", "SIZE 4 5 6", "MESSAGE \"safe zone\""],
        );
        assert_eq!(zone.index, ZoneIndex(3));
        assert_eq!(zone.center, Position::new(1.0, 2.0, 3.0));
        assert_eq!(zone.half_extent, Position::new(4.0, 5.0, 6.0));
        assert_eq!(zone.message, "safe zone");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let zone = Zone::from_lines(ZoneIndex(0), ["position 1 1 1", "Size 2 2 2", "message hi"]);
        assert_eq!(zone.center, Position::new(1.0, 1.0, 1.0));
        assert_eq!(zone.half_extent, Position::new(2.0, 2.0, 2.0));
        assert_eq!(zone.message, "hi");
    }

    #[test]
    fn test_message_keeps_remainder_untokenized() {
        let zone = Zone::from_lines(ZoneIndex(0), ["  MESSAGE   welcome   to  the  tower  "]);
        assert_eq!(zone.message, "welcome   to  the  tower");
    }

    #[test]
    fn test_malformed_lines_keep_defaults() {
        let zone = Zone::from_lines(
            ZoneIndex(0),
            ["POSITION 1 2", "SIZE", "MESSAGE", "COLOR 1 0 0", ""],
        );
        assert_eq!(zone.center, Position::zero());
        assert_eq!(zone.half_extent, Position::zero());
        assert!(zone.message.is_empty());
    }

    #[test]
    fn test_non_numeric_values_read_as_zero() {
        let zone = Zone::from_lines(ZoneIndex(0), ["POSITION abc 7.5xyz -2", "SIZE 1e1 .5 nope"]);
        assert_eq!(zone.center, Position::new(0.0, 7.5, -2.0));
        assert_eq!(zone.half_extent, Position::new(10.0, 0.5, 0.0));
    }

    #[test]
    fn test_parse_lenient_prefixes() {
        assert_eq!(parse_lenient("42"), 42.0);
        assert_eq!(parse_lenient("-3.25"), -3.25);
        assert_eq!(parse_lenient("+8"), 8.0);
        assert_eq!(parse_lenient("12abc"), 12.0);
        assert_eq!(parse_lenient("5."), 5.0);
        assert_eq!(parse_lenient("2e"), 2.0);
        assert_eq!(parse_lenient("1.5e2"), 150.0);
        assert_eq!(parse_lenient("-"), 0.0);
        assert_eq!(parse_lenient("."), 0.0);
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("1e999"), 0.0);
    }

    #[test]
    fn test_containment_is_inclusive_on_every_face() {
        let zone = boxed([10.0, 20.0, 30.0], [1.0, 2.0, 3.0]);
        for corner in [
            [9.0, 18.0, 27.0],
            [11.0, 22.0, 33.0],
            [9.0, 22.0, 27.0],
            [11.0, 18.0, 33.0],
        ] {
            assert!(zone.contains(corner.into()), "{corner:?} should be inside");
        }
        assert!(!zone.contains(Position::new(11.001, 20.0, 30.0)));
        assert!(!zone.contains(Position::new(10.0, 17.999, 30.0)));
        assert!(!zone.contains(Position::new(10.0, 20.0, 33.5)));
    }

    #[test]
    fn test_point_zone_only_contains_its_center() {
        let zone = boxed([1.0, 2.0, 3.0], [0.0, 0.0, 0.0]);
        assert!(zone.contains(Position::new(1.0, 2.0, 3.0)));
        assert!(!zone.contains(Position::new(1.0, 2.0, 3.0001)));
        assert!(!zone.contains(Position::zero()));
    }

    #[test]
    fn test_registry_assigns_load_order_indices() {
        let mut registry = ZoneRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.load(["POSITION 0 0 0"]), ZoneIndex(0));
        assert_eq!(registry.load(["POSITION 5 5 5"]), ZoneIndex(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(ZoneIndex(1)).map(|z| z.center),
            Some(Position::new(5.0, 5.0, 5.0))
        );
        assert!(registry.get(ZoneIndex(2)).is_none());
    }

    #[test]
    fn test_overlap_resolves_to_last_loaded() {
        let mut registry = ZoneRegistry::new();
        registry.load(["POSITION 0 0 0", "SIZE 10 10 10"]);
        registry.load(["POSITION 5 0 0", "SIZE 10 10 10"]);
        registry.load(["POSITION 100 0 0", "SIZE 1 1 1"]);

        assert_eq!(registry.locate(Position::new(2.0, 0.0, 0.0)), Some(ZoneIndex(1)));
        assert_eq!(registry.locate(Position::new(-8.0, 0.0, 0.0)), Some(ZoneIndex(0)));
        assert_eq!(registry.locate(Position::new(50.0, 0.0, 0.0)), None);
    }
}
