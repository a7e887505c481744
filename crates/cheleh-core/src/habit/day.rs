//! Day status: the value a single calendar cell holds.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Completion quality recorded for one day.
///
/// Serialized as `null` for [`DayStatus::Unset`] and as a lowercase
/// string for the three marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayStatus {
    /// No entry yet.
    #[default]
    Unset,
    /// The stage's primary commitment was met.
    Standard,
    /// The reduced ("light") commitment was met.
    Special,
    /// Only the bare-minimum commitment was met.
    Emergency,
}

impl DayStatus {
    /// All three marks, in order of decreasing effort.
    pub const MARKS: [DayStatus; 3] = [
        DayStatus::Standard,
        DayStatus::Special,
        DayStatus::Emergency,
    ];

    pub fn is_set(self) -> bool {
        self != DayStatus::Unset
    }

    /// Wire name, or `None` for an unset day.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            DayStatus::Unset => None,
            DayStatus::Standard => Some("standard"),
            DayStatus::Special => Some("special"),
            DayStatus::Emergency => Some("emergency"),
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unset"))
    }
}

impl FromStr for DayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(DayStatus::Standard),
            "special" => Ok(DayStatus::Special),
            "emergency" => Ok(DayStatus::Emergency),
            "unset" | "clear" | "none" => Ok(DayStatus::Unset),
            other => Err(format!("unknown day status: {other}")),
        }
    }
}

impl Serialize for DayStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(name) => serializer.serialize_some(name),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DayStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(DayStatus::Unset),
            Some(name) => name.parse().map_err(de::Error::custom),
        }
    }
}
