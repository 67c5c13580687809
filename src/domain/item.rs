use crate::domain::{
    ids::ItemId,
    input::{deserialize_loose_count, parse_non_negative_int},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Planned length of an item, kept as entered.
///
/// Minutes are not folded into hours: 0h 90m stays 0h 90m.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    #[serde(default, deserialize_with = "deserialize_loose_count")]
    pub hours: u32,
    #[serde(default, deserialize_with = "deserialize_loose_count")]
    pub minutes: u32,
}

impl Duration {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Builds a duration from raw form fields; anything unparsable counts as 0
    pub fn parse(hours: &str, minutes: &str) -> Self {
        Self {
            hours: parse_non_negative_int(hours),
            minutes: parse_non_negative_int(minutes),
        }
    }

    pub fn total_minutes(&self) -> u64 {
        u64::from(self.hours) * 60 + u64::from(self.minutes)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// A single entry of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(flatten)]
    pub duration: Duration,
}

impl Item {
    /// Creates an item; the title is expected to be normalized already
    pub fn new(id: ItemId, title: String, duration: Duration) -> Self {
        Self {
            id,
            title,
            duration,
        }
    }
}
