//! The persisted form of a store.
//!
//! A snapshot is a single JSON record:
//!
//! ```json
//! { "groups": [ { "id": "1", "name": "MORNING_PROTOCOL",
//!                 "items": [ { "id": "1", "title": "SYSTEM_BOOT_SEQUENCE",
//!                              "hours": 0, "minutes": 15 } ] } ] }
//! ```
//!
//! Hours and minutes are written as numbers but accepted as numbers,
//! strings, `null` or missing when reading.

use crate::{
    domain::{Duration, Group, GroupId, Item, ItemId},
    error::Result,
};
use serde::{Deserialize, Serialize};

/// Key under which the store keeps its snapshot
pub const STORAGE_KEY: &str = "schedule.protocols";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Snapshot {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Example dataset used when nothing usable has been persisted
    pub fn seed() -> Self {
        let item = |id: &str, title: &str, hours, minutes| {
            Item::new(ItemId::from(id), title.to_string(), Duration::new(hours, minutes))
        };

        Self::new(vec![
            Group::new(GroupId::from("1"), "MORNING_PROTOCOL".to_string()).with_items(vec![
                item("1", "SYSTEM_BOOT_SEQUENCE", 0, 15),
                item("2", "CORE_SYNC_PROTOCOL", 1, 0),
            ]),
            Group::new(GroupId::from("2"), "NIGHT_PROTOCOL".to_string())
                .with_items(vec![item("1", "ENCRYPTION_KEY_GEN", 0, 45)]),
        ])
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
