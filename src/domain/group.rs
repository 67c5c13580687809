use crate::domain::{
    ids::{GroupId, ItemId},
    item::{Duration, Item},
};
use serde::{Deserialize, Serialize};

/// A named, ordered list of items (a "schedule" or "board")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Group {
    /// Creates an empty group; the name is expected to be normalized already
    pub fn new(id: GroupId, name: String) -> Self {
        Self {
            id,
            name,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// Gets an item by id
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub(crate) fn item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Position of an item within the group
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Sum of all item durations, with minutes carried into hours
    pub fn total_duration(&self) -> Duration {
        let total: u64 = self.items.iter().map(|item| item.duration.total_minutes()).sum();
        let hours = u32::try_from(total / 60).unwrap_or(u32::MAX);
        Duration::new(hours, (total % 60) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Group {
        Group::new(GroupId::from("g1"), "MORNING".into()).with_items(vec![
            Item::new(ItemId::from("a"), "A".into(), Duration::new(1, 45)),
            Item::new(ItemId::from("b"), "B".into(), Duration::new(0, 90)),
        ])
    }

    #[test]
    fn test_item_lookup() {
        let group = sample();
        assert_eq!(group.item(&ItemId::from("b")).unwrap().title, "B");
        assert_eq!(group.position(&ItemId::from("b")), Some(1));
        assert!(group.item(&ItemId::from("z")).is_none());
    }

    #[test]
    fn test_total_duration_carries_minutes() {
        assert_eq!(sample().total_duration(), Duration::new(3, 15));
        assert_eq!(
            Group::new(GroupId::from("e"), "EMPTY".into()).total_duration(),
            Duration::default()
        );
    }

    #[test]
    fn test_group_without_items_field() {
        let group: Group = serde_json::from_str(r#"{"id":"g","name":"N"}"#).unwrap();
        assert!(group.items.is_empty());
    }
}
