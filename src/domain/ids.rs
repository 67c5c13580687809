use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of a freshly generated id
const ID_LEN: usize = 8;

/// Identifier of a group, unique among the groups of a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Generates an id that does not collide with any of `taken`
    pub fn fresh<'a>(taken: impl IntoIterator<Item = &'a GroupId> + Clone) -> Self {
        Self(fresh_token(|candidate| {
            taken.clone().into_iter().any(|id| id.as_str() == candidate)
        }))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an item, unique among the items of its group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates an id that does not collide with any of `taken`
    pub fn fresh<'a>(taken: impl IntoIterator<Item = &'a ItemId> + Clone) -> Self {
        Self(fresh_token(|candidate| {
            taken.clone().into_iter().any(|id| id.as_str() == candidate)
        }))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Draws short random tokens until one is not rejected by `is_taken`.
///
/// Eight hex characters keep ids readable; uniqueness is only guaranteed
/// against the siblings checked here, not globally.
fn fresh_token(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(ID_LEN);
        if !is_taken(&token) {
            return token;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_id_shape() {
        let id = GroupId::fresh(std::iter::empty());
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fresh_id_skips_taken() {
        let taken: Vec<ItemId> = (0..50).map(|_| ItemId::fresh(std::iter::empty())).collect();
        let id = ItemId::fresh(&taken);
        assert!(!taken.contains(&id));
    }

    #[test]
    fn test_fresh_token_retries_until_free() {
        let calls = std::cell::Cell::new(0);
        let token = fresh_token(|_| {
            calls.set(calls.get() + 1);
            calls.get() < 3
        });
        assert_eq!(calls.get(), 3);
        assert_eq!(token.len(), ID_LEN);
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = GroupId::from("g1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"g1\"");
        let back: ItemId = serde_json::from_str("\"i9\"").unwrap();
        assert_eq!(back.as_str(), "i9");
    }
}
