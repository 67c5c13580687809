use crate::{
    domain::{move_element, normalize_label, Duration, Group, GroupId, Item, ItemId},
    error::{Result, StoreError},
    storage::{snapshot::STORAGE_KEY, Snapshot, Storage},
};
use tracing::{debug, warn};

/// Change notification delivered to subscribers after each mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    GroupAdded(GroupId),
    GroupRenamed(GroupId),
    GroupDeleted(GroupId),
    GroupMoved { from: GroupId, to: GroupId },
    ItemAdded { group: GroupId, item: ItemId },
    ItemUpdated { group: GroupId, item: ItemId },
    ItemDeleted { group: GroupId, item: ItemId },
    ItemMoved { group: GroupId, from: ItemId, to: ItemId },
}

type Listener = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Ordered collection of groups, written through to a [`Storage`] backend.
///
/// Every mutation is applied in memory first, then announced to subscribers,
/// then persisted under [`STORAGE_KEY`] before the call returns. If the write
/// fails the in-memory state is kept, the store stays dirty and the error is
/// returned; [`Store::flush`] retries the write.
///
/// Blank names and titles make `add_*` and `rename_*` do nothing. Such
/// no-ops, and moves onto the same position, neither notify nor persist.
pub struct Store<S: Storage> {
    storage: S,
    groups: Vec<Group>,
    listeners: Vec<Listener>,
    dirty: bool,
}

impl<S: Storage> Store<S> {
    /// Restores the store from `storage`, seeding the example dataset when
    /// nothing readable has been persisted yet
    pub async fn load(storage: S) -> Self {
        let snapshot = match storage.read(STORAGE_KEY).await {
            Ok(Some(bytes)) => match Snapshot::decode(&bytes) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(error = %err, "persisted snapshot unreadable, seeding example data");
                    Snapshot::seed()
                }
            },
            Ok(None) => {
                debug!("no persisted snapshot, seeding example data");
                Snapshot::seed()
            }
            Err(err) => {
                warn!(error = %err, "failed to read snapshot, seeding example data");
                Snapshot::seed()
            }
        };

        Self::with_groups(storage, snapshot.groups)
    }

    /// Creates a store holding `groups`; nothing is written until the first mutation
    pub fn with_groups(storage: S, groups: Vec<Group>) -> Self {
        Self {
            storage,
            groups,
            listeners: Vec::new(),
            dirty: false,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Registers a callback invoked after every successful mutation
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Whether in-memory state has not yet reached storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn list_groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == id)
    }

    pub fn item(&self, group_id: &GroupId, item_id: &ItemId) -> Option<&Item> {
        self.group(group_id).and_then(|group| group.item(item_id))
    }

    /// Copy of the current state in its persisted form
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.groups.clone())
    }

    pub async fn add_group(&mut self, name: &str) -> Result<Option<Group>> {
        let Some(name) = normalize_label(name) else {
            debug!("blank group name, nothing added");
            return Ok(None);
        };

        let id = GroupId::fresh(self.groups.iter().map(|group| &group.id));
        let group = Group::new(id.clone(), name);
        self.groups.push(group.clone());

        debug!(group = %id, name = %group.name, "group added");
        self.commit(StoreEvent::GroupAdded(id)).await?;
        Ok(Some(group))
    }

    pub async fn rename_group(&mut self, id: &GroupId, name: &str) -> Result<()> {
        let group = self.group_mut(id)?;
        let Some(name) = normalize_label(name) else {
            debug!(group = %id, "blank group name, rename skipped");
            return Ok(());
        };

        group.name = name;
        debug!(group = %id, name = %group.name, "group renamed");
        self.commit(StoreEvent::GroupRenamed(id.clone())).await
    }

    /// Removes a group together with all of its items
    pub async fn delete_group(&mut self, id: &GroupId) -> Result<()> {
        let index = self.group_index(id)?;
        let removed = self.groups.remove(index);

        debug!(group = %id, items = removed.items.len(), "group deleted");
        self.commit(StoreEvent::GroupDeleted(id.clone())).await
    }

    /// Moves group `from` onto the position currently held by group `to`
    pub async fn move_group(&mut self, from: &GroupId, to: &GroupId) -> Result<()> {
        let from_index = self.group_index(from)?;
        let to_index = self.group_index(to)?;
        if from_index == to_index {
            return Ok(());
        }

        move_element(&mut self.groups, from_index, to_index);
        debug!(from = %from, to = %to, "group moved");
        self.commit(StoreEvent::GroupMoved {
            from: from.clone(),
            to: to.clone(),
        })
        .await
    }

    pub async fn add_item(
        &mut self,
        group_id: &GroupId,
        title: &str,
        duration: Duration,
    ) -> Result<Option<Item>> {
        let group = self.group_mut(group_id)?;
        let Some(title) = normalize_label(title) else {
            debug!(group = %group_id, "blank item title, nothing added");
            return Ok(None);
        };

        let id = ItemId::fresh(group.items.iter().map(|item| &item.id));
        let item = Item::new(id.clone(), title, duration);
        group.items.push(item.clone());

        debug!(group = %group_id, item = %id, "item added");
        self.commit(StoreEvent::ItemAdded {
            group: group_id.clone(),
            item: id,
        })
        .await?;
        Ok(Some(item))
    }

    /// Replaces an item's title and duration in place.
    ///
    /// A blank title leaves the item entirely unchanged, duration included.
    pub async fn rename_item(
        &mut self,
        group_id: &GroupId,
        item_id: &ItemId,
        title: &str,
        duration: Duration,
    ) -> Result<()> {
        let item = self
            .group_mut(group_id)?
            .item_mut(item_id)
            .ok_or_else(|| item_not_found(group_id, item_id))?;
        let Some(title) = normalize_label(title) else {
            debug!(group = %group_id, item = %item_id, "blank item title, update skipped");
            return Ok(());
        };

        item.title = title;
        item.duration = duration;
        debug!(group = %group_id, item = %item_id, "item updated");
        self.commit(StoreEvent::ItemUpdated {
            group: group_id.clone(),
            item: item_id.clone(),
        })
        .await
    }

    pub async fn delete_item(&mut self, group_id: &GroupId, item_id: &ItemId) -> Result<()> {
        let group = self.group_mut(group_id)?;
        let index = group
            .position(item_id)
            .ok_or_else(|| item_not_found(group_id, item_id))?;
        group.items.remove(index);

        debug!(group = %group_id, item = %item_id, "item deleted");
        self.commit(StoreEvent::ItemDeleted {
            group: group_id.clone(),
            item: item_id.clone(),
        })
        .await
    }

    /// Moves item `from` onto the position currently held by item `to`
    pub async fn move_item(&mut self, group_id: &GroupId, from: &ItemId, to: &ItemId) -> Result<()> {
        let group = self.group_mut(group_id)?;
        let from_index = group
            .position(from)
            .ok_or_else(|| item_not_found(group_id, from))?;
        let to_index = group
            .position(to)
            .ok_or_else(|| item_not_found(group_id, to))?;
        if from_index == to_index {
            return Ok(());
        }

        move_element(&mut group.items, from_index, to_index);
        debug!(group = %group_id, from = %from, to = %to, "item moved");
        self.commit(StoreEvent::ItemMoved {
            group: group_id.clone(),
            from: from.clone(),
            to: to.clone(),
        })
        .await
    }

    /// Writes the current state if an earlier write did not go through
    pub async fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let bytes = self.snapshot().encode()?;
        match self.storage.write(STORAGE_KEY, &bytes).await {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to persist snapshot, keeping in-memory state");
                Err(err)
            }
        }
    }

    async fn commit(&mut self, event: StoreEvent) -> Result<()> {
        self.dirty = true;
        for listener in &self.listeners {
            listener(&event);
        }
        self.flush().await
    }

    fn group_index(&self, id: &GroupId) -> Result<usize> {
        self.groups
            .iter()
            .position(|group| &group.id == id)
            .ok_or_else(|| StoreError::GroupNotFound(id.to_string()))
    }

    fn group_mut(&mut self, id: &GroupId) -> Result<&mut Group> {
        self.groups
            .iter_mut()
            .find(|group| &group.id == id)
            .ok_or_else(|| StoreError::GroupNotFound(id.to_string()))
    }
}

fn item_not_found(group_id: &GroupId, item_id: &ItemId) -> StoreError {
    StoreError::ItemNotFound {
        group: group_id.to_string(),
        item: item_id.to_string(),
    }
}
