//! # Schedule Core
//!
//! Ordered collection store behind the schedule and task protocol trackers.
//!
//! A [`Store`] holds an ordered list of [`Group`]s, each holding an ordered
//! list of [`Item`]s. It supports adding, renaming, deleting and moving at
//! both levels, notifies subscribers of every change and writes a snapshot
//! through to a key-value [`Storage`] backend after each mutation.
//!
//! A flat to-do list is a store with a single group.

pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use domain::{Duration, Group, GroupId, Item, ItemId};
pub use error::{Result, StoreError};
pub use storage::{FileStorage, MemoryStorage, Snapshot, Storage};
pub use store::{Store, StoreEvent};
