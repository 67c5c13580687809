pub mod group;
pub mod ids;
pub mod input;
pub mod item;
pub mod ordering;

pub use group::Group;
pub use ids::{GroupId, ItemId};
pub use input::{normalize_label, parse_non_negative_int};
pub use item::{Duration, Item};
pub use ordering::move_element;
