// src/core/indexing/kdtree/mod.rs

//! KD-Tree index over a user's tasks.
//!
//! The tree cycles through time, mood, energy and distance-from-origin by
//! depth. It is always rebuilt from scratch: [`build_index`] selects the
//! median along the current dimension in linear time, splits the remainder
//! around it and repeats for both halves. The shape is persisted only
//! through each task's ancestry path; [`IndexTree::from_stamped`] recovers
//! the arena from those paths for [`find_nearest`].

pub use self::builder::{build_index, build_stamped};
pub use self::error::KdTreeError;
pub use self::partition::{rank_partition, value_split};
pub use self::search::{find_nearest, DimensionWeights, Neighbor};
pub use self::select::{select_nth, select_nth_ref};
pub use self::tree::{IndexNode, IndexTree, Side};

mod builder;
mod error;
mod partition;
mod search;
mod select;
mod tree;

#[cfg(test)]
mod tests;
