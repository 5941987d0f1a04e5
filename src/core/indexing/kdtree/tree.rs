// src/core/indexing/kdtree/tree.rs

//! Arena representation of a user's task index.

use super::error::KdTreeError;
use crate::core::types::{Ancestry, Coordinates, Dimension, Task, TaskId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Which side of its parent's cut a node lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Value on the parent's dimension is below the cut.
    Left,
    /// Value on the parent's dimension is at or above the cut.
    Right,
}

/// A node of the index. Links are indices into the owning `IndexTree`.
#[derive(Debug, Clone)]
pub struct IndexNode {
    task: Task,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
    depth: usize,
}

impl IndexNode {
    pub(super) fn new(task: Task, parent: Option<usize>, depth: usize) -> Self {
        Self { task, parent, left: None, right: None, depth }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn left(&self) -> Option<usize> {
        self.left
    }

    pub fn right(&self) -> Option<usize> {
        self.right
    }

    pub fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Dimension this node splits its children on.
    pub fn dimension(&self) -> Dimension {
        Dimension::for_depth(self.depth)
    }

    /// The node's own value on its splitting dimension.
    pub fn cut(&self) -> f64 {
        self.task.coordinate(self.dimension())
    }

    /// Side of this node's cut a value falls on.
    pub fn side_of(&self, value: f64) -> Side {
        match value.total_cmp(&self.cut()) {
            Ordering::Less => Side::Left,
            _ => Side::Right,
        }
    }
}

/// Balanced partition tree over one user's tasks, stored as an arena.
///
/// Nodes built by [`build_index`](super::builder::build_index) are laid out in
/// pre-order: root first, then the left subtree, then the right subtree.
#[derive(Debug, Clone, Default)]
pub struct IndexTree {
    nodes: Vec<IndexNode>,
    root: Option<usize>,
}

impl IndexTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn node(&self, index: usize) -> Option<&IndexNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[IndexNode] {
        &self.nodes
    }

    /// Arena index of the node holding task `id`.
    pub fn find(&self, id: TaskId) -> Option<usize> {
        self.nodes.iter().position(|n| n.task.id == id)
    }

    /// Task ids from the root down to `index`, found by walking parent links.
    pub fn path_to(&self, index: usize) -> Vec<TaskId> {
        let mut path = Vec::new();
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let Some(node) = self.nodes.get(i) else { break };
            path.push(node.task.id);
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    /// Appends a node and links it under `parent` on `side`.
    pub(super) fn push(&mut self, node: IndexNode, side: Side) -> Result<usize, KdTreeError> {
        let index = self.nodes.len();
        match node.parent {
            None => {
                if self.root.is_some() {
                    return Err(KdTreeError::corrupt(format!(
                        "task {} is a second root",
                        node.task.id
                    )));
                }
                self.root = Some(index);
            }
            Some(parent) => {
                let parent_node = self.nodes.get_mut(parent).ok_or_else(|| {
                    KdTreeError::Internal(format!("parent index {parent} out of bounds"))
                })?;
                let slot = match side {
                    Side::Left => &mut parent_node.left,
                    Side::Right => &mut parent_node.right,
                };
                if slot.is_some() {
                    return Err(KdTreeError::corrupt(format!(
                        "task {} collides with an existing {:?} child of task {}",
                        node.task.id, side, parent_node.task.id
                    )));
                }
                *slot = Some(index);
            }
        }
        self.nodes.push(node);
        Ok(index)
    }

    /// Writes each node's root-to-node path into its task's `ancestry`.
    pub(super) fn stamp(&mut self) {
        for i in 0..self.nodes.len() {
            let path = self.path_to(i);
            self.nodes[i].task.ancestry = Ancestry::from_ids(path);
        }
    }

    /// Consumes the tree, returning its tasks in arena order.
    pub fn into_tasks(self) -> Vec<Task> {
        self.nodes.into_iter().map(|n| n.task).collect()
    }

    /// Reconstructs the arena from tasks previously stamped by the builder.
    ///
    /// Parents are resolved from ancestry paths. Which side of its parent a
    /// node sits on is not encoded in the path, so it is recovered by
    /// comparing the node's value on the parent's dimension with the parent's
    /// cut, exactly as the builder split them.
    ///
    /// # Errors
    ///
    /// Returns `KdTreeError::CorruptStructure` if a task is unstamped, a path
    /// does not end at its own task, a parent is missing, ids repeat, or two
    /// tasks claim the same position.
    pub fn from_stamped(tasks: Vec<Task>) -> Result<Self, KdTreeError> {
        let mut pending = Vec::with_capacity(tasks.len());
        for task in tasks {
            let ancestry = task
                .ancestry
                .clone()
                .ok_or_else(|| KdTreeError::corrupt(format!("task {} is not stamped", task.id)))?;
            if ancestry.leaf() != task.id {
                return Err(KdTreeError::corrupt(format!(
                    "ancestry '{ancestry}' of task {} does not end at it",
                    task.id
                )));
            }
            pending.push((ancestry, task));
        }
        // Stable, so equal-depth tasks keep their stored order.
        pending.sort_by_key(|(ancestry, _)| ancestry.depth());

        let mut tree = Self::new();
        let mut by_id: HashMap<TaskId, usize> = HashMap::with_capacity(pending.len());
        for (ancestry, task) in pending {
            let id = task.id;
            if by_id.contains_key(&id) {
                return Err(KdTreeError::DuplicateId(id));
            }
            let (parent, side) = match ancestry.parent() {
                None => (None, Side::Left),
                Some(parent_id) => {
                    let parent = *by_id.get(&parent_id).ok_or_else(|| {
                        KdTreeError::corrupt(format!(
                            "task {id} refers to missing parent {parent_id}"
                        ))
                    })?;
                    let parent_node = &tree.nodes[parent];
                    let parent_path = parent_node.task.ancestry.as_ref();
                    if !parent_path.is_some_and(|p| ancestry.is_child_of(p)) {
                        return Err(KdTreeError::corrupt(format!(
                            "ancestry '{ancestry}' of task {id} disagrees with its parent"
                        )));
                    }
                    let side = parent_node.side_of(task.coordinate(parent_node.dimension()));
                    (Some(parent), side)
                }
            };
            let index = tree.push(IndexNode::new(task, parent, ancestry.depth()), side)?;
            by_id.insert(id, index);
        }
        Ok(tree)
    }
}
