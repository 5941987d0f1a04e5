// src/core/indexing/kdtree/builder.rs

//! Builds a balanced task index from scratch.

use super::error::KdTreeError;
use super::partition::value_split;
use super::select::select_nth;
use super::tree::{IndexNode, IndexTree, Side};
use crate::core::types::{Coordinates, Dimension, Task};
use std::collections::HashSet;

/// A range of the working buffer still waiting to become a subtree.
#[derive(Debug)]
struct Span {
    start: usize,
    end: usize,
    parent: Option<usize>,
    side: Side,
    depth: usize,
}

/// Skeleton node recorded during partitioning; the task stays in the
/// working buffer at `slot` until the layout is final.
#[derive(Debug)]
struct Placed {
    slot: usize,
    parent: Option<usize>,
    side: Side,
    depth: usize,
}

/// Builds an index over `tasks`, consuming them.
///
/// At depth `d` the median task along `Dimension::for_depth(d)` becomes the
/// subtree root; the remaining tasks are split around its value, with ties
/// going right. The tree is built with an explicit work stack, so input size
/// does not bound the call stack. Every task in the returned tree is stamped
/// with its ancestry path.
///
/// An empty input yields an empty tree. The result is deterministic for a
/// given input order.
///
/// # Errors
///
/// Returns `KdTreeError::DuplicateId` if two tasks share an id.
pub fn build_index(tasks: Vec<Task>) -> Result<IndexTree, KdTreeError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    if let Some(dup) = tasks.iter().find(|t| !seen.insert(t.id)) {
        return Err(KdTreeError::DuplicateId(dup.id));
    }

    let mut work = tasks;
    let placed = partition_all(&mut work)?;

    let mut slots: Vec<Option<Task>> = work.into_iter().map(Some).collect();
    let mut tree = IndexTree::new();
    for p in placed {
        let task = slots
            .get_mut(p.slot)
            .and_then(Option::take)
            .ok_or_else(|| KdTreeError::Internal(format!("slot {} placed twice", p.slot)))?;
        tree.push(IndexNode::new(task, p.parent, p.depth), p.side)?;
    }
    tree.stamp();
    Ok(tree)
}

/// Convenience wrapper returning the stamped tasks in pre-order.
///
/// # Errors
///
/// Same as [`build_index`].
pub fn build_stamped(tasks: Vec<Task>) -> Result<Vec<Task>, KdTreeError> {
    build_index(tasks).map(IndexTree::into_tasks)
}

/// Partitions `work` in place and returns the node layout in pre-order.
fn partition_all(work: &mut [Task]) -> Result<Vec<Placed>, KdTreeError> {
    let mut placed = Vec::with_capacity(work.len());
    let mut stack = vec![Span { start: 0, end: work.len(), parent: None, side: Side::Left, depth: 0 }];

    while let Some(span) = stack.pop() {
        if span.start == span.end {
            continue;
        }
        let dimension = Dimension::for_depth(span.depth);
        let key = |t: &Task| t.coordinate(dimension);

        let window = &mut work[span.start..span.end];
        let median = select_nth(window, window.len() / 2, &key)?;
        window.swap(0, median);
        let cut = key(&window[0]);
        let boundary = 1 + value_split(&mut window[1..], cut, &key);

        let index = placed.len();
        placed.push(Placed { slot: span.start, parent: span.parent, side: span.side, depth: span.depth });

        let mid = span.start + boundary;
        let depth = span.depth + 1;
        // Right first so the left subtree is popped, and laid out, first.
        stack.push(Span { start: mid, end: span.end, parent: Some(index), side: Side::Right, depth });
        stack.push(Span { start: span.start + 1, end: mid, parent: Some(index), side: Side::Left, depth });
    }
    Ok(placed)
}
