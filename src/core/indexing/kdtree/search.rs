// src/core/indexing/kdtree/search.rs

//! Best-match (k nearest neighbour) search over a task index.

use super::tree::{IndexTree, Side};
use crate::core::types::{Coordinates, Dimension, TaskId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Per-dimension weights of the best-match metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub time: f64,
    pub mood: f64,
    pub energy: f64,
    pub distance: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self { time: 1.0, mood: 1.0, energy: 1.0, distance: 1.0 }
    }
}

impl DimensionWeights {
    pub const fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Time => self.time,
            Dimension::Mood => self.mood,
            Dimension::Energy => self.energy,
            Dimension::Distance => self.distance,
        }
    }

    /// Weighted squared distance between two points in index space.
    pub fn distance_sq(&self, a: &[f64; 4], b: &[f64; 4]) -> f64 {
        Dimension::ALL
            .iter()
            .map(|&d| {
                let diff = a[d.index()] - b[d.index()];
                self.weight(d) * diff * diff
            })
            .sum()
    }
}

/// One search hit: arena index of the node and its distance to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: usize,
    pub id: TaskId,
    pub distance: f64,
}

/// Heap entry. Orders by squared distance, then id, so the max-heap's top is
/// the candidate to evict first.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance_sq: f64,
    id: TaskId,
    node: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_sq
            .total_cmp(&other.distance_sq)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Finds up to `limit` tasks closest to `target` under `weights`.
///
/// Descends toward the target's side of every cut first and only visits the
/// far side while the weighted distance to the cut plane can still beat the
/// worst retained candidate. Results are sorted by ascending distance; equal
/// distances are ordered by ascending task id.
pub fn find_nearest<Q: Coordinates>(
    tree: &IndexTree,
    target: &Q,
    limit: usize,
    weights: &DimensionWeights,
) -> Vec<Neighbor> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };
    if limit == 0 {
        return Vec::new();
    }

    let query = target.point();
    let mut best: BinaryHeap<Candidate> = BinaryHeap::with_capacity(limit + 1);
    // (node, lower bound on the squared distance of anything in its subtree)
    let mut stack = vec![(root, 0.0_f64)];

    while let Some((index, bound)) = stack.pop() {
        if best.len() == limit && best.peek().is_some_and(|worst| bound > worst.distance_sq) {
            continue;
        }
        let Some(node) = tree.node(index) else { continue };

        let candidate = Candidate {
            distance_sq: weights.distance_sq(&query, &node.task().point()),
            id: node.task().id,
            node: index,
        };
        if best.len() < limit {
            best.push(candidate);
        } else if best.peek().is_some_and(|worst| candidate < *worst) {
            best.pop();
            best.push(candidate);
        }

        let dimension = node.dimension();
        let diff = query[dimension.index()] - node.cut();
        let plane_sq = weights.weight(dimension) * diff * diff;
        let (near, far) = match node.side_of(query[dimension.index()]) {
            Side::Left => (node.left(), node.right()),
            Side::Right => (node.right(), node.left()),
        };
        if let Some(far) = far {
            stack.push((far, bound.max(plane_sq)));
        }
        if let Some(near) = near {
            stack.push((near, bound));
        }
    }

    let mut results: Vec<Candidate> = best.into_vec();
    results.sort();
    results
        .into_iter()
        .map(|c| Neighbor { node: c.node, id: c.id, distance: c.distance_sq.sqrt() })
        .collect()
}
