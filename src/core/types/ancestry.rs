// src/core/types/ancestry.rs

//! Dotted root-to-node id paths (`"7.3.12."`), the persisted encoding of a
//! task's position in its owner's index.

use super::task::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Non-empty path of task ids from the index root down to a node, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ancestry {
    ids: Vec<TaskId>,
}

impl Ancestry {
    /// Path of a root node.
    pub fn root(id: TaskId) -> Self {
        Self { ids: vec![id] }
    }

    /// Path of a child of the node this path ends at.
    #[must_use]
    pub fn child(&self, id: TaskId) -> Self {
        let mut ids = Vec::with_capacity(self.ids.len() + 1);
        ids.extend_from_slice(&self.ids);
        ids.push(id);
        Self { ids }
    }

    /// Builds a path from ids ordered root first. `None` if `ids` is empty.
    pub fn from_ids(ids: Vec<TaskId>) -> Option<Self> {
        if ids.is_empty() {
            None
        } else {
            Some(Self { ids })
        }
    }

    pub fn ids(&self) -> &[TaskId] {
        &self.ids
    }

    /// Zero for a root.
    pub fn depth(&self) -> usize {
        self.ids.len() - 1
    }

    /// The node this path ends at.
    pub fn leaf(&self) -> TaskId {
        self.ids[self.ids.len() - 1]
    }

    /// Id of the node's parent, `None` for a root.
    pub fn parent(&self) -> Option<TaskId> {
        self.ids.len().checked_sub(2).map(|i| self.ids[i])
    }

    /// True if `other` is this path minus its last element.
    pub fn is_child_of(&self, other: &Self) -> bool {
        self.ids.len() == other.ids.len() + 1 && self.ids.starts_with(&other.ids)
    }
}

impl fmt::Display for Ancestry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.ids {
            write!(f, "{id}.")?;
        }
        Ok(())
    }
}

/// Error returned when a string is not a well-formed ancestry path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed ancestry path '{0}'")]
pub struct ParseAncestryError(pub String);

impl FromStr for Ancestry {
    type Err = ParseAncestryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_suffix('.')
            .ok_or_else(|| ParseAncestryError(s.to_string()))?;
        let ids = body
            .split('.')
            .map(|segment| segment.parse::<u64>().map(TaskId))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseAncestryError(s.to_string()))?;
        Self::from_ids(ids).ok_or_else(|| ParseAncestryError(s.to_string()))
    }
}

impl TryFrom<String> for Ancestry {
    type Error = ParseAncestryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ancestry> for String {
    fn from(value: Ancestry) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let path = Ancestry::root(TaskId(7)).child(TaskId(3)).child(TaskId(12));
        assert_eq!(path.to_string(), "7.3.12.");
        assert_eq!("7.3.12.".parse::<Ancestry>().unwrap(), path);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.leaf(), TaskId(12));
        assert_eq!(path.parent(), Some(TaskId(3)));
    }

    #[test]
    fn test_root_has_no_parent() {
        let root = Ancestry::root(TaskId(1));
        assert_eq!(root.to_string(), "1.");
        assert_eq!(root.parent(), None);
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", ".", "1", "1..2.", "a.", "1.2", "-1."] {
            assert!(bad.parse::<Ancestry>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_is_child_of() {
        let root = Ancestry::root(TaskId(1));
        let child = root.child(TaskId(2));
        let grandchild = child.child(TaskId(5));
        assert!(child.is_child_of(&root));
        assert!(grandchild.is_child_of(&child));
        assert!(!grandchild.is_child_of(&root));
        assert!(!Ancestry::root(TaskId(4)).child(TaskId(2)).is_child_of(&root));
    }
}
