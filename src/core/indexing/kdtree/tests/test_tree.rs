// src/core/indexing/kdtree/tests/test_tree.rs

#[cfg(test)]
mod tree_tests {
    use crate::core::indexing::kdtree::{build_index, build_stamped, IndexTree, KdTreeError};
    use crate::core::types::{Ancestry, TaskId};

    use super::super::{random_tasks, task};

    #[test]
    fn test_reconstruction_matches_built_shape() {
        let built = build_index(random_tasks(120, 31)).unwrap();
        let mut stamped = built.clone().into_tasks();
        // Storage order carries no meaning.
        stamped.reverse();
        let rebuilt = IndexTree::from_stamped(stamped).unwrap();

        assert_eq!(rebuilt.len(), built.len());
        for node in built.nodes() {
            let id = node.task().id;
            let other = rebuilt.node(rebuilt.find(id).unwrap()).unwrap();
            let id_of = |tree: &IndexTree, i: Option<usize>| i.map(|i| tree.nodes()[i].task().id);
            assert_eq!(id_of(&built, node.left()), id_of(&rebuilt, other.left()), "left of {id}");
            assert_eq!(id_of(&built, node.right()), id_of(&rebuilt, other.right()), "right of {id}");
            assert_eq!(node.depth(), other.depth());
        }
    }

    #[test]
    fn test_path_to_walks_parents() {
        let tree = build_index(random_tasks(40, 5)).unwrap();
        for (index, node) in tree.nodes().iter().enumerate() {
            let path = tree.path_to(index);
            assert_eq!(Ancestry::from_ids(path).as_ref(), node.task().ancestry.as_ref());
        }
    }

    #[test]
    fn test_unstamped_task_rejected() {
        let result = IndexTree::from_stamped(vec![task(1, 0.0, 0.0, 0.0, 0.0, 0.0)]);
        assert!(matches!(result, Err(KdTreeError::CorruptStructure(_))));
    }

    #[test]
    fn test_orphan_rejected() {
        let mut stamped = build_stamped(vec![
            task(1, 5.0, 0.0, 0.0, 0.0, 0.0),
            task(2, 1.0, 0.0, 0.0, 0.0, 0.0),
            task(3, 9.0, 0.0, 0.0, 0.0, 0.0),
        ])
        .unwrap();
        // Raw delete of the root leaves both children dangling.
        stamped.retain(|t| t.id != TaskId(1));
        let err = IndexTree::from_stamped(stamped).unwrap_err();
        assert!(err.to_string().contains("missing parent"));
    }

    #[test]
    fn test_second_root_rejected() {
        let mut a = task(1, 0.0, 0.0, 0.0, 0.0, 0.0);
        a.ancestry = Some(Ancestry::root(TaskId(1)));
        let mut b = task(2, 0.0, 0.0, 0.0, 0.0, 0.0);
        b.ancestry = Some(Ancestry::root(TaskId(2)));
        assert!(IndexTree::from_stamped(vec![a, b]).is_err());
    }

    #[test]
    fn test_side_collision_rejected() {
        let mut root = task(1, 5.0, 0.0, 0.0, 0.0, 0.0);
        root.ancestry = Some(Ancestry::root(TaskId(1)));
        let mut a = task(2, 7.0, 0.0, 0.0, 0.0, 0.0);
        a.ancestry = Some(Ancestry::root(TaskId(1)).child(TaskId(2)));
        let mut b = task(3, 8.0, 0.0, 0.0, 0.0, 0.0);
        b.ancestry = Some(Ancestry::root(TaskId(1)).child(TaskId(3)));
        let err = IndexTree::from_stamped(vec![root, a, b]).unwrap_err();
        assert!(matches!(err, KdTreeError::CorruptStructure(_)));
    }

    #[test]
    fn test_path_not_ending_at_task_rejected() {
        let mut t = task(5, 0.0, 0.0, 0.0, 0.0, 0.0);
        t.ancestry = Some(Ancestry::root(TaskId(6)));
        assert!(IndexTree::from_stamped(vec![t]).is_err());
    }

    #[test]
    fn test_empty_reconstruction() {
        let tree = IndexTree::from_stamped(Vec::new()).unwrap();
        assert!(tree.is_empty());
    }
}
