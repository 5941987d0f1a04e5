use super::task;
use crate::core::storage::implementations::in_memory::InMemoryTaskStore;
use crate::core::storage::traits::TaskStore;
use crate::core::types::{Ancestry, TaskId};

#[test]
fn test_next_id_is_monotonic() {
    let store = InMemoryTaskStore::new();
    assert_eq!(store.next_id().unwrap(), TaskId(1));
    assert_eq!(store.next_id().unwrap(), TaskId(2));
    store.save(task(10, "alice")).unwrap();
    assert_eq!(store.next_id().unwrap(), TaskId(11));
}

#[test]
fn test_save_find_delete() {
    let store = InMemoryTaskStore::new();
    store.save(task(1, "alice")).unwrap();
    assert!(store.exists_by_id(TaskId(1)).unwrap());
    assert_eq!(store.find_by_id(TaskId(1)).unwrap().unwrap().user, "alice");
    assert!(store.delete_by_id(TaskId(1)).unwrap());
    assert!(!store.delete_by_id(TaskId(1)).unwrap());
    assert!(store.find_by_id(TaskId(1)).unwrap().is_none());
}

#[test]
fn test_save_all_replaces_by_id() {
    let store = InMemoryTaskStore::new();
    store.save_all(vec![task(1, "alice"), task(2, "alice")]).unwrap();
    let mut stamped = task(2, "alice");
    stamped.ancestry = Some(Ancestry::root(TaskId(2)));
    store.save_all(vec![stamped.clone()]).unwrap();
    assert_eq!(store.find_all().unwrap().len(), 2);
    assert_eq!(store.find_by_id(TaskId(2)).unwrap(), Some(stamped));
}

#[test]
fn test_find_all_for_user_is_partitioned_and_ordered() {
    let store = InMemoryTaskStore::new();
    store.save_all(vec![task(3, "alice"), task(1, "bob"), task(2, "alice")]).unwrap();
    let ids: Vec<u64> = store.find_all_for_user("alice").unwrap().iter().map(|t| t.id.0).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(store.find_all_for_user("bob").unwrap().len(), 1);
    assert!(store.find_all_for_user("carol").unwrap().is_empty());
}

#[test]
fn test_next_id_refuses_to_wrap() {
    let store = InMemoryTaskStore::new();
    store.save(task(u64::MAX, "alice")).unwrap();

    let err = store.next_id().unwrap_err();
    assert!(matches!(err, crate::core::storage::traits::StoreError::Backend(_)));
    // The failure leaves the store usable.
    assert_eq!(store.find_all().unwrap().len(), 1);
    assert!(store.next_id().is_err());
}
