//! Identity-keyed diff shared by the collection reconcilers.

use std::collections::BTreeMap;

/// Operations needed to turn `actual` into `desired` for one resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan<T> {
  /// Desired entities with no remote counterpart, in desired order.
  pub to_create: Vec<T>,
  /// Remote entities with no desired counterpart, ordered by key.
  pub to_delete: Vec<T>,
  /// Desired entities whose remote counterpart differs.
  pub to_update: Vec<T>,
}

impl<T> Plan<T> {
  pub fn is_empty(&self) -> bool {
    self.to_create.is_empty() && self.to_delete.is_empty() && self.to_update.is_empty()
  }
}

impl<T> Default for Plan<T> {
  fn default() -> Self {
    Self {
      to_create: Vec::new(),
      to_delete: Vec::new(),
      to_update: Vec::new(),
    }
  }
}

/// Diff two collections by identity key using whole-record equality.
pub fn diff_by_key<T, K, F>(actual: &[T], desired: &[T], key: F) -> Plan<T>
where
  T: Clone + PartialEq,
  K: Ord,
  F: Fn(&T) -> K,
{
  diff_by_key_with(actual, desired, key, |remote, wanted| remote != wanted)
}

/// Diff two collections by identity key with a custom "needs update" check.
///
/// `differs` receives the remote record and the desired record and may
/// normalize either side before comparing.
pub fn diff_by_key_with<T, K, F, D>(actual: &[T], desired: &[T], key: F, differs: D) -> Plan<T>
where
  T: Clone,
  K: Ord,
  F: Fn(&T) -> K,
  D: Fn(&T, &T) -> bool,
{
  let mut remaining: BTreeMap<K, &T> = actual.iter().map(|item| (key(item), item)).collect();
  let mut plan = Plan::default();

  for wanted in desired {
    match remaining.remove(&key(wanted)) {
      None => plan.to_create.push(wanted.clone()),
      Some(remote) => {
        if differs(remote, wanted) {
          plan.to_update.push(wanted.clone());
        }
      }
    }
  }

  plan.to_delete = remaining.into_values().cloned().collect();
  plan
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, PartialEq)]
  struct Item {
    id: &'static str,
    value: u32,
  }

  fn item(id: &'static str, value: u32) -> Item {
    Item { id, value }
  }

  #[test]
  fn test_diff_classifies_create_delete_update() {
    let actual = vec![item("a", 1), item("b", 2), item("c", 3)];
    let desired = vec![item("b", 2), item("c", 30), item("d", 4)];

    let plan = diff_by_key(&actual, &desired, |i| i.id);

    assert_eq!(plan.to_create, vec![item("d", 4)]);
    assert_eq!(plan.to_delete, vec![item("a", 1)]);
    assert_eq!(plan.to_update, vec![item("c", 30)]);
  }

  #[test]
  fn test_diff_identical_is_empty() {
    let items = vec![item("a", 1), item("b", 2)];
    let plan = diff_by_key(&items, &items, |i| i.id);
    assert!(plan.is_empty());
  }

  #[test]
  fn test_diff_empty_actual_creates_everything_in_desired_order() {
    let desired = vec![item("z", 1), item("a", 2)];
    let plan = diff_by_key(&[], &desired, |i| i.id);
    assert_eq!(plan.to_create, desired);
    assert!(plan.to_delete.is_empty());
  }

  #[test]
  fn test_diff_deletes_are_ordered_by_key() {
    let actual = vec![item("z", 1), item("m", 2), item("a", 3)];
    let plan = diff_by_key(&actual, &[], |i| i.id);
    let ids: Vec<_> = plan.to_delete.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["a", "m", "z"]);
  }

  #[test]
  fn test_diff_sets_partition_by_identity() {
    // Every key lands in exactly one bucket and matched keys never create or delete
    let actual = vec![item("a", 1), item("b", 2), item("c", 3), item("e", 5)];
    let desired = vec![item("a", 1), item("b", 9), item("d", 4), item("f", 6)];

    let plan = diff_by_key(&actual, &desired, |i| i.id);

    let created: Vec<_> = plan.to_create.iter().map(|i| i.id).collect();
    let deleted: Vec<_> = plan.to_delete.iter().map(|i| i.id).collect();
    let updated: Vec<_> = plan.to_update.iter().map(|i| i.id).collect();

    assert_eq!(created, vec!["d", "f"]);
    assert_eq!(deleted, vec!["c", "e"]);
    assert_eq!(updated, vec!["b"]);
  }

  #[test]
  fn test_diff_with_custom_comparison() {
    let actual = vec![item("a", 1)];
    let desired = vec![item("a", 100)];

    let plan = diff_by_key_with(&actual, &desired, |i| i.id, |_, _| false);
    assert!(plan.is_empty());
  }
}
