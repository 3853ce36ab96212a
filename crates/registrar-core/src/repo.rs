//! The generic keyed repository backing every entity collection.
//!
//! One implementation serves every entity type; the only point of variation
//! is the iteration order, fixed at construction. Sorted repositories iterate
//! lexicographically by key (courses, curricular units, teaching loads);
//! unordered ones iterate in an unspecified order that is stable within a
//! single run (students, professors, users, summaries, rosters).
//!
//! Lookups never fail loudly: `get` returns `None` and `remove` is a no-op
//! for absent keys. Callers decide whether an absent key is an error.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, btree_map, hash_map};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

// ─── Ordering ────────────────────────────────────────────────────────────────

/// Iteration order of a repository, chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrder {
  Sorted,
  Unordered,
}

// ─── Repository ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Inner<K: Ord + Hash + Eq, V> {
  Sorted(BTreeMap<K, V>),
  Unordered(HashMap<K, V>),
}

/// An indexed in-memory collection mapping a unique key to an entity.
///
/// `insert` overwrites silently — last write wins. Uniqueness invariants
/// (course designations, registration numbers, summary titles) are enforced
/// by keying the repository on the unique attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository<K: Ord + Hash + Eq, V> {
  inner: Inner<K, V>,
}

impl<K: Ord + Hash + Eq, V> Repository<K, V> {
  /// An empty repository iterating lexicographically by key.
  pub fn sorted() -> Self {
    Self {
      inner: Inner::Sorted(BTreeMap::new()),
    }
  }

  /// An empty repository with unspecified (but per-run stable) iteration
  /// order.
  pub fn unordered() -> Self {
    Self {
      inner: Inner::Unordered(HashMap::new()),
    }
  }

  pub fn order(&self) -> KeyOrder {
    match &self.inner {
      Inner::Sorted(_) => KeyOrder::Sorted,
      Inner::Unordered(_) => KeyOrder::Unordered,
    }
  }

  /// Insert `value` under `key`, overwriting and returning any previous
  /// entry.
  pub fn insert(&mut self, key: K, value: V) -> Option<V> {
    match &mut self.inner {
      Inner::Sorted(map) => map.insert(key, value),
      Inner::Unordered(map) => map.insert(key, value),
    }
  }

  /// Remove the entry under `key`, returning it. A no-op for absent keys.
  pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: Ord + Hash + ?Sized,
  {
    match &mut self.inner {
      Inner::Sorted(map) => map.remove(key),
      Inner::Unordered(map) => map.remove(key),
    }
  }

  pub fn contains<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Ord + Hash + ?Sized,
  {
    match &self.inner {
      Inner::Sorted(map) => map.contains_key(key),
      Inner::Unordered(map) => map.contains_key(key),
    }
  }

  pub fn get<Q>(&self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: Ord + Hash + ?Sized,
  {
    match &self.inner {
      Inner::Sorted(map) => map.get(key),
      Inner::Unordered(map) => map.get(key),
    }
  }

  pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
  where
    K: Borrow<Q>,
    Q: Ord + Hash + ?Sized,
  {
    match &mut self.inner {
      Inner::Sorted(map) => map.get_mut(key),
      Inner::Unordered(map) => map.get_mut(key),
    }
  }

  pub fn len(&self) -> usize {
    match &self.inner {
      Inner::Sorted(map) => map.len(),
      Inner::Unordered(map) => map.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn iter(&self) -> Iter<'_, K, V> {
    match &self.inner {
      Inner::Sorted(map) => Iter::Sorted(map.iter()),
      Inner::Unordered(map) => Iter::Unordered(map.iter()),
    }
  }

  pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
    match &mut self.inner {
      Inner::Sorted(map) => IterMut::Sorted(map.iter_mut()),
      Inner::Unordered(map) => IterMut::Unordered(map.iter_mut()),
    }
  }

  pub fn keys(&self) -> impl Iterator<Item = &K> { self.iter().map(|(k, _)| k) }

  pub fn values(&self) -> impl Iterator<Item = &V> {
    self.iter().map(|(_, v)| v)
  }

  pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
    self.iter_mut().map(|(_, v)| v)
  }
}

// ─── Rosters ─────────────────────────────────────────────────────────────────

/// A membership roster: a repository whose entries carry no payload beyond
/// the key itself (UC teams, course enrolment, summary attendance).
pub type Roster<K = String> = Repository<K, ()>;

impl<K: Ord + Hash + Eq> Repository<K, ()> {
  /// Insert a bare key. Returns `true` when the key was newly added.
  pub fn add(&mut self, key: K) -> bool { self.insert(key, ()).is_none() }
}

// ─── Iterators ───────────────────────────────────────────────────────────────

pub enum Iter<'a, K, V> {
  Sorted(btree_map::Iter<'a, K, V>),
  Unordered(hash_map::Iter<'a, K, V>),
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
  type Item = (&'a K, &'a V);

  fn next(&mut self) -> Option<Self::Item> {
    match self {
      Self::Sorted(it) => it.next(),
      Self::Unordered(it) => it.next(),
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    match self {
      Self::Sorted(it) => it.size_hint(),
      Self::Unordered(it) => it.size_hint(),
    }
  }
}

pub enum IterMut<'a, K, V> {
  Sorted(btree_map::IterMut<'a, K, V>),
  Unordered(hash_map::IterMut<'a, K, V>),
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
  type Item = (&'a K, &'a mut V);

  fn next(&mut self) -> Option<Self::Item> {
    match self {
      Self::Sorted(it) => it.next(),
      Self::Unordered(it) => it.next(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_then_exists_and_get() {
    let mut repo: Repository<String, u32> = Repository::unordered();
    assert!(repo.insert("a".into(), 1).is_none());
    assert!(repo.contains("a"));
    assert_eq!(repo.get("a"), Some(&1));
    assert_eq!(repo.len(), 1);
  }

  #[test]
  fn insert_overwrites_last_write_wins() {
    let mut repo: Repository<String, u32> = Repository::sorted();
    repo.insert("a".into(), 1);
    let previous = repo.insert("a".into(), 2);
    assert_eq!(previous, Some(1));
    assert_eq!(repo.get("a"), Some(&2));
    assert_eq!(repo.len(), 1);
  }

  #[test]
  fn remove_missing_key_is_a_noop() {
    let mut repo: Repository<String, u32> = Repository::unordered();
    repo.insert("a".into(), 1);
    assert!(repo.remove("b").is_none());
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.get("a"), Some(&1));
  }

  #[test]
  fn removed_key_no_longer_resolves() {
    let mut repo: Repository<String, u32> = Repository::unordered();
    repo.insert("a".into(), 1);
    assert_eq!(repo.remove("a"), Some(1));
    assert!(!repo.contains("a"));
    assert!(repo.get("a").is_none());
  }

  #[test]
  fn sorted_iteration_is_lexicographic() {
    let mut repo: Repository<String, u32> = Repository::sorted();
    for key in ["delta", "alpha", "charlie", "bravo"] {
      repo.insert(key.into(), 0);
    }
    let keys: Vec<&String> = repo.keys().collect();
    assert_eq!(keys, ["alpha", "bravo", "charlie", "delta"]);
  }

  #[test]
  fn roster_add_reports_novelty() {
    let mut roster = Roster::unordered();
    assert!(roster.add("p1".to_string()));
    assert!(!roster.add("p1".to_string()));
    assert_eq!(roster.len(), 1);
  }
}
