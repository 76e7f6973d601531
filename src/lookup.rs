// In: src/lookup.rs

//! An insertion-ordered key -> group multimap.
//!
//! This is the backing structure for `join`, `group_join`, `group_by` and
//! `to_lookup`. Group order is the order of first appearance of each key in
//! the input, which is an observable contract of those operations, so a plain
//! `HashMap` is not enough: groups live in a `Vec` and the map only indexes
//! into it. A `Lookup` is built once per stage or terminal call that needs
//! one and is never cached across calls.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Lookup<K, V> {
    groups: Vec<(K, Vec<V>)>,
    index: HashMap<K, usize>,
}

impl<K, V> Lookup<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends `value` to the group for `key`, creating the group on first
    /// appearance of the key.
    pub fn push(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].1.push(value),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![value]));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.index.get(key).map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// Iterates groups in first-appearance key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.groups.iter().map(|(key, values)| (key, values.as_slice()))
    }

    pub fn into_groups(self) -> Vec<Group<K, V>> {
        self.groups
            .into_iter()
            .map(|(key, elements)| Group { key, elements })
            .collect()
    }
}

impl<K: Eq + Hash + Clone, V> Default for Lookup<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IntoIterator for Lookup<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = std::vec::IntoIter<(K, Vec<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// One row of the default `group_by` output: a key with the elements that
/// share it, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<K, V> {
    pub key: K,
    pub elements: Vec<V>,
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_accumulates_per_key() {
        let mut lookup = Lookup::new();
        lookup.push("a", 1);
        lookup.push("b", 2);
        lookup.push("a", 3);

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(&"a"), Some([1, 3].as_slice()));
        assert_eq!(lookup.get(&"b"), Some([2].as_slice()));
        assert_eq!(lookup.get(&"c"), None);
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let mut lookup = Lookup::new();
        for (key, value) in [("z", 1), ("a", 2), ("m", 3), ("a", 4), ("z", 5)] {
            lookup.push(key, value);
        }

        let keys: Vec<_> = lookup.keys().copied().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_into_groups() {
        let mut lookup = Lookup::new();
        lookup.push(1, "one");
        lookup.push(2, "two");
        lookup.push(1, "uno");

        let groups = lookup.into_groups();
        assert_eq!(
            groups,
            vec![
                Group { key: 1, elements: vec!["one", "uno"] },
                Group { key: 2, elements: vec!["two"] },
            ]
        );
    }

    #[test]
    fn test_empty_lookup() {
        let lookup: Lookup<u32, u32> = Lookup::new();
        assert!(lookup.is_empty());
        assert!(!lookup.contains_key(&1));
    }
}
