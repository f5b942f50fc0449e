//! Snapshot views and membership queries for `LinearProbingMap`

use crate::LinearProbingMap;
use std::hash::Hash;

/// Extension trait for map implementations that provides materialized
/// snapshot views and membership queries
pub trait MapExtensions<K, V> {
    /// Returns the keys of the map as a Vec, in current backing-store order
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the map as a Vec, in current backing-store order
    fn values(&self) -> Vec<V>;

    /// Returns the key-value pairs of the map as a Vec, in current
    /// backing-store order
    fn entries(&self) -> Vec<(K, V)>;

    /// Returns true if the map contains the given key
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Returns true if some live entry holds the given value
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq;
}

impl<K, V> MapExtensions<K, V> for LinearProbingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }
}

/// Creates a `LinearProbingMap` from an iterator of key-value pairs
#[allow(dead_code)]
pub fn from_iter<K, V, I>(iter: I) -> LinearProbingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
    I: IntoIterator<Item = (K, V)>,
{
    let iter = iter.into_iter();
    let mut map = LinearProbingMap::new();

    for (key, value) in iter {
        map.insert(key, value);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearProbingMap;

    #[test]
    fn test_from_iter() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];

        let map = from_iter(data);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let mut map = LinearProbingMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map.insert("c".to_string(), 3);

        let mut keys = map.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_entries() {
        let mut map = LinearProbingMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);

        let mut entries = map.entries();
        entries.sort();

        assert_eq!(entries, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn test_snapshots_are_independent_of_later_mutation() {
        let mut map = LinearProbingMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);

        let keys = map.keys();
        let values = map.values();
        let entries = map.entries();

        map.insert("c".to_string(), 3);
        map.remove("a");

        assert_eq!(keys.len(), 2);
        assert_eq!(values.len(), 2);
        assert_eq!(entries.len(), 2);
        assert!(keys.contains(&"a".to_string()));
    }

    #[test]
    fn test_contains_key() {
        let mut map = LinearProbingMap::new();
        map.insert("a".to_string(), 1);

        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));

        map.remove("a");
        assert!(!map.contains_key("a"));
    }

    #[test]
    fn test_contains_value() {
        let mut map = LinearProbingMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);

        assert!(map.contains_value(&1));
        assert!(map.contains_value(&2));
        assert!(!map.contains_value(&3));

        map.remove("a");
        assert!(!map.contains_value(&1));
    }

    #[test]
    fn test_put_get_scenario() {
        let mut map = LinearProbingMap::new();
        assert!(map.is_empty());

        map.insert("A1".to_string(), 124);
        assert!(!map.is_empty());
        map.insert("A2".to_string(), 125);

        let rendered = map.to_string();
        assert!(
            rendered == "[<A1, 124>,<A2, 125>]" || rendered == "[<A2, 125>,<A1, 124>]",
            "unexpected rendering: {rendered}"
        );

        map.insert("A3".to_string(), 124);
        map.insert("A5".to_string(), 1022);
        map.insert("A4".to_string(), 123);
        assert_eq!(map.insert("A4".to_string(), 1023), Some(123));
        assert_eq!(map.insert("A5".to_string(), 122), Some(1022));

        assert_eq!(map.len(), 5);
        assert!(map.contains_key("A1"));
        assert!(!map.contains_key("A10"));
    }
}
