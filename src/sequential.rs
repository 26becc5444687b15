//! Sequential-search symbol table, the chaining bucket type.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem;
use core::slice;

/// A symbol table that keeps its entries in a vector and answers every query
/// by scanning it.
///
/// This is the per-bucket storage behind
/// [`SeparateChainingTable`](crate::SeparateChainingTable). Chains stay short
/// there (the parent redistributes once they average ten entries), and at
/// that size a linear scan over a compact vector wins against anything with
/// more machinery. It works on its own for the same reason any tiny map does.
///
/// Removal swaps the last entry into the vacated position, so entry order is
/// unspecified once removals happen, though it stays deterministic for a
/// fixed operation history.
#[derive(Clone)]
pub struct SequentialTable<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Debug for SequentialTable<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.entries {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V> SequentialTable<K, V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries, preserving the allocated storage.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the keys of the table.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the key-value pairs of the table.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.entries.iter(),
        }
    }

    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        self.entries.pop()
    }
}

impl<K, V> SequentialTable<K, V>
where
    K: Eq,
{
    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Returns `true` if the table contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(index) => Some(mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Stores or erases the binding for `key`, classic symbol-table style.
    ///
    /// `Some(value)` behaves like [`insert`](SequentialTable::insert) and
    /// `None` behaves like [`remove`](SequentialTable::remove). Either way
    /// the previous value comes back.
    pub fn put(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Removes `key` from the table, returning its value.
    ///
    /// Removing a key that is not present is a no-op returning `None`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the table, returning the stored key-value pair.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.position(key)?;
        Some(self.entries.swap_remove(index))
    }
}

impl<K, V> Default for SequentialTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the key-value pairs of a `SequentialTable`.
pub struct Iter<'a, K, V> {
    entries: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(k, v)| (k, v))
    }
}

/// An iterator over the keys of a `SequentialTable`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// A consuming iterator over the key-value pairs of a `SequentialTable`.
pub struct IntoIter<K, V> {
    entries: vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }
}

impl<K, V> IntoIterator for SequentialTable<K, V> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            entries: self.entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a SequentialTable<K, V> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = SequentialTable::new();

        assert_eq!(table.insert("a", 1), None);
        assert_eq!(table.insert("b", 2), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"a"), Some(&1));
        assert_eq!(table.get(&"b"), Some(&2));
        assert_eq!(table.get(&"c"), None);
        assert!(table.contains_key(&"a"));
        assert!(!table.contains_key(&"c"));
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut table = SequentialTable::new();

        table.insert(7, "old".to_string());
        assert_eq!(table.insert(7, "new".to_string()), Some("old".to_string()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&7), Some(&"new".to_string()));
    }

    #[test]
    fn test_get_mut() {
        let mut table = SequentialTable::new();

        table.insert("count", 1);
        if let Some(value) = table.get_mut(&"count") {
            *value += 10;
        }
        assert_eq!(table.get(&"count"), Some(&11));
        assert_eq!(table.get_mut(&"missing"), None);
    }

    #[test]
    fn test_remove_swaps_last_entry_in() {
        let mut table = SequentialTable::new();

        table.insert("a", 1);
        table.insert("b", 2);
        table.insert("c", 3);

        assert_eq!(table.remove(&"a"), Some(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"b"), Some(&2));
        assert_eq!(table.get(&"c"), Some(&3));

        assert_eq!(table.remove(&"a"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_remove_entry_returns_stored_pair() {
        let mut table = SequentialTable::new();

        table.insert("key".to_string(), 9);
        assert_eq!(
            table.remove_entry(&"key".to_string()),
            Some(("key".to_string(), 9))
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_put_none_removes() {
        let mut table = SequentialTable::new();

        assert_eq!(table.put("a", Some(1)), None);
        assert_eq!(table.put("a", Some(2)), Some(1));
        assert_eq!(table.put("a", None), Some(2));
        assert!(table.is_empty());
        assert_eq!(table.put("a", None), None);
    }

    #[test]
    fn test_keys_and_iter() {
        let mut table = SequentialTable::new();

        table.insert("x", 1);
        table.insert("y", 2);

        let mut keys: Vec<&&str> = table.keys().collect();
        keys.sort();
        assert_eq!(keys, [&"x", &"y"]);

        let mut pairs: Vec<(&str, i32)> = table.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort();
        assert_eq!(pairs, [("x", 1), ("y", 2)]);
    }

    #[test]
    fn test_into_iter_consumes() {
        let mut table = SequentialTable::new();

        table.insert(1, "one".to_string());
        table.insert(2, "two".to_string());

        let mut pairs: Vec<(i32, String)> = table.into_iter().collect();
        pairs.sort();
        assert_eq!(pairs, [(1, "one".to_string()), (2, "two".to_string())]);
    }

    #[test]
    fn test_clear() {
        let mut table = SequentialTable::new();

        table.insert("a", 1);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.get(&"a"), None);
    }
}
