use alloc::boxed::Box;
use alloc::vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::mem;
use core::slice;

use crate::DefaultHashBuilder;
use crate::policy;
use crate::sequential;
use crate::sequential::SequentialTable;

/// Average chain length that triggers doubling the bucket array.
const GROW_CHAIN_LEN: usize = 10;

/// Average chain length at or below which the bucket array halves.
const SHRINK_CHAIN_LEN: usize = 2;

/// A symbol table implemented with separate chaining over sequential-search
/// buckets.
///
/// `SeparateChainingTable<K, V, S>` hashes each key to one of a power-of-two
/// number of buckets, each a small [`SequentialTable`] scanned linearly. The
/// bucket array doubles once chains average ten entries and halves once they
/// average two, so individual chains stay short no matter how many keys the
/// table holds.
///
/// Unlike open addressing, deletion is ordinary here: the key leaves its
/// bucket and nothing else moves. The cost center is redistribution, which
/// rebuilds the bucket array and reinserts every entry at its rehashed
/// index.
///
/// # Performance Characteristics
///
/// - **Lookup/insert/remove**: expected O(1) with chains bounded by the
///   resize policy, O(len) when a redistribution runs
/// - **Memory**: one vector per bucket plus the entries themselves
#[derive(Clone)]
pub struct SeparateChainingTable<K, V, S = DefaultHashBuilder> {
    buckets: Box<[SequentialTable<K, V>]>,
    len: usize,
    hash_builder: S,
}

impl<K, V, S> Debug for SeparateChainingTable<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

fn fresh_buckets<K, V>(count: usize) -> Box<[SequentialTable<K, V>]> {
    core::iter::repeat_with(SequentialTable::new)
        .take(count)
        .collect()
}

impl<K, V, S> SeparateChainingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new table with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let table: SeparateChainingTable<i32, String, _> =
    ///     SeparateChainingTable::with_hasher(RandomState::new());
    /// assert!(table.is_empty());
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new table with the specified capacity and hasher builder.
    ///
    /// The actual capacity may be larger than requested: the bucket array is
    /// rounded up to the power of two that keeps chains at or below ten
    /// entries on average for `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let table: SeparateChainingTable<i32, String, _> =
    ///     SeparateChainingTable::with_capacity_and_hasher(100, RandomState::new());
    /// assert!(table.capacity() >= 100);
    /// # }
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let buckets = capacity
            .div_ceil(GROW_CHAIN_LEN)
            .checked_next_power_of_two()
            .expect("capacity overflow")
            .max(policy::INITIAL_CAPACITY);
        Self {
            buckets: fresh_buckets(buckets),
            len: 0,
            hash_builder,
        }
    }

    /// Returns the number of entries in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// assert_eq!(table.len(), 0);
    /// table.insert(1, "a");
    /// assert_eq!(table.len(), 1);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// assert!(table.is_empty());
    /// table.insert(1, "a");
    /// assert!(!table.is_empty());
    /// # }
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the table.
    ///
    /// The capacity is the maximum number of entries the table can hold
    /// before it grows, which is ten entries per bucket on average.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let table: SeparateChainingTable<i32, String> = SeparateChainingTable::with_capacity(100);
    /// assert!(table.capacity() >= 100);
    /// # }
    /// ```
    pub fn capacity(&self) -> usize {
        GROW_CHAIN_LEN * self.buckets.len()
    }

    /// Removes all entries from the table.
    ///
    /// This operation preserves the table's allocated capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// table.clear();
    /// assert!(table.is_empty());
    /// # }
    /// ```
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns `true` if the table contains a value for the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// assert!(table.contains_key(&1));
    /// assert!(!table.contains_key(&2));
    /// # }
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.buckets[self.bucket_index(key)].contains_key(key)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// # }
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets[self.bucket_index(key)].get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, i32> = SeparateChainingTable::new();
    /// table.insert(1, 10);
    /// if let Some(value) = table.get_mut(&1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(table.get(&1), Some(&15));
    /// # }
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let bucket = self.bucket_index(key);
        self.buckets[bucket].get_mut(key)
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, `None` is returned. If it
    /// did, the value is updated in place and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// assert_eq!(table.insert(1, "a"), None);
    /// assert_eq!(table.insert(1, "b"), Some("a"));
    /// assert_eq!(table.len(), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        // Redistribute once chains average ten entries. The check runs
        // before the new key is admitted, so a table of `m` buckets accepts
        // exactly `10 * m` entries without growing.
        if self.len >= GROW_CHAIN_LEN * self.buckets.len() {
            self.resize(self.buckets.len() * 2);
        }
        let bucket = self.bucket_index(&key);
        let previous = self.buckets[bucket].insert(key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Stores or erases the binding for `key`, classic symbol-table style.
    ///
    /// `Some(value)` behaves like [`insert`](SeparateChainingTable::insert)
    /// and `None` behaves like [`remove`](SeparateChainingTable::remove),
    /// mirroring the associative-array convention in which assigning the
    /// absent value deletes the key. Either way the previous value is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.put(1, Some("a"));
    /// assert_eq!(table.get(&1), Some(&"a"));
    ///
    /// assert_eq!(table.put(1, None), Some("a"));
    /// assert_eq!(table.get(&1), None);
    /// # }
    /// ```
    pub fn put(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Removes a key from the table, returning the value at the key if the
    /// key was previously in the table.
    ///
    /// Removing a key that is not present is a no-op returning `None`. After
    /// an actual removal the bucket array halves once chains average two
    /// entries or fewer, never shrinking below the initial bucket count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// # }
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the table, returning the stored key-value pair if
    /// the key was previously in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.remove_entry(&1), Some((1, "a")));
    /// # }
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let bucket = self.bucket_index(key);
        let removed = self.buckets[bucket].remove_entry(key)?;
        self.len -= 1;

        if self.buckets.len() > policy::INITIAL_CAPACITY
            && self.len <= SHRINK_CHAIN_LEN * self.buckets.len()
        {
            self.resize(self.buckets.len() / 2);
        }
        Some(removed)
    }

    /// Returns an iterator over the keys of the table.
    ///
    /// The iterator borrows the table and can be recreated at will; keys
    /// come back bucket by bucket, which is no particular order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// table.insert(2, "b");
    /// assert_eq!(table.keys().count(), 2);
    /// # }
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, i32> = SeparateChainingTable::new();
    /// table.insert(1, 10);
    /// table.insert(2, 20);
    /// assert_eq!(table.values().sum::<i32>(), 30);
    /// # }
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over the key-value pairs of the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// for (key, value) in table.iter() {
    ///     assert_eq!((key, value), (&1, &"a"));
    /// }
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            entries: None,
        }
    }

    /// Removes all entries from the table and returns them as an iterator.
    ///
    /// Dropping the iterator before exhaustion drops the remaining entries;
    /// either way the table ends up empty with its capacity preserved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// table.insert(2, "b");
    ///
    /// let drained: Vec<_> = table.drain().collect();
    /// assert_eq!(drained.len(), 2);
    /// assert!(table.is_empty());
    /// # }
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V, S> {
        Drain {
            table: self,
            bucket: 0,
        }
    }

    /// Collects chain-length statistics over the bucket array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    ///
    /// let stats = table.chain_stats();
    /// assert_eq!(stats.len, 1);
    /// assert_eq!(stats.max_chain_length, 1);
    /// # }
    /// ```
    #[cfg(feature = "stats")]
    pub fn chain_stats(&self) -> ChainStats {
        let mut max_chain = 0usize;
        let mut empty_buckets = 0usize;
        for bucket in self.buckets.iter() {
            max_chain = max_chain.max(bucket.len());
            if bucket.is_empty() {
                empty_buckets += 1;
            }
        }
        ChainStats {
            buckets: self.buckets.len(),
            len: self.len,
            average_chain_length: self.len as f64 / self.buckets.len() as f64,
            max_chain_length: max_chain,
            empty_buckets,
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        policy::index(self.hash_builder.hash_one(key), self.buckets.len())
    }

    fn resize(&mut self, new_buckets: usize) {
        debug_assert!(new_buckets.is_power_of_two());
        let old = mem::replace(&mut self.buckets, fresh_buckets(new_buckets));
        self.len = 0;
        for bucket in old.into_vec() {
            for (key, value) in bucket {
                self.insert(key, value);
            }
        }
    }
}

impl<K, V, S> SeparateChainingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty table using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let mut table: SeparateChainingTable<i32, &str> = SeparateChainingTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty table with the specified capacity using the default
    /// hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use symtab_hash::SeparateChainingTable;
    ///
    /// let table: SeparateChainingTable<i32, String> = SeparateChainingTable::with_capacity(100);
    /// assert!(table.capacity() >= 100);
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for SeparateChainingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Chain-length statistics for a [`SeparateChainingTable`].
///
/// Produced by [`SeparateChainingTable::chain_stats`].
#[cfg(feature = "stats")]
#[derive(Clone, Debug)]
pub struct ChainStats {
    /// Number of buckets allocated.
    pub buckets: usize,
    /// Number of entries stored.
    pub len: usize,
    /// Mean chain length over all buckets.
    pub average_chain_length: f64,
    /// Length of the longest chain.
    pub max_chain_length: usize,
    /// Number of buckets with no entries.
    pub empty_buckets: usize,
}

#[cfg(all(feature = "stats", feature = "std"))]
impl ChainStats {
    /// Prints the statistics to stdout.
    pub fn print(&self) {
        println!("separate chaining:");
        println!("  buckets:              {}", self.buckets);
        println!("  entries:              {}", self.len);
        println!("  average chain length: {:.3}", self.average_chain_length);
        println!("  max chain length:     {}", self.max_chain_length);
        println!("  empty buckets:        {}", self.empty_buckets);
    }
}

/// An iterator over the key-value pairs of a `SeparateChainingTable`.
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, SequentialTable<K, V>>,
    entries: Option<sequential::Iter<'a, K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entries) = self.entries.as_mut() {
                if let Some(pair) = entries.next() {
                    return Some(pair);
                }
            }
            self.entries = Some(self.buckets.next()?.iter());
        }
    }
}

/// An iterator over the keys of a `SeparateChainingTable`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a `SeparateChainingTable`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the key-value pairs of a `SeparateChainingTable`.
pub struct Drain<'a, K, V, S = DefaultHashBuilder> {
    table: &'a mut SeparateChainingTable<K, V, S>,
    bucket: usize,
}

impl<K, V, S> Iterator for Drain<'_, K, V, S> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket < self.table.buckets.len() {
            if let Some(pair) = self.table.buckets[self.bucket].pop() {
                self.table.len -= 1;
                return Some(pair);
            }
            self.bucket += 1;
        }
        None
    }
}

impl<K, V, S> Drop for Drain<'_, K, V, S> {
    fn drop(&mut self) {
        for _ in self {}
    }
}

/// A consuming iterator over the key-value pairs of a `SeparateChainingTable`.
pub struct IntoIter<K, V> {
    buckets: vec::IntoIter<SequentialTable<K, V>>,
    entries: Option<sequential::IntoIter<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entries) = self.entries.as_mut() {
                if let Some(pair) = entries.next() {
                    return Some(pair);
                }
            }
            self.entries = Some(self.buckets.next()?.into_iter());
        }
    }
}

impl<K, V, S> IntoIterator for SeparateChainingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_vec().into_iter(),
            entries: None,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a SeparateChainingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> FromIterator<(K, V)> for SeparateChainingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = SeparateChainingTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<K, V, S> Extend<(K, V)> for SeparateChainingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
