use alloc::boxed::Box;
use alloc::vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::mem;
use core::slice;

use crate::DefaultHashBuilder;
use crate::policy;

/// A symbol table implemented with open addressing and linear probing.
///
/// `LinearProbingTable<K, V, S>` stores key-value pairs in a flat slot array
/// whose size is always a power of two. A key's spread hash picks its home
/// slot; collisions walk forward one slot at a time, wrapping at the end of
/// the array. The table doubles its storage once half the slots are occupied
/// and halves it once occupancy falls to an eighth, so probe runs stay short
/// in both directions of use.
///
/// Removal is the delicate operation for this layout. Clearing a slot could
/// cut keys probed past it off from their home slots, so every entry in the
/// run that follows the vacated slot is lifted out and reinserted before the
/// removal returns.
///
/// # Performance Characteristics
///
/// - **Lookup/insert/remove**: expected O(1) at bounded occupancy,
///   O(capacity) when a resize runs
/// - **Memory**: one `Option<(K, V)>` per slot, with at least twice as many
///   slots as live entries
#[derive(Clone)]
pub struct LinearProbingTable<K, V, S = DefaultHashBuilder> {
    slots: Box<[Option<(K, V)>]>,
    len: usize,
    hash_builder: S,
}

impl<K, V, S> Debug for LinearProbingTable<K, V, S>
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

fn empty_slots<K, V>(count: usize) -> Box<[Option<(K, V)>]> {
    core::iter::repeat_with(|| None).take(count).collect()
}

impl<K, V, S> LinearProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new table with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let table: LinearProbingTable<i32, String, _> =
    ///     LinearProbingTable::with_hasher(SimpleHasher);
    /// assert!(table.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new table with the specified capacity and hasher builder.
    ///
    /// The actual capacity may be larger than requested: storage is rounded
    /// up to the power of two that keeps occupancy at or below one half for
    /// `capacity` entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let table: LinearProbingTable<i32, String, _> =
    ///     LinearProbingTable::with_capacity_and_hasher(100, SimpleHasher);
    /// assert!(table.capacity() >= 100);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let slots = capacity
            .checked_mul(2)
            .and_then(usize::checked_next_power_of_two)
            .expect("capacity overflow")
            .max(policy::INITIAL_CAPACITY);
        Self {
            slots: empty_slots(slots),
            len: 0,
            hash_builder,
        }
    }

    /// Returns the number of entries in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// assert_eq!(table.len(), 0);
    /// table.insert(1, "a");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// assert!(table.is_empty());
    /// table.insert(1, "a");
    /// assert!(!table.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the table.
    ///
    /// The capacity is the maximum number of entries the table can hold
    /// before it grows, which is half the allocated slot count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let table: LinearProbingTable<i32, String, _> =
    ///     LinearProbingTable::with_capacity_and_hasher(100, SimpleHasher);
    /// assert!(table.capacity() >= 100);
    /// ```
    pub fn capacity(&self) -> usize {
        self.slots.len() / 2
    }

    /// Removes all entries from the table.
    ///
    /// This operation preserves the table's allocated capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    /// table.clear();
    /// assert!(table.is_empty());
    /// ```
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.len = 0;
    }

    /// Returns `true` if the table contains a value for the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    /// assert!(table.contains_key(&1));
    /// assert!(!table.contains_key(&2));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_slot(key).is_some()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let slot = self.find_slot(key)?;
        self.slots[slot].as_ref().map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, 10);
    /// if let Some(value) = table.get_mut(&1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(table.get(&1), Some(&15));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = self.find_slot(key)?;
        self.slots[slot].as_mut().map(|(_, value)| value)
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, `None` is returned. If it
    /// did, the value is updated in place and the old value is returned. The
    /// growth check runs before the probe, so an insert that ends up
    /// overwriting an existing key can still grow the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// assert_eq!(table.insert(1, "a"), None);
    /// assert_eq!(table.insert(1, "b"), Some("a"));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        // Growing before the probe keeps occupancy at or below one half, so
        // the scan below always terminates at an empty slot.
        if self.len >= self.slots.len() / 2 {
            self.resize(self.slots.len() * 2);
        }
        let mask = self.slots.len() - 1;
        let mut slot = self.home_slot(&key);
        loop {
            let entry = &mut self.slots[slot];
            match entry {
                Some((k, v)) if *k == key => return Some(mem::replace(v, value)),
                Some(_) => slot = (slot + 1) & mask,
                None => {
                    *entry = Some((key, value));
                    self.len += 1;
                    return None;
                }
            }
        }
    }

    /// Stores or erases the binding for `key`, classic symbol-table style.
    ///
    /// `Some(value)` behaves like [`insert`](LinearProbingTable::insert) and
    /// `None` behaves like [`remove`](LinearProbingTable::remove), mirroring
    /// the associative-array convention in which assigning the absent value
    /// deletes the key. Either way the previous value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.put(1, Some("a"));
    /// assert_eq!(table.get(&1), Some(&"a"));
    ///
    /// assert_eq!(table.put(1, None), Some("a"));
    /// assert_eq!(table.get(&1), None);
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
    /// Removing a key that is not present is a no-op returning `None`. The
    /// table halves its storage once occupancy falls to an eighth.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
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
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    /// assert_eq!(table.remove_entry(&1), Some((1, "a")));
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let mask = self.slots.len() - 1;
        let mut slot = self.find_slot(key)?;
        let removed = self.slots[slot].take()?;

        // Clearing a slot can cut later entries off from their home slots,
        // so every entry in the run that follows is lifted out and
        // reinserted. Occupancy stays below one half throughout, so none of
        // the reinserts can trigger a resize.
        slot = (slot + 1) & mask;
        while let Some((k, v)) = self.slots[slot].take() {
            self.len -= 1;
            self.insert(k, v);
            slot = (slot + 1) & mask;
        }
        self.len -= 1;

        if self.len > 0 && self.len <= self.slots.len() / 8 {
            self.resize(self.slots.len() / 2);
        }

        debug_assert!(self.check());
        Some(removed)
    }

    /// Returns an iterator over the keys of the table.
    ///
    /// The iterator borrows the table and can be recreated at will; keys
    /// come back in slot order, which is unspecified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    /// table.insert(2, "b");
    /// assert_eq!(table.keys().count(), 2);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, 10);
    /// table.insert(2, 20);
    /// assert_eq!(table.values().sum::<i32>(), 30);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over the key-value pairs of the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    /// for (key, value) in table.iter() {
    ///     assert_eq!((key, value), (&1, &"a"));
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
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
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    /// table.insert(2, "b");
    ///
    /// let drained: Vec<_> = table.drain().collect();
    /// assert_eq!(drained.len(), 2);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V, S> {
        Drain {
            table: self,
            slot: 0,
        }
    }

    /// Collects probe-length statistics over every stored key.
    ///
    /// A probe length of one means the key sits in its home slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use symtab_hash::LinearProbingTable;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let mut table = LinearProbingTable::with_hasher(SimpleHasher);
    /// table.insert(1, "a");
    ///
    /// let stats = table.probe_stats();
    /// assert_eq!(stats.len, 1);
    /// assert_eq!(stats.max_probe_length, 1);
    /// ```
    #[cfg(feature = "stats")]
    pub fn probe_stats(&self) -> ProbeStats {
        let mask = self.slots.len() - 1;
        let mut total_probes = 0usize;
        let mut max_probes = 0usize;
        for (slot, entry) in self.slots.iter().enumerate() {
            if let Some((key, _)) = entry {
                let probes = (slot.wrapping_sub(self.home_slot(key)) & mask) + 1;
                total_probes += probes;
                max_probes = max_probes.max(probes);
            }
        }
        ProbeStats {
            slots: self.slots.len(),
            len: self.len,
            load_factor: self.len as f64 / self.slots.len() as f64,
            average_probe_length: if self.len == 0 {
                0.0
            } else {
                total_probes as f64 / self.len as f64
            },
            max_probe_length: max_probes,
        }
    }

    fn home_slot(&self, key: &K) -> usize {
        policy::index(self.hash_builder.hash_one(key), self.slots.len())
    }

    fn find_slot(&self, key: &K) -> Option<usize> {
        let mask = self.slots.len() - 1;
        let mut slot = self.home_slot(key);
        // Occupancy never passes one half, so the probe always reaches an
        // empty slot.
        loop {
            match &self.slots[slot] {
                Some((k, _)) if k == key => return Some(slot),
                Some(_) => slot = (slot + 1) & mask,
                None => return None,
            }
        }
    }

    fn resize(&mut self, new_slots: usize) {
        debug_assert!(new_slots.is_power_of_two());
        let old = mem::replace(&mut self.slots, empty_slots(new_slots));
        self.len = 0;
        for entry in old.into_vec() {
            if let Some((key, value)) = entry {
                self.insert(key, value);
            }
        }
    }

    /// Verifies the occupancy bound and that every stored key is reachable
    /// from its home slot. Only exercised through `debug_assert!`.
    fn check(&self) -> bool {
        if self.slots.len() < 2 * self.len {
            return false;
        }
        self.slots
            .iter()
            .flatten()
            .all(|(key, _)| self.find_slot(key).is_some())
    }
}

impl<K, V, S> LinearProbingTable<K, V, S>
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
    /// use symtab_hash::LinearProbingTable;
    ///
    /// let mut table: LinearProbingTable<i32, &str> = LinearProbingTable::new();
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
    /// use symtab_hash::LinearProbingTable;
    ///
    /// let table: LinearProbingTable<i32, String> = LinearProbingTable::with_capacity(100);
    /// assert!(table.capacity() >= 100);
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for LinearProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Probe-length statistics for a [`LinearProbingTable`].
///
/// Produced by [`LinearProbingTable::probe_stats`].
#[cfg(feature = "stats")]
#[derive(Clone, Debug)]
pub struct ProbeStats {
    /// Number of slots allocated.
    pub slots: usize,
    /// Number of occupied slots.
    pub len: usize,
    /// Fraction of slots occupied.
    pub load_factor: f64,
    /// Mean probe length over all stored keys.
    pub average_probe_length: f64,
    /// Longest probe sequence of any stored key.
    pub max_probe_length: usize,
}

#[cfg(all(feature = "stats", feature = "std"))]
impl ProbeStats {
    /// Prints the statistics to stdout.
    pub fn print(&self) {
        println!("linear probing:");
        println!("  slots:                {}", self.slots);
        println!("  entries:              {}", self.len);
        println!("  load factor:          {:.3}", self.load_factor);
        println!("  average probe length: {:.3}", self.average_probe_length);
        println!("  max probe length:     {}", self.max_probe_length);
    }
}

/// An iterator over the key-value pairs of a `LinearProbingTable`.
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Option<(K, V)>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.slots.next()? {
                Some((key, value)) => return Some((key, value)),
                None => continue,
            }
        }
    }
}

/// An iterator over the keys of a `LinearProbingTable`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a `LinearProbingTable`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the key-value pairs of a `LinearProbingTable`.
pub struct Drain<'a, K, V, S = DefaultHashBuilder> {
    table: &'a mut LinearProbingTable<K, V, S>,
    slot: usize,
}

impl<K, V, S> Iterator for Drain<'_, K, V, S> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot < self.table.slots.len() {
            let entry = self.table.slots[self.slot].take();
            self.slot += 1;
            if let Some(pair) = entry {
                self.table.len -= 1;
                return Some(pair);
            }
        }
        None
    }
}

impl<K, V, S> Drop for Drain<'_, K, V, S> {
    fn drop(&mut self) {
        for _ in self {}
    }
}

/// A consuming iterator over the key-value pairs of a `LinearProbingTable`.
pub struct IntoIter<K, V> {
    slots: vec::IntoIter<Option<(K, V)>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.slots.next()? {
                Some(pair) => return Some(pair),
                None => continue,
            }
        }
    }
}

impl<K, V, S> IntoIterator for LinearProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinearProbingTable<K, V, S>
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

impl<K, V, S> FromIterator<(K, V)> for LinearProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = LinearProbingTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<K, V, S> Extend<(K, V)> for LinearProbingTable<K, V, S>
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
