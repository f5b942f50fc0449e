use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    mem,
};

/// Default number of slots for a freshly constructed map
const INITIAL_CAPACITY: usize = 4;
/// Default occupancy threshold, as a percentage (0-100)
const DEFAULT_LOAD_FACTOR: usize = 50;
/// Hard ceiling on the slot count; growth past this is a capacity overflow
const MAX_CAPACITY: usize = 1 << 30;

/// An occupied cell of the backing array
#[derive(Debug, Clone)]
struct Bucket<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
    /// Hash of the key, cached at insertion time so probing and resize
    /// never rehash
    hash: u64,
    /// Flag indicating whether this entry has been deleted (tombstone)
    deleted: bool,
}

/// Outcome of one probe scan over the table
enum ProbeResult {
    /// Index of the live bucket whose cached hash and key matched
    Match(usize),
    /// Index a fresh entry should occupy: the first tombstone passed, or
    /// the empty slot that ended the scan
    Vacant(usize),
    /// A full revolution found neither the key nor a usable slot
    Saturated,
}

/// A hash map using open addressing with linear probing.
///
/// Collisions are resolved by scanning forward one slot at a time from the
/// home slot; capacity is kept a power of two so the home slot is a bitmask
/// of the cached hash. Deletion leaves a tombstone in place, which keeps
/// every surviving key reachable; tombstones are reused by insertion and
/// dropped wholesale when the table grows. The table doubles once occupancy
/// reaches the configured load-factor threshold and never shrinks.
///
/// Note: This implementation is not thread-safe. Callers needing concurrent
/// access must serialize externally.
#[derive(Debug, Clone)]
pub struct LinearProbingMap<K, V> {
    /// The slots storing the key-value pairs; the length is always a power
    /// of two between 1 and `MAX_CAPACITY`
    buckets: Vec<Option<Bucket<K, V>>>,
    /// Current number of live (non-tombstone) entries
    size: usize,
    /// Occupancy threshold before resizing - stored as percentage (1-95)
    load_factor_threshold: usize,
}

impl<K, V> Default for LinearProbingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for LinearProbingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> LinearProbingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a new `LinearProbingMap` with the default capacity and load
    /// factor
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a new `LinearProbingMap` with at least the specified capacity
    /// and the default load factor.
    ///
    /// # Panics
    ///
    /// Panics if the requested capacity exceeds 2^30 slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates a new `LinearProbingMap` with at least the specified capacity
    /// and the given load-factor threshold in percent.
    ///
    /// The capacity is rounded up to the next power of two; the threshold is
    /// clamped to 1-95.
    ///
    /// # Panics
    ///
    /// Panics if the requested capacity exceeds 2^30 slots.
    #[must_use]
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: usize) -> Self {
        assert!(
            capacity <= MAX_CAPACITY,
            "requested capacity exceeds the supported maximum of 2^30 slots"
        );
        let capacity = capacity.max(1).next_power_of_two();

        Self { buckets: vec![None; capacity], size: 0, load_factor_threshold: load_factor.clamp(1, 95) }
    }

    /// Computes the hash for a key
    #[allow(clippy::unused_self)]
    fn hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Home slot for a hash; the power-of-two capacity makes the bitmask
    /// equivalent to `hash % capacity`
    #[allow(clippy::cast_possible_truncation)]
    fn index_for(&self, hash: u64) -> usize {
        (hash as usize) & (self.buckets.len().saturating_sub(1))
    }

    /// Scans the probe chain of `hash` once, starting at its home slot.
    ///
    /// The scan ends early at the first empty slot; tombstones are scanned
    /// through, and the first one passed is remembered as the preferred
    /// insertion point.
    fn locate<Q>(&self, hash: u64, key: &Q) -> ProbeResult
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let bucket_count = self.buckets.len();
        let mask = bucket_count.saturating_sub(1);
        let mut index = self.index_for(hash);
        let mut first_tombstone = None;

        // Linear probing loop; one revolution at most
        for _ in 0..bucket_count {
            match self.buckets.get(index) {
                // Empty slot, the key is not in the table
                None | Some(None) => {
                    return ProbeResult::Vacant(first_tombstone.unwrap_or(index));
                }

                // Found a bucket with data
                Some(Some(bucket)) => {
                    if bucket.deleted {
                        if first_tombstone.is_none() {
                            first_tombstone = Some(index);
                        }
                    } else if bucket.hash == hash && bucket.key.borrow() == key {
                        return ProbeResult::Match(index);
                    }
                }
            }

            index = index.saturating_add(1) & mask;
        }

        first_tombstone.map_or(ProbeResult::Saturated, ProbeResult::Vacant)
    }

    /// Insert a key-value pair into the map.
    ///
    /// Returns the previous value when the key was already present, `None`
    /// when the entry is fresh.
    ///
    /// # Panics
    ///
    /// Panics if growth would push the table past 2^30 slots.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        // Grow first so occupancy stays below the threshold
        if (self.size as f64) / (self.buckets.len() as f64) >=
            self.load_factor_threshold as f64 / 100.0
        {
            self.grow();
        }

        let hash = self.hash(&key);
        loop {
            match self.locate(hash, &key) {
                ProbeResult::Match(index) => {
                    if let Some(Some(bucket)) = self.buckets.get_mut(index) {
                        return Some(mem::replace(&mut bucket.value, value));
                    }
                    return None; // This should never happen, but safer than unwrap()
                }
                ProbeResult::Vacant(index) => {
                    if let Some(slot) = self.buckets.get_mut(index) {
                        *slot = Some(Bucket { key, value, hash, deleted: false });
                        self.size = self.size.saturating_add(1);
                    }
                    return None;
                }
                // Saturated table: double and retry from the new home slot
                ProbeResult::Saturated => self.grow(),
            }
        }
    }

    /// Retrieve a value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        match self.locate(hash, key) {
            ProbeResult::Match(index) => match self.buckets.get(index) {
                Some(Some(bucket)) => Some(&bucket.value),
                _ => None,
            },
            ProbeResult::Vacant(_) | ProbeResult::Saturated => None,
        }
    }

    /// Get a mutable reference to the value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        match self.locate(hash, key) {
            ProbeResult::Match(index) => match self.buckets.get_mut(index) {
                Some(Some(bucket)) => Some(&mut bucket.value),
                _ => None,
            },
            ProbeResult::Vacant(_) | ProbeResult::Saturated => None,
        }
    }

    /// Removes a key-value pair from the map, returning the removed value.
    ///
    /// The slot is tombstoned rather than emptied, so probe chains running
    /// through it stay intact and no other key becomes unreachable.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash(key);
        match self.locate(hash, key) {
            ProbeResult::Match(index) => match self.buckets.get_mut(index) {
                Some(Some(bucket)) => {
                    bucket.deleted = true;
                    self.size = self.size.saturating_sub(1);
                    Some(bucket.value.clone())
                }
                _ => None,
            },
            ProbeResult::Vacant(_) | ProbeResult::Saturated => None,
        }
    }

    /// Returns the number of live entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Doubles the table and rebuilds it from the live entries.
    ///
    /// Tombstones are dropped here; every carried-over bucket keeps its
    /// cached hash, so no key is rehashed.
    fn grow(&mut self) {
        let new_capacity = self.buckets.len().saturating_mul(2);
        assert!(
            new_capacity <= MAX_CAPACITY,
            "map capacity overflow: growth would exceed the maximum of 2^30 slots"
        );

        let old = mem::replace(&mut self.buckets, vec![None; new_capacity]);
        self.size = 0;
        for bucket in old.into_iter().flatten() {
            if !bucket.deleted {
                self.reinsert(bucket);
            }
        }
    }

    /// Moves a live bucket carried over from the previous table into the
    /// fresh one.
    ///
    /// The fresh table always has an empty slot on the chain: it holds no
    /// tombstones, and its occupancy is bounded by the previous capacity,
    /// which is at most half the new one.
    fn reinsert(&mut self, bucket: Bucket<K, V>) {
        let mask = self.buckets.len().saturating_sub(1);
        let mut index = self.index_for(bucket.hash);

        while let Some(Some(_)) = self.buckets.get(index) {
            index = index.saturating_add(1) & mask;
        }
        if let Some(slot) = self.buckets.get_mut(index) {
            *slot = Some(bucket);
            self.size = self.size.saturating_add(1);
        }
    }

    /// Provide a way to configure the load factor threshold
    pub fn set_load_factor_threshold(&mut self, threshold: usize) {
        self.load_factor_threshold = threshold.clamp(1, 95);
    }

    /// Returns an iterator over the live key-value pairs in backing-store
    /// order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: &self.buckets, index: 0 }
    }

    /// Clears the map, removing all key-value pairs; capacity is preserved
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.size = 0;
    }

    /// Returns the number of slots in the map
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current occupancy ratio of the map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }
}

impl<K, V> fmt::Display for LinearProbingMap<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    /// Renders the live entries in backing-store order as
    /// `[<key, value>,<key, value>]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for bucket in self.buckets.iter().flatten() {
            if bucket.deleted {
                continue;
            }
            if !first {
                f.write_str(",")?;
            }
            write!(f, "<{}, {}>", bucket.key, bucket.value)?;
            first = false;
        }
        f.write_str("]")
    }
}

/// Iterator over the live key-value pairs of the map
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Reference to the slots of the map
    buckets: &'a [Option<Bucket<K, V>>],
    /// Current position in the iteration
    index: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.buckets.len() {
            let slot = self.buckets.get(self.index);
            self.index = self.index.saturating_add(1);
            if let Some(Some(bucket)) = slot {
                if !bucket.deleted {
                    return Some((&bucket.key, &bucket.value));
                }
            }
        }
        None
    }
}
