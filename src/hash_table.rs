use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::primes::MAX_PRIME;
use crate::primes::expand_prime;
use crate::primes::get_prime;

/// Sentinel index marking the end of a chain, an empty bucket, an empty free
/// list, and (in a slot's `hash` field) a freed slot.
///
/// Stored hashes are masked to 31 bits, so every live hash is non-negative
/// and `-1` can never collide with one.
const NIL: i32 = -1;

/// Mask reducing a 64-bit hash to its low 31 bits.
const HASH_MASK: u64 = 0x7FFF_FFFF;

#[inline(always)]
fn mask_hash(hash: u64) -> i32 {
    (hash & HASH_MASK) as i32
}

/// Smallest tabulated prime bucket count holding at least `capacity` entries.
#[inline(always)]
fn prime_capacity(capacity: usize) -> usize {
    let capacity = i32::try_from(capacity).unwrap_or(MAX_PRIME);
    get_prime(capacity).expect("clamped capacity is non-negative") as usize
}

/// One arena slot.
///
/// A live slot has `hash >= 0`, `item = Some`, and `next` pointing at the
/// next slot of its bucket chain. A freed slot has `hash = NIL`,
/// `item = None`, and `next` pointing at the next freed slot.
#[derive(Clone)]
struct Slot<V> {
    hash: i32,
    next: i32,
    item: Option<V>,
}

/// Chain statistics for hash table analysis.
///
/// Available in tests and with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct ChainStats {
    /// Number of buckets (always a tabulated prime)
    pub capacity: usize,
    /// Number of live entries
    pub live: usize,
    /// Number of freed arena slots awaiting reuse
    pub freed: usize,
    /// Number of non-empty buckets
    pub chains: usize,
    /// Length of the longest chain
    pub max_chain: usize,
    /// Mean length of non-empty chains
    pub mean_chain: f64,
    /// Load factor (live / capacity)
    pub load_factor: f64,
}

#[cfg(any(test, feature = "stats"))]
impl ChainStats {
    /// Pretty-print the chain statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Chain Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.live,
            self.capacity,
            self.load_factor * 100.0
        );
        println!("Freed slots awaiting reuse: {}", self.freed);
        println!(
            "Chains: {} ({:.2} mean length, {} max)",
            self.chains, self.mean_chain, self.max_chain
        );
    }
}

/// A hash table built on separate chaining over an index arena.
///
/// `HashTable<V>` stores values of type `V` and resolves collisions by
/// threading singly linked chains through a slot arena: a bucket array holds
/// chain head indices, and each slot carries the index of the next slot on
/// its chain. Removed slots are threaded onto a free list and reused before
/// the arena grows. The bucket count is always a tabulated prime (see
/// [`crate::primes`]) and never shrinks.
///
/// Unlike standard hash maps, this implementation requires you to provide
/// the hash value and an equality predicate for each operation. The hash is
/// reduced to its low 31 bits and stored alongside the entry, so lookups
/// compare the stored hash before calling the predicate and resizes never
/// rehash keys.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::with_capacity(100);
/// let hash = hash_id(123);
///
/// // Insert a person
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     chain_hash::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     chain_hash::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    buckets: Vec<i32>,
    entries: Vec<Slot<V>>,
    free_list: i32,
    free_count: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut chains: Vec<Vec<i32>> = Vec::new();
        for &head in self.buckets.iter() {
            if head == NIL {
                continue;
            }
            let mut chain = Vec::new();
            let mut index = head;
            while index != NIL {
                chain.push(index);
                index = self.entries[index as usize].next;
            }
            chains.push(chain);
        }

        f.debug_struct("HashTable")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("freed", &self.free_count)
            .field("chains", &chains)
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<V> HashTable<V> {
    /// Creates a new hash table that can hold at least `capacity` elements
    /// before resizing.
    ///
    /// The bucket count is snapped up to the growth table, so the actual
    /// capacity is the smallest tabulated prime at or above the request;
    /// even `with_capacity(0)` materializes a three-bucket table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<u64> = HashTable::with_capacity(10);
    /// assert!(table.capacity() >= 10);
    /// assert_eq!(table.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = prime_capacity(capacity);
        HashTable {
            buckets: vec![NIL; capacity],
            entries: Vec::with_capacity(capacity),
            free_list: NIL,
            free_count: 0,
        }
    }

    /// Returns the number of live elements in the table.
    ///
    /// Freed slots waiting on the free list are not counted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(0);
    /// table.entry(7, |&v: &u64| v == 7).or_insert(7);
    /// assert_eq!(table.len(), 1);
    /// table.remove(7, |&v| v == 7);
    /// assert_eq!(table.len(), 0);
    /// ```
    pub fn len(&self) -> usize {
        self.entries.len() - self.free_count
    }

    /// Returns `true` if the table contains no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current capacity: the bucket count, always a tabulated
    /// prime.
    ///
    /// Capacity only ever grows; removals and [`clear`](HashTable::clear)
    /// leave it untouched.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Removes all elements from the table, keeping the allocated capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(0);
    /// table.entry(1, |&v: &u64| v == 1).or_insert(1);
    /// let capacity = table.capacity();
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), capacity);
    /// ```
    pub fn clear(&mut self) {
        self.buckets.fill(NIL);
        self.entries.clear();
        self.free_list = NIL;
        self.free_count = 0;
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// This is the one operation that can resize while freed slots are
    /// waiting on the free list; the free list survives the resize and the
    /// freed slots are still reused first.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.len().saturating_add(additional);
        let capacity = prime_capacity(needed);
        if capacity > self.buckets.len() {
            self.resize(capacity);
        }
    }

    /// Retains only the elements for which the predicate returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(0);
    /// for v in 0..10u64 {
    ///     table.entry(v, |&existing| existing == v).or_insert(v);
    /// }
    /// table.retain(|&mut v| v % 2 == 0);
    /// assert_eq!(table.len(), 5);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&mut V) -> bool) {
        for bucket in 0..self.buckets.len() {
            let mut prev = NIL;
            let mut index = self.buckets[bucket];
            while index != NIL {
                let next = self.entries[index as usize].next;
                let keep = self.entries[index as usize]
                    .item
                    .as_mut()
                    .is_some_and(&mut f);
                if keep {
                    prev = index;
                } else {
                    self.unlink(bucket, prev, index);
                }
                index = next;
            }
        }
    }

    /// Removes the value matching the hash and equality predicate, if any.
    ///
    /// The removed slot is pushed onto the free list and will be reused by
    /// the next insertion. Removing an absent value returns `None` and
    /// changes nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// assert_eq!(table.remove(hash, |s| s == "key"), Some("key".to_string()));
    /// assert_eq!(table.remove(hash, |s| s == "key"), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let hash = mask_hash(hash);
        let (prev, index) = self.locate(hash, eq)?;
        let bucket = self.bucket_of(hash);
        Some(self.unlink(bucket, prev, index))
    }

    /// Gets an entry for the value matching the hash and equality predicate.
    ///
    /// The hash is reduced to its low 31 bits; the home chain is walked
    /// comparing the stored hash first and calling `eq` only on exact hash
    /// matches. An occupied entry remembers its chain predecessor so removal
    /// through it relinks in constant time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("key".to_string());
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        let hash = mask_hash(hash);
        match self.locate(hash, eq) {
            Some((prev, index)) => {
                let bucket = self.bucket_of(hash);
                Entry::Occupied(OccupiedEntry {
                    table: self,
                    bucket,
                    prev,
                    index,
                })
            }
            None => Entry::Vacant(VacantEntry { table: self, hash }),
        }
    }

    /// Returns a reference to the value matching the hash and equality
    /// predicate, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// assert_eq!(table.find(hash, |s| s == "key"), Some(&"key".to_string()));
    /// assert_eq!(table.find(hash, |s| s == "other"), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let hash = mask_hash(hash);
        let (_, index) = self.locate(hash, eq)?;
        Some(self.item(index))
    }

    /// Returns a mutable reference to the value matching the hash and
    /// equality predicate, if any.
    ///
    /// The caller must not mutate the value in a way that changes its hash
    /// or its equality class, or later lookups will miss it.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let hash = mask_hash(hash);
        let (_, index) = self.locate(hash, eq)?;
        Some(self.item_mut(index))
    }

    /// Returns an iterator over the live values of the table.
    ///
    /// Iteration walks the arena in slot order, skipping freed slots. The
    /// order is arbitrary from the caller's point of view.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.entries.iter(),
        }
    }

    /// Returns an iterator over mutable references to the live values.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.entries.iter_mut(),
        }
    }

    /// Returns an iterator that removes and yields every live value.
    ///
    /// The table's bookkeeping is reset up front, so the table is empty
    /// (with its capacity intact) even if the iterator is dropped before
    /// being exhausted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(0);
    /// for v in 0..5u64 {
    ///     table.entry(v, |&existing| existing == v).or_insert(v);
    /// }
    ///
    /// let mut drained: Vec<u64> = table.drain().collect();
    /// drained.sort();
    /// assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        self.buckets.fill(NIL);
        self.free_list = NIL;
        self.free_count = 0;
        Drain {
            slots: self.entries.drain(..),
        }
    }

    /// Collects chain statistics for the current table state.
    ///
    /// Available in tests and with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_stats(&self) -> ChainStats {
        let histogram = self.chain_histogram();
        let chains = histogram.iter().skip(1).sum::<usize>();
        let max_chain = histogram.len().saturating_sub(1);
        let live = self.len();

        ChainStats {
            capacity: self.capacity(),
            live,
            freed: self.free_count,
            chains,
            max_chain,
            mean_chain: if chains == 0 {
                0.0
            } else {
                live as f64 / chains as f64
            },
            load_factor: if self.capacity() == 0 {
                0.0
            } else {
                live as f64 / self.capacity() as f64
            },
        }
    }

    /// Returns a histogram of chain lengths: index `i` holds the number of
    /// buckets whose chain has exactly `i` entries.
    ///
    /// Available in tests and with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> Vec<usize> {
        let mut histogram = Vec::new();
        for &head in self.buckets.iter() {
            let mut length = 0usize;
            let mut index = head;
            while index != NIL {
                length += 1;
                index = self.entries[index as usize].next;
            }
            if histogram.len() <= length {
                histogram.resize(length + 1, 0);
            }
            histogram[length] += 1;
        }
        histogram
    }

    /// Pretty-print the chain-length histogram.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_chain_histogram(&self) {
        let histogram = self.chain_histogram();
        println!("=== Chain Length Histogram ===");
        for (length, buckets) in histogram.iter().enumerate() {
            if *buckets > 0 {
                println!("{:>4} entries: {} buckets", length, buckets);
            }
        }
    }

    #[inline(always)]
    fn bucket_of(&self, hash: i32) -> usize {
        hash as usize % self.buckets.len()
    }

    /// Walks the home chain of `hash`, returning the predecessor index and
    /// the slot index of the first match.
    fn locate(&self, hash: i32, eq: impl Fn(&V) -> bool) -> Option<(i32, i32)> {
        let mut prev = NIL;
        let mut index = self.buckets[self.bucket_of(hash)];
        while index != NIL {
            let slot = &self.entries[index as usize];
            if slot.hash == hash && slot.item.as_ref().is_some_and(&eq) {
                return Some((prev, index));
            }
            prev = index;
            index = slot.next;
        }
        None
    }

    fn item(&self, index: i32) -> &V {
        self.entries[index as usize]
            .item
            .as_ref()
            .expect("chained slot is live")
    }

    fn item_mut(&mut self, index: i32) -> &mut V {
        self.entries[index as usize]
            .item
            .as_mut()
            .expect("chained slot is live")
    }

    /// Removes the live slot at `index` from its chain and pushes it onto
    /// the free list. `prev` is the slot's chain predecessor, `NIL` when the
    /// slot is the chain head.
    fn unlink(&mut self, bucket: usize, prev: i32, index: i32) -> V {
        let next = self.entries[index as usize].next;
        if prev == NIL {
            self.buckets[bucket] = next;
        } else {
            self.entries[prev as usize].next = next;
        }

        let free_head = self.free_list;
        let slot = &mut self.entries[index as usize];
        slot.hash = NIL;
        slot.next = free_head;
        let item = slot.item.take();
        self.free_list = index;
        self.free_count += 1;
        item.expect("unlinked slot was live")
    }

    /// Grows to the next expanded prime above the current arena length.
    fn grow(&mut self) {
        // entries.len() <= capacity() <= MAX_PRIME, so the cast is lossless
        let capacity =
            expand_prime(self.entries.len() as i32).expect("arena length is non-negative") as usize;
        self.resize(capacity);
    }

    /// Swaps in a bucket array of `new_capacity` heads and re-threads every
    /// live slot onto its new home chain.
    ///
    /// Slots never move, so freed slots keep their `next` links and the free
    /// list comes through a resize untouched.
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.buckets.len());

        let mut buckets = vec![NIL; new_capacity];
        for (index, slot) in self.entries.iter_mut().enumerate() {
            if slot.hash != NIL {
                let bucket = slot.hash as usize % new_capacity;
                slot.next = buckets[bucket];
                buckets[bucket] = index as i32;
            }
        }
        self.buckets = buckets;
        self.entries
            .reserve_exact(new_capacity.saturating_sub(self.entries.len()));
    }
}

#[cfg(test)]
impl<V> HashTable<V> {
    /// Walks every chain and the free list, asserting the structural
    /// invariants: chains hold only live slots stored under their own
    /// bucket, every arena slot is on exactly one list, the free list
    /// length matches `free_count`, and the bucket count is tabulated.
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.buckets.len();
        assert_eq!(
            get_prime(capacity as i32),
            Ok(capacity as i32),
            "capacity {capacity} is not a tabulated prime"
        );

        let mut seen = vec![false; self.entries.len()];
        let mut chained = 0usize;
        for (bucket, &head) in self.buckets.iter().enumerate() {
            let mut index = head;
            while index != NIL {
                let slot = &self.entries[index as usize];
                assert!(slot.hash >= 0, "chained slot {index} is freed");
                assert!(slot.item.is_some(), "chained slot {index} has no item");
                assert_eq!(
                    slot.hash as usize % capacity,
                    bucket,
                    "slot {index} is on the wrong chain"
                );
                assert!(!seen[index as usize], "slot {index} is linked twice");
                seen[index as usize] = true;
                chained += 1;
                index = slot.next;
            }
        }

        let mut freed = 0usize;
        let mut index = self.free_list;
        while index != NIL {
            let slot = &self.entries[index as usize];
            assert_eq!(slot.hash, NIL, "free slot {index} still has a hash");
            assert!(slot.item.is_none(), "free slot {index} still has an item");
            assert!(
                !seen[index as usize],
                "slot {index} is on both a chain and the free list"
            );
            seen[index as usize] = true;
            freed += 1;
            index = slot.next;
        }

        assert_eq!(freed, self.free_count, "free list length != free_count");
        assert_eq!(
            chained + freed,
            self.entries.len(),
            "arena slot unreachable from any list"
        );
        assert_eq!(self.len(), chained);
    }
}

/// A view into a single entry in the table, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - no matching value is present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    ///
    /// If the entry is occupied, returns a mutable reference to the existing
    /// value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    ///
    /// let value = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    /// assert_eq!(value, "key");
    ///
    /// let existing = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("other".to_string());
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    ///
    /// If the entry is occupied, the closure is not called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    ///
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert_with(|| "key".to_string());
    ///
    /// let existing = table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert_with(|| unreachable!("value is already present"));
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry.
    ///
    /// If the entry is occupied, applies the closure to the existing value
    /// and returns a mutable reference to it. If the entry is vacant,
    /// returns `None` without inserting anything.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<u64> = HashTable::with_capacity(10);
    ///
    /// let missing = table.entry(42, |&n| n == 42).and_modify(|n| *n += 1);
    /// assert_eq!(missing, None);
    ///
    /// table.entry(42, |&n| n == 42).or_insert(42);
    /// let modified = table.entry(42, |&n| n == 42).and_modify(|n| *n += 1);
    /// assert_eq!(modified, Some(&mut 43));
    /// ```
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the hash table.
///
/// This struct is created by the [`entry`] method on [`HashTable`] when no
/// matching value is present.
///
/// [`entry`]: HashTable::entry
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: i32,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant entry and returns a mutable reference
    /// to it.
    ///
    /// The freed slot most recently pushed onto the free list is reused when
    /// one exists; otherwise the value is appended to the arena, growing the
    /// bucket array first if the arena is full. The new slot is prepended to
    /// its home chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Vacant(entry) => {
    ///         let value_ref = entry.insert("value".to_string());
    ///         assert_eq!(value_ref, "value");
    ///     }
    ///     Entry::Occupied(_) => unreachable!("entry should be vacant"),
    /// }
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        let index = if table.free_list != NIL {
            let index = table.free_list;
            table.free_list = table.entries[index as usize].next;
            table.free_count -= 1;
            index
        } else {
            if table.entries.len() == table.buckets.len() {
                table.grow();
            }
            let index = table.entries.len() as i32;
            table.entries.push(Slot {
                hash: NIL,
                next: NIL,
                item: None,
            });
            index
        };

        // grow may have swapped the bucket array, so the home bucket is
        // computed only after the slot is acquired
        let bucket = table.bucket_of(self.hash);
        let head = table.buckets[bucket];
        table.buckets[bucket] = index;

        let slot = &mut table.entries[index as usize];
        slot.hash = self.hash;
        slot.next = head;
        slot.item.insert(value)
    }
}

/// A view into an occupied entry in the hash table.
///
/// This struct is created by the [`entry`] method on [`HashTable`] when a
/// matching value is present. It provides methods to access, modify, or
/// remove the existing value.
///
/// [`entry`]: HashTable::entry
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    bucket: usize,
    prev: i32,
    index: i32,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Occupied(entry) => {
    ///         assert_eq!(entry.get(), "key");
    ///     }
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// ```
    pub fn get(&self) -> &V {
        self.table.item(self.index)
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// The value must not be mutated in a way that changes its hash or its
    /// equality class.
    pub fn get_mut(&mut self) -> &mut V {
        self.table.item_mut(self.index)
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        self.table.item_mut(self.index)
    }

    /// Removes the entry from the table and returns the value.
    ///
    /// The chain predecessor recorded during lookup is patched over the
    /// removed slot, and the slot goes onto the free list for reuse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("key");
    /// table
    ///     .entry(hash, |s: &String| s == "key")
    ///     .or_insert("key".to_string());
    ///
    /// match table.entry(hash, |s: &String| s == "key") {
    ///     Entry::Occupied(entry) => {
    ///         assert_eq!(entry.remove(), "key");
    ///     }
    ///     Entry::Vacant(_) => unreachable!(),
    /// }
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(self) -> V {
        self.table.unlink(self.bucket, self.prev, self.index)
    }
}

/// An iterator over the live values of a `HashTable`.
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| slot.item.as_ref())
    }
}

/// An iterator over mutable references to the live values of a `HashTable`.
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| slot.item.as_mut())
    }
}

/// A draining iterator over the live values of a `HashTable`.
pub struct Drain<'a, V> {
    slots: alloc::vec::Drain<'a, Slot<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| slot.item)
    }
}

/// A consuming iterator over the live values of a `HashTable`.
pub struct IntoIter<V> {
    slots: alloc::vec::IntoIter<Slot<V>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| slot.item)
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.entries.into_iter(),
        }
    }
}
