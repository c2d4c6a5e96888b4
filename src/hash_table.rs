//! HashTable: separate-chaining map over a boxed slice of `LinkedList` buckets.
//!
//! New keys are linked at the front of their bucket. After an insertion
//! pushes `len / capacity` above [`MAX_LOAD_FACTOR`], the table rehashes
//! into `capacity * 2 + 1` buckets by replaying every entry through the
//! same placement routine `put` uses.
//!
//! Bucket selection is `hash(key) % capacity`, where `hash` depends on the
//! table's [`HashStrategy`]:
//! - `SumOfCodepoints`: text keys hash to the sum of their code points, so
//!   anagrams share a bucket. Non-text keys use the structural hash.
//! - `Structural`: every key goes through the table's `BuildHasher`.

use crate::dynamic_array::DynamicArray;
use crate::error::{CollectionError, Result};
use crate::linked_list::{self, LinkedList};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::borrow::Cow;
use std::collections::hash_map::RandomState;
use std::rc::Rc;
use std::sync::Arc;

/// Bucket count used by [`HashTable::new`]. Prime, to spread weak hashes.
pub const DEFAULT_CAPACITY: usize = 101;

/// Load factor above which an insertion triggers a rehash.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

/// How keys are turned into bucket indices.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HashStrategy {
    /// Text keys sum their code points; other keys hash structurally.
    #[default]
    SumOfCodepoints,
    /// All keys hash through the table's `BuildHasher`.
    Structural,
}

/// Key types usable in a [`HashTable`].
///
/// Text-like keys return their contents from `as_text` so the
/// `SumOfCodepoints` strategy can see them. A type and anything it is
/// `Borrow`ed as must agree on `as_text`, just as they must agree on `Hash`.
pub trait TableKey: Eq + Hash {
    fn as_text(&self) -> Option<&str> {
        None
    }
}

impl TableKey for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TableKey for String {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TableKey for Box<str> {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TableKey for Rc<str> {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TableKey for Arc<str> {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TableKey for Cow<'_, str> {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: TableKey + ?Sized> TableKey for &T {
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}

macro_rules! structural_keys {
    ($($t:ty),* $(,)?) => {
        $(impl TableKey for $t {})*
    };
}

structural_keys!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool, ()
);

/// Wrapping sum of the key's Unicode scalar values.
pub fn sum_of_codepoints(text: &str) -> u64 {
    text.chars()
        .fold(0u64, |total, c| total.wrapping_add(u64::from(u32::from(c))))
}

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

type Bucket<K, V> = LinkedList<Entry<K, V>>;

fn empty_buckets<K, V>(capacity: usize) -> Box<[Bucket<K, V>]> {
    core::iter::repeat_with(LinkedList::new)
        .take(capacity)
        .collect()
}

pub struct HashTable<K, V, S = RandomState> {
    buckets: Box<[Bucket<K, V>]>,
    len: usize,
    strategy: HashStrategy,
    hasher: S,
}

impl<K, V> HashTable<K, V>
where
    K: TableKey,
{
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Fails with `InvalidArgument` when `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_strategy_and_hasher(
            capacity,
            HashStrategy::default(),
            RandomState::new(),
        )
    }

    pub fn with_strategy(strategy: HashStrategy) -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
            strategy,
            hasher: RandomState::new(),
        }
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: TableKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: TableKey,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
            strategy: HashStrategy::default(),
            hasher,
        }
    }

    pub fn with_capacity_strategy_and_hasher(
        capacity: usize,
        strategy: HashStrategy,
        hasher: S,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CollectionError::InvalidArgument(
                "bucket count must be positive",
            ));
        }
        Ok(Self {
            buckets: empty_buckets(capacity),
            len: 0,
            strategy,
            hasher,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn strategy(&self) -> HashStrategy {
        self.strategy
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Entry count of every bucket, in bucket order.
    pub fn chain_lengths(&self) -> DynamicArray<usize> {
        self.buckets.iter().map(LinkedList::len).collect()
    }

    /// Snapshot of the bucket layout; its `Display` renders one line per
    /// occupied bucket followed by the empty-bucket count and longest chain.
    pub fn structure(&self) -> Structure {
        Structure {
            len: self.len,
            chain_lengths: self.chain_lengths(),
        }
    }

    fn make_hash<Q>(&self, key: &Q) -> u64
    where
        Q: ?Sized + TableKey,
    {
        match (self.strategy, key.as_text()) {
            (HashStrategy::SumOfCodepoints, Some(text)) => sum_of_codepoints(text),
            _ => self.hasher.hash_one(key),
        }
    }

    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + TableKey,
    {
        (self.make_hash(key) % self.capacity() as u64) as usize
    }

    /// Inserts or overwrites. Returns the previous value for an existing key.
    ///
    /// A new key is linked at the front of its bucket; if that lifts the
    /// load factor above [`MAX_LOAD_FACTOR`] the table rehashes before
    /// returning.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.place(key, value);
        if previous.is_none() && self.load_factor() > MAX_LOAD_FACTOR {
            self.rehash();
        }
        previous
    }

    fn place(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];
        if let Some(entry) = chain.iter_mut().find(|e| e.key == key) {
            return Some(core::mem::replace(&mut entry.value, value));
        }
        chain.add_first(Entry { key, value });
        self.len += 1;
        None
    }

    fn rehash(&mut self) {
        let new_capacity = self.capacity() * 2 + 1;
        #[cfg(feature = "log")]
        log::debug!(
            "HashTable::rehash {} -> {} buckets ({} entries)",
            self.capacity(),
            new_capacity,
            self.len
        );
        let old = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.len = 0;
        for chain in old.into_vec() {
            for Entry { key, value } in chain {
                self.place(key, value);
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|e| e.key.borrow() == key)
            .map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|e| e.key.borrow() == key)
            .map(|e| &mut e.value)
    }

    /// Presence check by bucket scan; a key mapped to `None` still counts.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        self.buckets[self.bucket_index(key)]
            .iter()
            .any(|e| e.key.borrow() == key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        let index = self.bucket_index(key);
        let chain = &mut self.buckets[index];
        let position = chain.position(|e| e.key.borrow() == key)?;
        let entry = chain.remove(position).ok()?;
        self.len -= 1;
        Some(entry.value)
    }

    /// Empties every bucket. The bucket count is kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "log")]
        log::trace!("HashTable::clear {} entries", self.len);
        for chain in self.buckets.iter_mut() {
            chain.clear();
        }
        self.len = 0;
    }

    /// Every entry sits in the bucket its key hashes to under the current capacity.
    #[cfg(test)]
    pub(crate) fn entries_are_placed(&self) -> bool {
        self.buckets.iter().enumerate().all(|(index, chain)| {
            chain
                .iter()
                .all(|entry| self.bucket_index(&entry.key) == index)
        })
    }

    /// Entries in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: TableKey + Clone,
    S: BuildHasher,
{
    /// Snapshot of the keys in bucket-then-chain order.
    pub fn keys(&self) -> DynamicArray<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: TableKey,
    V: Clone,
    S: BuildHasher,
{
    /// Snapshot of the values in bucket-then-chain order.
    pub fn values(&self) -> DynamicArray<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: TableKey + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Bucket occupancy captured by [`HashTable::structure`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    len: usize,
    chain_lengths: DynamicArray<usize>,
}

impl Structure {
    pub fn capacity(&self) -> usize {
        self.chain_lengths.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn chain_lengths(&self) -> &DynamicArray<usize> {
        &self.chain_lengths
    }

    pub fn empty_buckets(&self) -> usize {
        self.chain_lengths.iter().filter(|&&n| n == 0).count()
    }

    pub fn max_chain_length(&self) -> usize {
        self.chain_lengths.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "capacity: {}", self.capacity())?;
        writeln!(f, "size: {}", self.len)?;
        writeln!(f, "load factor: {:.2}", self.load_factor())?;
        for (bucket, &n) in self.chain_lengths.iter().enumerate() {
            if n > 0 {
                writeln!(f, "bucket {bucket}: {n} entries")?;
            }
        }
        writeln!(f, "empty buckets: {}", self.empty_buckets())?;
        write!(f, "max chain length: {}", self.max_chain_length())
    }
}

/// Iterator over `(key, value)` pairs in bucket-then-chain order.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Bucket<K, V>>,
    chain: Option<linked_list::Iter<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S>
where
    K: TableKey,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::hash::Hasher;

    fn small_table() -> HashTable<String, String> {
        HashTable::with_capacity(10).unwrap()
    }

    /// Invariant: distinct keys round-trip; missing keys report `None`.
    #[test]
    fn basic_put_and_get() {
        let mut t = small_table();
        t.put("John".to_string(), "Politician1".to_string());
        t.put("Mary".to_string(), "Politician2".to_string());
        t.put("James".to_string(), "Politician3".to_string());

        assert_eq!(t.get("John").map(String::as_str), Some("Politician1"));
        assert_eq!(t.get("Mary").map(String::as_str), Some("Politician2"));
        assert_eq!(t.get("James").map(String::as_str), Some("Politician3"));
        assert!(t.get("NonExistent").is_none());
        assert_eq!(t.len(), 3);
    }

    /// Invariant: putting an existing key overwrites in place without growing.
    #[test]
    fn duplicate_put_updates_value() {
        let mut t = small_table();
        assert_eq!(t.put("k".to_string(), "v1".to_string()), None);
        assert_eq!(t.put("k".to_string(), "v2".to_string()), Some("v1".to_string()));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("k").map(String::as_str), Some("v2"));
    }

    /// Invariant: anagrams share a bucket under the code point sum yet stay
    /// independently retrievable; newest key sits at the chain front.
    #[test]
    fn anagrams_collide_and_resolve() {
        assert_eq!(sum_of_codepoints("CAT"), 216);
        assert_eq!(sum_of_codepoints("ACT"), 216);
        assert_eq!(sum_of_codepoints("TAC"), 216);

        let mut t: HashTable<&str, i32> = HashTable::new();
        t.put("CAT", 1);
        t.put("ACT", 2);
        t.put("TAC", 3);
        let index = t.bucket_index("CAT");
        assert_eq!(index, t.bucket_index("ACT"));
        assert_eq!(index, t.bucket_index("TAC"));
        assert_eq!(t.buckets[index].len(), 3);
        assert_eq!(t.buckets[index].first().map(|e| e.key), Ok("TAC"));

        assert_eq!(t.get("CAT"), Some(&1));
        assert_eq!(t.get("ACT"), Some(&2));
        assert_eq!(t.get("TAC"), Some(&3));
        assert_eq!(t.len(), 3);
    }

    /// Invariant: crossing the 0.7 load factor grows to `2c + 1` and keeps
    /// every mapping.
    #[test]
    fn rehash_preserves_entries() {
        let mut t: HashTable<String, usize> = HashTable::with_capacity(10).unwrap();
        for i in 0..7 {
            t.put(format!("key{i}"), i);
        }
        assert_eq!(t.capacity(), 10);
        assert!((t.load_factor() - 0.7).abs() < f64::EPSILON);
        t.put("key7".to_string(), 7);
        assert_eq!(t.capacity(), 21);
        for i in 0..8 {
            assert_eq!(t.get(format!("key{i}").as_str()), Some(&i));
        }
        assert_eq!(t.len(), 8);
        assert!(t.load_factor() <= MAX_LOAD_FACTOR);
    }

    /// Invariant: overwriting never rehashes.
    #[test]
    fn overwrite_does_not_rehash() {
        let mut t: HashTable<u32, u32> = HashTable::with_capacity(1).unwrap();
        t.put(1, 1);
        assert_eq!(t.capacity(), 3);
        t.put(1, 2);
        t.put(1, 3);
        assert_eq!(t.capacity(), 3);
        assert_eq!(t.len(), 1);
    }

    /// Invariant: remove unlinks the entry and returns its value once.
    #[test]
    fn remove_returns_value_once() {
        let mut t = small_table();
        t.put("a".to_string(), "1".to_string());
        t.put("b".to_string(), "2".to_string());
        assert_eq!(t.remove("a"), Some("1".to_string()));
        assert_eq!(t.remove("a"), None);
        assert!(!t.contains_key("a"));
        assert!(t.contains_key("b"));
        assert_eq!(t.len(), 1);
    }

    /// Invariant: a key mapped to `None` is present, unlike a missing key.
    #[test]
    fn contains_key_distinguishes_none_value() {
        let mut t: HashTable<&str, Option<i32>> = HashTable::new();
        t.put("absent-value", None);
        assert!(t.contains_key("absent-value"));
        assert_eq!(t.get("absent-value"), Some(&None));
        assert!(!t.contains_key("missing"));
    }

    /// Invariant: clear empties the table but keeps the bucket count.
    #[test]
    fn clear_keeps_capacity() {
        let mut t: HashTable<i32, i32> = HashTable::new();
        for i in 0..100 {
            t.put(i, i);
        }
        let cap = t.capacity();
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.capacity(), cap);
        assert_eq!(t.load_factor(), 0.0);
        assert!(t.get(&5).is_none());
        t.put(5, 50);
        assert_eq!(t.get(&5), Some(&50));
    }

    /// Invariant: keys/values are detached snapshots covering every entry.
    #[test]
    fn keys_and_values_snapshots() {
        let mut t: HashTable<String, i32> = HashTable::new();
        for (i, k) in ["x", "y", "z"].iter().enumerate() {
            t.put((*k).to_string(), i as i32);
        }
        let mut keys = t.keys();
        let values = t.values();
        assert_eq!(keys.len(), 3);
        let set: BTreeSet<String> = keys.iter().cloned().collect();
        let expected: BTreeSet<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set, expected);
        let vs: BTreeSet<i32> = values.iter().copied().collect();
        assert_eq!(vs, BTreeSet::from([0, 1, 2]));

        keys.clear();
        assert_eq!(t.len(), 3);
        let values = t.values();
        for ((_, a), b) in t.iter().zip(values.iter()) {
            assert_eq!(a, b);
        }
    }

    /// Invariant: anagrams under the code point sum share one chain, and the
    /// structure report counts it.
    #[test]
    fn anagram_cluster_shows_in_chain_lengths() {
        let mut t: HashTable<&str, i32> = HashTable::new();
        t.put("CAT", 1);
        t.put("ACT", 2);
        t.put("TAC", 3);
        let lengths = t.chain_lengths();
        assert_eq!(lengths.len(), DEFAULT_CAPACITY);
        assert_eq!(lengths.iter().filter(|&&n| n > 0).count(), 1);
        assert_eq!(lengths.get(216 % DEFAULT_CAPACITY), Ok(&3));

        let structure = t.structure();
        assert_eq!(structure.len(), 3);
        assert_eq!(structure.empty_buckets(), DEFAULT_CAPACITY - 1);
        assert_eq!(structure.max_chain_length(), 3);
        assert_eq!(
            structure.to_string(),
            "capacity: 101\nsize: 3\nload factor: 0.03\nbucket 14: 3 entries\n\
             empty buckets: 100\nmax chain length: 3"
        );
    }

    #[test]
    fn empty_table_structure() {
        let t: HashTable<String, i32> = HashTable::with_capacity(3).unwrap();
        let structure = t.structure();
        assert!(structure.is_empty());
        assert_eq!(structure.capacity(), 3);
        assert_eq!(structure.empty_buckets(), 3);
        assert_eq!(structure.max_chain_length(), 0);
    }

    /// Invariant: keys/values follow bucket order, then front-to-back chain order.
    #[test]
    fn snapshot_order_is_bucket_then_chain() {
        let mut t: HashTable<u8, char, IdentityState> =
            HashTable::with_capacity_strategy_and_hasher(5, HashStrategy::Structural, IdentityState)
                .unwrap();
        t.put(1, 'a');
        t.put(5, 'b');
        t.put(0, 'c');
        assert_eq!(t.capacity(), 5);
        let keys: Vec<u8> = t.keys().iter().copied().collect();
        assert_eq!(keys, vec![0, 5, 1]);
        let values: Vec<char> = t.values().iter().copied().collect();
        assert_eq!(values, vec!['c', 'b', 'a']);
    }

    /// Invariant: the structural strategy routes text keys through the hasher.
    #[test]
    fn structural_strategy_uses_hasher() {
        let mut t: HashTable<String, i32> = HashTable::with_strategy(HashStrategy::Structural);
        assert_eq!(t.strategy(), HashStrategy::Structural);
        t.put("CAT".to_string(), 1);
        t.put("ACT".to_string(), 2);
        assert_eq!(t.get("CAT"), Some(&1));
        assert_eq!(t.get("ACT"), Some(&2));
        let expected = (t.hasher.hash_one("CAT") % t.capacity() as u64) as usize;
        assert_eq!(t.bucket_index("CAT"), expected);
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            HashTable::<String, i32>::with_capacity(0).err(),
            Some(CollectionError::InvalidArgument("bucket count must be positive"))
        );
    }

    #[test]
    fn get_mut_updates_value() {
        let mut t: HashTable<String, Vec<i32>> = HashTable::new();
        t.put("list".to_string(), vec![1]);
        t.get_mut("list").unwrap().push(2);
        assert_eq!(t.get("list"), Some(&vec![1, 2]));
        assert!(t.get_mut("other").is_none());
    }

    #[test]
    fn debug_renders_as_map() {
        let mut t: HashTable<&str, i32> = HashTable::with_capacity(3).unwrap();
        t.put("a", 1);
        assert_eq!(format!("{:?}", t), "{\"a\": 1}");
    }

    /// `BuildHasher` whose hash is the last integer written, for predictable buckets.
    #[derive(Clone, Default)]
    struct IdentityState;
    struct IdentityHasher(u64);
    impl BuildHasher for IdentityState {
        type Hasher = IdentityHasher;
        fn build_hasher(&self) -> Self::Hasher {
            IdentityHasher(0)
        }
    }
    impl Hasher for IdentityHasher {
        fn write(&mut self, bytes: &[u8]) {
            for b in bytes {
                self.0 = (self.0 << 8) | u64::from(*b);
            }
        }
        fn finish(&self) -> u64 {
            self.0
        }
    }
}
