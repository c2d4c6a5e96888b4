#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can inspect
// bucket placement directly.

use crate::hash_table::{HashStrategy, HashTable, TableKey, MAX_LOAD_FACTOR};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::hash_map::RandomState;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}
impl TableKey for Key {
    fn as_text(&self) -> Option<&str> {
        Some(&self.0)
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    // Upper-case letters only, so anagram collisions under the code point sum are common.
    proptest::collection::vec("[A-D]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[A-D]{0,4}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the previous value exactly when the model had the key.
// - `get`/`contains_key` parity with the model, including borrowed `&str` lookups.
// - `remove` returns the model's value once and then `None`.
// - `iter`/`keys`/`values` cover each live entry exactly once.
// - `len` parity, load factor bounded by 0.7, every entry in its hashed bucket.
fn run_scenario<S: BuildHasher>(
    mut sut: HashTable<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let initial_capacity = sut.capacity();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(&pool, i);
                let capacity = sut.capacity();
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
                if prev.is_some() {
                    prop_assert_eq!(sut.capacity(), capacity, "overwrite must not rehash");
                }
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.remove(k.0.as_str()), model.remove(&k));
                prop_assert!(sut.remove(&k).is_none());
            }
            OpI::Get(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
                prop_assert_eq!(sut.get(k.0.as_str()), model.get(&k));
            }
            OpI::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(&pool, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence must match the model"),
                }
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().map(|(k, _)| k.clone()).collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys.len(), sut.len());
                prop_assert_eq!(&s_keys, &m_keys);

                let snapshot_keys: BTreeSet<_> = sut.keys().iter().cloned().collect();
                prop_assert_eq!(&snapshot_keys, &m_keys);

                let mut s_values: Vec<i32> = sut.values().iter().copied().collect();
                let mut m_values: Vec<i32> = model.values().copied().collect();
                s_values.sort_unstable();
                m_values.sort_unstable();
                prop_assert_eq!(s_values, m_values);
            }
            OpI::Clear => {
                let capacity = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), capacity);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.load_factor() <= MAX_LOAD_FACTOR);
        prop_assert!(sut.capacity() >= initial_capacity);
        prop_assert!(sut.entries_are_placed(), "entry outside its hashed bucket");
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_sum_of_codepoints((pool, ops) in arb_scenario()) {
        let sut: HashTable<Key, i32> = HashTable::with_capacity(1).unwrap();
        run_scenario(sut, pool, ops)?;
    }

    #[test]
    fn prop_state_machine_structural((pool, ops) in arb_scenario()) {
        let sut: HashTable<Key, i32, RandomState> = HashTable::with_capacity_strategy_and_hasher(
            3,
            HashStrategy::Structural,
            RandomState::new(),
        )
        .unwrap();
        run_scenario(sut, pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain scanning.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above with every key in
// bucket zero, so all lookups resolve purely by key equality.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = HashTable::with_capacity_strategy_and_hasher(
            7,
            HashStrategy::Structural,
            ConstBuildHasher,
        )
        .unwrap();
        run_scenario(sut, pool, ops)?;
    }
}
