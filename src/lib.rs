//! chained-collections: a growable array, a singly linked list, a
//! separate-chaining hash table and an in-place quicksort, built without
//! leaning on the standard library's containers.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: small, independently checkable structures that a record store
//!   can build on (index records by key, keep them in arrays, sort them
//!   for display).
//! - Layers:
//!   - Node<T>: one owned cell of a chain; crate-private.
//!   - LinkedList<T>: head-rooted chain of Nodes with positional and
//!     value-based mutation. No tail pointer, so appends walk the chain.
//!   - DynamicArray<E>: boxed slot buffer with 1.5x growth that never
//!     shrinks; the crate's snapshot/return type.
//!   - HashTable<K, V, S>: boxed slice of LinkedList buckets; front
//!     insertion, rehash to `2c + 1` buckets past load factor 0.7.
//!   - sort: Hoare quicksort with a middle pivot over slices, plus an
//!     adapter that sorts a DynamicArray in place.
//!
//! Constraints
//! - Single-threaded and synchronous: no interior mutability, no locking.
//! - Mutators validate before mutating; a returned error means nothing
//!   changed.
//! - Node references never escape the list; callers use indices, values
//!   or iterators.
//! - `keys()`/`values()`/`to_array()` return detached snapshots.
//!
//! Hashing
//! - `HashStrategy::SumOfCodepoints` (default) sums the code points of text
//!   keys and is deliberately weak: anagrams collide. Non-text keys and
//!   the `Structural` strategy go through the table's `BuildHasher`.
//! - `contains_key` scans the bucket, so a key mapped to a `None` value is
//!   still reported present.
//!
//! Absent values
//! - Keys, arrays and indices cannot be null here. Callers needing absent
//!   elements or values store `Option<T>`; equality-based queries then
//!   match `None` against `None`.
//!
//! Logging
//! - With the `log` feature, buffer growth, rehash and clear emit
//!   `trace`/`debug` records.

pub mod dynamic_array;
pub mod error;
pub mod hash_table;
mod hash_table_proptest;
pub mod linked_list;
mod node;
pub mod sort;

// Public surface
pub use dynamic_array::DynamicArray;
pub use error::{CollectionError, Result};
pub use hash_table::{HashStrategy, HashTable, Structure, TableKey};
pub use linked_list::LinkedList;
pub use sort::{sort, sort_natural, sort_reverse, sort_slice};
