//! DynamicArray: contiguous, index-addressable sequence with 1.5x growth.
//!
//! Backing storage is a boxed slice of `Option<E>` slots sized to the
//! capacity. Slots in `[0, len)` are always `Some`; slots in
//! `[len, capacity)` are always `None`, so removed or cleared elements are
//! dropped immediately instead of lingering in the buffer.

use crate::error::{CollectionError, Result};
use core::fmt;

/// Capacity used by [`DynamicArray::new`].
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Clone)]
pub struct DynamicArray<E> {
    slots: Box<[Option<E>]>,
    len: usize,
}

fn empty_slots<E>(capacity: usize) -> Box<[Option<E>]> {
    core::iter::repeat_with(|| None).take(capacity).collect()
}

impl<E> DynamicArray<E> {
    pub fn new() -> Self {
        Self {
            slots: empty_slots(DEFAULT_CAPACITY),
            len: 0,
        }
    }

    /// Creates an empty array with room for `capacity` elements.
    ///
    /// Fails with `InvalidArgument` when `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CollectionError::InvalidArgument(
                "capacity must be positive",
            ));
        }
        Ok(Self {
            slots: empty_slots(capacity),
            len: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn out_of_range(&self, index: usize) -> CollectionError {
        CollectionError::OutOfRange {
            index,
            len: self.len,
        }
    }

    /// Reallocates to `ceil(capacity * 1.5)` and moves the live elements over.
    fn grow(&mut self) {
        let old = self.capacity();
        let new = old + old.div_ceil(2);
        #[cfg(feature = "log")]
        log::trace!("DynamicArray::grow {} -> {}", old, new);
        let mut slots = empty_slots(new);
        for (dst, src) in slots.iter_mut().zip(self.slots[..self.len].iter_mut()) {
            *dst = src.take();
        }
        self.slots = slots;
    }

    /// Appends at the end. Amortized O(1).
    pub fn add(&mut self, value: E) {
        if self.len == self.capacity() {
            self.grow();
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Inserts at `index`, shifting later elements right; valid for `index <= len`.
    pub fn insert(&mut self, index: usize, value: E) -> Result<()> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        if self.len == self.capacity() {
            self.grow();
        }
        // slots[len] is None; rotating it down to `index` shifts the rest right.
        self.slots[index..=self.len].rotate_right(1);
        self.slots[index] = Some(value);
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&E> {
        self.slots[..self.len]
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut E> {
        let err = self.out_of_range(index);
        self.slots[..self.len]
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or(err)
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: E) -> Result<E> {
        let slot = self.get_mut(index)?;
        Ok(core::mem::replace(slot, value))
    }

    /// Removes the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Result<E> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        let removed = self.slots[index].take().ok_or(self.out_of_range(index))?;
        // The emptied slot travels to the end of the live range.
        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;
        Ok(removed)
    }

    /// Empties every slot. Capacity is kept.
    pub fn clear(&mut self) {
        for slot in self.slots[..self.len].iter_mut() {
            *slot = None;
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            it: self.slots[..self.len].iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, E> {
        IterMut {
            it: self.slots[..self.len].iter_mut(),
        }
    }

    /// Live slot range for the in-place sort adapter.
    pub(crate) fn live_slots_mut(&mut self) -> &mut [Option<E>] {
        &mut self.slots[..self.len]
    }

    /// Overwrites the leading elements with `items`, stopping at whichever
    /// runs out first. Length never changes.
    pub fn from_array<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = E>,
    {
        for (slot, item) in self.slots[..self.len].iter_mut().zip(items) {
            *slot = Some(item);
        }
    }
}

impl<E: Clone> DynamicArray<E> {
    /// Detached copy of the live elements.
    pub fn to_array(&self) -> Box<[E]> {
        self.iter().cloned().collect()
    }
}

impl<E: PartialEq> DynamicArray<E> {
    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &E) -> Option<usize> {
        self.iter().position(|e| e == value)
    }

    pub fn contains(&self, value: &E) -> bool {
        self.index_of(value).is_some()
    }

    /// Removes the first element equal to `value`; returns whether one was found.
    pub fn remove_value(&mut self, value: &E) -> bool {
        match self.index_of(value) {
            Some(index) => self.remove(index).is_ok(),
            None => false,
        }
    }
}

impl<E> Default for DynamicArray<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PartialEq> PartialEq for DynamicArray<E> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<E: Eq> Eq for DynamicArray<E> {}

impl<E> Extend<E> for DynamicArray<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<E> FromIterator<E> for DynamicArray<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut array = DynamicArray::new();
        array.extend(iter);
        array
    }
}

impl<E: fmt::Debug> fmt::Debug for DynamicArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for DynamicArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        f.write_str("]")
    }
}

/// Iterator over the live elements.
pub struct Iter<'a, E> {
    it: core::slice::Iter<'a, Option<E>>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().and_then(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<E> DoubleEndedIterator for Iter<'_, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back().and_then(Option::as_ref)
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

/// Iterator over mutable references to the live elements.
pub struct IterMut<'a, E> {
    it: core::slice::IterMut<'a, Option<E>>,
}

impl<'a, E> Iterator for IterMut<'a, E> {
    type Item = &'a mut E;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().and_then(Option::as_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<E> ExactSizeIterator for IterMut<'_, E> {}

impl<'a, E> IntoIterator for &'a DynamicArray<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;
    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

impl<'a, E> IntoIterator for &'a mut DynamicArray<E> {
    type Item = &'a mut E;
    type IntoIter = IterMut<'a, E>;
    fn into_iter(self) -> IterMut<'a, E> {
        self.iter_mut()
    }
}
