//! LinkedList: singly linked sequence of owned `Node` cells.
//!
//! The head link is the sole root of ownership; no tail pointer is kept, so
//! appending walks the chain. Node references never leave this module:
//! callers go through indices, values, or the iterators below.

use crate::error::{CollectionError, Result};
use crate::node::{Link, Node};
use core::fmt;

pub struct LinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Link that holds position `index`; `index == len` yields the empty
    /// link after the last cell. Callers check `index <= len` first.
    fn link_mut(&mut self, index: usize) -> &mut Link<T> {
        let mut link = &mut self.head;
        for _ in 0..index {
            link = match link {
                Some(node) => &mut node.next,
                None => break,
            };
        }
        link
    }

    fn out_of_range(&self, index: usize) -> CollectionError {
        CollectionError::OutOfRange {
            index,
            len: self.len,
        }
    }

    /// Appends at the tail. O(n).
    pub fn add(&mut self, value: T) {
        let len = self.len;
        *self.link_mut(len) = Some(Node::new(value));
        self.len += 1;
    }

    /// Inserts at the head. O(1).
    pub fn add_first(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Node::with_next(value, next));
        self.len += 1;
    }

    /// Inserts so that the value ends up at `index`; valid for `index <= len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        let link = self.link_mut(index);
        let next = link.take();
        *link = Some(Node::with_next(value, next));
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        self.iter().nth(index).ok_or(self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        let err = self.out_of_range(index);
        self.iter_mut().nth(index).ok_or(err)
    }

    /// Unlinks the cell at `index` and returns its element; valid for `index < len`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }
        let err = self.out_of_range(index);
        let link = self.link_mut(index);
        let (data, next) = link.take().ok_or(err)?.into_parts();
        *link = next;
        self.len -= 1;
        Ok(data)
    }

    /// Index of the first element matching `pred`.
    pub fn position<P>(&self, pred: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(pred)
    }

    pub fn first(&self) -> Result<&T> {
        self.head
            .as_deref()
            .map(|node| &node.data)
            .ok_or(CollectionError::EmptyState)
    }

    /// Walks to the tail. O(n).
    pub fn last(&self) -> Result<&T> {
        self.iter().last().ok_or(CollectionError::EmptyState)
    }

    /// Drops every cell front to back so long chains do not recurse.
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Removes the first element equal to `value`; returns whether one was found.
    pub fn remove_value(&mut self, value: &T) -> bool {
        match self.position(|data| data == value) {
            Some(index) => self.remove(index).is_ok(),
            None => false,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|data| data == value)
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        // Find the tail once, then keep appending behind it.
        let len = self.len;
        let mut link = self.link_mut(len);
        let mut added = 0;
        for value in iter {
            let node = link.insert(Node::new(value));
            link = &mut node.next;
            added += 1;
        }
        self.len += added;
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, data) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{data}")?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over shared references, head to tail.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.data
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Iterator over mutable references, head to tail.
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.data
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator; unlinks cells from the head as it goes.
pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        let list = &mut self.0;
        let (data, next) = list.head.take()?.into_parts();
        list.head = next;
        list.len -= 1;
        Some(data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
