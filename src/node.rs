//! Node: one cell of a singly linked chain.

/// Owning link to the next cell. `None` terminates the chain.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A cell is owned by exactly one predecessor link (or the list head).
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) next: Link<T>,
}

impl<T> Node<T> {
    pub(crate) fn new(data: T) -> Box<Self> {
        Self::with_next(data, None)
    }

    pub(crate) fn with_next(data: T, next: Link<T>) -> Box<Self> {
        Box::new(Node { data, next })
    }

    /// Unlinks the cell, handing back its element and the rest of the chain.
    #[allow(clippy::boxed_local)]
    pub(crate) fn into_parts(self: Box<Self>) -> (T, Link<T>) {
        let Node { data, next } = *self;
        (data, next)
    }
}
